use std::fmt;

use crate::session::ScreenState;

/// One card in the polygon list
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRow {
    pub title: String,
    pub acres: Option<f64>,
}

impl PolygonRow {
    pub fn area_label(&self) -> String {
        match self.acres {
            Some(acres) => format!("Area: {acres:.2} acres"),
            None => "Area: N/A acres".to_string(),
        }
    }
}

/// Read-only, dismissible list of finalized polygons in drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonList {
    pub visible: bool,
    pub rows: Vec<PolygonRow>,
}

impl PolygonList {
    pub fn from_state(state: &ScreenState) -> Self {
        let rows = state
            .areas()
            .enumerate()
            .map(|(i, area)| PolygonRow {
                title: format!("Polygon {}", i + 1),
                acres: area.acres.is_finite().then_some(area.acres),
            })
            .collect();

        Self {
            visible: state.is_list_visible(),
            rows,
        }
    }
}

impl fmt::Display for PolygonList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "  (no polygons)")?;
        }
        for row in &self.rows {
            writeln!(f, "  {}", row.title)?;
            writeln!(f, "    {}", row.area_label())?;
        }
        Ok(())
    }
}
