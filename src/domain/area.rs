/// Square meters in one acre, as used for every acreage shown to the user
pub const SQUARE_METERS_PER_ACRE: f64 = 4046.86;

/// Surface area of a drawn polygon in both units the screen displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub square_meters: f64,
    pub acres: f64,
}

impl Area {
    pub fn from_square_meters(square_meters: f64) -> Self {
        Self {
            square_meters,
            acres: square_meters / SQUARE_METERS_PER_ACRE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acre_conversion_is_exact_division() {
        for sqm in [0.0, 1.0, 4046.86, 123_456.789, 1.5e10] {
            let area = Area::from_square_meters(sqm);
            assert_eq!(area.acres, sqm / 4046.86);
            assert_eq!(area.square_meters, sqm);
        }
    }

    #[test]
    fn test_one_acre() {
        let area = Area::from_square_meters(SQUARE_METERS_PER_ACRE);
        assert_eq!(area.acres, 1.0);
    }
}
