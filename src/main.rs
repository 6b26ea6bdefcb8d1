use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use polyarea::config::FileConfig;
use polyarea::domain::Coordinate;
use polyarea::geometry::AreaMethod;
use polyarea::location::{
    FixedLocation, LocationProvider, Permission, PermissionPolicy, PermissionRationale,
    prompt_permission,
};
use polyarea::render::write_geojson;
use polyarea::screen::{MapScreen, ScreenHost};

/// Draw polygons on a map and measure their surface area
///
/// Commands are read from stdin (or --script), one per line:
///   draw | tap <lon> <lat> | complete | locate | moved <lon> <lat>
///   list | close | button <label> | show | export <path> | quit
///
/// Examples:
///   # Measure a triangle interactively
///   polyarea
///
///   # Replay a recorded session and keep the finished map as GeoJSON
///   polyarea --script field.txt --geojson field.geojson
///
///   # Start at a known position and allow only five polygons
///   polyarea --lon -122.4194 --lat 37.7749 --capacity 5
#[derive(Parser, Debug)]
#[command(name = "polyarea")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches polyarea.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short = 's', long)]
    script: Option<PathBuf>,

    /// Write the final map overlay as GeoJSON
    #[arg(short = 'g', long)]
    geojson: Option<PathBuf>,

    /// Maximum number of polygons kept on the map
    #[arg(short = 'n', long)]
    capacity: Option<usize>,

    /// Area formula
    #[arg(long, value_enum)]
    area_method: Option<AreaMethod>,

    /// How the location permission request is answered
    #[arg(long, value_enum)]
    permission: Option<PermissionPolicy>,

    /// Latitude of a fixed device position (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of a fixed device position (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut file_config = match &args.config {
        Some(config_path) => FileConfig::from_path(config_path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);

    if let Some(capacity) = args.capacity {
        file_config.capacity = capacity;
    }
    if let Some(method) = args.area_method {
        file_config.area_method = method;
    }
    if let Some(policy) = args.permission {
        file_config.location.permission = policy;
    }

    let settings = file_config
        .session_settings()
        .context("Invalid session settings")?;
    let camera = file_config
        .camera_defaults()
        .context("Invalid camera settings")?;
    let request = file_config.location_request();

    let provider = match (args.lon, args.lat) {
        (Some(lon), Some(lat)) => {
            let coordinate = Coordinate::new(lon, lat);
            if !coordinate.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
                bail!("--lon/--lat out of range: ({}, {})", lon, lat);
            }
            LocationProvider::Fixed(FixedLocation::new(coordinate))
        }
        _ => file_config
            .location_provider()
            .context("Invalid location settings")?,
    };

    println!("polyarea - Polygon Area Map");
    println!("===========================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Capacity: {} polygons", settings.capacity);
        println!("  Area method: {:?}", settings.area_method);
        println!(
            "  Camera: ({:.4}, {:.4}) zoom {}",
            camera.center.lon, camera.center.lat, camera.zoom
        );
        println!("  Location provider: {:?}", file_config.location.provider);
        println!(
            "  Location timeout: {}s, maximum age: {}ms",
            request.timeout.as_secs(),
            request.maximum_age.as_millis()
        );
        if let Some(ref script) = args.script {
            println!("  Script: {}", script.display());
        }
        println!();
    }

    let mut stdin = BufReader::new(tokio::io::stdin());
    let permission = match file_config.location.permission {
        PermissionPolicy::Granted => Permission::Granted,
        PermissionPolicy::Denied => Permission::Denied,
        PermissionPolicy::Prompt => {
            let mut stderr = tokio::io::stderr();
            prompt_permission(&PermissionRationale::default(), &mut stdin, &mut stderr)
                .await
                .context("Failed to ask for location permission")?
        }
    };

    let wants_location =
        permission == Permission::Granted && !matches!(provider, LocationProvider::None);
    let screen = MapScreen::new(settings, camera);
    let mut host = ScreenHost::new(screen, provider, request);
    if wants_location {
        host = host.with_spinner(create_spinner("Acquiring location..."));
    }

    let mut out = std::io::stdout();
    match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            host.run(permission, BufReader::new(file), &mut out).await?;
        }
        None => host.run(permission, stdin, &mut out).await?,
    }

    let screen = host.into_screen();

    if let Some(ref path) = args.geojson {
        write_geojson(path, &screen.overlay()).context("Failed to write GeoJSON file")?;
        println!("Output: {}", path.display());
    }

    println!();
    let list = screen.polygon_list();
    println!(
        "{} of {} polygon(s) drawn",
        list.rows.len(),
        screen.settings().capacity
    );
    print!("{list}");

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
