//! Generate command handler
//!
//! Picks a place, frames it on the headless map and submits the poster.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{get_resolver, LocationCandidate, Resolver};
use crate::poster::{available_layers, available_paper_sizes, parse_layers, PaperSize, PosterApi};
use crate::session::PosterSession;
use clap::Args;
use tracing::info;

/// Generate command arguments
#[derive(Args)]
pub struct GenerateArgs {
    /// Place to search for
    #[arg(long, short = 'l', conflicts_with_all = ["lat", "lng"])]
    pub location: Option<String>,

    /// Which suggestion to use (1-based)
    #[arg(long, default_value_t = 1)]
    pub pick: usize,

    /// Latitude
    #[arg(long, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat")]
    pub lng: Option<f64>,

    /// Zoom the map after navigating; the radius follows the view
    #[arg(long, short = 'z')]
    pub zoom: Option<u8>,

    /// Poster theme
    #[arg(long, short = 't')]
    pub theme: Option<String>,

    /// Radius in meters (overrides the map)
    #[arg(long, short = 'd')]
    pub distance: Option<u32>,

    /// Comma-separated layers
    #[arg(long)]
    pub layers: Option<String>,

    /// Paper aspect ratio, e.g. 3:4
    #[arg(long, short = 'p')]
    pub paper_size: Option<String>,

    /// Print the request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the generate command
pub async fn run(args: GenerateArgs) -> Result<()> {
    let config = Config::load()?;
    let mut session = PosterSession::headless(get_resolver(&config)?, &config);

    let place = choose_place(&mut session, &args).await?;
    eprintln!("Using: {}", place.display_name());

    apply_overrides(&mut session, &args).await?;
    let request = session.submission()?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&request)?);
        return Ok(());
    }

    let api = PosterApi::from_config(&config)?;
    let artifact = session.submit(&api).await?;
    info!(filename = %artifact.filename, "poster ready");
    println!("{}", artifact_url(&config.api.base_url, &artifact.url));

    Ok(())
}

/// Navigate the session to the requested place
async fn choose_place<R: Resolver>(
    session: &mut PosterSession<R>,
    args: &GenerateArgs,
) -> Result<LocationCandidate> {
    if let Some(query) = &args.location {
        session.type_text(query);
        session.settle().await;

        let index = args.pick.checked_sub(1).ok_or_else(|| {
            Error::Config("--pick counts from 1".to_string())
        })?;
        return session.select_suggestion(index).ok_or_else(|| {
            let found = session.suggestions().len();
            if found == 0 {
                Error::Geocoding(format!("No places found for '{}'", query.trim()))
            } else {
                Error::Geocoding(format!("Only {} places found for '{}'", found, query.trim()))
            }
        });
    }

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        return Err(Error::Config(
            "No location specified. Use --location or --lat/--lng".to_string(),
        ));
    };
    let center = Coordinates::new(lat, lng);
    center.validate()?;

    let place = LocationCandidate::new(
        center.to_string(),
        center.to_string(),
        lat,
        lng,
        String::new(),
        String::new(),
    );
    session.select(&place);
    Ok(place)
}

/// Form fields given on the command line
async fn apply_overrides<R: Resolver>(
    session: &mut PosterSession<R>,
    args: &GenerateArgs,
) -> Result<()> {
    if let Some(theme) = &args.theme {
        session.set_theme(theme);
    }

    if let Some(layers) = &args.layers {
        let parsed = parse_layers(layers);
        if parsed.is_empty() {
            let names: Vec<&str> = available_layers().iter().map(|l| l.name()).collect();
            return Err(Error::Config(format!(
                "No known layers in '{}'. Available: {}",
                layers,
                names.join(", ")
            )));
        }
        session.set_layers(parsed);
    }

    if let Some(paper) = &args.paper_size {
        let paper: PaperSize = paper.parse().map_err(|e: String| {
            let labels: Vec<String> = available_paper_sizes().iter().map(|p| p.to_string()).collect();
            Error::Config(format!("{}. Available: {}", e, labels.join(", ")))
        })?;
        session.set_paper_size(paper);
        // Let the map take its new shape before measuring the radius
        session.settle().await;
    }

    if let Some(zoom) = args.zoom {
        session.zoom_to(zoom);
    }

    if let Some(distance) = args.distance {
        session.set_distance(distance);
    }

    Ok(())
}

/// Backend returns paths relative to itself
fn artifact_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}/{}", base_url.trim_end_matches('/'), url.trim_start_matches('/'))
    }
}
