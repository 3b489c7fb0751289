//! Viewport–parameter synchronizer
//!
//! The single owner of [`GenerationParameters`]. Map movement and place
//! selection arrive as commands; each one is applied as a read-modify-write
//! of the whole parameter set so the order of application is the order of
//! events.

use crate::config::Config;
use crate::coord::{viewport_radius, Coordinates, MapViewport};
use crate::error::{Error, Result};
use crate::geo::LocationCandidate;
use crate::poster::{GenerateRequest, GenerationParameters, Layer, PaperSize, PosterArtifact};
use tracing::debug;

/// Instruction for the map view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    SetView { center: Coordinates, zoom: u8 },
}

/// Reducer over the poster parameters
#[derive(Debug, Clone)]
pub struct Synchronizer {
    params: GenerationParameters,
    viewport: Option<MapViewport>,
    artifact: Option<PosterArtifact>,
    navigate_zoom: u8,
}

impl Synchronizer {
    pub fn new(params: GenerationParameters, navigate_zoom: u8) -> Self {
        Self {
            params,
            viewport: None,
            artifact: None,
            navigate_zoom,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GenerationParameters::from_defaults(&config.defaults),
            config.map.navigate_zoom,
        )
    }

    pub fn parameters(&self) -> &GenerationParameters {
        &self.params
    }

    /// Last viewport reported by the map
    pub fn viewport(&self) -> Option<&MapViewport> {
        self.viewport.as_ref()
    }

    /// Poster currently shown in place of the map
    pub fn artifact(&self) -> Option<&PosterArtifact> {
        self.artifact.as_ref()
    }

    fn update(&mut self, f: impl FnOnce(&mut GenerationParameters)) {
        let mut next = self.params.clone();
        f(&mut next);
        self.params = next;
    }

    /// Pan or zoom finished: take center and radius from the viewport
    pub fn apply_viewport_change(&mut self, viewport: &MapViewport) {
        let radius = viewport_radius(viewport);
        let center = viewport.center;
        debug!(%center, radius, zoom = viewport.zoom, "viewport changed");

        self.viewport = Some(*viewport);
        self.update(|p| {
            p.lat = Some(center.lat);
            p.lng = Some(center.lng);
            p.distance_meters = radius;
        });
    }

    /// A place was picked or navigation requested
    ///
    /// Any poster on display is dropped so the map is visible again.
    pub fn apply_selection(&mut self, candidate: &LocationCandidate) -> ViewCommand {
        let center = candidate.coordinates();
        debug!(%center, place = candidate.display_name(), "navigating");

        if self.artifact.take().is_some() {
            debug!("discarded displayed poster");
        }
        self.update(|p| {
            p.lat = Some(center.lat);
            p.lng = Some(center.lng);
            p.city = candidate.city().to_string();
            p.country = candidate.country().to_string();
            p.location = candidate.display_name().to_string();
        });

        ViewCommand::SetView {
            center,
            zoom: self.navigate_zoom,
        }
    }

    pub fn set_theme(&mut self, theme: impl Into<String>) {
        let theme = theme.into();
        self.update(|p| p.theme = theme);
    }

    pub fn set_layers(&mut self, layers: Vec<Layer>) {
        self.update(|p| p.layers = layers);
    }

    /// Override the radius by hand (until the map next reports one)
    pub fn set_distance(&mut self, meters: u32) {
        self.update(|p| p.distance_meters = meters);
    }

    /// Returns true when the aspect ratio changed and the map needs resizing
    pub fn set_paper_size(&mut self, paper_size: PaperSize) -> bool {
        let changed = self.params.paper_size.aspect_ratio() != paper_size.aspect_ratio();
        self.update(|p| p.paper_size = paper_size);
        changed
    }

    /// Show a freshly generated poster in place of the map
    pub fn show_artifact(&mut self, artifact: PosterArtifact) {
        self.artifact = Some(artifact);
    }

    /// Request body for the backend
    ///
    /// Fails without a network call if no location has been resolved.
    pub fn submission(&self) -> Result<GenerateRequest> {
        let p = &self.params;
        let (Some(lat), Some(lng)) = (p.lat, p.lng) else {
            return Err(Error::MissingCoordinates);
        };

        // The renderer titles the poster with the city; a picked point
        // without one still has its location label
        let city = if p.city.is_empty() {
            p.location.clone()
        } else {
            p.city.clone()
        };

        Ok(GenerateRequest {
            location: p.location.clone(),
            city,
            country: p.country.clone(),
            theme: p.theme.clone(),
            distance: p.distance_meters,
            layers: p.layers.clone(),
            paper_size: p.paper_size,
            lat,
            lng,
        })
    }
}
