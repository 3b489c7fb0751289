//! map-poster: headless client core for a map poster generator
//!
//! The page behind a poster generator, without the page: a search box that
//! debounces keystrokes and resolves them through a chain of location
//! providers, a map whose viewport drives the poster radius, and the form
//! state that is finally submitted to the rendering backend.
//!
//! ## Features
//!
//! - Provider chain: backend search first, Nominatim as fallback
//! - Debounced search with stale-response protection
//! - Viewport radius via haversine distance
//! - Virtual timers, so every interaction can be replayed deterministically
//! - CLI interface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use map_poster::geo::get_resolver;
//! use map_poster::session::PosterSession;
//! use map_poster::Config;
//!
//! # async fn demo() -> map_poster::Result<()> {
//! let config = Config::default();
//! let mut session = PosterSession::headless(get_resolver(&config)?, &config);
//!
//! session.type_text("Lisbon");
//! session.settle().await;
//!
//! if let Some(place) = session.select_suggestion(0) {
//!     println!("{} -> {:?}", place.display_name(), session.submission()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod geo;
pub mod map;
pub mod poster;
pub mod search;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use config::Config;
pub use coord::{Coordinates, MapViewport};
pub use error::{Error, Result};
pub use geo::{LocationCandidate, Resolver};
pub use poster::{GenerationParameters, PosterArtifact};
pub use session::PosterSession;
