//! Map layers drawn on the poster

use serde::{Deserialize, Serialize};

/// A feature layer the renderer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Roads,
    Water,
    Parks,
    Subway,
}

impl Layer {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Water => "water",
            Self::Parks => "parks",
            Self::Subway => "subway",
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roads" => Ok(Self::Roads),
            "water" => Ok(Self::Water),
            "parks" => Ok(Self::Parks),
            "subway" => Ok(Self::Subway),
            _ => Err(format!("Unknown layer: {}", s)),
        }
    }
}

/// List all available layers
pub fn available_layers() -> Vec<Layer> {
    vec![Layer::Roads, Layer::Water, Layer::Parks, Layer::Subway]
}

/// Layers drawn when none are chosen
pub fn default_layers() -> Vec<Layer> {
    vec![Layer::Roads, Layer::Water, Layer::Parks]
}

/// Parse a comma-separated layer list
///
/// Unknown names are dropped and duplicates removed, keeping first-seen
/// order. Blank input means the default set; input naming no known layer
/// yields an empty list.
pub fn parse_layers(input: &str) -> Vec<Layer> {
    if input.trim().is_empty() {
        return default_layers();
    }

    let mut layers = Vec::new();
    for layer in input.split(',').filter_map(|s| s.parse::<Layer>().ok()) {
        if !layers.contains(&layer) {
            layers.push(layer);
        }
    }
    layers
}
