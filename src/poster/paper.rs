//! Paper sizes
//!
//! The poster renderer knows a fixed set of aspect ratios; the map preview
//! takes the same proportions so the user frames what will be printed.

use serde::{Deserialize, Serialize};

/// Paper size / aspect ratio of the poster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaperSize {
    Square,
    TwoThree,
    #[default]
    ThreeFour,
    FourFive,
    /// A-series (1 : √2)
    Din,
    NineSixteen,
    /// Tall phone wallpaper
    Phone,
}

impl PaperSize {
    /// Label understood by the backend
    pub fn label(&self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::TwoThree => "2:3",
            Self::ThreeFour => "3:4",
            Self::FourFive => "4:5",
            Self::Din => "DIN",
            Self::NineSixteen => "9:16",
            Self::Phone => "9:19.5",
        }
    }

    /// Width and height proportions
    pub fn proportions(&self) -> (f64, f64) {
        match self {
            Self::Square => (12.0, 12.0),
            Self::TwoThree => (12.0, 18.0),
            Self::ThreeFour => (12.0, 16.0),
            Self::FourFive => (12.0, 15.0),
            Self::Din => (12.0, 12.0 * 1.414),
            Self::NineSixteen => (9.0, 16.0),
            Self::Phone => (9.0, 19.5),
        }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.proportions();
        w / h
    }

    /// Container height for a given width
    pub fn height_for_width(&self, width: u32) -> u32 {
        (width as f64 / self.aspect_ratio()).round() as u32
    }
}

impl std::fmt::Display for PaperSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        available_paper_sizes()
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown paper size: {}", s))
    }
}

impl TryFrom<String> for PaperSize {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaperSize> for String {
    fn from(value: PaperSize) -> Self {
        value.label().to_string()
    }
}

/// List all paper sizes
pub fn available_paper_sizes() -> Vec<PaperSize> {
    vec![
        PaperSize::Square,
        PaperSize::TwoThree,
        PaperSize::ThreeFour,
        PaperSize::FourFive,
        PaperSize::Din,
        PaperSize::NineSixteen,
        PaperSize::Phone,
    ]
}
