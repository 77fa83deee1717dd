use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::pipeline::polarity::{classify, Polarity};

/// Number of colors in a palette request and response.
pub const PALETTE_SIZE: usize = 5;

/// Default dark anchor, a muted umber.
pub const DEFAULT_DARK: Color = Color::new(115, 102, 75);
/// Default light anchor, an off-white.
pub const DEFAULT_LIGHT: Color = Color::new(224, 223, 218);

/// Marker the palette service reads as "suggest a color here".
const SUGGEST_MARKER: &str = "N";

/// One position of a palette request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The service should keep this color as close as it can.
    Fixed(Color),
    /// The service picks a coordinating color.
    Suggest,
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Fixed(color) => color.serialize(serializer),
            Slot::Suggest => serializer.serialize_str(SUGGEST_MARKER),
        }
    }
}

/// Body of a palette-suggestion request.
///
/// Slots 0 and 4 are always fixed and slots 1-3 always suggested; the only
/// mutation is [`PaletteRequest::anchor`], which swaps one fixed color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteRequest {
    model: String,
    input: [Slot; PALETTE_SIZE],
}

impl PaletteRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: [
                Slot::Fixed(DEFAULT_DARK),
                Slot::Suggest,
                Slot::Suggest,
                Slot::Suggest,
                Slot::Fixed(DEFAULT_LIGHT),
            ],
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn slots(&self) -> &[Slot; PALETTE_SIZE] {
        &self.input
    }

    /// Fixed color at `index`, if that slot is fixed.
    pub fn fixed(&self, index: usize) -> Option<Color> {
        match self.input.get(index) {
            Some(Slot::Fixed(color)) => Some(*color),
            _ => None,
        }
    }

    /// Pin `color` into the fixed slot matching its polarity.
    ///
    /// The other fixed slot keeps its current color.
    pub fn anchor(&mut self, color: Color) -> Polarity {
        let polarity = classify(color);
        self.input[polarity.slot()] = Slot::Fixed(color);
        polarity
    }
}

impl Default for PaletteRequest {
    fn default() -> Self {
        Self::new("default")
    }
}

/// The five colors returned by the palette service, in role order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [Color; PALETTE_SIZE]);

impl Palette {
    /// Primary text.
    pub fn text(&self) -> Color {
        self.0[0]
    }

    /// Secondary text, borders and field backgrounds.
    pub fn secondary(&self) -> Color {
        self.0[1]
    }

    /// Placeholder and label accents.
    pub fn accent(&self) -> Color {
        self.0[2]
    }

    /// Date stamp ink.
    pub fn stamp(&self) -> Color {
        self.0[3]
    }

    /// Card background.
    pub fn background(&self) -> Color {
        self.0[4]
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.0
    }
}

/// Response envelope of the palette service.
#[derive(Debug, Deserialize)]
pub struct PaletteResponse {
    pub result: Palette,
}
