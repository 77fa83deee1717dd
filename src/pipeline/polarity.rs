use crate::color::Color;

/// Which end of the gray axis a color sits closer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Dark,
    Light,
}

/// Request slot that dark anchors occupy (primary text).
pub const DARK_SLOT: usize = 0;
/// Request slot that light anchors occupy (card background).
pub const LIGHT_SLOT: usize = 4;

impl Polarity {
    /// The fixed request slot a color of this polarity replaces.
    pub fn slot(self) -> usize {
        match self {
            Polarity::Dark => DARK_SLOT,
            Polarity::Light => LIGHT_SLOT,
        }
    }
}

/// Summed per-channel distance from black and from white.
pub fn scores(color: Color) -> (u16, u16) {
    let channels = [color.r, color.g, color.b];
    let darkness = channels.iter().map(|&c| u16::from(c)).sum();
    let lightness = channels.iter().map(|&c| 255 - u16::from(c)).sum();
    (darkness, lightness)
}

/// Classify by L1 distance to pure black versus pure white.
///
/// Equal distances would count as dark, though the two scores always sum
/// to 765 and so never tie for 8-bit channels.
pub fn classify(color: Color) -> Polarity {
    let (darkness, lightness) = scores(color);
    if lightness < darkness {
        Polarity::Light
    } else {
        Polarity::Dark
    }
}
