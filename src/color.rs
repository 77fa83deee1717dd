use anyhow::{bail, Result};
use palette::{LinSrgb, Mix, Srgb};
use serde::{Deserialize, Serialize};

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components; serializes as the `[r, g, b]` triple the palette API speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            bail!(
                "invalid hex color: expected 6 hex digits, got {:?}",
                hex
            );
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Parse a `#rrggbb` swatch value, degrading to black on anything else.
    ///
    /// Museum swatch data is not guaranteed to be clean, and a bad swatch
    /// must not abort the card. The failure is logged instead.
    pub fn from_hex_lossy(hex: &str) -> Self {
        if hex.len() != 7 || !hex.starts_with('#') {
            tracing::warn!(hex, "swatch is not a 7-character hex color; using black");
            return Self::BLACK;
        }
        match Self::from_hex(hex) {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(hex, error = %err, "swatch has invalid hex digits; using black");
                Self::BLACK
            }
        }
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS functional notation, `rgb(r, g, b)`.
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// CSS functional notation with an alpha channel, `rgba(r, g, b, a)`.
    pub fn to_css_rgba(self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Create from `palette::Srgb<u8>`.
    pub fn from_srgb_u8(srgb: Srgb<u8>) -> Self {
        Self {
            r: srgb.red,
            g: srgb.green,
            b: srgb.blue,
        }
    }

    fn to_linear(self) -> LinSrgb<f32> {
        self.to_srgb_u8().into_format::<f32>().into_linear()
    }

    fn from_linear(linear: LinSrgb<f32>) -> Self {
        let srgb: Srgb<f32> = Srgb::from_linear(linear);
        Self::from_srgb_u8(srgb.into_format())
    }

    /// Composite this color at `alpha` over an opaque `backdrop`.
    ///
    /// Terminals cannot draw translucent cells, so translucent card roles
    /// are flattened before they are shown.
    pub fn over(self, backdrop: Color, alpha: f32) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let mixed = backdrop.to_linear().mix(self.to_linear(), alpha);
        Color::from_linear(mixed)
    }

    /// WCAG 2.0 relative luminance.
    pub fn relative_luminance(self) -> f32 {
        let linear = self.to_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgb_known_values() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::new(255, 0, 0));
        assert_eq!(Color::from_hex("#000000").unwrap(), Color::new(0, 0, 0));
        assert_eq!(
            Color::from_hex("#808080").unwrap(),
            Color::new(128, 128, 128)
        );
    }

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original.r, 255);
        assert_eq!(original.g, 136);
        assert_eq!(original.b, 0);
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_input() {
        let color = Color::from_hex("#FF8800").unwrap();
        assert_eq!(color.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_without_hash() {
        let color = Color::from_hex("aabbcc").unwrap();
        assert_eq!(color.to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_invalid_length() {
        assert!(Color::from_hex("#fff").is_err());
    }

    #[test]
    fn hex_invalid_chars() {
        assert!(Color::from_hex("#gggggg").is_err());
    }

    #[test]
    fn hex_multibyte_does_not_panic() {
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn lossy_parses_well_formed_swatch() {
        assert_eq!(Color::from_hex_lossy("#2a1f0c"), Color::new(42, 31, 12));
    }

    #[test]
    fn lossy_degrades_to_black() {
        assert_eq!(Color::from_hex_lossy("#fff"), Color::BLACK);
        assert_eq!(Color::from_hex_lossy("2a1f0c"), Color::BLACK);
        assert_eq!(Color::from_hex_lossy(" #2a1f0c"), Color::BLACK);
        assert_eq!(Color::from_hex_lossy("#zz1f0c"), Color::BLACK);
    }

    #[test]
    fn css_notation() {
        let color = Color::new(115, 102, 75);
        assert_eq!(color.to_css_rgb(), "rgb(115, 102, 75)");
        assert_eq!(color.to_css_rgba(0.25), "rgba(115, 102, 75, 0.25)");
        assert_eq!(color.to_css_rgba(0.1), "rgba(115, 102, 75, 0.1)");
    }

    #[test]
    fn serializes_as_triple() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Color = serde_json::from_str("[224,223,218]").unwrap();
        assert_eq!(back, Color::new(224, 223, 218));
    }

    #[test]
    fn over_endpoints() {
        let red = Color::new(255, 0, 0);
        assert_eq!(red.over(Color::WHITE, 1.0), red);
        assert_eq!(red.over(Color::WHITE, 0.0), Color::WHITE);
    }

    #[test]
    fn over_partial_alpha_lies_between() {
        let tinted = Color::BLACK.over(Color::WHITE, 0.25);
        assert!(tinted.r < 255 && tinted.r > 0, "got {tinted}");
        assert_eq!(tinted.r, tinted.g);
        assert_eq!(tinted.g, tinted.b);
    }

    #[test]
    fn relative_luminance_extremes() {
        assert!(Color::BLACK.relative_luminance() < 0.001);
        assert!((Color::WHITE.relative_luminance() - 1.0).abs() < 0.001);
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
