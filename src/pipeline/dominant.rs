use crate::artwork::Swatch;
use crate::color::Color;

/// Hex value of the swatch with the largest share, trimmed.
///
/// Ties keep the earliest swatch. Returns `None` for an empty list.
pub fn dominant_hex(swatches: &[Swatch]) -> Option<String> {
    swatches
        .iter()
        .reduce(|best, swatch| {
            if swatch.percentage > best.percentage {
                swatch
            } else {
                best
            }
        })
        .map(|swatch| swatch.hex.trim().to_string())
}

/// The dominant swatch parsed into a color.
pub fn dominant_color(swatches: &[Swatch]) -> Option<Color> {
    dominant_hex(swatches).map(|hex| Color::from_hex_lossy(&hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch(percentage: f32, hex: &str) -> Swatch {
        Swatch {
            hex: hex.to_string(),
            percentage,
        }
    }

    #[test]
    fn picks_highest_percentage() {
        let swatches = [swatch(10.0, "#000000"), swatch(90.0, "#ffffff")];
        assert_eq!(dominant_hex(&swatches).as_deref(), Some("#ffffff"));
    }

    #[test]
    fn empty_list_has_no_dominant() {
        assert_eq!(dominant_hex(&[]), None);
        assert_eq!(dominant_color(&[]), None);
    }

    #[test]
    fn first_entry_wins_ties() {
        let swatches = [
            swatch(5.0, "#111111"),
            swatch(40.0, "#222222"),
            swatch(40.0, "#333333"),
        ];
        assert_eq!(dominant_hex(&swatches).as_deref(), Some("#222222"));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let swatches = [swatch(12.0, " #E0D8B0 "), swatch(3.0, "#000000")];
        assert_eq!(dominant_hex(&swatches).as_deref(), Some("#E0D8B0"));
        assert_eq!(dominant_color(&swatches), Some(Color::new(224, 216, 176)));
    }

    #[test]
    fn single_zero_percent_swatch_still_dominates() {
        let swatches = [swatch(0.0, "#123456")];
        assert_eq!(dominant_hex(&swatches).as_deref(), Some("#123456"));
    }
}
