//! Color directive parsing.

use crate::common::error::DraftError;

/// Embed color used when no `color:` directive is given.
pub const DEFAULT_COLOR: u32 = 0x2B2D31;

/// Fixed palette of named colors.
const PALETTE: &[(&str, u32)] = &[
    ("red", 0xFF0000),
    ("blue", 0x3498DB),
    ("green", 0x2ECC71),
    ("yellow", 0xF1C40F),
    ("orange", 0xE67E22),
    ("purple", 0x9B59B6),
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("gold", 0xF1C40F),
    ("pink", 0xE91E63),
    ("cyan", 0x00BCD4),
    ("default", DEFAULT_COLOR),
];

/// Parse a `color:` value into an RGB integer.
///
/// Accepts a palette name, a `0x`-prefixed hex literal, or a bare 6-digit
/// hex literal. Anything else is a validation failure naming the value.
pub fn parse_color(value: &str) -> Result<u32, DraftError> {
    let lower = value.trim().to_lowercase();

    if let Some((_, rgb)) = PALETTE.iter().find(|(name, _)| *name == lower) {
        return Ok(*rgb);
    }

    let hex = lower.strip_prefix("0x").unwrap_or(&lower);
    let is_bare_hex = hex.len() == 6 || lower.starts_with("0x");
    if is_bare_hex && !hex.is_empty() && hex.len() <= 6 {
        if let Ok(rgb) = u32::from_str_radix(hex, 16) {
            return Ok(rgb);
        }
    }

    Err(DraftError::BadColor {
        value: value.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names() {
        assert_eq!(parse_color("red").unwrap(), 0xFF0000);
        assert_eq!(parse_color("Blue").unwrap(), 0x3498DB);
        assert_eq!(parse_color("default").unwrap(), DEFAULT_COLOR);
    }

    #[test]
    fn test_hex_literals() {
        assert_eq!(parse_color("0x1ABC9C").unwrap(), 0x1ABC9C);
        assert_eq!(parse_color("0xff").unwrap(), 0xFF);
        assert_eq!(parse_color("abcdef").unwrap(), 0xABCDEF);
    }

    #[test]
    fn test_bad_values_name_the_offender() {
        let err = parse_color("maroonish").unwrap_err();
        assert_eq!(
            err,
            DraftError::BadColor {
                value: "maroonish".to_string()
            }
        );

        // Bare hex must be exactly six digits
        assert!(parse_color("abc").is_err());
        assert!(parse_color("0xgg0000").is_err());
        assert!(parse_color("1234567").is_err());
    }
}
