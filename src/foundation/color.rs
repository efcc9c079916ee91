use crate::foundation::core::Rgba8;
use crate::foundation::error::{CarouselError, CarouselResult};

/// Parse a CSS-style hex color: `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> CarouselResult<Rgba8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(invalid(s));
    }

    fn hex_byte(pair: &str) -> CarouselResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CarouselError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    fn hex_nibble(c: &str) -> CarouselResult<u8> {
        let v = u8::from_str_radix(c, 16)
            .map_err(|_| CarouselError::validation(format!("invalid hex digit \"{c}\"")))?;
        Ok(v * 17)
    }

    match s.len() {
        3 => Ok(Rgba8::rgb(
            hex_nibble(&s[0..1])?,
            hex_nibble(&s[1..2])?,
            hex_nibble(&s[2..3])?,
        )),
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err(invalid(s)),
    }
}

fn invalid(s: &str) -> CarouselError {
    CarouselError::validation(format!(
        "hex color \"#{s}\" must be #RGB, #RRGGBB or #RRGGBBAA"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
