//! Lenient numeric coercion
//!
//! Values typed into a form are often transiently invalid (empty, half-typed,
//! out of range). These helpers clamp or substitute rather than fail.

/// Clamp a signed value into an unsigned range
pub fn clamp_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(min as i64, max as i64) as u32
}

/// Normalize an angle to [0, 360); non-finite angles become 0
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Parse an integer the way a numeric form field would
///
/// Surrounding whitespace is ignored and fractional values are truncated
/// toward zero. Returns `None` for anything that is not a finite number.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_u32() {
        assert_eq!(clamp_u32(-5, 0, 100), 0);
        assert_eq!(clamp_u32(50, 0, 100), 50);
        assert_eq!(clamp_u32(500, 1, 100), 100);
        assert_eq!(clamp_u32(0, 1, 100), 1);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" -7 "), Some(-7));
        assert_eq!(parse_int("12.9"), Some(12));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("4x"), None);
        assert_eq!(parse_int("inf"), None);
    }
}
