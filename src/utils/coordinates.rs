use crate::error::{Result, ViewerError};

/// Parse a coordinate cell as decimal degrees.
///
/// Only the leading number counts, so `"12:30:00"` reads as 12.
///
/// # Examples
/// ```
/// use adna_viewer::utils::parse_coordinate;
///
/// assert_eq!(parse_coordinate("51.5 N").unwrap(), 51.5);
/// assert!(parse_coordinate("..").is_err());
/// ```
pub fn parse_coordinate(coord_str: &str) -> Result<f64> {
    parse_leading_number(coord_str)
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ViewerError::InvalidCoordinate(format!("Invalid coordinate value: '{}'", coord_str))
        })
}

/// Parse the longest leading decimal number of a string.
///
/// `"5000 BP"` gives 5000, `"-12.5e2x"` gives -1250, `"ca. 3000"` gives `None`.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Check that a point lies on the globe
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ViewerError::InvalidCoordinate(format!(
            "Latitude {} is outside [-90, 90]",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ViewerError::InvalidCoordinate(format!(
            "Longitude {} is outside [-180, 180]",
            longitude
        )));
    }

    Ok(())
}

/// Marker label text for a coordinate pair
pub fn format_lat_lng(latitude: f64, longitude: f64) -> String {
    format!("{:.4}, {:.4}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        assert!((parse_coordinate("51.5074").unwrap() - 51.5074).abs() < 0.000001);
        assert_eq!(parse_coordinate("12:30:00").unwrap(), 12.0);
        assert!((parse_coordinate(" -0.1278 ").unwrap() - -0.1278).abs() < 0.000001);
        assert!(parse_coordinate("..").is_err());
        assert!(parse_coordinate("").is_err());
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("5000"), Some(5000.0));
        assert_eq!(parse_leading_number("5000 BP"), Some(5000.0));
        assert_eq!(parse_leading_number("  .5"), Some(0.5));
        assert_eq!(parse_leading_number("-12.5e2x"), Some(-1250.0));
        assert_eq!(parse_leading_number("3e"), Some(3.0));
        assert_eq!(parse_leading_number("ca. 3000"), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(validate_coordinates(51.5074, -0.1278).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
    }

    #[test]
    fn test_format_lat_lng() {
        assert_eq!(format_lat_lng(10.0, 20.123456), "10.0000, 20.1235");
    }
}
