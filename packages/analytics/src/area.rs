//! Free-text area parsing.
//!
//! Zone areas are entered by hand ("15 га", "500 м²", "3,5 Га"), so the
//! parser normalizes aggressively and never fails: anything unparseable
//! becomes [`DEFAULT_AREA_HA`].

/// Area assumed when the descriptor is missing or unparseable, in
/// hectares.
pub const DEFAULT_AREA_HA: f64 = 1.0;

/// Smallest area a zone can be billed for, in hectares.
pub const MIN_AREA_HA: f64 = 0.1;

/// Substrings marking a square-meter descriptor.
const SQUARE_METER_MARKERS: &[&str] = &["м²", "м2", "кв.м", "кв м"];

/// Parses a free-text area descriptor into hectares.
///
/// Keeps only digits and decimal separators (`,` is treated as `.`),
/// divides by 10 000 when the text carries a square-meter marker, and
/// clamps the result to at least [`MIN_AREA_HA`]. Missing or malformed
/// input returns [`DEFAULT_AREA_HA`].
#[must_use]
pub fn parse_area(area: Option<&str>) -> f64 {
    let Some(raw) = area else {
        return DEFAULT_AREA_HA;
    };

    let lowered = raw.trim().to_lowercase();

    let numeric: String = lowered
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let Ok(value) = numeric.parse::<f64>() else {
        return DEFAULT_AREA_HA;
    };

    let hectares = if SQUARE_METER_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        value / 10_000.0
    } else {
        value
    };

    hectares.max(MIN_AREA_HA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hectares() {
        assert!((parse_area(Some("15 га")) - 15.0).abs() < f64::EPSILON);
        assert!((parse_area(Some("3,5 Га")) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn converts_square_meters() {
        assert!((parse_area(Some("500 м²")) - 0.1).abs() < f64::EPSILON);
        assert!((parse_area(Some("25000 м2")) - 2.5).abs() < f64::EPSILON);
        assert!((parse_area(Some("12000 кв.м")) - 1.2).abs() < f64::EPSILON);
        assert!((parse_area(Some("30000 кв м")) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn defaults_on_unparseable_input() {
        assert!((parse_area(None) - DEFAULT_AREA_HA).abs() < f64::EPSILON);
        assert!((parse_area(Some("")) - DEFAULT_AREA_HA).abs() < f64::EPSILON);
        assert!((parse_area(Some("abc")) - DEFAULT_AREA_HA).abs() < f64::EPSILON);
        assert!((parse_area(Some("га")) - DEFAULT_AREA_HA).abs() < f64::EPSILON);
    }

    #[test]
    fn clamps_tiny_areas() {
        assert!((parse_area(Some("0.05 га")) - MIN_AREA_HA).abs() < f64::EPSILON);
        assert!((parse_area(Some("0 га")) - MIN_AREA_HA).abs() < f64::EPSILON);
    }
}
