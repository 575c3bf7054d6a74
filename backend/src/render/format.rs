//! Display formatting for metric tiles and table cells.

use crate::api::Cell;

/// Shown wherever a value cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Group digits in thousands: `1234567` becomes `1,234,567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Share of `part` in `whole` as a whole-number percentage, `N/A` when
/// `whole` is zero.
pub fn format_percentage(part: i64, whole: i64) -> String {
    if whole == 0 {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.0}%", part as f64 / whole as f64 * 100.0)
}

/// Average rating out of five, `N/A` when there is no feedback yet.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.2}/5.0", r),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Table cell text. Whole floats keep one decimal so numeric columns stay
/// recognisably fractional.
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Float(v) if v.fract() == 0.0 && v.is_finite() => format!("{:.1}", v),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-45000), "-45,000");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(325, 500), "65%");
        assert_eq!(format_percentage(1, 3), "33%");
        assert_eq!(format_percentage(0, 0), "N/A");
        assert_eq!(format_percentage(10, 0), "N/A");
    }

    #[test]
    fn test_rating() {
        assert_eq!(format_rating(Some(4.2)), "4.20/5.0");
        assert_eq!(format_rating(Some(3.5)), "3.50/5.0");
        assert_eq!(format_rating(None), "N/A");
    }

    #[test]
    fn test_cells() {
        assert_eq!(format_cell(&Cell::Float(120.0)), "120.0");
        assert_eq!(format_cell(&Cell::Float(4.25)), "4.25");
        assert_eq!(format_cell(&Cell::Int(7)), "7");
        assert_eq!(format_cell(&Cell::Null), "");
    }
}
