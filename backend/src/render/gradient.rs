//! Green background gradient for one numeric table column.
//!
//! Values are scaled over the column's `[min, max]` and mapped onto a linear
//! ramp between the light and dark ends of a "Greens" palette. Cells whose
//! background is dark get light text.

use serde::{Deserialize, Serialize};

use super::widgets::TableCellStyle;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.0) + 0.7152 * channel(self.1) + 0.0722 * channel(self.2)
    }
}

pub const GREENS_LIGHT: Rgb = Rgb(0xf7, 0xfc, 0xf5);
pub const GREENS_DARK: Rgb = Rgb(0x00, 0x44, 0x1b);

/// Backgrounds darker than this get light text.
pub const TEXT_LUMINANCE_THRESHOLD: f64 = 0.408;
pub const LIGHT_TEXT: &str = "#f1f1f1";
pub const DARK_TEXT: &str = "#000000";

/// Color at position `t` (clamped to `[0, 1]`) along the ramp.
pub fn greens(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgb(
        lerp(GREENS_LIGHT.0, GREENS_DARK.0),
        lerp(GREENS_LIGHT.1, GREENS_DARK.1),
        lerp(GREENS_LIGHT.2, GREENS_DARK.2),
    )
}

/// Style for each value of a column. `None` values stay unstyled; a column
/// whose values are all equal maps to the light end.
pub fn column_styles(values: &[Option<f64>]) -> Vec<Option<TableCellStyle>> {
    let present = values.iter().flatten().copied().filter(|v| v.is_finite());
    let (min, max) = present.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;

    values
        .iter()
        .map(|value| {
            let v = value.filter(|v| v.is_finite())?;
            let t = if span > 0.0 { (v - min) / span } else { 0.0 };
            Some(style_for(greens(t)))
        })
        .collect()
}

fn style_for(background: Rgb) -> TableCellStyle {
    let color = if background.relative_luminance() < TEXT_LUMINANCE_THRESHOLD {
        LIGHT_TEXT
    } else {
        DARK_TEXT
    };
    TableCellStyle {
        background: background.to_hex(),
        color: color.to_string(),
    }
}
