use crate::models::AgeRange;
use crate::utils::constants::{AGE_PALETTE, DEFAULT_COLOR_DIVISIONS, UNKNOWN_AGE_COLOR};
use serde::Serialize;
use std::fmt;

/// Hex color assigned to a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ColorToken(&'static str);

impl ColorToken {
    pub const UNKNOWN: ColorToken = ColorToken(UNKNOWN_AGE_COLOR);

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Palette index for an age, or `None` for the unknown color
pub fn palette_index(age: f64, min_age: f64, max_age: f64, divisions: usize) -> Option<usize> {
    if age.is_nan() || age <= 0.0 {
        return None;
    }

    let divisions = divisions.clamp(1, AGE_PALETTE.len());
    let span = max_age - min_age;
    let normalized = if span > 0.0 {
        (age - min_age) / span
    } else {
        0.0
    };

    let bucket = (normalized * divisions as f64).floor();
    Some(bucket.clamp(0.0, (divisions - 1) as f64) as usize)
}

/// Map an age onto the discrete green-to-red palette.
///
/// Ages `<= 0` get the unknown color. With the default 5 divisions the
/// sixth palette entry is never used.
pub fn color_for(age: f64, min_age: f64, max_age: f64, divisions: usize) -> ColorToken {
    match palette_index(age, min_age, max_age, divisions) {
        Some(idx) => ColorToken(AGE_PALETTE[idx]),
        None => ColorToken::UNKNOWN,
    }
}

/// One legend row: color plus the age interval it covers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub color: ColorToken,
    pub from_age: f64,
    pub to_age: f64,
}

/// Color scale bound to a number of divisions
#[derive(Debug, Clone, Copy)]
pub struct ColorMapper {
    divisions: usize,
}

impl ColorMapper {
    pub fn new() -> Self {
        Self {
            divisions: DEFAULT_COLOR_DIVISIONS,
        }
    }

    pub fn with_divisions(divisions: usize) -> Self {
        Self {
            divisions: divisions.clamp(1, AGE_PALETTE.len()),
        }
    }

    pub fn divisions(&self) -> usize {
        self.divisions
    }

    pub fn color_for(&self, age: f64, range: AgeRange) -> ColorToken {
        color_for(age, range.min, range.max, self.divisions)
    }

    /// Legend rows for a range, youngest bucket first
    pub fn legend(&self, range: AgeRange) -> Vec<LegendEntry> {
        let step = range.span() / self.divisions as f64;

        (0..self.divisions)
            .map(|idx| LegendEntry {
                color: ColorToken(AGE_PALETTE[idx]),
                from_age: range.min + step * idx as f64,
                to_age: range.min + step * (idx + 1) as f64,
            })
            .collect()
    }
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::new()
    }
}
