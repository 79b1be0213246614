//! Axis-aligned bounding box filtering.

use crate::error::BBoxParseError;
use std::str::FromStr;

/// Axis-aligned bounding box in `xmin, ymin, xmax, ymax` order.
///
/// Parsed from the comma-separated `bbox` query parameter and immutable
/// once constructed. The values are validated finite floats, so they are
/// safe to inline into SQL as numeric literals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// SQL clause testing rectangle overlap against a per-row `bbox`
    /// struct column. Carries no bind parameters.
    pub fn overlap_clause(&self) -> String {
        format!(
            "bbox.xmax >= {} AND bbox.xmin <= {} AND bbox.ymax >= {} AND bbox.ymin <= {}",
            self.xmin, self.xmax, self.ymin, self.ymax
        )
    }
}

impl FromStr for BBox {
    type Err = BBoxParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() != 4 {
            return Err(BBoxParseError::WrongArity);
        }

        let mut values = [0f64; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            let parsed: f64 = token
                .trim()
                .parse()
                .map_err(|_| BBoxParseError::NotANumber)?;
            if !parsed.is_finite() {
                return Err(BBoxParseError::NotANumber);
            }
            *slot = parsed;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}
