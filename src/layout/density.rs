use std::{fmt, str::FromStr};

use crate::foundation::error::{CollageError, CollageResult};

/// Named scale factor applied to every count draw.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Multiplier 1.0.
    #[default]
    Full,
    /// Multiplier 0.65.
    Medium,
    /// Multiplier 0.4.
    Sparse,
}

impl Density {
    /// All densities, densest first.
    pub const ALL: [Density; 3] = [Density::Full, Density::Medium, Density::Sparse];

    /// Count multiplier.
    pub fn multiplier(self) -> f64 {
        match self {
            Density::Full => 1.0,
            Density::Medium => 0.65,
            Density::Sparse => 0.4,
        }
    }

    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Density::Full => "full",
            Density::Medium => "medium",
            Density::Sparse => "sparse",
        }
    }

    /// Parse a label from the closed set `{full, medium, sparse}`.
    ///
    /// Unknown labels are an error; there is no fallback density.
    pub fn parse(label: &str) -> CollageResult<Self> {
        match label {
            "full" => Ok(Density::Full),
            "medium" => Ok(Density::Medium),
            "sparse" => Ok(Density::Sparse),
            other => Err(CollageError::invalid_argument(format!(
                "unknown density '{other}' (expected one of: full, medium, sparse)"
            ))),
        }
    }

    /// Scale a drawn base count: multiply, round half away from zero, floor at 0.
    pub fn scale_count(self, base: i32) -> usize {
        (f64::from(base) * self.multiplier()).round().max(0.0) as usize
    }
}

impl FromStr for Density {
    type Err = CollageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Density::parse(s)
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/density.rs"]
mod tests;
