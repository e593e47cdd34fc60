//! Art-direction parameters for the layout generator.
//!
//! [`ArtDirection::default`] carries the recorded constants. Any other value produces
//! different layouts for every seed, so golden layouts only hold for the default.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::OnceLock,
};

use crate::{
    foundation::core::Rgb8,
    foundation::error::{CollageError, CollageResult},
    layout::model::{ChunkTier, SizeClass},
};

/// Half-open float range `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound.
    pub max: f64,
}

impl Span {
    /// Build a span.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(self, what: &str) -> CollageResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(CollageError::validation(format!("{what} must be finite")));
        }
        if self.min > self.max {
            return Err(CollageError::validation(format!("{what} min must be <= max")));
        }
        Ok(())
    }
}

/// Inclusive integer range `[min, max]` for count and offset draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub min: i32,
    /// Inclusive upper bound.
    pub max: i32,
}

impl IntRange {
    /// Build a range.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// How far a chunk may hang off the viewport, as fractions of its own size.
///
/// `left` is drawn from `[-leading * width, 100 - trailing * width)`; `top` likewise.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bleed {
    /// Fraction allowed off the left/top edge.
    pub leading: f64,
    /// Fraction that must stay inside the right/bottom edge.
    pub trailing: f64,
}

/// When a chunk is hidden below the small-viewport breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "fraction", rename_all = "snake_case")]
pub enum HidePolicy {
    /// Always shown.
    Never,
    /// Hidden when its index within the phase exceeds `fraction * count`.
    BeyondFraction(f64),
    /// Always hidden on small viewports.
    Always,
}

impl HidePolicy {
    /// Apply the policy to the `index`-th chunk of a phase of `count` chunks.
    pub fn hides(self, index: usize, count: usize) -> bool {
        match self {
            HidePolicy::Never => false,
            HidePolicy::BeyondFraction(f) => index as f64 > count as f64 * f,
            HidePolicy::Always => true,
        }
    }
}

/// Parameters for one chunk phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierParams {
    /// Base count, scaled by density.
    pub count: IntRange,
    /// Crop width/height as fractions of the source.
    pub crop_fraction: Span,
    /// Placement width, viewport percent.
    pub width: Span,
    /// Placement height, viewport percent.
    pub height: Span,
    /// Off-screen allowance.
    pub bleed: Bleed,
    /// Pixelation probability; `None` skips the draw entirely.
    pub pixelate_probability: Option<f64>,
    /// Small-viewport hiding rule.
    pub hide_on_small: HidePolicy,
    /// Size class for chunks that are not pixelated.
    pub size_class: SizeClass,
}

impl TierParams {
    fn validate(&self, tier: &str) -> CollageResult<()> {
        if self.count.min < 0 || self.count.min > self.count.max {
            return Err(CollageError::validation(format!(
                "{tier}.count must satisfy 0 <= min <= max"
            )));
        }
        self.crop_fraction.validate(&format!("{tier}.crop_fraction"))?;
        if self.crop_fraction.min < 0.0 || self.crop_fraction.max > 1.0 {
            return Err(CollageError::validation(format!(
                "{tier}.crop_fraction must lie within [0, 1]"
            )));
        }
        self.width.validate(&format!("{tier}.width"))?;
        self.height.validate(&format!("{tier}.height"))?;
        if self.width.min < 0.0 || self.height.min < 0.0 {
            return Err(CollageError::validation(format!(
                "{tier}.width/height must be >= 0"
            )));
        }
        if !(self.bleed.leading.is_finite() && self.bleed.trailing.is_finite()) {
            return Err(CollageError::validation(format!(
                "{tier}.bleed must be finite"
            )));
        }
        if let Some(p) = self.pixelate_probability
            && !(0.0..=1.0).contains(&p)
        {
            return Err(CollageError::validation(format!(
                "{tier}.pixelate_probability must lie within [0, 1]"
            )));
        }
        if let HidePolicy::BeyondFraction(f) = self.hide_on_small
            && !f.is_finite()
        {
            return Err(CollageError::validation(format!(
                "{tier}.hide_on_small fraction must be finite"
            )));
        }
        if self.size_class == SizeClass::Pixelated {
            return Err(CollageError::validation(format!(
                "{tier}.size_class must be large or small; pixelation is drawn"
            )));
        }
        Ok(())
    }
}

/// Parameters for the glitch-band phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandParams {
    /// Base count, scaled by density.
    pub count: IntRange,
    /// Vertical position, viewport percent.
    pub top: Span,
    /// Height, viewport percent.
    pub height: Span,
    /// Resting horizontal offset in pixels.
    pub offset_px: IntRange,
    /// Vertical crop offset into the small variant, percent.
    pub crop_y: Span,
}

/// Every tunable constant of the generator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArtDirection {
    /// Base colors; one is drawn first.
    pub palette: Vec<Rgb8>,
    /// Background phase.
    pub large: TierParams,
    /// Midground phase.
    pub medium: TierParams,
    /// Foreground accent phase.
    pub small: TierParams,
    /// Glitch-band phase.
    pub bands: BandParams,
}

impl Default for ArtDirection {
    fn default() -> Self {
        Self {
            palette: vec![
                Rgb8::new(200, 210, 220),
                Rgb8::new(190, 200, 185),
                Rgb8::new(215, 210, 200),
                Rgb8::new(180, 195, 210),
            ],
            large: TierParams {
                count: IntRange::new(4, 6),
                crop_fraction: Span::new(0.3, 0.7),
                width: Span::new(35.0, 75.0),
                height: Span::new(30.0, 65.0),
                bleed: Bleed {
                    leading: 0.25,
                    trailing: 0.5,
                },
                pixelate_probability: None,
                hide_on_small: HidePolicy::Never,
                size_class: SizeClass::Large,
            },
            medium: TierParams {
                count: IntRange::new(8, 14),
                crop_fraction: Span::new(0.15, 0.45),
                width: Span::new(12.0, 40.0),
                height: Span::new(10.0, 35.0),
                bleed: Bleed {
                    leading: 0.15,
                    trailing: 0.5,
                },
                pixelate_probability: Some(0.3),
                hide_on_small: HidePolicy::BeyondFraction(0.6),
                size_class: SizeClass::Large,
            },
            small: TierParams {
                count: IntRange::new(6, 12),
                crop_fraction: Span::new(0.08, 0.25),
                width: Span::new(5.0, 18.0),
                height: Span::new(5.0, 20.0),
                bleed: Bleed {
                    leading: 0.0,
                    trailing: 1.0,
                },
                pixelate_probability: Some(0.4),
                hide_on_small: HidePolicy::Always,
                size_class: SizeClass::Small,
            },
            bands: BandParams {
                count: IntRange::new(3, 8),
                top: Span::new(0.0, 100.0),
                height: Span::new(0.5, 4.0),
                offset_px: IntRange::new(-80, 80),
                crop_y: Span::new(0.0, 80.0),
            },
        }
    }
}

impl ArtDirection {
    /// Shared default instance.
    pub fn builtin() -> &'static ArtDirection {
        static BUILTIN: OnceLock<ArtDirection> = OnceLock::new();
        BUILTIN.get_or_init(ArtDirection::default)
    }

    /// Parameters for one chunk phase.
    pub fn tier(&self, tier: ChunkTier) -> &TierParams {
        match tier {
            ChunkTier::Large => &self.large,
            ChunkTier::Medium => &self.medium,
            ChunkTier::Small => &self.small,
        }
    }

    /// Check every range and probability.
    pub fn validate(&self) -> CollageResult<()> {
        if self.palette.is_empty() {
            return Err(CollageError::validation("palette must not be empty"));
        }
        self.large.validate("large")?;
        self.medium.validate("medium")?;
        self.small.validate("small")?;

        let b = &self.bands;
        if b.count.min < 0 || b.count.min > b.count.max {
            return Err(CollageError::validation(
                "bands.count must satisfy 0 <= min <= max",
            ));
        }
        if b.offset_px.min > b.offset_px.max {
            return Err(CollageError::validation(
                "bands.offset_px min must be <= max",
            ));
        }
        b.top.validate("bands.top")?;
        b.height.validate("bands.height")?;
        b.crop_y.validate("bands.crop_y")?;
        Ok(())
    }

    /// Parse and validate art direction from JSON. Missing sections keep their defaults.
    pub fn from_reader<R: Read>(r: R) -> CollageResult<Self> {
        let art: ArtDirection = serde_json::from_reader(r)
            .map_err(|e| CollageError::serde(format!("parse art direction JSON: {e}")))?;
        art.validate()?;
        Ok(art)
    }

    /// Parse and validate art direction from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CollageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CollageError::validation(format!(
                "open art direction JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/art.rs"]
mod tests;
