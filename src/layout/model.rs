use crate::{
    catalog::texture::TextureVariant,
    foundation::core::{PercentRect, Rgb8},
    foundation::error::{CollageError, CollageResult},
    layout::density::Density,
};

/// Generation phase a chunk belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkTier {
    /// Background layer.
    Large,
    /// Midground layer.
    Medium,
    /// Foreground accents.
    Small,
}

impl ChunkTier {
    /// Tiers in generation order.
    pub const ALL: [ChunkTier; 3] = [ChunkTier::Large, ChunkTier::Medium, ChunkTier::Small];
}

/// Which resolution variant a chunk paints with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// Large variant.
    Large,
    /// Small variant.
    Small,
    /// Pixelated variant, painted with nearest-neighbor scaling.
    Pixelated,
}

impl SizeClass {
    /// Catalog variant for this size class.
    pub fn variant(self) -> TextureVariant {
        match self {
            SizeClass::Large => TextureVariant::Large,
            SizeClass::Small => TextureVariant::Small,
            SizeClass::Pixelated => TextureVariant::Pixelated,
        }
    }
}

/// Sub-rectangle of a source texture, in percent of the texture.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CropRegion {
    /// Horizontal offset into the source.
    pub x: f64,
    /// Vertical offset into the source.
    pub y: f64,
    /// Width of the region.
    pub w: f64,
    /// Height of the region.
    pub h: f64,
}

impl CropRegion {
    /// `true` when the region lies fully inside the source texture.
    pub fn within_source(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= 100.0 && self.y + self.h <= 100.0
    }
}

/// One placed, cropped image fragment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CollageChunk {
    /// Phase that produced this chunk.
    pub tier: ChunkTier,
    /// Index into the texture catalog.
    pub texture_index: usize,
    /// Region of the texture to show.
    pub crop: CropRegion,
    /// Left edge, viewport percent.
    pub left: f64,
    /// Top edge, viewport percent.
    pub top: f64,
    /// Width, viewport percent.
    pub width: f64,
    /// Height, viewport percent.
    pub height: f64,
    /// Paint with nearest-neighbor scaling.
    pub pixelated: bool,
    /// Stacking index; unique and increasing in generation order.
    pub z_index: u32,
    /// Resolution variant to paint with.
    pub size_class: SizeClass,
    /// Hide below the small-viewport breakpoint.
    pub hide_on_small: bool,
}

impl CollageChunk {
    /// Placement as a percent rectangle.
    pub fn placement(&self) -> PercentRect {
        PercentRect {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
        }
    }
}

/// Thin full-width strip displaced sideways, re-displaced on scroll.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlitchBand {
    /// Vertical position, viewport percent.
    pub top: f64,
    /// Height, viewport percent.
    pub height: f64,
    /// Resting horizontal displacement in pixels.
    pub offset_x: i32,
    /// Index into the texture catalog.
    pub texture_index: usize,
    /// Vertical crop offset (percent) into the texture's small variant.
    pub crop_y: f64,
}

/// Aggregate generator output. Immutable once built.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CollageLayout {
    /// Seed the layout was generated from.
    pub seed: String,
    /// Density the layout was generated with.
    pub density: Density,
    /// Palette index of the base color.
    pub base_color_index: usize,
    /// Background color behind all chunks.
    pub base_color: Rgb8,
    /// Chunks in generation (and stacking) order.
    pub chunks: Vec<CollageChunk>,
    /// Glitch bands in generation order.
    pub glitch_bands: Vec<GlitchBand>,
}

impl CollageLayout {
    /// Chunks produced by one phase, in order.
    pub fn chunks_in(&self, tier: ChunkTier) -> impl Iterator<Item = &CollageChunk> {
        self.chunks.iter().filter(move |c| c.tier == tier)
    }

    /// Number of chunks produced by one phase.
    pub fn tier_count(&self, tier: ChunkTier) -> usize {
        self.chunks_in(tier).count()
    }

    /// Parse a layout previously written with [`CollageLayout::to_json_pretty`].
    pub fn from_json(s: &str) -> CollageResult<Self> {
        serde_json::from_str(s).map_err(|e| CollageError::serde(format!("parse layout JSON: {e}")))
    }

    /// Pretty JSON rendering of the layout.
    pub fn to_json_pretty(&self) -> CollageResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CollageError::serde(format!("serialize layout JSON: {e}")))
    }
}
