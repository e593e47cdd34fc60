use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{
    catalog::texture::{TextureCatalog, TextureVariant},
    foundation::core::{PercentRect, Point, Rect, Rgb8, Size},
    foundation::error::{CollageError, CollageResult},
    layout::model::CollageLayout,
};

/// Presentation constants applied when compiling a layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaintOptions {
    /// Viewports narrower than this hide chunks flagged `hide_on_small`.
    pub small_viewport_breakpoint_px: u32,
    /// Opacity of every chunk.
    pub chunk_opacity: f32,
    /// Opacity of every glitch band.
    pub band_opacity: f32,
    /// Lowest z-order for bands; raised to the chunk count when chunks would reach it.
    pub band_z_base: u32,
    /// Per-band animation delay step, seconds.
    pub band_delay_step_s: f64,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            small_viewport_breakpoint_px: 640,
            chunk_opacity: 0.92,
            band_opacity: 0.85,
            band_z_base: 100,
            band_delay_step_s: 2.5,
        }
    }
}

impl PaintOptions {
    /// Check opacities and the delay step.
    pub fn validate(&self) -> CollageResult<()> {
        for (name, v) in [
            ("chunk_opacity", self.chunk_opacity),
            ("band_opacity", self.band_opacity),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(CollageError::validation(format!(
                    "{name} must lie within [0, 1]"
                )));
            }
        }
        if !(self.band_delay_step_s.is_finite() && self.band_delay_step_s >= 0.0) {
            return Err(CollageError::validation(
                "band_delay_step_s must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Parse and validate paint options from JSON. Missing fields keep their defaults.
    pub fn from_reader<R: Read>(r: R) -> CollageResult<Self> {
        let opts: PaintOptions = serde_json::from_reader(r)
            .map_err(|e| CollageError::serde(format!("parse paint options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse and validate paint options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CollageResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CollageError::validation(format!(
                "open paint options JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Image scaling filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Default smoothed scaling.
    Smooth,
    /// Nearest-neighbor scaling for pixelated chunks.
    NearestNeighbor,
}

/// Breakpoint gating for a draw op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visibility {
    /// Shown at every viewport width.
    Always,
    /// Shown only when the viewport is at least this wide.
    AtLeast {
        /// Minimum viewport width in pixels.
        min_viewport_px: u32,
    },
}

impl Visibility {
    /// Whether the op is shown at `viewport_width_px`.
    pub fn shown_at(self, viewport_width_px: f64) -> bool {
        match self {
            Visibility::Always => true,
            Visibility::AtLeast { min_viewport_px } => {
                viewport_width_px >= f64::from(min_viewport_px)
            }
        }
    }
}

/// A cropped image fragment placed on the background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChunkDraw {
    /// Index of the source chunk in the layout.
    pub chunk_index: usize,
    /// Placement in viewport percent.
    pub rect: PercentRect,
    /// Paint order; higher paints on top.
    pub z: u32,
    /// Resolved variant reference.
    pub asset: String,
    /// Background position in percent of the source (`crop.x`, `crop.y`).
    pub crop_origin: Point,
    /// Scaling filter.
    pub sampling: Sampling,
    /// Breakpoint gating.
    pub visibility: Visibility,
    /// Opacity.
    pub opacity: f32,
}

impl ChunkDraw {
    /// Placement in pixels for a viewport of the given size.
    pub fn pixel_rect(&self, viewport: Size) -> Rect {
        self.rect.to_px(viewport)
    }
}

/// A full-width glitch band at its resting displacement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandDraw {
    /// Index of the source band in the layout.
    pub band_index: usize,
    /// Vertical position, viewport percent.
    pub top: f64,
    /// Height, viewport percent.
    pub height: f64,
    /// Paint order; always above every chunk.
    pub z: u32,
    /// Resting horizontal translation in pixels.
    pub resting_offset_px: f64,
    /// Small-variant reference.
    pub asset: String,
    /// Vertical background position, percent.
    pub crop_y: f64,
    /// Opacity.
    pub opacity: f32,
    /// Idle animation delay, seconds.
    pub animation_delay_s: f64,
}

impl BandDraw {
    /// Band strip in pixels, before horizontal translation.
    pub fn pixel_rect(&self, viewport: Size) -> Rect {
        let sy = viewport.height / 100.0;
        Rect::new(
            0.0,
            self.top * sy,
            viewport.width,
            (self.top + self.height) * sy,
        )
    }
}

/// One paint operation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Image chunk.
    Chunk(ChunkDraw),
    /// Glitch band.
    Band(BandDraw),
}

impl DrawOp {
    /// Paint order of the op.
    pub fn z(&self) -> u32 {
        match self {
            DrawOp::Chunk(c) => c.z,
            DrawOp::Band(b) => b.z,
        }
    }
}

/// Backend-agnostic paint list for one layout, ordered bottom to top.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaintPlan {
    /// Fill behind every op.
    pub background: Rgb8,
    /// Ops in ascending z order.
    pub ops: Vec<DrawOp>,
    /// Breakpoint the plan was compiled with.
    pub small_viewport_breakpoint_px: u32,
}

impl PaintPlan {
    /// Chunk ops in paint order.
    pub fn chunks(&self) -> impl Iterator<Item = &ChunkDraw> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Chunk(c) => Some(c),
            DrawOp::Band(_) => None,
        })
    }

    /// Band ops in paint order.
    pub fn bands(&self) -> impl Iterator<Item = &BandDraw> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Band(b) => Some(b),
            DrawOp::Chunk(_) => None,
        })
    }

    /// Ops shown at a given viewport width.
    pub fn visible_at(&self, viewport_width_px: f64) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(move |op| match op {
            DrawOp::Chunk(c) => c.visibility.shown_at(viewport_width_px),
            DrawOp::Band(_) => true,
        })
    }
}

/// Compile a layout into a paint plan, resolving texture references against `catalog`.
///
/// Fails when the layout references a texture index the catalog does not have.
#[tracing::instrument(level = "debug", skip_all, fields(seed = %layout.seed))]
pub fn compile_layout(
    layout: &CollageLayout,
    catalog: &TextureCatalog,
    opts: &PaintOptions,
) -> CollageResult<PaintPlan> {
    opts.validate()?;

    let mut ops = Vec::with_capacity(layout.chunks.len() + layout.glitch_bands.len());
    for (chunk_index, chunk) in layout.chunks.iter().enumerate() {
        let texture = catalog.require(chunk.texture_index)?;
        ops.push(DrawOp::Chunk(ChunkDraw {
            chunk_index,
            rect: chunk.placement(),
            z: chunk.z_index,
            asset: texture.variant(chunk.size_class.variant()).to_string(),
            crop_origin: Point::new(chunk.crop.x, chunk.crop.y),
            sampling: if chunk.pixelated {
                Sampling::NearestNeighbor
            } else {
                Sampling::Smooth
            },
            visibility: if chunk.hide_on_small {
                Visibility::AtLeast {
                    min_viewport_px: opts.small_viewport_breakpoint_px,
                }
            } else {
                Visibility::Always
            },
            opacity: opts.chunk_opacity,
        }));
    }

    let chunk_count = u32::try_from(layout.chunks.len())
        .map_err(|_| CollageError::render("chunk count overflows z-order"))?;
    let band_z = opts.band_z_base.max(chunk_count);
    for (band_index, band) in layout.glitch_bands.iter().enumerate() {
        let texture = catalog.require(band.texture_index)?;
        let z = u32::try_from(band_index)
            .ok()
            .and_then(|i| band_z.checked_add(i))
            .ok_or_else(|| CollageError::render("band z-order overflow"))?;
        ops.push(DrawOp::Band(BandDraw {
            band_index,
            top: band.top,
            height: band.height,
            z,
            resting_offset_px: f64::from(band.offset_x),
            asset: texture.variant(TextureVariant::Small).to_string(),
            crop_y: band.crop_y,
            opacity: opts.band_opacity,
            animation_delay_s: band_index as f64 * opts.band_delay_step_s,
        }));
    }

    // Stable: ops with equal z keep generation order.
    ops.sort_by_key(DrawOp::z);

    tracing::debug!(ops = ops.len(), band_z, "compiled paint plan");
    Ok(PaintPlan {
        background: layout.base_color,
        ops,
        small_viewport_breakpoint_px: opts.small_viewport_breakpoint_px,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
