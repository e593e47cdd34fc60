//! Collage builds deterministic, seed-driven background collages.
//!
//! A route name (or any string) seeds a 32-bit random stream. The stream is consumed in a fixed
//! order to place layered texture chunks and horizontal glitch bands, so the same seed and
//! density always produce the same [`CollageLayout`]:
//!
//! - Generate a layout with [`generate`] or a configured [`CollageGenerator`]
//! - Compile it against a [`TextureCatalog`] into a z-ordered [`PaintPlan`]
//! - Paint the plan through a [`PaintBackend`] such as [`HtmlBackend`]
//! - Mount it in a [`Presenter`] to drive scroll-reactive band parallax
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod catalog;
pub(crate) mod compile;
pub(crate) mod layout;
pub(crate) mod random;
pub(crate) mod render;

pub use crate::foundation::core::{PercentRect, Point, Rect, Rgb8, Size};
pub use crate::foundation::error::{CollageError, CollageResult};

pub use crate::catalog::texture::{Texture, TextureCatalog, TextureVariant};
pub use crate::compile::fingerprint::{LayoutFingerprint, fingerprint_layout};
pub use crate::compile::plan::{
    BandDraw, ChunkDraw, DrawOp, PaintOptions, PaintPlan, Sampling, Visibility, compile_layout,
};
pub use crate::layout::art::{
    ArtDirection, BandParams, Bleed, HidePolicy, IntRange, Span, TierParams,
};
pub use crate::layout::density::Density;
pub use crate::layout::generator::{CollageGenerator, generate, generate_labeled};
pub use crate::layout::model::{
    ChunkTier, CollageChunk, CollageLayout, CropRegion, GlitchBand, SizeClass,
};
pub use crate::random::stream::{RandomStream, STREAM_INCREMENT, seed_state};
pub use crate::render::backend::{PaintBackend, execute_plan};
pub use crate::render::html::HtmlBackend;
pub use crate::render::parallax::{FrameState, ParallaxBands, band_rate, band_translation};
pub use crate::render::presenter::{FrameHost, FrameUpdate, Presenter, ScrollDisposition};
