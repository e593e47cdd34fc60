use rayon::prelude::*;

use crate::{
    catalog::texture::TextureCatalog,
    foundation::error::{CollageError, CollageResult},
    layout::art::{ArtDirection, Span},
    layout::density::Density,
    layout::model::{ChunkTier, CollageChunk, CollageLayout, CropRegion, GlitchBand, SizeClass},
    random::stream::RandomStream,
};

/// Generate a layout with the built-in catalog and default art direction.
///
/// Total over all `(seed, density)` pairs and bit-for-bit reproducible.
pub fn generate(seed: &str, density: Density) -> CollageLayout {
    CollageGenerator::builtin().generate(seed, density)
}

/// Like [`generate`], but takes the density as a label and rejects unknown ones.
pub fn generate_labeled(seed: &str, density: &str) -> CollageResult<CollageLayout> {
    Ok(generate(seed, Density::parse(density)?))
}

/// Layout generator bound to a texture catalog and art direction.
///
/// Phases draw from one shared stream in a fixed order (base color, large, medium, small,
/// bands). Reordering phases or draws within a phase changes every layout.
#[derive(Clone, Copy, Debug)]
pub struct CollageGenerator<'a> {
    catalog: &'a TextureCatalog,
    art: &'a ArtDirection,
}

impl<'a> CollageGenerator<'a> {
    /// Bind a catalog and art direction, validating both.
    pub fn new(catalog: &'a TextureCatalog, art: &'a ArtDirection) -> CollageResult<Self> {
        if catalog.is_empty() {
            return Err(CollageError::catalog(
                "cannot generate layouts from an empty texture catalog",
            ));
        }
        art.validate()?;
        Ok(Self { catalog, art })
    }

    /// Catalog this generator draws texture indices from.
    pub fn catalog(&self) -> &'a TextureCatalog {
        self.catalog
    }

    /// Art direction in use.
    pub fn art(&self) -> &'a ArtDirection {
        self.art
    }

    /// Generate the layout for one `(seed, density)` pair.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn generate(&self, seed: &str, density: Density) -> CollageLayout {
        let mut rng = RandomStream::new(seed);

        let base_color_index = rng.next_index(self.art.palette.len());
        let base_color = self.art.palette[base_color_index];

        let mut chunks = Vec::new();
        let mut z_index = 0u32;
        for tier in ChunkTier::ALL {
            self.place_tier(&mut rng, tier, density, &mut z_index, &mut chunks);
        }
        let glitch_bands = self.place_bands(&mut rng, density);

        let layout = CollageLayout {
            seed: seed.to_string(),
            density,
            base_color_index,
            base_color,
            chunks,
            glitch_bands,
        };
        tracing::debug!(
            large = layout.tier_count(ChunkTier::Large),
            medium = layout.tier_count(ChunkTier::Medium),
            small = layout.tier_count(ChunkTier::Small),
            bands = layout.glitch_bands.len(),
            "generated collage layout"
        );
        layout
    }

    /// Parse `density` as a label and generate; unknown labels fail fast.
    pub fn generate_labeled(&self, seed: &str, density: &str) -> CollageResult<CollageLayout> {
        Ok(self.generate(seed, Density::parse(density)?))
    }

    /// Generate one layout per seed in parallel. Output order follows `seeds`.
    pub fn generate_batch<S>(&self, seeds: &[S], density: Density) -> Vec<CollageLayout>
    where
        S: AsRef<str> + Sync,
    {
        seeds
            .par_iter()
            .map(|s| self.generate(s.as_ref(), density))
            .collect()
    }

    fn place_tier(
        &self,
        rng: &mut RandomStream,
        tier: ChunkTier,
        density: Density,
        z_index: &mut u32,
        out: &mut Vec<CollageChunk>,
    ) {
        let p = self.art.tier(tier);
        let count = density.scale_count(rng.next_int(p.count.min, p.count.max));
        out.reserve(count);

        for i in 0..count {
            let texture_index = rng.next_index(self.catalog.len());
            let crop = crop_random(rng, p.crop_fraction);
            let width = rng.next_range(p.width.min, p.width.max);
            let height = rng.next_range(p.height.min, p.height.max);
            let left = rng.next_range(-width * p.bleed.leading, 100.0 - width * p.bleed.trailing);
            let top = rng.next_range(
                -height * p.bleed.leading,
                100.0 - height * p.bleed.trailing,
            );
            let pixelated = p
                .pixelate_probability
                .is_some_and(|prob| rng.next_chance(prob));

            out.push(CollageChunk {
                tier,
                texture_index,
                crop,
                left,
                top,
                width,
                height,
                pixelated,
                z_index: *z_index,
                size_class: if pixelated {
                    SizeClass::Pixelated
                } else {
                    p.size_class
                },
                hide_on_small: p.hide_on_small.hides(i, count),
            });
            *z_index += 1;
        }
    }

    fn place_bands(&self, rng: &mut RandomStream, density: Density) -> Vec<GlitchBand> {
        let b = &self.art.bands;
        let count = density.scale_count(rng.next_int(b.count.min, b.count.max));
        (0..count)
            .map(|_| GlitchBand {
                top: rng.next_range(b.top.min, b.top.max),
                height: rng.next_range(b.height.min, b.height.max),
                offset_x: rng.next_int(b.offset_px.min, b.offset_px.max),
                texture_index: rng.next_index(self.catalog.len()),
                crop_y: rng.next_range(b.crop_y.min, b.crop_y.max),
            })
            .collect()
    }
}

impl CollageGenerator<'static> {
    /// Generator over the built-in catalog and default art direction.
    pub fn builtin() -> Self {
        // Both statics are non-empty and valid; see their unit tests.
        Self {
            catalog: TextureCatalog::builtin(),
            art: ArtDirection::builtin(),
        }
    }
}

// Width/height fractions first, then the offsets that keep the crop inside the source.
fn crop_random(rng: &mut RandomStream, fraction: Span) -> CropRegion {
    let w = rng.next_range(fraction.min, fraction.max);
    let h = rng.next_range(fraction.min, fraction.max);
    let x = rng.next_range(0.0, (1.0 - w).max(0.0));
    let y = rng.next_range(0.0, (1.0 - h).max(0.0));
    CropRegion {
        x: x * 100.0,
        y: y * 100.0,
        w: w * 100.0,
        h: h * 100.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/generator.rs"]
mod tests;
