use std::fmt;

use crate::{
    foundation::math::Fnv1a64,
    layout::density::Density,
    layout::model::{ChunkTier, CollageLayout, SizeClass},
};

/// Stable 128-bit digest of every field of a layout, bit for bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutFingerprint {
    /// First lane.
    pub hi: u64,
    /// Second lane.
    pub lo: u64,
}

impl fmt::Display for LayoutFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint a layout. Floats are hashed by bit pattern, so any drift shows up.
pub fn fingerprint_layout(layout: &CollageLayout) -> LayoutFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    write_str_pair(&mut a, &mut b, &layout.seed);
    write_u8_pair(
        &mut a,
        &mut b,
        match layout.density {
            Density::Full => 0,
            Density::Medium => 1,
            Density::Sparse => 2,
        },
    );
    write_u64_pair(&mut a, &mut b, layout.base_color_index as u64);
    let c = layout.base_color;
    for v in [c.r, c.g, c.b] {
        write_u8_pair(&mut a, &mut b, v);
    }

    write_u64_pair(&mut a, &mut b, layout.chunks.len() as u64);
    for chunk in &layout.chunks {
        write_u8_pair(
            &mut a,
            &mut b,
            match chunk.tier {
                ChunkTier::Large => 0,
                ChunkTier::Medium => 1,
                ChunkTier::Small => 2,
            },
        );
        write_u64_pair(&mut a, &mut b, chunk.texture_index as u64);
        for v in [chunk.crop.x, chunk.crop.y, chunk.crop.w, chunk.crop.h] {
            write_f64_pair(&mut a, &mut b, v);
        }
        for v in [chunk.left, chunk.top, chunk.width, chunk.height] {
            write_f64_pair(&mut a, &mut b, v);
        }
        write_u8_pair(&mut a, &mut b, u8::from(chunk.pixelated));
        write_u64_pair(&mut a, &mut b, u64::from(chunk.z_index));
        write_u8_pair(
            &mut a,
            &mut b,
            match chunk.size_class {
                SizeClass::Large => 0,
                SizeClass::Small => 1,
                SizeClass::Pixelated => 2,
            },
        );
        write_u8_pair(&mut a, &mut b, u8::from(chunk.hide_on_small));
    }

    write_u64_pair(&mut a, &mut b, layout.glitch_bands.len() as u64);
    for band in &layout.glitch_bands {
        write_f64_pair(&mut a, &mut b, band.top);
        write_f64_pair(&mut a, &mut b, band.height);
        write_i64_pair(&mut a, &mut b, i64::from(band.offset_x));
        write_u64_pair(&mut a, &mut b, band.texture_index as u64);
        write_f64_pair(&mut a, &mut b, band.crop_y);
    }

    LayoutFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_i64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: i64) {
    write_u64_pair(a, b, v as u64);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    a.write_f64(v);
    b.write_f64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    a.write_str(s);
    b.write_str(s);
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
