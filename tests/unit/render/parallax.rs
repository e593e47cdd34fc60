use super::*;
use crate::{
    catalog::texture::TextureCatalog,
    compile::plan::{PaintOptions, compile_layout},
    layout::{density::Density, generator::generate},
};

#[test]
fn rates_alternate_sign_and_grow() {
    assert_eq!(band_rate(0), 0.3);
    assert_eq!(band_rate(1), -(0.3 + 0.15));
    assert_eq!(band_rate(2), 0.3 + 2.0 * 0.15);
    for i in 0..8 {
        let r = band_rate(i);
        assert_eq!(r > 0.0, i % 2 == 0);
        if i > 0 {
            assert!(r.abs() > band_rate(i - 1).abs());
        }
    }
}

#[test]
fn translation_is_rest_plus_scaled_scroll() {
    assert_eq!(band_translation(8.0, 0.0, 3), 8.0);
    assert_eq!(band_translation(8.0, 100.0, 0), 8.0 + 100.0 * 0.3);
    assert_eq!(band_translation(-4.0, 200.0, 1), -4.0 + 200.0 * band_rate(1));
}

#[test]
fn gate_is_single_flight() {
    let mut gate = FrameGate::default();
    assert_eq!(gate.state(), FrameState::Idle);
    assert!(!gate.fire());

    assert!(gate.request());
    assert!(!gate.request());
    assert_eq!(gate.state(), FrameState::FrameScheduled);

    assert!(gate.fire());
    assert_eq!(gate.state(), FrameState::Idle);
    assert!(!gate.fire());
    assert!(gate.request());
}

#[test]
fn bands_start_at_rest_and_track_scroll() {
    let layout = generate("home", Density::Full);
    let plan = compile_layout(&layout, TextureCatalog::builtin(), &PaintOptions::default()).unwrap();
    let mut bands = ParallaxBands::from_plan(&plan);

    assert_eq!(bands.len(), layout.glitch_bands.len());
    let rest: Vec<f64> = layout.glitch_bands.iter().map(|b| f64::from(b.offset_x)).collect();
    assert_eq!(bands.resting(), rest.as_slice());
    assert_eq!(bands.applied(), rest.as_slice());

    let applied = bands.recompute(250.0).to_vec();
    for (i, x) in applied.iter().enumerate() {
        assert_eq!(*x, band_translation(rest[i], 250.0, i));
    }
    assert_eq!(bands.recompute(0.0), rest.as_slice());
}

#[test]
fn empty_plan_has_no_bands() {
    let bands = ParallaxBands::default();
    assert!(bands.is_empty());
}
