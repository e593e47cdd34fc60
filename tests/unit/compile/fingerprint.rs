use super::*;
use crate::layout::generator::generate;

#[test]
fn fingerprint_is_deterministic_for_same_layout() {
    let layout = generate("home", Density::Full);
    assert_eq!(fingerprint_layout(&layout), fingerprint_layout(&layout.clone()));
}

#[test]
fn fingerprint_matches_recorded_golden() {
    assert_eq!(
        fingerprint_layout(&generate("home", Density::Full)).to_string(),
        "a7387db5e1b6179c428b6831981eb0e2"
    );
    assert_eq!(
        fingerprint_layout(&generate("", Density::Sparse)).to_string(),
        "8e89a9a7fa8cf2d8af0ea336225c0346"
    );
}

#[test]
fn fingerprint_changes_when_any_field_changes() {
    let base = generate("home", Density::Full);
    let mut nudged = base.clone();
    nudged.chunks[3].left = f64::from_bits(nudged.chunks[3].left.to_bits() + 1);
    assert_ne!(fingerprint_layout(&base), fingerprint_layout(&nudged));

    let mut flipped = base.clone();
    flipped.glitch_bands[0].offset_x = -flipped.glitch_bands[0].offset_x;
    assert_ne!(fingerprint_layout(&base), fingerprint_layout(&flipped));
}

#[test]
fn distinct_seeds_produce_distinct_fingerprints() {
    let mut seen = std::collections::HashSet::new();
    for i in 0..256 {
        let layout = generate(&format!("route-{i}"), Density::Medium);
        assert!(seen.insert(fingerprint_layout(&layout)));
    }
}
