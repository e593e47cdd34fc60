use super::*;

#[test]
fn default_is_valid() {
    ArtDirection::default().validate().unwrap();
    assert_eq!(ArtDirection::builtin(), &ArtDirection::default());
}

#[test]
fn medium_hide_policy_matches_sixty_percent_rule() {
    let p = ArtDirection::default().medium.hide_on_small;
    // 10 chunks: indices 0..=6 shown, 7.. hidden (index > 6.0).
    assert!(!p.hides(6, 10));
    assert!(p.hides(7, 10));
    assert!(HidePolicy::Always.hides(0, 1));
    assert!(!HidePolicy::Never.hides(99, 1));
}

#[test]
fn partial_json_keeps_defaults() {
    let art = ArtDirection::from_reader(
        r#"{"palette":[{"r":0,"g":0,"b":0}]}"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(art.palette, vec![Rgb8::new(0, 0, 0)]);
    assert_eq!(art.large, ArtDirection::default().large);
}

#[test]
fn hide_policy_serializes_with_tag() {
    let json = serde_json::to_value(HidePolicy::BeyondFraction(0.6)).unwrap();
    assert_eq!(json["kind"], "beyond_fraction");
    assert_eq!(json["fraction"], 0.6);
}

#[test]
fn empty_palette_is_rejected() {
    let art = ArtDirection {
        palette: vec![],
        ..ArtDirection::default()
    };
    assert!(art.validate().is_err());
}

#[test]
fn inverted_ranges_are_rejected() {
    let mut art = ArtDirection::default();
    art.medium.width = Span::new(40.0, 12.0);
    assert!(art.validate().unwrap_err().to_string().contains("medium.width"));

    let mut art = ArtDirection::default();
    art.bands.count = IntRange::new(5, 2);
    assert!(art.validate().is_err());
}

#[test]
fn probability_outside_unit_interval_is_rejected() {
    let mut art = ArtDirection::default();
    art.small.pixelate_probability = Some(1.5);
    assert!(art.validate().is_err());
}

#[test]
fn pixelated_as_base_size_class_is_rejected() {
    let mut art = ArtDirection::default();
    art.large.size_class = SizeClass::Pixelated;
    assert!(art.validate().is_err());
}

#[test]
fn invalid_json_is_a_serde_error() {
    let err = ArtDirection::from_reader("{".as_bytes()).unwrap_err();
    assert!(matches!(err, CollageError::Serde(_)));
}
