use super::*;

#[test]
fn labels_parse_exactly() {
    for d in Density::ALL {
        assert_eq!(d.as_str().parse::<Density>().unwrap(), d);
    }
}

#[test]
fn unknown_labels_fail_fast() {
    for bad in ["", "Full", "dense", " full", "medium "] {
        let err = Density::parse(bad).unwrap_err();
        assert!(matches!(err, CollageError::InvalidArgument(_)), "{bad:?}");
    }
}

#[test]
fn serde_uses_lowercase_labels_and_rejects_unknown() {
    assert_eq!(serde_json::to_string(&Density::Medium).unwrap(), "\"medium\"");
    assert!(serde_json::from_str::<Density>("\"dense\"").is_err());
}

#[test]
fn scale_count_rounds_to_nearest() {
    assert_eq!(Density::Full.scale_count(6), 6);
    // 6 * 0.65 = 3.9000000000000004
    assert_eq!(Density::Medium.scale_count(6), 4);
    // 10 * 0.65 = 6.5, ties away from zero
    assert_eq!(Density::Medium.scale_count(10), 7);
    assert_eq!(Density::Medium.scale_count(5), 3);
    assert_eq!(Density::Sparse.scale_count(4), 2);
    assert_eq!(Density::Sparse.scale_count(3), 1);
    assert_eq!(Density::Sparse.scale_count(0), 0);
    assert_eq!(Density::Full.scale_count(-3), 0);
}

#[test]
fn default_is_full() {
    assert_eq!(Density::default(), Density::Full);
}
