use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CollageError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        CollageError::catalog("x")
            .to_string()
            .contains("catalog error:")
    );
    assert!(
        CollageError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CollageError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        CollageError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn errors_convert_into_anyhow() {
    let err: anyhow::Error = CollageError::catalog("texture index 9 out of bounds").into();
    assert!(err.to_string().contains("texture index 9"));
    assert!(err.downcast_ref::<CollageError>().is_some());
}
