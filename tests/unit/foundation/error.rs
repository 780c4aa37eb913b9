use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlendError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BlendError::unsupported("x")
            .to_string()
            .contains("unsupported operation:")
    );
}

#[test]
fn constructors_keep_message() {
    assert_eq!(
        BlendError::validation("rowstride too small"),
        BlendError::Validation("rowstride too small".to_string())
    );
    assert_eq!(
        BlendError::unsupported("mirroring"),
        BlendError::Unsupported("mirroring".to_string())
    );
}
