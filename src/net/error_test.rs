use super::*;

#[test]
fn status_error_formats_code() {
    assert_eq!(SourceError::Status(503).to_string(), "request failed: 503");
}

#[test]
fn serde_errors_map_to_decode_domain() {
    let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
    let mapped = SourceError::from(err);
    assert!(matches!(mapped, SourceError::Decode(_)));
    assert!(!mapped.is_transport());
}

#[test]
fn transport_domain_covers_connection_and_status() {
    assert!(SourceError::Transport("reset".to_owned()).is_transport());
    assert!(SourceError::Status(404).is_transport());
    assert!(SourceError::Unavailable.is_transport());
}
