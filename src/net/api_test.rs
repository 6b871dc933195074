use super::*;

#[test]
fn open_market_window_path_formats_target() {
    assert_eq!(open_market_window_path(&TargetId::from("34")), "/open_market_window/34");
}

#[test]
fn http_backend_joins_base_and_path() {
    assert_eq!(HttpBackend::default().url("/route"), "/route");
    assert_eq!(HttpBackend::new("http://localhost:8000/").url(CREATE_ROUTE_PATH), "http://localhost:8000/create_route");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn native_backend_reports_unavailable() {
    let backend = HttpBackend::default();
    assert_eq!(futures::executor::block_on(backend.get_json("/route")), Err(SourceError::Unavailable));
    assert_eq!(futures::executor::block_on(backend.post(CREATE_ROUTE_PATH)), Err(SourceError::Unavailable));
}
