use super::*;
use crate::net::error::SourceError;

fn active() -> SourceState<u32> {
    let mut state = SourceState::default();
    state.activate();
    state
}

#[test]
fn loading_until_first_payload() {
    let mut state = active();
    assert_eq!(banner_for(&state), Some(Banner::Loading));
    state.apply_message(Ok(1));
    assert_eq!(banner_for(&state), None);
}

#[test]
fn error_banner_keeps_showing_over_stale_data() {
    let mut state = active();
    state.apply_message(Ok(1));
    state.apply_message(Err(SourceError::Status(503)));
    assert_eq!(banner_for(&state), Some(Banner::Error("request failed: 503".to_owned())));
    assert_eq!(state.payload, Some(1));
}

#[test]
fn gave_up_wins_over_plain_error() {
    let mut state = active();
    state.fail_transport(&SourceError::Transport("reset".to_owned()), None);
    let banner = banner_for(&state).expect("banner");
    assert_eq!(banner, Banner::GaveUp("connection failed: reset".to_owned()));
    assert_eq!(banner.text(), "Live updates stopped: connection failed: reset");
}

#[test]
fn stopped_source_without_data_shows_nothing() {
    let mut state = active();
    state.deactivate();
    assert_eq!(banner_for(&state), None);
}

#[test]
fn failure_before_first_payload_shows_error_not_loading() {
    let mut state = active();
    state.apply_message(Err(SourceError::Decode("bad".to_owned())));
    assert_eq!(banner_for(&state), Some(Banner::Error("invalid payload: bad".to_owned())));
}
