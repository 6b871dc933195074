use super::*;
use std::collections::HashMap;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

// =============================================================
// Policies
// =============================================================

#[test]
fn poll_policy_rejects_zero_interval() {
    assert_eq!(PollPolicy::new(Duration::ZERO), Err(ConfigError::ZeroInterval));
}

#[test]
fn poll_policy_without_backoff_keeps_fixed_cadence() {
    let policy = PollPolicy::new(ms(500)).expect("policy");
    assert_eq!(policy.delay(0), ms(500));
    assert_eq!(policy.delay(7), ms(500));
}

#[test]
fn poll_policy_backoff_doubles_and_caps() {
    let policy = PollPolicy::new(ms(1_000)).expect("policy").with_backoff(ms(5_000));
    assert_eq!(policy.delay(0), ms(1_000));
    assert_eq!(policy.delay(1), ms(2_000));
    assert_eq!(policy.delay(2), ms(4_000));
    assert_eq!(policy.delay(3), ms(5_000));
    assert_eq!(policy.delay(40), ms(5_000));
}

#[test]
fn backoff_doubles_from_initial_and_saturates() {
    let backoff = Backoff { initial: ms(100), max: ms(1_000) };
    assert_eq!(backoff.delay(0), ms(100));
    assert_eq!(backoff.delay(3), ms(800));
    assert_eq!(backoff.delay(4), ms(1_000));
    assert_eq!(backoff.delay(u32::MAX), ms(1_000));
}

#[test]
fn reconnect_policy_is_bounded() {
    let policy = ReconnectPolicy::default();
    assert_eq!(policy.next_delay(1), Some(ms(1_000)));
    assert_eq!(policy.next_delay(2), Some(ms(2_000)));
    assert_eq!(policy.next_delay(5), Some(ms(10_000)));
    assert_eq!(policy.next_delay(6), None);
}

#[test]
fn reconnect_never_gives_up_immediately() {
    assert_eq!(ReconnectPolicy::never().next_delay(1), None);
}

// =============================================================
// ClientConfig
// =============================================================

#[test]
fn default_config_targets_same_origin() {
    let config = ClientConfig::default();
    assert_eq!(config.url(&config.route_path), "/route");
    assert_eq!(config.url(&config.stream_path), "/data_stream");
    assert_eq!(config.route_poll.interval, ms(DEFAULT_POLL_MS));
}

#[test]
fn url_joins_base_without_double_slash() {
    let config = ClientConfig { api_base: "http://localhost:8000/".to_owned(), ..ClientConfig::default() };
    assert_eq!(config.url("/route_info"), "http://localhost:8000/route_info");
    assert_eq!(config.url("create_route"), "http://localhost:8000/create_route");
}

#[test]
fn overrides_apply_parsed_values() {
    let values: HashMap<&str, &str> = HashMap::from([
        ("tradeview:api-base", " http://api.local/ "),
        ("tradeview:poll-ms", "750"),
        ("tradeview:stream-retries", "2"),
    ]);
    let config = ClientConfig::default().with_overrides(|name| values.get(name).map(|v| (*v).to_owned()));
    assert_eq!(config.api_base, "http://api.local");
    assert_eq!(config.route_poll.interval, ms(750));
    assert_eq!(config.route_info_poll.interval, ms(750));
    assert_eq!(config.reconnect.max_retries, 2);
}

#[test]
fn overrides_ignore_invalid_values() {
    let values: HashMap<&str, &str> = HashMap::from([("tradeview:poll-ms", "0"), ("tradeview:stream-retries", "many")]);
    let config = ClientConfig::default().with_overrides(|name| values.get(name).map(|v| (*v).to_owned()));
    assert_eq!(config, ClientConfig::default());
}
