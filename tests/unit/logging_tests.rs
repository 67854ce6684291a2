// Logging module unit tests

use watermark_wizard::logging::*;

#[test]
fn test_init_subscriber_succeeds() {
    let result = init_subscriber(LogFormat::Json);
    assert!(result.is_ok(), "Subscriber initialization should succeed");
}

#[test]
fn test_init_subscriber_is_idempotent() {
    assert!(init_subscriber(LogFormat::Text).is_ok());
    assert!(init_subscriber(LogFormat::Text).is_ok());
    tracing::info!(file = "photo.jpg", "Logging still works");
}

#[test]
fn test_default_filter_is_info() {
    assert_eq!(DEFAULT_LOG_FILTER, "info");
}

#[test]
fn test_init_subscriber_installs_global_dispatcher() {
    init_subscriber(LogFormat::Text).unwrap();
    assert!(tracing::dispatcher::has_been_set());
}
