//! Blocking waits over scripted key readings.

use std::time::Duration;

use analog_keycodes::{GeneralizedKey, KeyCodeMode};
use analog_query::{KeyQuery, QueryConfig, QueryError};
use analog_sdk::{AnalogClient, AnalogStatus, DeviceId};
use analog_test_helpers::prelude::*;

const KEY_A_HID: u16 = 0x04;

fn client() -> AnalogClient<MockAnalogBackend> {
    AnalogClient::new(MockAnalogBackend::new())
}

fn query(client: &AnalogClient<MockAnalogBackend>) -> KeyQuery<'_, MockAnalogBackend> {
    KeyQuery::with_config(
        client,
        QueryConfig::default().with_poll_interval(Duration::ZERO),
    )
}

#[test]
fn test_wait_above_threshold_returns_after_value_drops() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [0.8, 0.7, 0.6, 0.5]);

    let outcome = query(&client).wait_above_threshold(KEY_A_HID, 0.5)?;
    assert_eq!(outcome.samples, 4);
    assert_analog_eq(outcome.value, 0.5);
    assert_eq!(client.backend().read_count(KEY_A_HID), 4);
    Ok(())
}

#[test]
fn test_wait_above_threshold_returns_immediately_when_below() -> TestResult {
    let client = client();
    client.backend().set_value(KEY_A_HID, 0.2);
    let outcome = query(&client).wait_above_threshold(KEY_A_HID, 0.5)?;
    assert_eq!(outcome.samples, 1);
    Ok(())
}

#[test]
fn test_wait_below_threshold_blocks_while_below() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [0.0, 0.1, 0.4, 0.6]);
    let outcome = query(&client).wait_below_threshold(KEY_A_HID, 0.5)?;
    assert_eq!(outcome.samples, 4);
    assert_analog_eq(outcome.value, 0.6);
    Ok(())
}

#[test]
fn test_wait_press_blocks_through_down_and_hold() -> TestResult {
    let client = client();
    // up, travelling, bottomed out and held, travelling back, released
    client
        .backend()
        .script(KEY_A_HID, [0.0, 0.4, 1.0, 1.0, 1.0, 0.6, 0.0]);

    let outcome = query(&client).wait_press(KEY_A_HID)?;
    assert_eq!(outcome.samples, 7);
    assert_analog_eq(outcome.value, 0.0);
    assert_eq!(client.backend().read_count(KEY_A_HID), 7);
    Ok(())
}

#[test]
fn test_wait_down_and_up() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [0.0, 0.0, 0.01]);
    assert_eq!(query(&client).wait_down(KEY_A_HID)?.samples, 3);

    client.backend().script(KEY_A_HID, [1.0, 1.0, 0.99]);
    assert_eq!(query(&client).wait_up(KEY_A_HID)?.samples, 3);
    Ok(())
}

#[test]
fn test_wait_fully_down_needs_exact_full_travel() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [0.5, 0.999, 1.0]);
    assert_eq!(query(&client).wait_fully_down(KEY_A_HID)?.samples, 3);
    Ok(())
}

#[test]
fn test_wait_fully_up_needs_exact_rest() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [1.0, 0.2, 0.001, 0.0]);
    assert_eq!(query(&client).wait_fully_up(KEY_A_HID)?.samples, 4);
    Ok(())
}

#[test]
fn test_wait_propagates_read_failure() {
    let client = client();
    client
        .backend()
        .script_results(KEY_A_HID, [Ok(0.0), Ok(0.0), Err(AnalogStatus::DeviceDisconnected)]);

    let err = must_err(query(&client).wait_down(KEY_A_HID));
    assert!(matches!(err, QueryError::Sdk(_)));
    assert_eq!(err.status(), Some(AnalogStatus::DeviceDisconnected));
    assert_eq!(client.backend().read_count(KEY_A_HID), 3);
}

#[test]
fn test_wait_unmapped_key_never_reads() -> TestResult {
    let client = client();
    client.set_keycode_mode(KeyCodeMode::VirtualKeyTranslate)?;

    let err = must_err(query(&client).wait_press(GeneralizedKey::Space));
    assert!(matches!(err, QueryError::KeyNotMapped(_)));
    assert!(
        client
            .backend()
            .calls()
            .iter()
            .all(|call| !matches!(call, MockCall::ReadAnalog(_)))
    );
    Ok(())
}

#[test]
fn test_wait_with_generalized_key_uses_mode() -> TestResult {
    let client = client();
    client.set_keycode_mode(KeyCodeMode::ScanCode1)?;
    client.backend().script(0x1E, [0.0, 0.7]);

    let outcome = query(&client).wait_down(GeneralizedKey::A)?;
    assert_eq!(outcome.samples, 2);
    assert_eq!(client.backend().read_count(0x1E), 2);
    assert_eq!(client.backend().read_count(KEY_A_HID), 0);
    Ok(())
}

#[test]
fn test_device_targeted_wait_reads_that_device() -> TestResult {
    let client = client();
    client
        .backend()
        .script_device(KEY_A_HID, DeviceId(9), [0.0, 1.0]);

    let outcome = query(&client)
        .for_device(DeviceId(9))
        .wait_fully_down(KEY_A_HID)?;
    assert_eq!(outcome.samples, 2);
    assert!(
        client
            .backend()
            .calls()
            .iter()
            .all(|call| *call == MockCall::ReadAnalogDevice(KEY_A_HID, DeviceId(9)))
    );
    Ok(())
}

#[test]
fn test_wait_sleeps_between_samples() -> TestResult {
    let client = client();
    client.backend().script(KEY_A_HID, [0.0, 0.0, 0.5]);
    let query = KeyQuery::with_config(
        &client,
        QueryConfig::default().with_poll_interval(Duration::from_millis(2)),
    );

    let started = std::time::Instant::now();
    query.wait_down(KEY_A_HID)?;
    assert!(started.elapsed() >= Duration::from_millis(4));
    Ok(())
}
