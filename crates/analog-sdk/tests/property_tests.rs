//! Property tests for native code decoding and session buffers.

use analog_sdk::{
    AnalogClient, AnalogSample, AnalogStatus, DeviceEventKind, DeviceId, DeviceType, SdkError,
};
use analog_test_helpers::mock::MockAnalogBackend;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_status_codes_decode_to_themselves(code in -2100_i32..100) {
        match AnalogStatus::from_code(code) {
            Some(status) => {
                prop_assert_eq!(status.code(), code);
                prop_assert!((-2000..=-1990).contains(&code) || code == 1);
            }
            None => {
                let unknown = matches!(
                    SdkError::from_code(code),
                    SdkError::UnknownStatus(c) if c == code
                );
                prop_assert!(unknown);
            }
        }
    }

    #[test]
    fn prop_failure_codes_never_decode_to_ok(code in -2000_i32..=-1990) {
        let error = SdkError::from_code(code);
        prop_assert_ne!(error.status(), Some(AnalogStatus::Ok));
        prop_assert!(error.status().is_some());
    }

    #[test]
    fn prop_event_tags_roundtrip_or_reject(raw in any::<i32>()) {
        match DeviceEventKind::from_raw(raw) {
            Some(kind) => prop_assert_eq!(kind.as_raw(), raw),
            None => prop_assert!(raw != 1 && raw != 2),
        }
    }

    #[test]
    fn prop_unknown_device_types_are_other(raw in any::<i32>()) {
        let device_type = DeviceType::from_raw(raw);
        if raw == 1 || raw == 2 {
            prop_assert_eq!(device_type.as_raw(), raw);
        } else {
            prop_assert_eq!(device_type, DeviceType::Other);
        }
    }

    #[test]
    fn prop_device_id_display_is_fixed_width(id in any::<u64>()) {
        prop_assert_eq!(DeviceId(id).to_string().len(), 18);
    }

    #[test]
    fn prop_buffer_read_bounded_by_capacity(
        codes in prop::collection::vec(any::<u16>(), 0..24),
        capacity in 0_usize..32,
    ) {
        let client = AnalogClient::new(MockAnalogBackend::new());
        let samples: Vec<AnalogSample> = codes
            .iter()
            .map(|&code| AnalogSample::new(code, 0.5))
            .collect();
        client.backend().set_buffer(samples.clone());

        let read = client
            .read_full_buffer(capacity)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(read.len(), samples.len().min(capacity));
        prop_assert!(read.iter().zip(&samples).all(|(a, b)| a == b));
    }
}
