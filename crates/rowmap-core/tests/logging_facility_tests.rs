#![allow(clippy::unwrap_used, clippy::expect_used)]

use rowmap_core::errors::{ExError, ExErrorKind, OrmError};
use rowmap_core::logging_facility::test_capture::init_test_capture;
use rowmap_core::logging_facility::{init, Profile};
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rowmap_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COLUMN_COUNT, FIELD_COMPONENT,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_EVENT, FIELD_OP,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(starts, 1);
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .expect("Should have end event");
    assert_eq!(end_event.fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code_and_kind() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::NotFound).with_table("User");
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_NOT_FOUND".to_string())
    );
    assert_eq!(
        error_event.fields.get(FIELD_ERR_KIND),
        Some(&"NotFound".to_string())
    );
}

#[test]
fn test_log_op_error_accepts_orm_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_orm_unique_4";

    let err = OrmError::PrimaryKeyUnset {
        type_name: "User".to_string(),
        field: "id".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 1, table = "User");

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have error event");

    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_PRIMARY_KEY_UNSET".to_string())
    );
    assert_eq!(error_event.table.as_deref(), Some("User"));
}

#[test]
fn test_table_field_is_captured() {
    let capture = init_test_capture();
    let op_name = "test_table_field_unique_5";

    log_op_start!(op_name, table = "Book", column_count = 4);

    let events = capture.events();
    let start_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");

    assert_eq!(start_event.table.as_deref(), Some("Book"));
    assert_eq!(start_event.fields.get(FIELD_COLUMN_COUNT), Some(&"4".to_string()));
}

#[test]
fn test_single_start_and_end_per_operation() {
    let capture = init_test_capture();
    let op_name = "test_boundary_unique_6";

    log_op_start!(op_name, table = "User");
    log_op_end!(op_name, duration_ms = 3, table = "User");

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END)
    });

    assert_eq!(starts, 1);
    assert_eq!(ends, 1);
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_7";

    log_op_start!(op_name);

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have start event");
    assert_eq!(event.component.as_deref(), Some(module_path!()));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_init_keeps_installed_subscriber() {
    let capture = init_test_capture();
    let op_name = "test_init_keeps_subscriber_unique_8";

    assert!(!init(Profile::Development));
    assert!(!init(Profile::Production));

    log_op_start!(op_name);
    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_macro_keys_match_schema_constants() {
    let capture = init_test_capture();
    let op_name = "test_macro_keys_unique_9";

    log_op_error!(
        op_name,
        ExError::new(ExErrorKind::Schema),
        duration_ms = 2
    );

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("Should have error event");
    for key in [
        FIELD_COMPONENT,
        FIELD_OP,
        FIELD_EVENT,
        FIELD_DURATION_MS,
        FIELD_ERR_KIND,
        FIELD_ERR_CODE,
    ] {
        assert!(event.fields.contains_key(key), "missing key {}", key);
    }
}
