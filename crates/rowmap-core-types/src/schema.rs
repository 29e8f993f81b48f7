//! Canonical schema constants for structured logging and events
//!
//! `tracing` takes field names as literal identifiers, so the logging macros
//! and store operations spell these keys out. Readers of the events (the
//! test capture layer, log assertions) look fields up through the constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Mapping identifiers
pub const FIELD_TABLE: &str = "table";
pub const FIELD_FIELD: &str = "field";
pub const FIELD_COLUMN_COUNT: &str = "column_count";
pub const FIELD_ROWS_AFFECTED: &str = "rows_affected";
pub const FIELD_DEFERRED_COUNT: &str = "deferred_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_TABLE.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_field_keys_match_macro_output() {
        // log_op_error! emits these exact keys
        assert_eq!(FIELD_ERR_KIND, "err_kind");
        assert_eq!(FIELD_ERR_CODE, "err_code");
    }
}
