//! Operation boundary macros
//!
//! Every mapping operation (`create_table`, `insert_row`, `load_row`,
//! `resolve_deferred`, ...) emits exactly one `start` event and then either
//! one `end` or one `end_error` event. All three carry `component` (the
//! calling module) and `op`. Extra `key = value` pairs such as `table` are
//! passed through to `tracing` unchanged.
//!
//! Field keys are fixed by `rowmap_core_types::schema`.

/// Emit the `start` event of a mapping operation
///
/// ```
/// # use rowmap_core::log_op_start;
/// log_op_start!("drop_table");
/// log_op_start!("load_row", table = "User");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Emit the `end` event of a mapping operation, with its elapsed time
///
/// ```
/// # use rowmap_core::log_op_end;
/// log_op_end!("insert_row", duration_ms = 3, table = "User", rows_affected = 1);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Emit the `end_error` event of a mapping operation
///
/// The error is converted into [`ExError`](crate::errors::ExError), so an
/// `OrmError` can be passed directly. Its kind and stable code are recorded
/// as `err_kind` and `err_code`.
///
/// ```
/// # use rowmap_core::log_op_error;
/// # use rowmap_core::errors::OrmError;
/// let err = OrmError::MissingPrimaryKey { type_name: "Note".to_string() };
/// log_op_error!("load_row", err, duration_ms = 0, table = "Note");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($field)*
        );
    }};
}
