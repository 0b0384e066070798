//! Operation logging macros
//!
//! Each operation logs one `start` event and exactly one of `end` or
//! `end_error`. Field names follow `sqlworker_core_types::schema`; callers
//! must depend on `tracing` and `sqlworker-core-types`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use sqlworker_core::log_op_start;
/// log_op_start!("open");
/// log_op_start!("execute", sql_len = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            info,
            $op,
            sqlworker_core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// ```
/// # use sqlworker_core::log_op_end;
/// log_op_end!("close", duration_ms = 3);
/// log_op_end!("close", duration_ms = 3, was_open = true);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            info,
            $op,
            sqlworker_core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log a failed operation
///
/// The error goes through `ExError` so the event carries its stable kind
/// and code. The message is omitted since engine messages can quote SQL.
///
/// ```
/// # use sqlworker_core::{log_op_error, errors::WorkerError};
/// log_op_error!("execute", WorkerError::NotOpen, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            error,
            $op,
            sqlworker_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
