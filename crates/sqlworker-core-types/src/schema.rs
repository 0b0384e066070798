//! Canonical schema constants for structured logging
//!
//! These constants keep dispatcher, worker and store log events consistent.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Protocol fields
pub const FIELD_SQL_LEN: &str = "sql_len";
pub const FIELD_ASSET_PATH: &str = "asset_path";
pub const FIELD_REPLACED: &str = "replaced";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names
pub const OP_OPEN: &str = "open";
pub const OP_CLOSE: &str = "close";
pub const OP_EXECUTE: &str = "execute";
pub const OP_DECODE: &str = "decode";
pub const OP_ENGINE_INIT: &str = "engine_initialize";
pub const OP_WORKER: &str = "worker";
