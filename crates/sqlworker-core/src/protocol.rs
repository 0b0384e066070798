//! Command and response messages
//!
//! Messages travel as JSON values. Inbound shape:
//!
//! ```text
//! { "command": "open" | "close" | "execute",
//!   "options"?: { "sqlite3WasmPath"?: string },
//!   "sql"?: string }
//! ```
//!
//! Outbound shape: `{ "result": {} }` or `{ "error": string }`.

use crate::errors::{Result, WorkerError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlworker_core_types::Sensitive;

/// Options recognized by `open`; unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenOptions {
    #[serde(
        rename = "sqlite3WasmPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sqlite3_wasm_path: Option<String>,
}

impl OpenOptions {
    pub fn with_wasm_path(path: impl Into<String>) -> Self {
        Self {
            sqlite3_wasm_path: Some(path.into()),
        }
    }
}

/// A decoded inbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { options: OpenOptions },
    Close,
    Execute { sql: Sensitive<String> },
}

impl Command {
    pub fn open(options: OpenOptions) -> Self {
        Command::Open { options }
    }

    pub fn execute(sql: impl Into<String>) -> Self {
        Command::Execute {
            sql: Sensitive::new(sql.into()),
        }
    }

    /// Wire name of the command
    pub fn name(&self) -> &'static str {
        match self {
            Command::Open { .. } => "open",
            Command::Close => "close",
            Command::Execute { .. } => "execute",
        }
    }

    /// Decode an inbound message
    ///
    /// `options` may be absent or `null` for `open`. Fields that do not
    /// belong to the named command are ignored.
    ///
    /// # Errors
    ///
    /// - `WorkerError::UnknownCommand` when `command` is a string outside
    ///   the known set
    /// - `WorkerError::InvalidMessage` for any other shape problem
    pub fn decode(message: Value) -> Result<Self> {
        let Value::Object(mut fields) = message else {
            return Err(WorkerError::invalid_message("message must be a JSON object"));
        };

        let command = match fields.remove("command") {
            Some(Value::String(command)) => command,
            Some(_) => {
                return Err(WorkerError::invalid_message(
                    "\"command\" field must be a string",
                ))
            }
            None => return Err(WorkerError::invalid_message("missing \"command\" field")),
        };

        match command.as_str() {
            "open" => {
                let options = match fields.remove("options") {
                    None | Some(Value::Null) => OpenOptions::default(),
                    Some(raw) => serde_json::from_value(raw).map_err(|e| {
                        WorkerError::invalid_message(format!("invalid open options: {}", e))
                    })?,
                };
                Ok(Command::Open { options })
            }
            "close" => Ok(Command::Close),
            "execute" => match fields.remove("sql") {
                Some(Value::String(sql)) => Ok(Command::Execute {
                    sql: Sensitive::new(sql),
                }),
                _ => Err(WorkerError::invalid_message(
                    "execute requires a string \"sql\" field",
                )),
            },
            _ => Err(WorkerError::UnknownCommand { command }),
        }
    }

    /// Encode as the message a host would post
    pub fn to_message(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("command".to_string(), Value::from(self.name()));
        match self {
            Command::Open { options } => {
                fields.insert("options".to_string(), json!(options));
            }
            Command::Close => {}
            Command::Execute { sql } => {
                fields.insert("sql".to_string(), Value::from(sql.expose().as_str()));
            }
        }
        Value::Object(fields)
    }
}

/// The empty success payload, serialized as `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyResult {}

/// The single response emitted for each command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Result(EmptyResult),
    Error(String),
}

impl Response {
    pub fn ok() -> Self {
        Response::Result(EmptyResult {})
    }

    pub fn error(err: impl std::fmt::Display) -> Self {
        Response::Error(err.to_string())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Result(_))
    }

    /// The failure text, if this is an error response
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Response::Result(_) => None,
            Response::Error(message) => Some(message),
        }
    }

    pub fn to_message(&self) -> Value {
        match self {
            Response::Result(_) => json!({ "result": {} }),
            Response::Error(message) => json!({ "error": message }),
        }
    }
}

impl From<Result<()>> for Response {
    fn from(result: Result<()>) -> Self {
        match result {
            Ok(()) => Response::ok(),
            Err(err) => Response::error(err),
        }
    }
}
