use sqlworker_core_types::RequestId;
use thiserror::Error;

/// Result type alias using WorkerError
pub type Result<T> = std::result::Result<T, WorkerError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in structured log events and
/// for programmatic handling by embedders. The wire protocol itself only
/// carries the error text, never the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Protocol misuse
    NotOpen,
    UnknownCommand,
    InvalidMessage,

    // Engine
    EngineInit,
    Execution,

    // Host / worker plumbing
    WorkerUnavailable,
    Config,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotOpen => "ERR_NOT_OPEN",
            ExErrorKind::UnknownCommand => "ERR_UNKNOWN_COMMAND",
            ExErrorKind::InvalidMessage => "ERR_INVALID_MESSAGE",
            ExErrorKind::EngineInit => "ERR_ENGINE_INIT",
            ExErrorKind::Execution => "ERR_EXECUTION",
            ExErrorKind::WorkerUnavailable => "ERR_WORKER_UNAVAILABLE",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging. Built with the `with_*` builder methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    command: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            command: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the wire command the error relates to
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the wire command context, if any
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(command) = &self.command {
            write!(f, " (command: {})", command)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for worker operations
///
/// The `Display` text of each variant is exactly what the dispatcher places
/// in the `error` field of a failure response, so engine variants render the
/// engine's own message verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkerError {
    /// `execute` arrived while no database handle is held
    #[error("Database not open")]
    NotOpen,

    /// The engine could not be initialized (payload unreachable or malformed)
    #[error("{message}")]
    EngineInit { message: String },

    /// The engine rejected or failed a statement
    #[error("{message}")]
    Execution { message: String },

    /// The `command` field named something outside {open, close, execute}
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    /// The message could not be decoded into a command
    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },

    /// Configuration could not be loaded or validated
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// I/O failure outside the engine
    #[error("I/O error during {operation}: {message}")]
    Io { operation: String, message: String },

    /// The worker context is gone (terminated or crashed)
    #[error("Worker unavailable: {reason}")]
    WorkerUnavailable { reason: String },

    /// JSON encoding or decoding failed outside message decoding
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl WorkerError {
    /// Create an engine initialization error from any displayable cause
    pub fn engine_init(cause: impl std::fmt::Display) -> Self {
        WorkerError::EngineInit {
            message: cause.to_string(),
        }
    }

    /// Create an execution error from any displayable cause
    pub fn execution(cause: impl std::fmt::Display) -> Self {
        WorkerError::Execution {
            message: cause.to_string(),
        }
    }

    /// Create an invalid message error
    pub fn invalid_message(reason: impl Into<String>) -> Self {
        WorkerError::InvalidMessage {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        WorkerError::Config {
            reason: reason.into(),
        }
    }

    /// Create an I/O error for the named operation
    pub fn io(operation: &str, err: std::io::Error) -> Self {
        WorkerError::Io {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from WorkerError to the canonical ExError
impl From<WorkerError> for ExError {
    fn from(err: WorkerError) -> Self {
        let message = err.to_string();
        match err {
            WorkerError::NotOpen => ExError::new(ExErrorKind::NotOpen)
                .with_command("execute")
                .with_message(message),

            WorkerError::EngineInit { .. } => ExError::new(ExErrorKind::EngineInit)
                .with_op("engine_initialize")
                .with_command("open")
                .with_message(message),

            WorkerError::Execution { .. } => ExError::new(ExErrorKind::Execution)
                .with_op("engine_exec")
                .with_command("execute")
                .with_message(message),

            WorkerError::UnknownCommand { command } => ExError::new(ExErrorKind::UnknownCommand)
                .with_command(command)
                .with_message(message),

            WorkerError::InvalidMessage { .. } => {
                ExError::new(ExErrorKind::InvalidMessage).with_message(message)
            }

            WorkerError::Config { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),

            WorkerError::Io { operation, .. } => ExError::new(ExErrorKind::Io)
                .with_op(operation)
                .with_message(message),

            WorkerError::WorkerUnavailable { .. } => {
                ExError::new(ExErrorKind::WorkerUnavailable).with_message(message)
            }

            WorkerError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to WorkerError
impl From<serde_json::Error> for WorkerError {
    fn from(err: serde_json::Error) -> Self {
        WorkerError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to WorkerError
impl From<toml::de::Error> for WorkerError {
    fn from(err: toml::de::Error) -> Self {
        WorkerError::Config {
            reason: err.to_string(),
        }
    }
}
