//! Sensitive data marker for automatic redaction
//!
//! SQL text sent by the host can embed user data, so it travels through the
//! dispatcher wrapped in `Sensitive<T>` and is never rendered by `Debug` or
//! `Display`.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use sqlworker_core_types::Sensitive;
///
/// let sql = Sensitive::new("INSERT INTO users VALUES ('alice', 'hunter2')");
/// assert_eq!(format!("{:?}", sql), "***REDACTED***");
/// assert_eq!(format!("{}", sql), "***REDACTED***");
///
/// // Access the actual value when needed
/// assert!(sql.expose().starts_with("INSERT"));
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    ///
    /// Use this only at the engine boundary, where the value must be
    /// handed over verbatim.
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl Sensitive<String> {
    /// Length in bytes of the wrapped text; safe to log
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the wrapped text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq> PartialEq for Sensitive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for Sensitive<T> {}

impl From<String> for Sensitive<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Sensitive<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
