//! tap-error
//!
//! Unified error taxonomy for the tool-access policy engine.
//!
//! Every crate in this workspace returns [`EngineError`] at its public
//! boundary rather than an ad-hoc error type. If you only take one
//! dependency from this workspace, take this one.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// ErrorCategory
// ---------------------------------------------------------------------------

/// Broad family that an [`ErrorCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Policy content or evaluation errors.
    Policy,
    /// Configuration loading/validation errors.
    Config,
    /// Session override store errors.
    Session,
    /// Catch-all for unexpected internal errors.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Policy => "policy",
            Self::Config => "config",
            Self::Session => "session",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ErrorCode
// ---------------------------------------------------------------------------

/// Machine-readable, stable error code.
///
/// Each variant serialises to a `SCREAMING_SNAKE_CASE` string that is
/// guaranteed not to change across patch releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // -- Policy --
    /// A named profile reference could not be resolved at all (no built-in
    /// or named definition with that name).
    PolicyProfileUnknown,
    /// A policy glob/reference is structurally invalid.
    PolicyInvalid,

    // -- Config --
    /// Configuration file was not found at the requested path.
    ConfigNotFound,
    /// Configuration file could not be parsed as valid TOML.
    ConfigParseFailed,
    /// Configuration failed semantic validation.
    ConfigInvalid,

    // -- Session --
    /// Store operation attempted without an active session key.
    SessionNotFound,
    /// Persisting the session override record failed.
    StorePersistFailed,
    /// The on-disk override record could not be parsed.
    StoreCorrupt,

    // -- Internal --
    /// Catch-all for unexpected internal errors.
    Internal,
}

impl ErrorCode {
    /// Returns the broad [`ErrorCategory`] this code belongs to.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PolicyProfileUnknown | Self::PolicyInvalid => ErrorCategory::Policy,
            Self::ConfigNotFound | Self::ConfigParseFailed | Self::ConfigInvalid => {
                ErrorCategory::Config
            }
            Self::SessionNotFound | Self::StorePersistFailed | Self::StoreCorrupt => {
                ErrorCategory::Session
            }
            Self::Internal => ErrorCategory::Internal,
        }
    }

    /// Stable `&'static str` representation of the code (e.g.
    /// `"POLICY_INVALID"`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PolicyProfileUnknown => "POLICY_PROFILE_UNKNOWN",
            Self::PolicyInvalid => "POLICY_INVALID",
            Self::ConfigNotFound => "CONFIG_NOT_FOUND",
            Self::ConfigParseFailed => "CONFIG_PARSE_FAILED",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::StorePersistFailed => "STORE_PERSIST_FAILED",
            Self::StoreCorrupt => "STORE_CORRUPT",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// Unified engine error.
///
/// Carries a stable [`ErrorCode`], a human-readable message, an optional
/// source error for cause-chaining, and arbitrary structured context.
///
/// # Builder usage
///
/// ```
/// use tap_error::{EngineError, ErrorCode};
///
/// let err = EngineError::new(ErrorCode::SessionNotFound, "no active session")
///     .with_context("session_key", "abcd1234");
/// ```
pub struct EngineError {
    /// Machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Optional underlying cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    /// Arbitrary structured context for diagnostics.
    pub context: BTreeMap<String, serde_json::Value>,
}

impl EngineError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
            context: BTreeMap::new(),
        }
    }

    /// Attach a key-value pair to the diagnostic context.
    ///
    /// The value is converted via [`serde_json::to_value`]; if serialisation
    /// fails, the entry is silently skipped.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Shorthand for `self.code.category()`.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }
}

impl fmt::Debug for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("EngineError");
        d.field("code", &self.code);
        d.field("message", &self.message);
        if let Some(ref src) = self.source {
            d.field("source", &src.to_string());
        }
        if !self.context.is_empty() {
            d.field("context", &self.context);
        }
        d.finish()
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)?;
        if !self.context.is_empty() {
            // Deterministic output thanks to BTreeMap.
            if let Ok(ctx) = serde_json::to_string(&self.context) {
                write!(f, " {ctx}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

// ---------------------------------------------------------------------------
// Serialization support
// ---------------------------------------------------------------------------

/// Serialisable snapshot of an [`EngineError`] (without the opaque source).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineErrorDto {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Structured context.
    pub context: BTreeMap<String, serde_json::Value>,
    /// String representation of the source error, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_message: Option<String>,
}

impl From<&EngineError> for EngineErrorDto {
    fn from(err: &EngineError) -> Self {
        Self {
            code: err.code,
            message: err.message.clone(),
            context: err.context.clone(),
            source_message: err.source.as_ref().map(|s| s.to_string()),
        }
    }
}

impl From<EngineErrorDto> for EngineError {
    fn from(dto: EngineErrorDto) -> Self {
        Self {
            code: dto.code,
            message: dto.message,
            source: None,
            context: dto.context,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
