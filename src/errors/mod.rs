use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::enums::parser_error_code::ParserErrorCode;
use crate::enums::resolver_error_code::ResolverErrorCode;

/// A closed classification enumeration usable as the code of an [`Error`].
pub trait ErrorCode: Copy + fmt::Debug + Eq + Send + Sync + 'static {
    /// Canonical human-readable text for this classification.
    fn message(&self) -> &'static str;

    /// Stable identifier, e.g. `INVALID_MARKUP`.
    fn name(&self) -> &'static str;
}

/// What caused an [`Error`]: a free-text description or a wrapped lower-level fault.
#[derive(Debug, Clone)]
pub enum ErrorSource {
    Text(String),
    Fault(Arc<dyn StdError + Send + Sync>),
}

impl ErrorSource {
    pub fn fault<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Fault(Arc::new(error))
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Fault(fault) => write!(f, "{}", fault),
        }
    }
}

impl From<String> for ErrorSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ErrorSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Diagnostic key/value pairs, kept in insertion order.
pub type ErrorContext = IndexMap<String, Value>;

/// Structured error shared by every pipeline, parameterised over its classification code.
///
/// Errors are values: [`Error::with_context`] returns a new error and leaves the
/// receiver untouched.
#[derive(Debug, Clone)]
pub struct Error<C: ErrorCode> {
    code: C,
    source: Option<ErrorSource>,
    context: ErrorContext,
}

impl<C: ErrorCode> Error<C> {
    pub fn new(code: C) -> Self {
        Self {
            code,
            source: None,
            context: ErrorContext::new(),
        }
    }

    pub fn with_source(code: C, source: impl Into<ErrorSource>) -> Self {
        Self {
            code,
            source: Some(source.into()),
            context: ErrorContext::new(),
        }
    }

    pub fn code(&self) -> C {
        self.code
    }

    pub fn source_detail(&self) -> Option<&ErrorSource> {
        self.source.as_ref()
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    pub fn message(&self) -> &'static str {
        self.code.message()
    }

    /// Returns a copy of this error whose context merges `entries` over the
    /// existing pairs. Keys already present keep their position but take the new value.
    #[must_use]
    pub fn with_context<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut context = self.context.clone();
        for (key, value) in entries {
            context.insert(key.into(), value.into());
        }

        Self {
            code: self.code,
            source: self.source.clone(),
            context,
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

fn render_context_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

impl<C: ErrorCode> fmt::Display for Error<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;

        if let Some(source) = &self.source {
            write!(f, " | Source: {}", source)?;
        }

        if !self.context.is_empty() {
            let rendered = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, render_context_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, " | Context: {}", rendered)?;
        }

        Ok(())
    }
}

impl<C: ErrorCode> StdError for Error<C> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.source {
            Some(ErrorSource::Fault(fault)) => Some(fault.as_ref() as &(dyn StdError + 'static)),
            _ => None,
        }
    }
}

impl<C: ErrorCode> Serialize for Error<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Error", 4)?;
        state.serialize_field("code", self.code.name())?;
        state.serialize_field("message", self.message())?;
        state.serialize_field("source", &self.source.as_ref().map(ToString::to_string))?;
        state.serialize_field("context", &self.context)?;
        state.end()
    }
}

pub type ParserError = Error<ParserErrorCode>;
pub type ResolverError = Error<ResolverErrorCode>;

pub type ParserResult<T> = Result<T, ParserError>;
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Enriches the error side of a `Result` without touching the success value.
pub trait ResultExt<T, C: ErrorCode> {
    fn context<I, K, V>(self, entries: I) -> Result<T, Error<C>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>;

    fn with_operation(self, operation: &str) -> Result<T, Error<C>>;
}

impl<T, C: ErrorCode> ResultExt<T, C> for Result<T, Error<C>> {
    fn context<I, K, V>(self, entries: I) -> Result<T, Error<C>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.map_err(|error| error.with_context(entries))
    }

    fn with_operation(self, operation: &str) -> Result<T, Error<C>> {
        self.context([("operation", operation)])
    }
}

/// Failures of the command shell around the core (configuration, argument input).
#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to read markup from {origin}: {source}")]
    MarkupRead {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
