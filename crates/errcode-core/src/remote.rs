use std::{error::Error, fmt};

use serde_json::{Map, Value};

use crate::{Cause, Classification, ClassifiedError, ErrorRecord, render};

/// Error reconstructed from another process's envelope.
///
/// Keeps the sender's id; carries no local trace and no local cause.
#[derive(Debug, Clone)]
pub struct RemoteErrorRecord {
    base: ErrorRecord,
    status: Option<i32>,
    source: Option<Value>,
    meta: Map<String, Value>,
}

impl RemoteErrorRecord {
    pub fn new(
        id: impl Into<String>,
        classification: Classification,
        detail: impl Into<String>,
        meta: Map<String, Value>,
        status: Option<i32>,
        source: Option<Value>,
    ) -> Self {
        Self {
            base: ErrorRecord::detached(id.into(), classification, detail.into()),
            status,
            source,
            meta,
        }
    }

    pub fn status(&self) -> Option<i32> {
        self.status
    }

    /// The envelope's `source` value, if any.
    pub fn source_value(&self) -> Option<&Value> {
        self.source.as_ref()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }
}

impl fmt::Display for RemoteErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

impl Error for RemoteErrorRecord {}

impl ClassifiedError for RemoteErrorRecord {
    fn record(&self) -> &ErrorRecord {
        &self.base
    }
}

/// Remote error whose envelope listed nested errors.
#[derive(Debug, Clone)]
pub struct RemoteMultiCauseRecord {
    remote: RemoteErrorRecord,
    causes: Vec<RemoteErrorRecord>,
}

impl RemoteMultiCauseRecord {
    pub fn new(
        id: impl Into<String>,
        classification: Classification,
        detail: impl Into<String>,
        meta: Map<String, Value>,
        status: Option<i32>,
        source: Option<Value>,
        causes: Vec<RemoteErrorRecord>,
    ) -> Self {
        Self {
            remote: RemoteErrorRecord::new(id, classification, detail, meta, status, source),
            causes,
        }
    }

    /// Top-level fields without the nested errors.
    pub fn as_remote(&self) -> &RemoteErrorRecord {
        &self.remote
    }

    pub fn status(&self) -> Option<i32> {
        self.remote.status()
    }

    pub fn source_value(&self) -> Option<&Value> {
        self.remote.source_value()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        self.remote.meta()
    }

    pub fn causes(&self) -> &[RemoteErrorRecord] {
        &self.causes
    }
}

impl fmt::Display for RemoteMultiCauseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.remote, f)
    }
}

impl Error for RemoteMultiCauseRecord {}

impl ClassifiedError for RemoteMultiCauseRecord {
    fn record(&self) -> &ErrorRecord {
        self.remote.record()
    }

    fn stack_trace(&self) -> String {
        render::multi_cause(
            self.remote.message(),
            self.causes.iter().map(ClassifiedError::stack_trace),
        )
    }

    fn causes(&self) -> Option<Vec<&dyn ClassifiedError>> {
        Some(
            self.causes
                .iter()
                .map(|cause| cause as &dyn ClassifiedError)
                .collect(),
        )
    }
}

/// Result of decoding an envelope: a single remote error or one with nested causes.
#[derive(Debug, Clone)]
pub enum RemoteError {
    Single(RemoteErrorRecord),
    Multi(RemoteMultiCauseRecord),
}

impl RemoteError {
    pub fn as_single(&self) -> Option<&RemoteErrorRecord> {
        match self {
            Self::Single(err) => Some(err),
            Self::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&RemoteMultiCauseRecord> {
        match self {
            Self::Single(_) => None,
            Self::Multi(err) => Some(err),
        }
    }

    /// Top-level fields, whichever variant this is.
    pub fn as_remote(&self) -> &RemoteErrorRecord {
        match self {
            Self::Single(err) => err,
            Self::Multi(err) => err.as_remote(),
        }
    }

    pub fn status(&self) -> Option<i32> {
        self.as_remote().status()
    }

    pub fn source_value(&self) -> Option<&Value> {
        self.as_remote().source_value()
    }

    pub fn meta(&self) -> &Map<String, Value> {
        self.as_remote().meta()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_remote(), f)
    }
}

impl Error for RemoteError {}

impl ClassifiedError for RemoteError {
    fn record(&self) -> &ErrorRecord {
        self.as_remote().record()
    }

    fn stack_trace(&self) -> String {
        match self {
            Self::Single(err) => err.stack_trace(),
            Self::Multi(err) => err.stack_trace(),
        }
    }

    fn causes(&self) -> Option<Vec<&dyn ClassifiedError>> {
        match self {
            Self::Single(err) => err.causes(),
            Self::Multi(err) => ClassifiedError::causes(err),
        }
    }
}

impl From<RemoteErrorRecord> for Cause {
    fn from(err: RemoteErrorRecord) -> Self {
        Self::classified(err)
    }
}

impl From<RemoteMultiCauseRecord> for Cause {
    fn from(err: RemoteMultiCauseRecord) -> Self {
        Self::classified(err)
    }
}

impl From<RemoteError> for Cause {
    fn from(err: RemoteError) -> Self {
        Self::classified(err)
    }
}
