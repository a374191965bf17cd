use std::{error::Error, fmt, sync::Arc};

use crate::{Cause, Classification, ClassifiedError, ErrorRecord, render};

/// Kind name rendered for every [`MultiCauseRecord`].
pub const MULTI_CAUSE_KIND_NAME: &str = "MultiCauseError";
pub const DEFAULT_MULTI_CAUSE_CODE: &str = "NC-COMMON-2100";
pub const DEFAULT_MULTI_CAUSE_TITLE: &str = "multi-cause error";
pub const DEFAULT_MULTI_CAUSE_DETAIL: &str = "multiple independent errors have happened";

/// Error standing for several independent failures, e.g. a batch validation.
#[derive(Debug, Clone)]
pub struct MultiCauseRecord {
    base: ErrorRecord,
    causes: Vec<Arc<dyn ClassifiedError>>,
}

impl MultiCauseRecord {
    pub fn new(
        classification: Classification,
        detail: impl Into<String>,
        causes: Vec<Arc<dyn ClassifiedError>>,
    ) -> Self {
        Self {
            base: ErrorRecord::capture(
                MULTI_CAUSE_KIND_NAME,
                classification,
                detail.into(),
                None,
            ),
            causes,
        }
    }

    /// Multi-cause error under the generic `NC-COMMON-2100` classification.
    pub fn with_default_code(causes: Vec<Arc<dyn ClassifiedError>>) -> Self {
        Self::new(
            Classification::new(DEFAULT_MULTI_CAUSE_CODE, DEFAULT_MULTI_CAUSE_TITLE),
            DEFAULT_MULTI_CAUSE_DETAIL,
            causes,
        )
    }

    /// Causes in insertion order.
    pub fn causes(&self) -> &[Arc<dyn ClassifiedError>] {
        &self.causes
    }
}

impl fmt::Display for MultiCauseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base.message())
    }
}

impl Error for MultiCauseRecord {}

impl ClassifiedError for MultiCauseRecord {
    fn record(&self) -> &ErrorRecord {
        &self.base
    }

    fn stack_trace(&self) -> String {
        render::multi_cause(
            self.base.message(),
            self.causes.iter().map(|cause| cause.stack_trace()),
        )
    }

    fn causes(&self) -> Option<Vec<&dyn ClassifiedError>> {
        Some(self.causes.iter().map(|cause| cause.as_ref()).collect())
    }
}

impl From<MultiCauseRecord> for Cause {
    fn from(err: MultiCauseRecord) -> Self {
        Self::classified(err)
    }
}
