//! Identifiable, causally-chained error records and their diagnostic renderings.

pub mod classification;
pub mod ids;
pub mod logging;
pub mod multi;
pub mod record;
pub mod remote;
mod render;
pub mod trace;

pub use classification::Classification;
pub use ids::new_id;
pub use logging::{Rendering, emit, log_line, to_log_format, to_log_format_without_stack_trace};
pub use multi::{
    DEFAULT_MULTI_CAUSE_CODE, DEFAULT_MULTI_CAUSE_DETAIL, DEFAULT_MULTI_CAUSE_TITLE,
    MULTI_CAUSE_KIND_NAME, MultiCauseRecord,
};
pub use record::{Cause, ClassifiedError, DEFAULT_KIND_NAME, ErrorRecord, new_typed};
pub use remote::{RemoteError, RemoteErrorRecord, RemoteMultiCauseRecord};
pub use trace::{CAPTURE_TRACE_ENV, capture_trace};
