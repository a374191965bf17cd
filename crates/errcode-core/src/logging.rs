use crate::ClassifiedError;

/// Which rendering of an error goes into a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// Full recursive trace, for internal diagnostics.
    #[default]
    Trace,
    /// One-line message, safe to show to end users.
    Message,
}

impl Rendering {
    fn render(self, err: &dyn ClassifiedError) -> String {
        match self {
            Self::Trace => err.stack_trace(),
            Self::Message => err.message(),
        }
    }
}

/// Formats `[error_code=<code>] [error_id=<id>] <rendering>`.
pub fn log_line(err: &dyn ClassifiedError, rendering: Rendering) -> String {
    format!(
        "[error_code={}] [error_id={}] {}",
        err.classification().code,
        err.id(),
        rendering.render(err)
    )
}

pub fn to_log_format(err: &dyn ClassifiedError) -> String {
    log_line(err, Rendering::Trace)
}

pub fn to_log_format_without_stack_trace(err: &dyn ClassifiedError) -> String {
    log_line(err, Rendering::Message)
}

/// Records `err` as a `tracing` error event carrying `error_code` and `error_id` fields.
pub fn emit(err: &dyn ClassifiedError, rendering: Rendering) {
    tracing::error!(
        error_code = %err.classification().code,
        error_id = %err.id(),
        "{}",
        rendering.render(err)
    );
}
