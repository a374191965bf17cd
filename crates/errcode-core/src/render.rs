use crate::Classification;

pub(crate) const CAUSED_BY: &str = "Caused by: ";

/// `<kind> [<code>][<id>] <detail or title>`
pub(crate) fn message(
    kind: &str,
    classification: &Classification,
    id: &str,
    detail: &str,
) -> String {
    let text = if detail.is_empty() {
        classification.title.as_str()
    } else {
        detail
    };
    format!("{kind} [{}][{id}] {text}", classification.code)
}

/// Indents a nested rendering by one space on every line after the first.
///
/// The final newline is left alone so the next sibling line starts at column zero.
pub(crate) fn nested(trace: &str) -> String {
    let breaks = trace.matches('\n').count();
    trace.replacen('\n', "\n ", breaks.saturating_sub(1))
}

/// Renders `head` followed by one `Caused by (i/N): ` section per cause trace.
pub(crate) fn multi_cause<I>(head: String, cause_traces: I) -> String
where
    I: ExactSizeIterator<Item = String>,
{
    let total = cause_traces.len();
    let mut out = head;
    out.push('\n');
    for (index, trace) in cause_traces.enumerate() {
        out.push_str(&format!("Caused by ({}/{total}): ", index + 1));
        out.push_str(&nested(&trace));
    }
    out
}
