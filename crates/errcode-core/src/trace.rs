use std::{
    backtrace::Backtrace,
    env,
    sync::{Arc, OnceLock},
};

/// Environment variable that disables trace capture when set to `0`, `false`, `off` or `no`.
pub const CAPTURE_TRACE_ENV: &str = "ERRCODE_CAPTURE_TRACE";

/// Captures the current call stack as text.
///
/// Returns an empty blob when capture is disabled through [`CAPTURE_TRACE_ENV`].
/// A non-empty blob always ends with a newline.
pub fn capture_trace() -> Arc<str> {
    if !capture_enabled() {
        return Arc::from("");
    }

    let mut text = Backtrace::force_capture().to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    Arc::from(text)
}

/// Reports whether new errors capture a trace. The environment is read once per process.
pub fn capture_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();

    *ENABLED.get_or_init(|| match env::var(CAPTURE_TRACE_ENV) {
        Ok(value) => !is_disabled(&value),
        Err(_) => true,
    })
}

fn is_disabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::is_disabled;

    #[test]
    fn disable_values_are_case_insensitive() {
        assert!(is_disabled("0"));
        assert!(is_disabled(" OFF "));
        assert!(is_disabled("False"));
        assert!(!is_disabled("1"));
        assert!(!is_disabled(""));
    }
}
