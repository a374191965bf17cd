use std::{
    any::{Any, TypeId, type_name},
    error::Error,
    fmt,
    sync::Arc,
};

use crate::{
    Classification,
    ids::new_id,
    render::{self, CAUSED_BY},
    trace::capture_trace,
};

/// Kind name rendered for records not built through [`new_typed`].
pub const DEFAULT_KIND_NAME: &str = "ErrorRecord";

/// Identity and classification contract shared by every error in this crate.
///
/// Implementors embed an [`ErrorRecord`] and expose it through [`record`](Self::record).
/// Every other method reads from that base unless overridden.
pub trait ClassifiedError: Error + Send + Sync + 'static {
    /// The embedded base record.
    fn record(&self) -> &ErrorRecord;

    fn id(&self) -> &str {
        self.record().id()
    }

    fn classification(&self) -> &Classification {
        self.record().classification()
    }

    fn detail(&self) -> &str {
        self.record().detail()
    }

    /// One-line rendering: `<kind> [<code>][<id>] <detail or title>`.
    fn message(&self) -> String {
        self.record().message()
    }

    /// Full diagnostic rendering with the captured trace and the cause chain.
    fn stack_trace(&self) -> String {
        self.record().stack_trace()
    }

    /// Independent co-occurring causes. `None` for anything but multi-cause errors.
    fn causes(&self) -> Option<Vec<&dyn ClassifiedError>> {
        None
    }

    /// Asks the error for a variant-specific projection of type `target`.
    ///
    /// Outer layers reach optional capabilities through this hook (a custom wire
    /// projection, for instance) without knowing the concrete error type. The
    /// returned box must hold a value whose type id is `target`.
    ///
    /// A variant with a custom envelope projection answers it like this:
    ///
    /// ```ignore
    /// fn project(&self, target: TypeId) -> Option<Box<dyn Any>> {
    ///     errcode_tmf::project_error_dto(self, target)
    /// }
    /// ```
    fn project(&self, _target: TypeId) -> Option<Box<dyn Any>> {
        None
    }

    /// Erases the concrete type so the error can sit in a cause list.
    fn shared(self) -> Arc<dyn ClassifiedError>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// Wrapped cause of a single-cause record.
#[derive(Debug, Clone)]
pub enum Cause {
    /// Error with its own identity; rendered recursively.
    Classified(Arc<dyn ClassifiedError>),
    /// Foreign error; rendered by its one-line message only.
    Plain(Arc<dyn Error + Send + Sync>),
}

impl Cause {
    pub fn classified(err: impl ClassifiedError) -> Self {
        Self::Classified(Arc::new(err))
    }

    pub fn plain(err: impl Error + Send + Sync + 'static) -> Self {
        Self::Plain(Arc::new(err))
    }

    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Self::Classified(err) => err.as_ref() as &(dyn Error + 'static),
            Self::Plain(err) => err.as_ref() as &(dyn Error + 'static),
        }
    }

    /// The classified view of this cause, if it has one.
    pub fn as_classified(&self) -> Option<&dyn ClassifiedError> {
        match self {
            Self::Classified(err) => Some(err.as_ref()),
            Self::Plain(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Classified(err) => render::nested(&err.stack_trace()),
            Self::Plain(err) => format!(" {err}"),
        }
    }
}

impl From<Arc<dyn ClassifiedError>> for Cause {
    fn from(err: Arc<dyn ClassifiedError>) -> Self {
        Self::Classified(err)
    }
}

impl From<ErrorRecord> for Cause {
    fn from(err: ErrorRecord) -> Self {
        Self::classified(err)
    }
}

/// Single-cause error: identity, classification, detail, captured trace and an optional cause.
///
/// Records are immutable once built; the id and trace are assigned exactly once.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    id: String,
    kind_name: &'static str,
    classification: Classification,
    detail: String,
    trace: Arc<str>,
    cause: Option<Cause>,
}

impl ErrorRecord {
    /// Creates a record with a fresh id and the current call stack.
    pub fn new(
        classification: Classification,
        detail: impl Into<String>,
        cause: Option<Cause>,
    ) -> Self {
        Self::capture(DEFAULT_KIND_NAME, classification, detail.into(), cause)
    }

    pub(crate) fn capture(
        kind_name: &'static str,
        classification: Classification,
        detail: String,
        cause: Option<Cause>,
    ) -> Self {
        Self {
            id: new_id(),
            kind_name,
            classification,
            detail,
            trace: capture_trace(),
            cause,
        }
    }

    /// Base for an error produced by another process: caller-supplied id, no trace, no cause.
    pub(crate) fn detached(id: String, classification: Classification, detail: String) -> Self {
        Self {
            id,
            kind_name: DEFAULT_KIND_NAME,
            classification,
            detail,
            trace: Arc::from(""),
            cause: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind_name(&self) -> &str {
        self.kind_name
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Call stack captured at construction; empty for remote errors.
    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn message(&self) -> String {
        render::message(self.kind_name, &self.classification, &self.id, &self.detail)
    }

    pub fn stack_trace(&self) -> String {
        let mut out = self.message();
        out.push('\n');
        out.push_str(&self.trace);
        if let Some(cause) = &self.cause {
            out.push_str(CAUSED_BY);
            out.push_str(&cause.render());
        }
        out
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl Error for ErrorRecord {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(Cause::as_error)
    }
}

impl ClassifiedError for ErrorRecord {
    fn record(&self) -> &ErrorRecord {
        self
    }
}

/// Builds a caller-defined error variant around a freshly captured base record.
///
/// `assemble` receives the base (fresh id, trace, cause, and a kind name taken from
/// `T`'s type name) and returns the variant with its own fields filled in.
///
/// # Panics
///
/// Panics when the returned variant does not embed the base it was handed. That is a
/// programming error in `assemble`, not a runtime condition.
pub fn new_typed<T, F>(
    classification: Classification,
    detail: impl Into<String>,
    cause: Option<Cause>,
    assemble: F,
) -> T
where
    T: ClassifiedError,
    F: FnOnce(ErrorRecord) -> T,
{
    let base = ErrorRecord::capture(
        short_type_name::<T>(),
        classification,
        detail.into(),
        cause,
    );
    let id = base.id.clone();
    let variant = assemble(base);
    assert_eq!(
        variant.record().id(),
        id.as_str(),
        "{} must embed the base record passed to its constructor",
        type_name::<T>()
    );
    variant
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}
