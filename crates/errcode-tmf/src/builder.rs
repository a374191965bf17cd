use std::any::{Any, TypeId};

use errcode_core::ClassifiedError;
use serde_json::{Map, Value};

use crate::{ErrorDto, ResponseDto, TYPE_V1_0};

/// Custom wire projection for an error variant.
///
/// Variants expose it to [`ResponseBuilder`] by answering [`ClassifiedError::project`]
/// through [`project_error_dto`]:
///
/// ```ignore
/// fn project(&self, target: TypeId) -> Option<Box<dyn Any>> {
///     errcode_tmf::project_error_dto(self, target)
/// }
/// ```
pub trait ToErrorDto {
    fn to_error_dto(&self) -> ErrorDto;
}

/// Answers a projection request for [`ErrorDto`] with `err`'s own projection.
pub fn project_error_dto<T>(err: &T, target: TypeId) -> Option<Box<dyn Any>>
where
    T: ToErrorDto + ?Sized,
{
    if target == TypeId::of::<ErrorDto>() {
        Some(Box::new(err.to_error_dto()) as Box<dyn Any>)
    } else {
        None
    }
}

/// Projects one cause, preferring its custom projection over the generic one.
fn cause_to_dto(cause: &dyn ClassifiedError) -> ErrorDto {
    cause
        .project(TypeId::of::<ErrorDto>())
        .and_then(|projection| projection.downcast::<ErrorDto>().ok())
        .map(|dto| *dto)
        .unwrap_or_else(|| ErrorBuilder::new(cause).build())
}

fn present(value: Value) -> Option<Value> {
    (!value.is_null()).then_some(value)
}

/// Fluent builder for [`ResponseDto`].
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    id: String,
    code: String,
    reason: String,
    message: String,
    reference_error: Option<String>,
    status: Option<String>,
    source: Option<Value>,
    meta: Option<Map<String, Value>>,
    errors: Option<Vec<ErrorDto>>,
    schema_type: String,
    schema_location: Option<String>,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            id: String::new(),
            code: String::new(),
            reason: String::new(),
            message: String::new(),
            reference_error: None,
            status: None,
            source: None,
            meta: None,
            errors: None,
            schema_type: TYPE_V1_0.to_string(),
            schema_location: None,
        }
    }
}

impl ResponseBuilder {
    /// Seeds the envelope from `err`; causes of a multi-cause error become nested errors.
    pub fn new(err: &dyn ClassifiedError) -> Self {
        let errors = err
            .causes()
            .map(|causes| causes.into_iter().map(cause_to_dto).collect());

        Self {
            id: err.id().to_string(),
            code: err.classification().code.clone(),
            reason: err.classification().title.clone(),
            message: err.detail().to_string(),
            errors,
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn reference_error(mut self, reference_error: impl Into<String>) -> Self {
        self.reference_error = Some(reference_error.into());
        self
    }

    /// Sets the status; it travels as a decimal string.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Sets the source; `null` leaves it absent.
    pub fn source(mut self, source: impl Into<Value>) -> Self {
        self.source = present(source.into());
        self
    }

    pub fn meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Replaces the nested error list.
    pub fn errors(mut self, errors: impl IntoIterator<Item = ErrorDto>) -> Self {
        self.errors = Some(errors.into_iter().collect());
        self
    }

    pub fn schema_type(mut self, schema_type: impl Into<String>) -> Self {
        self.schema_type = schema_type.into();
        self
    }

    pub fn schema_location(mut self, schema_location: impl Into<String>) -> Self {
        self.schema_location = Some(schema_location.into());
        self
    }

    pub fn build(self) -> ResponseDto {
        ResponseDto {
            id: self.id,
            code: self.code,
            reason: self.reason,
            message: self.message,
            reference_error: self.reference_error,
            status: self.status,
            source: self.source,
            meta: self.meta,
            errors: self.errors,
            schema_type: self.schema_type,
            schema_location: self.schema_location,
        }
    }
}

/// Fluent builder for [`ErrorDto`].
#[derive(Debug, Clone, Default)]
pub struct ErrorBuilder {
    id: String,
    code: String,
    reason: String,
    message: Option<String>,
    reference_error: Option<String>,
    status: Option<String>,
    source: Option<Value>,
    meta: Option<Map<String, Value>>,
}

impl ErrorBuilder {
    /// Seeds the nested error from `err`; the detail always becomes the message.
    pub fn new(err: &dyn ClassifiedError) -> Self {
        Self {
            id: err.id().to_string(),
            code: err.classification().code.clone(),
            reason: err.classification().title.clone(),
            message: Some(err.detail().to_string()),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn reference_error(mut self, reference_error: impl Into<String>) -> Self {
        self.reference_error = Some(reference_error.into());
        self
    }

    /// Sets the status; it travels as a decimal string.
    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Sets the source; `null` leaves it absent.
    pub fn source(mut self, source: impl Into<Value>) -> Self {
        self.source = present(source.into());
        self
    }

    pub fn meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn build(self) -> ErrorDto {
        ErrorDto {
            id: self.id,
            code: self.code,
            reason: self.reason,
            message: self.message,
            reference_error: self.reference_error,
            status: self.status,
            source: self.source,
            meta: self.meta,
        }
    }
}

/// Legacy one-shot projection with a fixed status.
///
/// Causes are always projected generically; custom [`ToErrorDto`] projections are ignored.
#[deprecated(note = "use `ResponseBuilder::new(err).status(status).build()` instead")]
pub fn err_to_response(err: &dyn ClassifiedError, status: i32) -> ResponseDto {
    let errors = err.causes().map(|causes| {
        causes
            .into_iter()
            .map(|cause| ErrorBuilder::new(cause).build())
            .collect()
    });

    ResponseDto {
        id: err.id().to_string(),
        code: err.classification().code.clone(),
        reason: err.classification().title.clone(),
        message: err.detail().to_string(),
        status: Some(status.to_string()),
        errors,
        schema_type: TYPE_V1_0.to_string(),
        ..ResponseDto::default()
    }
}
