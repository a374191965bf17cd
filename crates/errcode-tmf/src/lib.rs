//! TMF-style JSON error envelope: wire DTOs, model -> wire builders and wire -> model conversion.

mod error;

pub mod builder;
pub mod codec;
pub mod converter;
pub mod dto;

#[allow(deprecated)]
pub use builder::err_to_response;
pub use builder::{ErrorBuilder, ResponseBuilder, ToErrorDto, project_error_dto};
pub use converter::{Converter, DefaultConverter};
pub use dto::{ErrorDto, ResponseDto, TYPE_V1_0};
pub use error::TmfError;
