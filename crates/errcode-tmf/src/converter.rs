use errcode_core::{Classification, RemoteError, RemoteErrorRecord, RemoteMultiCauseRecord};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{ErrorDto, ResponseDto};

/// Rebuilds model errors from received envelopes.
pub trait Converter {
    fn build_error_code_error(&self, response: &ResponseDto) -> RemoteError;
}

/// Field-for-field mirror of [`ResponseBuilder`](crate::ResponseBuilder).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter;

impl Converter for DefaultConverter {
    fn build_error_code_error(&self, response: &ResponseDto) -> RemoteError {
        let classification = Classification::new(&response.code, &response.reason);
        let status = parse_status(response.status.as_deref());
        let meta = meta_or_empty(response.meta.as_ref());

        match response.errors.as_deref() {
            Some(errors) if !errors.is_empty() => {
                debug!(
                    error_id = %response.id,
                    causes = errors.len(),
                    "converting multi-cause envelope"
                );
                let causes = errors.iter().map(remote_cause).collect();
                RemoteError::Multi(RemoteMultiCauseRecord::new(
                    response.id.clone(),
                    classification,
                    response.message.clone(),
                    meta,
                    status,
                    response.source.clone(),
                    causes,
                ))
            }
            _ => RemoteError::Single(RemoteErrorRecord::new(
                response.id.clone(),
                classification,
                response.message.clone(),
                meta,
                status,
                response.source.clone(),
            )),
        }
    }
}

fn remote_cause(dto: &ErrorDto) -> RemoteErrorRecord {
    RemoteErrorRecord::new(
        dto.id.clone(),
        Classification::new(&dto.code, &dto.reason),
        dto.message.clone().unwrap_or_default(),
        meta_or_empty(dto.meta.as_ref()),
        parse_status(dto.status.as_deref()),
        dto.source.clone(),
    )
}

fn meta_or_empty(meta: Option<&Map<String, Value>>) -> Map<String, Value> {
    meta.cloned().unwrap_or_default()
}

/// Lenient status decoding: an unparseable value is dropped with a warning.
fn parse_status(status: Option<&str>) -> Option<i32> {
    let raw = status?;
    match raw.parse() {
        Ok(status) => Some(status),
        Err(err) => {
            warn!(status = raw, error = %err, "ignoring unparseable envelope status");
            None
        }
    }
}
