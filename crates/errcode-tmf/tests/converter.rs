use std::{
    io,
    sync::{Arc, Mutex},
};

use errcode_core::{ClassifiedError, RemoteError};
use errcode_tmf::{
    Converter, DefaultConverter, ErrorBuilder, ResponseBuilder, ResponseDto, codec,
};
use serde_json::{Map, Value, json};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn test_meta() -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("test-key".to_string(), json!("test-value"));
    meta
}

#[test]
fn single_envelope_becomes_remote_record() {
    let response = ResponseBuilder::default()
        .id("remote-id")
        .code("TEST-0001")
        .reason("Test reason")
        .message("Test detail")
        .meta(test_meta())
        .status(404)
        .source("/path")
        .build();

    let remote = DefaultConverter.build_error_code_error(&response);

    let RemoteError::Single(err) = &remote else {
        panic!("expected a single remote error, got {remote:?}");
    };
    assert_eq!(err.id(), "remote-id");
    assert_eq!(err.classification().code, "TEST-0001");
    assert_eq!(err.classification().title, "Test reason");
    assert_eq!(err.detail(), "Test detail");
    assert_eq!(err.meta(), &test_meta());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.source_value(), Some(&json!("/path")));
}

#[test]
fn nested_errors_become_remote_multi_cause() {
    let response = ResponseBuilder::default()
        .id("remote-id")
        .code("TEST-0001")
        .reason("Test reason")
        .message("Test detail")
        .meta(test_meta())
        .status(404)
        .source("/path")
        .errors([
            ErrorBuilder::default()
                .id("cause-1")
                .code("TEST-0001")
                .reason("Test reason")
                .message("Test detail")
                .status(404)
                .build(),
            ErrorBuilder::default()
                .id("cause-2")
                .code("TEST-0001")
                .reason("Test reason")
                .message("Test detail")
                .status(405)
                .build(),
        ])
        .build();

    let remote = DefaultConverter.build_error_code_error(&response);

    let RemoteError::Multi(err) = &remote else {
        panic!("expected a multi-cause remote error, got {remote:?}");
    };
    assert_eq!(err.id(), "remote-id");
    assert_eq!(err.meta(), &test_meta());
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.source_value(), Some(&json!("/path")));

    let causes = err.causes();
    assert_eq!(causes.len(), 2);
    assert_eq!(causes[0].id(), "cause-1");
    assert_eq!(causes[0].detail(), "Test detail");
    assert_eq!(causes[0].status(), Some(404));
    assert_eq!(causes[1].id(), "cause-2");
    assert_eq!(causes[1].status(), Some(405));
    assert!(causes[1].meta().is_empty());
}

#[test]
fn empty_error_list_is_single() {
    let response = ResponseBuilder::default()
        .id("remote-id")
        .errors(Vec::new())
        .build();

    let remote = DefaultConverter.build_error_code_error(&response);

    assert!(remote.as_single().is_some());
    assert!(remote.meta().is_empty());
    assert_eq!(remote.status(), None);
}

#[test]
fn missing_nested_message_becomes_empty_detail() {
    let response: ResponseDto = codec::decode(
        r#"{
            "id": "top",
            "code": "TEST-1",
            "reason": "Top",
            "message": "top detail",
            "errors": [{"id": "leaf", "code": "TEST-2", "reason": "Leaf"}],
            "@type": "NC.TMFErrorResponse.v1.0"
        }"#,
    )
    .expect("envelope should decode");

    let remote = DefaultConverter.build_error_code_error(&response);

    let multi = remote.as_multi().expect("nested errors present");
    assert_eq!(multi.causes()[0].detail(), "");
    assert_eq!(
        multi.causes()[0].message(),
        "ErrorRecord [TEST-2][leaf] Leaf"
    );
}

#[test]
fn unparseable_status_is_dropped_with_warning() {
    let response = ResponseDto {
        id: "remote-id".to_string(),
        code: "TEST-1".to_string(),
        reason: "One".to_string(),
        status: Some("not-a-number".to_string()),
        ..ResponseDto::default()
    };
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();

    let remote = tracing::subscriber::with_default(subscriber, || {
        DefaultConverter.build_error_code_error(&response)
    });

    assert_eq!(remote.status(), None);
    let output = String::from_utf8(logs.0.lock().expect("log buffer lock").clone())
        .expect("logs should be utf-8");
    assert!(output.contains("WARN"));
    assert!(output.contains("not-a-number"));
}

#[test]
fn decode_rejects_malformed_json() {
    let err = codec::decode::<ResponseDto>("{not json").expect_err("decode should fail");

    assert!(err.to_string().starts_with("failed to decode envelope json"));
}
