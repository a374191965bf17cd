use std::any::{Any, TypeId};

use errcode_core::{Classification, ClassifiedError, ErrorRecord, MultiCauseRecord, new_typed};
use errcode_tmf::{
    Converter, DefaultConverter, ErrorBuilder, ErrorDto, ResponseBuilder, ResponseDto,
    ToErrorDto, codec, project_error_dto,
};
use serde_json::{Map, json};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{base}")]
struct UpstreamErr {
    base: ErrorRecord,
    status: i32,
}

impl ClassifiedError for UpstreamErr {
    fn record(&self) -> &ErrorRecord {
        &self.base
    }

    fn project(&self, target: TypeId) -> Option<Box<dyn Any>> {
        project_error_dto(self, target)
    }
}

impl ToErrorDto for UpstreamErr {
    fn to_error_dto(&self) -> ErrorDto {
        ErrorBuilder::new(self).status(self.status).build()
    }
}

fn upstream(code: &str, status: i32) -> UpstreamErr {
    new_typed(Classification::new(code, "Upstream"), "upstream failed", None, |base| {
        UpstreamErr { base, status }
    })
}

#[test]
fn single_error_survives_the_wire() {
    let err = ErrorRecord::new(
        Classification::new("TEST-1001", "Test 1001"),
        "test 1001 detail",
        None,
    );
    let mut meta = Map::new();
    meta.insert("attempt".to_string(), json!(3));
    meta.insert("tags".to_string(), json!(["a", "b"]));

    let response = ResponseBuilder::new(&err)
        .status(404)
        .source(json!({"pointer": "/data/name"}))
        .meta(meta.clone())
        .build();
    let wire = codec::encode(&response).expect("encode should succeed");
    assert!(wire.contains(r#""status":"404""#));

    let received: ResponseDto = codec::decode(&wire).expect("decode should succeed");
    let remote = DefaultConverter.build_error_code_error(&received);

    assert_eq!(remote.id(), err.id());
    assert_eq!(remote.classification(), err.classification());
    assert_eq!(remote.detail(), err.detail());
    assert_eq!(remote.status(), Some(404));
    assert_eq!(remote.meta(), &meta);
    assert_eq!(remote.source_value(), Some(&json!({"pointer": "/data/name"})));
    assert_eq!(remote.message(), err.message());
    assert!(remote.record().trace().is_empty());
}

#[test]
fn multi_cause_error_survives_the_wire() {
    let err1 = ErrorRecord::new(Classification::new("TEST-1", "One"), "first", None);
    let err2 = ErrorRecord::new(Classification::new("TEST-2", "Two"), "", None);
    let originals = [err1.clone(), err2.clone()];
    let multi = MultiCauseRecord::with_default_code(vec![err1.shared(), err2.shared()]);

    let response = ResponseBuilder::new(&multi).status(422).build();
    let received: ResponseDto =
        codec::decode(&codec::encode(&response).expect("encode should succeed"))
            .expect("decode should succeed");
    let remote = DefaultConverter.build_error_code_error(&received);

    let remote_multi = remote.as_multi().expect("multi-cause envelope");
    assert_eq!(remote.id(), multi.id());
    assert_eq!(remote.classification(), multi.classification());
    assert_eq!(remote.status(), Some(422));
    assert_eq!(remote_multi.causes().len(), 2);
    for (cause, original) in remote_multi.causes().iter().zip(&originals) {
        assert_eq!(cause.id(), original.id());
        assert_eq!(cause.classification(), original.classification());
        assert_eq!(cause.detail(), original.detail());
        assert_eq!(cause.status(), None);
    }
    assert!(
        remote
            .stack_trace()
            .contains(&format!("Caused by (2/2): {}", originals[1].message()))
    );
}

#[test]
fn received_multi_cause_can_be_relayed() {
    let err1 = ErrorRecord::new(Classification::new("TEST-1", "One"), "first", None);
    let multi = MultiCauseRecord::with_default_code(vec![err1.shared()]);
    let first_hop = ResponseBuilder::new(&multi).build();
    let remote = DefaultConverter.build_error_code_error(&first_hop);

    let second_hop = ResponseBuilder::new(&remote).build();

    assert_eq!(second_hop, first_hop);
}

#[test]
fn multi_cause_statuses_survive_in_order() {
    let causes = [upstream("TEST-1", 404), upstream("TEST-2", 503), upstream("TEST-3", 409)];
    let ids: Vec<String> = causes.iter().map(|cause| cause.id().to_string()).collect();
    let multi = MultiCauseRecord::with_default_code(
        causes.into_iter().map(ClassifiedError::shared).collect(),
    );

    let response = ResponseBuilder::new(&multi).build();
    let wire = codec::encode(&response).expect("encode should succeed");
    let received: ResponseDto = codec::decode(&wire).expect("decode should succeed");
    let remote = DefaultConverter.build_error_code_error(&received);

    let remote_multi = remote.as_multi().expect("multi-cause envelope");
    let statuses: Vec<(&str, Option<i32>)> = remote_multi
        .causes()
        .iter()
        .map(|cause| (cause.id(), cause.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (ids[0].as_str(), Some(404)),
            (ids[1].as_str(), Some(503)),
            (ids[2].as_str(), Some(409)),
        ]
    );
    assert_eq!(remote.status(), None);
}
