//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn detailed_error() -> Error {
    Error::invalid_request("please fill in all required fields")
        .with_details(json!({ "missingFields": ["title"] }))
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("nope"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn display_uses_message_only(detailed_error: Error) {
    assert_eq!(detailed_error.to_string(), "please fill in all required fields");
}

#[rstest]
fn serializes_with_snake_case_code(detailed_error: Error) {
    let value = serde_json::to_value(&detailed_error).expect("serialize error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "please fill in all required fields",
            "details": { "missingFields": ["title"] },
        })
    );
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialize error");
    assert!(value.get("details").is_none());
}

#[rstest]
fn deserialization_rejects_blank_messages() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "forbidden", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
fn round_trips_through_json(detailed_error: Error) {
    let json = serde_json::to_string(&detailed_error).expect("serialize error");
    let decoded: Error = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(decoded, detailed_error);
}
