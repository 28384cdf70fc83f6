use crate::tests::{ISSUED_AT, TEST_SECRET};
use crate::{
    DEFAULT_MAX_AGE_MS, DEFAULT_MAX_CLOCK_SKEW_MS, QrCodec, QrError, QrSessionPayload,
    decode_and_validate, encode_qr_payload,
};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};

fn encode_raw_json(json: &str) -> String {
    urlencoding::encode(json).into_owned()
}

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn given_fresh_payload_when_decoded_at_issue_time_then_returns_payload() {
    // Given
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    // When
    let result = decode_and_validate(&encoded, ISSUED_AT, DEFAULT_MAX_AGE_MS);

    // Then
    assert_that!(
        result.unwrap(),
        eq(&QrSessionPayload {
            room_id: "room-101".to_string(),
            room_number: "101".to_string(),
            hotel_id: "hotel-1".to_string(),
            issued_at_epoch_ms: ISSUED_AT,
        })
    );
}

#[test]
fn given_encoded_payload_when_inspected_then_uses_wire_field_names() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let json = urlencoding::decode(&encoded).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["roomId"], "room-101");
    assert_eq!(value["roomNumber"], "101");
    assert_eq!(value["hotelId"], "hotel-1");
    assert_eq!(value["timestamp"], ISSUED_AT);
    assert!(value.get("sig").is_none());
}

#[test]
fn given_encoded_payload_when_inspected_then_contains_no_query_breaking_characters() {
    let encoded = encode_qr_payload("room 1&2", "1#2", "hotel=1", ISSUED_AT);

    for c in ['&', '=', '#', ' ', '?', '"', '{', '}'] {
        assert!(!encoded.contains(c), "encoded payload contains {c:?}");
    }
}

#[test]
fn given_payload_with_special_characters_when_round_tripped_then_preserved() {
    let encoded = encode_qr_payload("oda/12", "12%", "otel-güneş", ISSUED_AT);

    let payload = decode_and_validate(&encoded, ISSUED_AT, DEFAULT_MAX_AGE_MS).unwrap();

    assert_eq!(payload.room_id, "oda/12");
    assert_eq!(payload.room_number, "12%");
    assert_eq!(payload.hotel_id, "otel-güneş");
}

#[test]
fn given_same_input_when_decoded_twice_then_results_identical() {
    let encoded = encode_qr_payload("room-7", "7", "hotel-9", ISSUED_AT);
    let now = ISSUED_AT + 1_000;

    let first = decode_and_validate(&encoded, now, DEFAULT_MAX_AGE_MS).ok();
    let second = decode_and_validate(&encoded, now, DEFAULT_MAX_AGE_MS).ok();

    assert_that!(first, eq(&second));
}

// =========================================================================
// Expiry boundary
// =========================================================================

#[test]
fn given_payload_one_ms_before_max_age_when_validated_then_ok() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = decode_and_validate(
        &encoded,
        ISSUED_AT + DEFAULT_MAX_AGE_MS - 1,
        DEFAULT_MAX_AGE_MS,
    );

    assert_that!(result, ok(anything()));
}

#[test]
fn given_payload_exactly_max_age_old_when_validated_then_expired() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = decode_and_validate(&encoded, ISSUED_AT + DEFAULT_MAX_AGE_MS, DEFAULT_MAX_AGE_MS);

    assert!(matches!(result, Err(QrError::Expired { .. })));
}

#[test]
fn given_payload_past_max_age_when_validated_then_expired_with_age() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = decode_and_validate(
        &encoded,
        ISSUED_AT + DEFAULT_MAX_AGE_MS + 1,
        DEFAULT_MAX_AGE_MS,
    );

    match result {
        Err(QrError::Expired {
            age_ms, max_age_ms, ..
        }) => {
            assert_eq!(age_ms, DEFAULT_MAX_AGE_MS + 1);
            assert_eq!(max_age_ms, DEFAULT_MAX_AGE_MS);
        }
        other => panic!("Expected Expired, got {:?}", other),
    }
}

#[test]
fn given_custom_max_age_when_validated_then_custom_policy_applies() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    assert!(decode_and_validate(&encoded, ISSUED_AT + 59_999, 60_000).is_ok());
    assert!(decode_and_validate(&encoded, ISSUED_AT + 60_000, 60_000).is_err());
}

// =========================================================================
// Clock skew
// =========================================================================

#[test]
fn given_timestamp_slightly_in_future_when_validated_then_tolerated() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = decode_and_validate(
        &encoded,
        ISSUED_AT - DEFAULT_MAX_CLOCK_SKEW_MS,
        DEFAULT_MAX_AGE_MS,
    );

    assert_that!(result, ok(anything()));
}

#[test]
fn given_timestamp_far_in_future_when_validated_then_future_dated() {
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = decode_and_validate(
        &encoded,
        ISSUED_AT - DEFAULT_MAX_CLOCK_SKEW_MS - 1,
        DEFAULT_MAX_AGE_MS,
    );

    match result {
        Err(QrError::FutureDated { ahead_ms, .. }) => {
            assert_eq!(ahead_ms, DEFAULT_MAX_CLOCK_SKEW_MS + 1)
        }
        other => panic!("Expected FutureDated, got {:?}", other),
    }
}

#[test]
fn given_zero_skew_codec_when_timestamp_one_ms_ahead_then_future_dated() {
    let codec = QrCodec::new().with_max_clock_skew_ms(0);
    let encoded = codec.encode(&codec.issue("r", "1", "h", ISSUED_AT));

    let result = codec.decode_and_validate(&encoded, ISSUED_AT - 1);

    assert_that!(result.unwrap_err().error_code(), eq("QR_FUTURE_DATED"));
}

// =========================================================================
// Malformed input
// =========================================================================

#[test]
fn given_non_json_garbage_when_decoded_then_malformed() {
    for garbage in ["", "not json", "%%%", "%7B", "{", "[]", "null", "42", "%E0%A4%A"] {
        let result = decode_and_validate(garbage, ISSUED_AT, DEFAULT_MAX_AGE_MS);
        assert!(
            matches!(result, Err(QrError::Malformed { .. })),
            "{garbage:?} gave {result:?}"
        );
    }
}

#[test]
fn given_invalid_utf8_escape_when_decoded_then_malformed_mentions_encoding() {
    let result = decode_and_validate("%FF%FE", ISSUED_AT, DEFAULT_MAX_AGE_MS);

    assert_that!(result, err(anything()));
    let message = result.unwrap_err().to_string();
    assert_that!(message, contains_substring("percent-encoding"));
}

#[test]
fn given_timestamp_as_string_when_decoded_then_malformed() {
    let encoded = encode_raw_json(
        r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":"1700000000000"}"#,
    );

    let result = decode_and_validate(&encoded, ISSUED_AT, DEFAULT_MAX_AGE_MS);

    assert!(matches!(result, Err(QrError::Malformed { .. })));
}

#[test]
fn given_unencoded_json_when_decoded_then_accepted() {
    let json = r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":1700000000000}"#;

    let result = decode_and_validate(json, ISSUED_AT, DEFAULT_MAX_AGE_MS);

    assert_that!(result, ok(anything()));
}

#[test]
fn given_extra_fields_when_decoded_then_ignored() {
    let encoded = encode_raw_json(
        r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":1700000000000,"floor":3}"#,
    );

    let result = decode_and_validate(&encoded, ISSUED_AT, DEFAULT_MAX_AGE_MS);

    assert_that!(result, ok(anything()));
}

// =========================================================================
// Missing fields
// =========================================================================

#[test]
fn given_each_field_missing_when_decoded_then_missing_field_names_it() {
    let cases = [
        (
            r#"{"roomNumber":"1","hotelId":"h","timestamp":1700000000000}"#,
            "roomId",
        ),
        (
            r#"{"roomId":"r","hotelId":"h","timestamp":1700000000000}"#,
            "roomNumber",
        ),
        (
            r#"{"roomId":"r","roomNumber":"1","timestamp":1700000000000}"#,
            "hotelId",
        ),
        (r#"{"roomId":"r","roomNumber":"1","hotelId":"h"}"#, "timestamp"),
    ];

    for (json, expected) in cases {
        let result = decode_and_validate(&encode_raw_json(json), ISSUED_AT, DEFAULT_MAX_AGE_MS);
        let error = result.unwrap_err();
        assert_eq!(error.field(), Some(expected), "case {json}");
        assert_eq!(error.error_code(), "QR_MISSING_FIELD");
    }
}

#[test]
fn given_empty_or_null_values_when_decoded_then_missing_field() {
    let cases = [
        r#"{"roomId":"","roomNumber":"1","hotelId":"h","timestamp":1700000000000}"#,
        r#"{"roomId":"r","roomNumber":null,"hotelId":"h","timestamp":1700000000000}"#,
        r#"{"roomId":"r","roomNumber":"1","hotelId":"","timestamp":1700000000000}"#,
        r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":0}"#,
    ];

    for json in cases {
        let result = decode_and_validate(&encode_raw_json(json), ISSUED_AT, DEFAULT_MAX_AGE_MS);
        assert!(
            matches!(result, Err(QrError::MissingField { .. })),
            "{json} gave {result:?}"
        );
    }
}

#[test]
fn given_missing_field_and_expired_when_decoded_then_structure_reported_first() {
    let encoded = encode_raw_json(r#"{"roomId":"r","roomNumber":"1","timestamp":1}"#);

    let result = decode_and_validate(&encoded, ISSUED_AT, DEFAULT_MAX_AGE_MS);

    assert!(matches!(result, Err(QrError::MissingField { field: "hotelId", .. })));
}

// =========================================================================
// Signed codec
// =========================================================================

fn signed_codec() -> QrCodec {
    QrCodec::new().with_signing_secret(TEST_SECRET).unwrap()
}

#[test]
fn given_signed_codec_when_round_tripped_then_ok() {
    let codec = signed_codec();
    let payload = codec.issue("room-101", "101", "hotel-1", ISSUED_AT);

    let encoded = codec.encode(&payload);
    let result = codec.decode_and_validate(&encoded, ISSUED_AT + 10);

    assert_that!(result.unwrap(), eq(&payload));
}

#[test]
fn given_signed_codec_when_encoding_then_sig_embedded() {
    let codec = signed_codec();

    let encoded = codec.encode(&codec.issue("room-101", "101", "hotel-1", ISSUED_AT));
    let json = urlencoding::decode(&encoded).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["sig"].as_str().unwrap().len(), 64);
}

#[test]
fn given_signed_codec_when_payload_unsigned_then_unsigned_error() {
    let codec = signed_codec();
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    let result = codec.decode_and_validate(&encoded, ISSUED_AT);

    assert!(matches!(result, Err(QrError::Unsigned { .. })));
}

#[test]
fn given_signed_payload_when_hotel_tampered_then_bad_signature() {
    let codec = signed_codec();
    let encoded = codec.encode(&codec.issue("room-101", "101", "hotel-1", ISSUED_AT));
    let json = urlencoding::decode(&encoded).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["hotelId"] = serde_json::Value::String("hotel-2".to_string());
    let tampered = encode_raw_json(&value.to_string());

    let result = codec.decode_and_validate(&tampered, ISSUED_AT);

    assert!(matches!(result, Err(QrError::BadSignature { .. })));
}

#[test]
fn given_signed_payload_when_timestamp_refreshed_then_bad_signature() {
    let codec = signed_codec();
    let old = ISSUED_AT - 2 * DEFAULT_MAX_AGE_MS;
    let encoded = codec.encode(&codec.issue("room-101", "101", "hotel-1", old));
    let json = urlencoding::decode(&encoded).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value["timestamp"] = serde_json::json!(ISSUED_AT);

    let result = codec.decode_and_validate(&encode_raw_json(&value.to_string()), ISSUED_AT);

    assert_that!(result.unwrap_err().error_code(), eq("QR_BAD_SIGNATURE"));
}

#[test]
fn given_signed_but_expired_payload_when_validated_then_expired() {
    let codec = signed_codec();
    let encoded = codec.encode(&codec.issue("room-101", "101", "hotel-1", ISSUED_AT));

    let result = codec.decode_and_validate(&encoded, ISSUED_AT + DEFAULT_MAX_AGE_MS);

    assert!(result.unwrap_err().is_expired());
}

#[test]
fn given_signature_optional_when_payload_unsigned_then_ok() {
    let codec = signed_codec().require_signature(false);
    let encoded = encode_qr_payload("room-101", "101", "hotel-1", ISSUED_AT);

    assert_that!(codec.decode_and_validate(&encoded, ISSUED_AT), ok(anything()));
}

#[test]
fn given_signature_optional_when_signature_wrong_then_still_rejected() {
    let codec = signed_codec().require_signature(false);
    let encoded = encode_raw_json(
        r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":1700000000000,"sig":"00"}"#,
    );

    let result = codec.decode_and_validate(&encoded, ISSUED_AT);

    assert!(matches!(result, Err(QrError::BadSignature { .. })));
}

#[test]
fn given_unsigned_codec_when_payload_carries_sig_then_sig_ignored() {
    let encoded = encode_raw_json(
        r#"{"roomId":"r","roomNumber":"1","hotelId":"h","timestamp":1700000000000,"sig":"zz"}"#,
    );

    let result = QrCodec::new().decode_and_validate(&encoded, ISSUED_AT);

    assert_that!(result, ok(anything()));
}

#[test]
fn given_short_secret_when_building_codec_then_invalid_signing_key() {
    let result = QrCodec::new().with_signing_secret(b"short");

    assert!(matches!(result, Err(QrError::InvalidSigningKey { .. })));
}
