// tests/envelope_tests.rs
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use encrypted_txn_vault::consts::{KEY_LEN, SUPPORTED_ALG, SUPPORTED_MK_VERSION};
use encrypted_txn_vault::core::crypto::seal;
use encrypted_txn_vault::core::key::generate_key;
use encrypted_txn_vault::core::{canonical_json, EnvelopeCodec, MasterKey};
use encrypted_txn_vault::error::{CoreError, DecryptionError};
use encrypted_txn_vault::SecureRecord;
use serde_json::{json, Value};

mod common;
mod support;
use support::{flip_bit_hex, random_codec, test_codec, test_master_key};

fn assert_decryption_failed(result: Result<impl std::fmt::Debug, CoreError>, field: &str) {
    match result {
        Err(CoreError::Decryption(DecryptionError { field: f })) => assert_eq!(f, field),
        other => panic!("expected DecryptionError on {field}, got {other:?}"),
    }
}

#[test]
fn test_party_transaction_roundtrip() {
    common::setup();
    let codec = test_codec();
    let payload = json!({"amount": 1000, "currency": "USD"});

    let record = codec.encode("party-123", &payload).unwrap();

    assert_eq!(hex::decode(&record.payload_nonce).unwrap().len(), 12);
    assert_eq!(hex::decode(&record.dek_wrap_nonce).unwrap().len(), 12);
    assert_eq!(hex::decode(&record.payload_tag).unwrap().len(), 16);
    assert_eq!(hex::decode(&record.dek_wrap_tag).unwrap().len(), 16);
    assert!(!record.payload_ct.is_empty());
    assert_eq!(hex::decode(&record.dek_wrapped).unwrap().len(), KEY_LEN);
    assert_eq!(record.alg, SUPPORTED_ALG);
    assert_eq!(record.mk_version, SUPPORTED_MK_VERSION);
    assert_eq!(record.id.len(), 32);

    let decoded = codec.decode(&record).unwrap();
    assert_eq!(decoded.party_id, "party-123");
    assert_eq!(decoded.payload, payload);
    assert_eq!(decoded.created_at, record.created_at);
}

#[test]
fn test_roundtrip_various_payloads() {
    let codec = test_codec();
    let mut deep = json!("leaf");
    for i in 0..30 {
        deep = json!({ format!("level{i}"): [deep, i, null, true] });
    }

    let payloads = [
        json!({}),
        json!([]),
        json!(null),
        json!(42),
        json!("just a string"),
        json!({"unicode": "żółć ✓ 日本", "escaped": "quote\" back\\slash"}),
        json!({"amount": 12.5, "negative": -3, "big": u64::MAX}),
        deep,
    ];

    for payload in payloads {
        let record = codec.encode("party-x", &payload).unwrap();
        let decoded = codec.decode(&record).unwrap();
        assert_eq!(decoded.payload, payload);
        assert_eq!(decoded.party_id, "party-x");
    }
}

#[test]
fn test_roundtrip_serializable_struct() {
    #[derive(serde::Serialize)]
    struct Transfer<'a> {
        amount: u32,
        currency: &'a str,
        memo: Option<&'a str>,
    }

    let codec = test_codec();
    let record = codec
        .encode(
            "party-9",
            &Transfer {
                amount: 250,
                currency: "EUR",
                memo: None,
            },
        )
        .unwrap();

    let decoded = codec.decode(&record).unwrap();
    assert_eq!(
        decoded.payload,
        json!({"amount": 250, "currency": "EUR", "memo": null})
    );
}

#[test]
fn test_canonical_json_sorts_keys() {
    let bytes = canonical_json(&json!({"b": 1, "a": {"d": 2, "c": 3}})).unwrap();
    assert_eq!(bytes, br#"{"a":{"c":3,"d":2},"b":1}"#);
}

#[test]
fn test_nonces_and_ids_are_fresh_per_encode() {
    let codec = test_codec();
    let payload = json!({"amount": 1});

    let mut payload_nonces = HashSet::new();
    let mut wrap_nonces = HashSet::new();
    let mut ids = HashSet::new();
    let mut wrapped = HashSet::new();

    for _ in 0..2_000 {
        let record = codec.encode("same-party", &payload).unwrap();
        assert_ne!(record.payload_nonce, record.dek_wrap_nonce);
        assert!(payload_nonces.insert(record.payload_nonce));
        assert!(wrap_nonces.insert(record.dek_wrap_nonce));
        assert!(ids.insert(record.id));
        // fresh DEK each time → distinct wrapped keys
        assert!(wrapped.insert(record.dek_wrapped));
    }
}

#[test]
fn test_single_bit_tamper_is_detected() {
    let codec = test_codec();
    let record = codec.encode("party-1", &json!({"amount": 1000})).unwrap();

    type Field = fn(&mut SecureRecord) -> &mut String;
    let cases: [(&str, Field, &str); 6] = [
        ("payload_ct", |r| &mut r.payload_ct, "payload_ct"),
        ("payload_tag", |r| &mut r.payload_tag, "payload_ct"),
        ("payload_nonce", |r| &mut r.payload_nonce, "payload_ct"),
        ("dek_wrapped", |r| &mut r.dek_wrapped, "dek_wrapped"),
        ("dek_wrap_tag", |r| &mut r.dek_wrap_tag, "dek_wrapped"),
        ("dek_wrap_nonce", |r| &mut r.dek_wrap_nonce, "dek_wrapped"),
    ];

    for (name, field, reported) in cases {
        let len = hex::decode(field(&mut record.clone())).unwrap().len();
        for byte_index in [0, len / 2, len - 1] {
            for bit in [0, 3, 7] {
                let mut tampered = record.clone();
                let target = field(&mut tampered);
                let flipped = flip_bit_hex(target, byte_index, bit);
                *target = flipped;
                let result = codec.decode(&tampered);
                assert!(result.is_err(), "{name} byte {byte_index} bit {bit} not detected");
                assert_decryption_failed(result, reported);
            }
        }
    }
}

#[test]
fn test_wrong_master_key_fails() {
    let record = test_codec().encode("party-1", &json!({"a": 1})).unwrap();
    assert_decryption_failed(random_codec().decode(&record), "dek_wrapped");
}

#[test]
fn test_swapped_payload_between_records_fails() {
    let codec = test_codec();
    let a = codec.encode("party-a", &json!({"who": "a"})).unwrap();
    let b = codec.encode("party-b", &json!({"who": "b"})).unwrap();

    let mut mixed = a.clone();
    mixed.payload_ct = b.payload_ct.clone();
    mixed.payload_nonce = b.payload_nonce.clone();
    mixed.payload_tag = b.payload_tag.clone();
    assert_decryption_failed(codec.decode(&mixed), "payload_ct");
}

#[test]
fn test_authenticated_non_json_payload_is_decryption_error() {
    let master = test_master_key();
    let codec = EnvelopeCodec::new(Arc::clone(&master));
    let template = codec.encode("party-1", &json!({})).unwrap();

    let dek = generate_key();
    let payload = seal(b"definitely { not json", &dek).unwrap();
    let wrapped = seal(dek.as_slice(), master.expose_secret()).unwrap();

    let mut record = template.clone();
    (record.payload_nonce, record.payload_ct, record.payload_tag) = payload.to_hex();
    (record.dek_wrap_nonce, record.dek_wrapped, record.dek_wrap_tag) = wrapped.to_hex();

    let err = codec.decode(&record).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Decryption(DecryptionError {
            field: "payload_ct"
        })
    ));
    assert!(err.is_client_error());
}

#[test]
fn test_wrapped_key_of_wrong_size_is_decryption_error() {
    let master = test_master_key();
    let codec = EnvelopeCodec::new(Arc::clone(&master));
    let mut record = codec.encode("party-1", &json!({"a": 1})).unwrap();

    // authentic under the master key, but only 16 bytes
    let short = seal(&[7u8; 16], master.expose_secret()).unwrap();
    (record.dek_wrap_nonce, record.dek_wrapped, record.dek_wrap_tag) = short.to_hex();

    assert_decryption_failed(codec.decode(&record), "dek_wrapped");
}

#[test]
fn test_empty_party_id_is_rejected() {
    let err = test_codec().encode("", &json!({})).unwrap_err();
    assert!(matches!(err, CoreError::MissingPartyId));
}

#[test]
fn test_plaintext_fields_are_returned_verbatim() {
    let codec = test_codec();
    let mut record = codec.encode("party-1", &json!({"n": 1})).unwrap();
    record.party_id = "someone-else".into();
    record.created_at = "1999-12-31T23:59:59.000Z".into();

    let decoded = codec.decode(&record).unwrap();
    assert_eq!(decoded.party_id, "someone-else");
    assert_eq!(decoded.created_at, "1999-12-31T23:59:59.000Z");
    assert_eq!(decoded.payload, json!({"n": 1}));
}

#[test]
fn test_created_at_is_utc_iso8601() {
    let record = test_codec().encode("p", &json!({})).unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(&record.created_at).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
    assert!(record.created_at.ends_with('Z'));
}

#[test]
fn test_record_serializes_with_normative_field_names() {
    let record = test_codec().encode("party-123", &json!({})).unwrap();
    let value: Value = serde_json::to_value(&record).unwrap();
    let obj = value.as_object().unwrap();

    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "alg",
            "createdAt",
            "dek_wrap_nonce",
            "dek_wrap_tag",
            "dek_wrapped",
            "id",
            "mk_version",
            "partyId",
            "payload_ct",
            "payload_nonce",
            "payload_tag",
        ]
    );
    assert_eq!(obj["mk_version"], json!(1));

    let back: SecureRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_codec_is_shared_across_threads() {
    let codec = Arc::new(test_codec());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let codec = Arc::clone(&codec);
            thread::spawn(move || {
                for i in 0..50 {
                    let payload = json!({"thread": t, "i": i});
                    let record = codec.encode(&format!("party-{t}"), &payload).unwrap();
                    assert_eq!(codec.decode(&record).unwrap().payload, payload);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_master_key_debug_is_redacted() {
    let key = MasterKey::from_bytes([0x42; KEY_LEN]);
    let shown = format!("{key:?}");
    assert!(!shown.contains("42"));
    assert!(shown.contains("REDACTED"));
}
