mod common;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde_json::{json, Value};

use passwords::{encoding, hash, verify, Error, HashRecord, ParameterSet};

// ── JSON shape ──────────────────────────────────────────────────

#[test]
fn record_serializes_as_flat_object() {
    let record = hash("password", &common::fast_params()).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["salt"], json!(record.salt));
    assert_eq!(value["hash"], json!(record.hash));
    assert_eq!(
        value["params"],
        json!({
            "hash_function": "argon2id",
            "memory": 1024,
            "time": 1,
            "threads": 1,
            "salt_length": 16,
            "key_length": 32,
        })
    );
}

#[test]
fn record_survives_json_storage() {
    let record = hash("hello, world", &common::fast_params()).unwrap();

    let stored = serde_json::to_string(&record).unwrap();
    let loaded: HashRecord = serde_json::from_str(&stored).unwrap();

    assert_eq!(loaded, record);
    assert!(verify("hello, world", Some(&loaded)).unwrap());
}

#[test]
fn iterations_layout_is_accepted() {
    let record = hash("admin", &common::fast_params()).unwrap();

    // Field names written by the second historical layout, misspelling included.
    let stored = json!({
        "salt": record.salt,
        "hash": record.hash,
        "params": {
            "hash_function": "argon2id",
            "memory": 1024,
            "iterations": 1,
            "paralleslism": 1,
            "salt_length": 16,
            "key_length": 32,
        }
    });
    let loaded: HashRecord = serde_json::from_value(stored).unwrap();

    assert_eq!(loaded.params, record.params);
    assert!(verify("admin", Some(&loaded)).unwrap());
}

#[test]
fn record_without_params_is_rejected() {
    let stored = json!({ "salt": "c2FsdHNhbHRzYWx0c2FsdA", "hash": "aGFzaGhhc2hoYXNoaGFzaA" });

    assert!(serde_json::from_value::<HashRecord>(stored).is_err());
}

#[test]
fn params_round_trip_through_json() {
    for params in [ParameterSet::DEFAULT, ParameterSet::LEGACY] {
        let value: Value = serde_json::to_value(&params).unwrap();
        let loaded: ParameterSet = serde_json::from_value(value).unwrap();
        assert_eq!(loaded, params);
    }
}

// ── Encoding ────────────────────────────────────────────────────

#[test]
fn encoding_uses_standard_alphabet_without_padding() {
    assert_eq!(encoding::encode(&[0xfb, 0xff]), "+/8");
    assert_eq!(encoding::encode(b"hello"), "aGVsbG8");
    assert_eq!(encoding::decode("salt", "aGVsbG8").unwrap(), b"hello");
}

#[test]
fn encoding_rejects_foreign_forms() {
    for text in ["aGVsbG8=", "-_8", "aGVs bG8", "a"] {
        let err = encoding::decode("hash", text).unwrap_err();
        assert!(
            matches!(err, Error::MalformedEncoding { field: "hash", .. }),
            "{text:?} decoded"
        );
    }
}

// ── PHC strings ─────────────────────────────────────────────────

#[test]
fn phc_string_layout() {
    let record = hash("password", &common::fast_params()).unwrap();
    let phc = record.to_phc_string().unwrap();

    assert_eq!(
        phc,
        format!("$argon2id$v=19$m=1024,t=1,p=1${}${}", record.salt, record.hash)
    );
}

#[test]
fn phc_string_round_trips() {
    let params = common::fast_params().with_salt_length(32).with_key_length(48);
    let record = hash("password", &params).unwrap();

    let parsed = HashRecord::from_phc_str(&record.to_phc_string().unwrap()).unwrap();

    assert_eq!(parsed, record);
    assert!(parsed.verify("password").unwrap());
}

#[test]
fn argon2_crate_hashes_verify_here() {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(1024, 1, 1, None).unwrap(),
    );
    let phc = argon2
        .hash_password(b"hello, world", &salt)
        .unwrap()
        .to_string();

    let record = HashRecord::from_phc_str(&phc).unwrap();

    assert_eq!(record.params.algorithm, "argon2id");
    assert_eq!(record.params.memory_cost, 1024);
    assert_eq!(record.params.key_length, 32);
    assert!(verify("hello, world", Some(&record)).unwrap());
    assert!(!verify("hello world", Some(&record)).unwrap());
}

#[test]
fn records_verify_with_argon2_crate() {
    let record = hash("hello, world", &common::fast_params()).unwrap();
    let phc = record.to_phc_string().unwrap();
    let parsed = PasswordHash::new(&phc).unwrap();

    assert!(Argon2::default()
        .verify_password(b"hello, world", &parsed)
        .is_ok());
    assert!(Argon2::default().verify_password(b"", &parsed).is_err());
}

#[test]
fn malformed_phc_strings_are_rejected() {
    let record = hash("password", &common::fast_params()).unwrap();

    let cases = [
        "not a phc string".to_string(),
        format!("$argon2id$v=16$m=1024,t=1,p=1${}${}", record.salt, record.hash),
        format!("$argon2id$v=19$m=1024,p=1${}${}", record.salt, record.hash),
        format!("$argon2id$v=19$m=1024,t=1,p=1${}", record.salt),
        "$argon2id$v=19$m=1024,t=1,p=1".to_string(),
    ];

    for phc in cases {
        let err = HashRecord::from_phc_str(&phc).unwrap_err();
        assert!(matches!(err, Error::MalformedEncoding { .. }), "{phc}: {err}");
    }
}

#[test]
fn other_argon2_variants_are_rejected_on_import() {
    let salt = SaltString::generate(&mut OsRng);

    for algorithm in [Algorithm::Argon2i, Algorithm::Argon2d] {
        let argon2 = Argon2::new(
            algorithm,
            Version::V0x13,
            Params::new(1024, 1, 1, None).unwrap(),
        );
        let phc = argon2
            .hash_password(b"hello, world", &salt)
            .unwrap()
            .to_string();

        let err = HashRecord::from_phc_str(&phc).unwrap_err();
        assert!(
            matches!(err, Error::MalformedEncoding { field: "phc", .. }),
            "{phc}: {err}"
        );
    }
}

#[test]
fn legacy_label_round_trips_through_phc() {
    let record = hash("admin", &common::fast_params().with_algorithm("argon2")).unwrap();

    let parsed = HashRecord::from_phc_str(&record.to_phc_string().unwrap()).unwrap();

    assert_eq!(parsed, record);
    assert!(parsed.verify("admin").unwrap());
}

#[test]
fn records_outside_phc_limits_are_not_exported() {
    let cases = [
        common::fast_params().with_salt_length(64),
        common::fast_params().with_key_length(128),
        common::fast_params().with_key_length(8),
        common::fast_params().with_algorithm("scrypt"),
    ];

    for params in cases {
        let record = hash("password", &params).unwrap();
        let err = record.to_phc_string().unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)), "{params:?}: {err}");
        // The record itself stays verifiable.
        assert!(record.verify("password").unwrap());
    }
}

#[test]
fn phc_limits_round_trip_at_the_edges() {
    let params = common::fast_params().with_salt_length(48).with_key_length(64);
    let record = hash("password", &params).unwrap();

    let parsed = HashRecord::from_phc_str(&record.to_phc_string().unwrap()).unwrap();
    assert_eq!(parsed, record);
}
