//! End-to-end tests for the user status pipeline
//!
//! A fixed evaluation instant keeps expiry comparisons deterministic.

use datafix_common::{ErrorKind, EvaluationInstant, TransformSummary};
use datafix_status::{run, UserStatus, UPDATED_USERS_FILE, USERS_FILE};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

const NOW_MS: i64 = 1_760_000_000_000;

fn instant() -> EvaluationInstant {
    EvaluationInstant::from_epoch_millis(NOW_MS).unwrap()
}

fn users_fixture() -> Value {
    json!([
        {"_id": "u1", "name": "Active", "password": "h1", "phone": "+971500000001",
         "resetPasswordToken": "stale", "resetPasswordExpires": NOW_MS + 60_000},
        {"_id": "u2", "name": "NoPhone", "password": "h2"},
        {"_id": "u3", "name": "Pending", "resetPasswordToken": "t3",
         "resetPasswordExpires": NOW_MS + 259_200_000},
        {"_id": "u4", "name": "Lapsed", "resetPasswordToken": "t4",
         "resetPasswordExpires": NOW_MS - 1},
        {"_id": "u5", "name": "Fresh", "status": "New"}
    ])
}

#[test]
fn test_statuses_written_to_separate_file() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join(USERS_FILE);
    let target = temp_dir.path().join(UPDATED_USERS_FILE);
    let original = serde_json::to_string(&users_fixture()).unwrap();
    fs::write(&source, &original).unwrap();

    let outcome = run(&source, &target, instant()).unwrap();

    // Source untouched
    assert_eq!(fs::read_to_string(&source).unwrap(), original);

    let written: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    let users = written.as_array().unwrap();
    assert_eq!(users.len(), 5);

    let statuses: Vec<_> = users.iter().map(|u| u["status"].clone()).collect();
    assert_eq!(
        statuses,
        vec![
            json!("active"),
            json!("Phone Required"),
            json!("Reset Password Sent"),
            json!("Reset Password Expires"),
            json!("New"),
        ]
    );

    assert_eq!(users[0]["resetPasswordToken"], Value::Null);
    assert_eq!(users[0]["resetPasswordExpires"], Value::Null);
    assert_eq!(users[1]["resetPasswordToken"], Value::Null);
    assert_eq!(users[2]["resetPasswordToken"], json!("t3"));

    assert_eq!(outcome.summary, TransformSummary { total: 5, modified: 4 });
    for status in UserStatus::ALL {
        assert_eq!(outcome.count(status), 1, "{status}");
    }
}

#[test]
fn test_one_instant_used_for_whole_batch() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join(USERS_FILE);
    let target = temp_dir.path().join(UPDATED_USERS_FILE);
    fs::write(
        &source,
        serde_json::to_string(&json!([
            {"resetPasswordToken": "a", "resetPasswordExpires": NOW_MS + 1},
            {"resetPasswordToken": "b", "resetPasswordExpires": NOW_MS}
        ]))
        .unwrap(),
    )
    .unwrap();

    let outcome = run(&source, &target, instant()).unwrap();
    assert_eq!(outcome.count(UserStatus::ResetPasswordSent), 1);
    assert_eq!(outcome.count(UserStatus::ResetPasswordExpired), 1);
}

#[test]
fn test_output_keeps_unicode_and_two_space_indent() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join(USERS_FILE);
    let target = temp_dir.path().join(UPDATED_USERS_FILE);
    fs::write(&source, r#"[{"name":"أحمد"}]"#).unwrap();

    run(&source, &target, instant()).unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "[\n  {\n    \"name\": \"أحمد\",\n    \"status\": \"New\"\n  }\n]"
    );
}

#[test]
fn test_new_keys_written_status_first() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join(USERS_FILE);
    let target = temp_dir.path().join(UPDATED_USERS_FILE);
    fs::write(&source, r#"[{"_id":"u1","password":"h"}]"#).unwrap();

    run(&source, &target, instant()).unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "[\n  {\n    \"_id\": \"u1\",\n    \"password\": \"h\",\n    \"status\": \"Phone Required\",\n    \"resetPasswordToken\": null,\n    \"resetPasswordExpires\": null\n  }\n]"
    );
}

#[test]
fn test_load_failures_propagate_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join(USERS_FILE);
    let target = temp_dir.path().join(UPDATED_USERS_FILE);

    let err = run(&source, &target, instant()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFile);

    fs::write(&source, "not json").unwrap();
    let err = run(&source, &target, instant()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedInput);

    fs::write(&source, r#"{"users": []}"#).unwrap();
    let err = run(&source, &target, instant()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ShapeViolation);

    assert!(!target.exists());
}
