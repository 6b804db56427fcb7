use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use adminkit::error::SessionError;
use adminkit::form::{EditMode, EditingSession, Field, FieldModel, Formatter, SessionStatus, SubmitOutcome};
use adminkit::model::{Record, Value};
use adminkit::validation::rules;
use tokio::sync::oneshot;

fn rule_fields() -> FieldModel<Record> {
    FieldModel::new(vec![
        Field::text("ruleName", "Rule name").required().validate(rules::required("Rule name")),
        Field::text("decisionValue", "Decision value"),
        Field::text("phone", "Phone").format(Formatter::phone()),
        Field::currency("amount", "Amount")
            .on_blur(Formatter::currency_display())
            .on_focus(Formatter::currency_edit()),
    ])
    .unwrap()
}

#[test]
fn test_edit_shows_numbers_as_plain_text() {
    let session = EditingSession::new(rule_fields());
    let row = Record::new("42").set("ruleName", "Min score").set("decisionValue", 7i64);

    session.open_for_edit(&row).unwrap();

    let resolved = session.resolved().unwrap();
    let value = resolved.iter().find(|f| f.key == "decisionValue").unwrap();
    assert_eq!(value.value, Value::from("7"));
    assert_eq!(session.mode(), Some(EditMode::Edit));
}

#[test]
fn test_edit_never_touches_source_row() {
    let session = EditingSession::new(rule_fields());
    let row = Record::new("42").set("ruleName", "Min score");

    session.open_for_edit(&row).unwrap();
    session.update_field("ruleName", "Changed").unwrap();

    assert_eq!(row.get_str("ruleName"), Some("Min score"));
    assert_eq!(session.draft().unwrap().get_str("ruleName"), Some("Changed"));
}

#[test]
fn test_update_runs_change_formatter() {
    let session = EditingSession::new(rule_fields());
    session.open_for_add([]).unwrap();
    session.update_field("phone", "3255550100").unwrap();
    assert_eq!(session.draft().unwrap().get_str("phone"), Some("(325)-555-0100"));
}

#[test]
fn test_blur_and_focus_formatters() {
    let session = EditingSession::new(rule_fields());
    session.open_for_add([]).unwrap();
    session.update_field("amount", "1234.5").unwrap();

    session.blur_field("amount").unwrap();
    assert_eq!(session.draft().unwrap().get_str("amount"), Some("1,234.50"));

    session.focus_field("amount").unwrap();
    assert_eq!(session.draft().unwrap().get_str("amount"), Some("1234.50"));

    // No formatter: no change.
    session.blur_field("ruleName").unwrap();
}

#[tokio::test]
async fn test_double_submit_commits_once() {
    let session = EditingSession::new(rule_fields());
    session.open_for_add([]).unwrap();
    session.update_field("ruleName", "Min score").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let (release, gate) = oneshot::channel::<()>();

    let first = {
        let session = session.clone();
        let calls = Arc::clone(&calls);
        tokio::spawn(async move {
            session
                .submit(|_record: Record| async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    gate.await.map_err(|e| e.to_string())
                })
                .await
        })
    };

    while session.status() != SessionStatus::Saving {
        tokio::task::yield_now().await;
    }

    let second_calls = Arc::clone(&calls);
    let second = session
        .submit(|_record: Record| async move {
            second_calls.fetch_add(1, Ordering::SeqCst);
            Ok::<(), String>(())
        })
        .await
        .unwrap();
    assert_eq!(second, SubmitOutcome::AlreadySaving);
    assert_eq!(session.update_field("ruleName", "x"), Err(SessionError::Saving));
    assert_eq!(session.cancel(), Err(SessionError::Saving));

    release.send(()).unwrap();
    let first = first.await.unwrap().unwrap();

    let SubmitOutcome::Committed(record) = first else {
        panic!("expected committed outcome");
    };
    assert_eq!(record.get_str("ruleName"), Some("Min score"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.status(), SessionStatus::Closed);
    assert!(session.draft().is_none());
}

#[tokio::test]
async fn test_failed_commit_reopens_with_draft() {
    let session = EditingSession::new(rule_fields());
    let row = Record::new("9").set("ruleName", "Old");
    session.open_for_edit(&row).unwrap();
    session.update_field("ruleName", "New").unwrap();

    let err = session
        .submit(|_| async { Err::<(), _>("connection reset") })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SessionError::Commit {
            message: "connection reset".to_string()
        }
    );
    assert_eq!(session.status(), SessionStatus::Open);
    assert_eq!(session.draft().unwrap().get_str("ruleName"), Some("New"));
    assert_eq!(session.source_id().as_deref(), Some("9"));

    let outcome = session
        .submit(|record: Record| async move {
            assert_eq!(record.id(), "9");
            Ok::<(), String>(())
        })
        .await
        .unwrap();
    assert!(matches!(outcome, SubmitOutcome::Committed(_)));
}

#[tokio::test]
async fn test_invalid_submit_skips_commit() {
    let session = EditingSession::new(rule_fields());
    session.open_for_add([]).unwrap();

    let calls = AtomicUsize::new(0);
    let counter = &calls;
    let outcome = session
        .submit(move |_| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<(), String>(())
        })
        .await
        .unwrap();

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref result) if result.get("ruleName").is_some()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.status(), SessionStatus::Open);
}

#[tokio::test]
async fn test_submit_requires_open_session() {
    let session = EditingSession::new(rule_fields());
    let result = session.submit(|_| async { Ok::<(), String>(()) }).await;
    assert_eq!(result, Err(SessionError::NotOpen));
}

#[test]
fn test_snapshot_after_cancel() {
    let session = EditingSession::new(rule_fields());
    session
        .open_for_add([("ruleName".to_string(), Value::from("Seeded"))])
        .unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Open);
    assert_eq!(snapshot.draft.unwrap().get_str("ruleName"), Some("Seeded"));

    session.cancel().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Closed);
    assert_eq!(snapshot.mode, None);
    assert!(snapshot.draft.is_none());
}
