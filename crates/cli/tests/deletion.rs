mod common;

use assert_matches::assert_matches;
use common::{listed_sheet, FakeDirectory, Harness, ScriptedPrompter};
use groupsweep_cli::commands::{dispatch, Command, Outcome};
use groupsweep_cli::engine::{confirm_then_delete_all, delete_all, DELETE_CONFIRMATION};
use groupsweep_cli::error::AppError;
use groupsweep_core::report::{DELETED_PREFIX, FAILED_STATUS};
use groupsweep_sheets::{MemorySheetBackend, SheetError};

const LISTED: [&str; 3] = ["a@example.com", "b@example.com", "c@example.com"];

fn harness_with_failure(failing: &str) -> Harness {
    let mut dir = FakeDirectory::new(Vec::new(), 200);
    dir.delete_failures.insert(failing.to_string());
    Harness::with_sheet(dir, listed_sheet(&LISTED), Vec::new())
}

#[tokio::test]
async fn failed_row_is_marked_and_pass_continues() {
    let h = harness_with_failure("b@example.com");

    let summary = delete_all(&h.state).await.unwrap();

    assert_eq!(summary.attempted, 3);
    assert_eq!(summary.deleted, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        *h.directory.delete_attempts.lock().unwrap(),
        LISTED.map(String::from).to_vec()
    );
    assert_eq!(h.directory.deleted(), vec!["a@example.com", "c@example.com"]);

    let rows = h.data_rows();
    assert!(rows[0][5].starts_with(DELETED_PREFIX), "{:?}", rows[0]);
    assert_eq!(rows[1][5], FAILED_STATUS);
    assert!(rows[2][5].starts_with(DELETED_PREFIX), "{:?}", rows[2]);
}

#[tokio::test]
async fn blank_row_does_not_shift_statuses() {
    let mut rows = listed_sheet(&["a@example.com", "c@example.com"]).snapshot();
    rows.insert(2, Vec::new());
    let mut dir = FakeDirectory::new(Vec::new(), 200);
    dir.delete_failures.insert("c@example.com".into());
    let h = Harness::with_sheet(
        dir,
        MemorySheetBackend::with_rows("Empty Groups", rows),
        Vec::new(),
    );

    let summary = delete_all(&h.state).await.unwrap();
    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.failed, 1);

    let snapshot = h.sheet.snapshot();
    assert!(snapshot[1][5].starts_with(DELETED_PREFIX), "{:?}", snapshot[1]);
    assert!(snapshot[2].iter().all(|c| c.is_empty()), "{:?}", snapshot[2]);
    assert_eq!(snapshot[3][4], "c@example.com");
    assert_eq!(snapshot[3][5], FAILED_STATUS);

    // The sheet stays readable for the next pass.
    let again = delete_all(&h.state).await.unwrap();
    assert_eq!(again.attempted, 2);
}

#[tokio::test]
async fn deletion_leaves_data_columns_untouched() {
    let h = harness_with_failure("nobody@example.com");
    let before = h.data_rows();

    delete_all(&h.state).await.unwrap();

    for (old, new) in before.iter().zip(h.data_rows()) {
        assert_eq!(old[..], new[..5]);
    }
}

#[tokio::test]
async fn declined_confirmation_changes_nothing() {
    let h = harness_with_failure("nobody@example.com");
    let before = h.sheet.snapshot();
    let prompter = ScriptedPrompter::answering(false);

    let outcome = confirm_then_delete_all(&h.state, &prompter).await.unwrap();

    assert_eq!(outcome, None);
    assert_eq!(*prompter.asked.lock().unwrap(), vec![DELETE_CONFIRMATION]);
    assert!(h.directory.delete_attempts.lock().unwrap().is_empty());
    assert_eq!(h.sheet.snapshot(), before);
}

#[tokio::test]
async fn dispatch_delete_reports_outcome() {
    let h = harness_with_failure("c@example.com");

    let outcome = dispatch(Command::DeleteFound, &h.state, &ScriptedPrompter::answering(true))
        .await
        .unwrap();
    assert_matches!(outcome, Outcome::Deleted(s) if s.deleted == 2 && s.failed == 1);

    let outcome = dispatch(Command::DeleteFound, &h.state, &ScriptedPrompter::answering(false))
        .await
        .unwrap();
    assert_eq!(outcome, Outcome::DeletionCancelled);
}

#[tokio::test]
async fn header_only_sheet_deletes_nothing() {
    let h = Harness::with_sheet(
        FakeDirectory::new(Vec::new(), 200),
        listed_sheet(&[]),
        Vec::new(),
    );

    let summary = delete_all(&h.state).await.unwrap();

    assert_eq!(summary.attempted, 0);
    assert!(h.directory.delete_attempts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_report_tab_aborts() {
    let h = Harness::with_sheet(
        FakeDirectory::new(Vec::new(), 200),
        MemorySheetBackend::new("Empty Groups"),
        Vec::new(),
    );

    let err = delete_all(&h.state).await.unwrap_err();

    assert_matches!(err, AppError::Sheet(SheetError::Core(_)));
    assert!(h.directory.delete_attempts.lock().unwrap().is_empty());
}
