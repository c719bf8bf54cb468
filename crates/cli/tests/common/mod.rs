//! Shared fakes for engine and command tests.
//!
//! Services are wired into an [`AppState`] backed by in-memory sheet and
//! state stores so tests can inspect exactly what a command wrote.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use groupsweep_cli::commands::Command;
use groupsweep_cli::error::AppResult;
use groupsweep_cli::prompt::Prompter;
use groupsweep_cli::state::AppState;
use groupsweep_core::{Group, Member, ReportTimezone};
use groupsweep_directory::{DirectoryClient, DirectoryError, GroupPage};
use groupsweep_notify::{Notifier, NotifyError};
use groupsweep_sheets::{MemorySheetBackend, ReportSheet};
use groupsweep_state::{MemoryStateStore, Trigger};

pub const DOMAIN: &str = "example.com";
pub const CUSTOMER: &str = "C0test";

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

/// In-memory directory paging a fixed list of groups.
///
/// Cursors are the offset of the next group, rendered as a string.
pub struct FakeDirectory {
    pub groups: Vec<Group>,
    pub page_size: usize,
    pub members: HashMap<String, Vec<Member>>,
    pub owners: HashMap<String, Vec<Member>>,
    /// Group id whose member listing fails.
    pub fail_members_for: Option<String>,
    /// Emails whose deletion fails.
    pub delete_failures: HashSet<String>,
    pub deleted: Mutex<Vec<String>>,
    pub delete_attempts: Mutex<Vec<String>>,
    pub domain_lookups: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FakeDirectory {
    pub fn new(groups: Vec<Group>, page_size: usize) -> Self {
        Self {
            groups,
            page_size,
            members: HashMap::new(),
            owners: HashMap::new(),
            fail_members_for: None,
            delete_failures: HashSet::new(),
            deleted: Mutex::new(Vec::new()),
            delete_attempts: Mutex::new(Vec::new()),
            domain_lookups: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Give `group_id` one ordinary member.
    pub fn with_member(mut self, group_id: &str) -> Self {
        self.members
            .entry(group_id.to_string())
            .or_default()
            .push(member("MEMBER"));
        self
    }

    /// Give `group_id` one owner, reported only by the owner listing.
    pub fn with_owner_only(mut self, group_id: &str) -> Self {
        self.owners
            .entry(group_id.to_string())
            .or_default()
            .push(member("OWNER"));
        self
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryClient for FakeDirectory {
    async fn list_groups(&self, cursor: Option<&str>) -> Result<GroupPage, DirectoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (start + self.page_size).min(self.groups.len());
        Ok(GroupPage {
            groups: self.groups[start..end].to_vec(),
            next_cursor: (end < self.groups.len()).then(|| end.to_string()),
        })
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError> {
        if self.fail_members_for.as_deref() == Some(group_id) {
            return Err(DirectoryError::Api {
                status: 500,
                body: "Backend Error".into(),
            });
        }
        Ok(self.members.get(group_id).cloned().unwrap_or_default())
    }

    async fn list_owners(&self, group_id: &str) -> Result<Vec<Member>, DirectoryError> {
        Ok(self.owners.get(group_id).cloned().unwrap_or_default())
    }

    async fn customer_primary_domain(&self, customer_id: &str) -> Result<String, DirectoryError> {
        assert_eq!(customer_id, CUSTOMER);
        self.domain_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(DOMAIN.to_string())
    }

    async fn delete_group(&self, email: &str) -> Result<(), DirectoryError> {
        self.delete_attempts.lock().unwrap().push(email.to_string());
        if self.delete_failures.contains(email) {
            return Err(DirectoryError::Api {
                status: 404,
                body: format!("Resource Not Found: {email}"),
            });
        }
        self.deleted.lock().unwrap().push(email.to_string());
        Ok(())
    }
}

pub fn member(role: &str) -> Member {
    Member {
        id: format!("m-{role}"),
        email: Some(format!("{}@example.com", role.to_lowercase())),
        role: role.into(),
        kind: "USER".into(),
    }
}

pub fn group(id: &str) -> Group {
    Group {
        id: id.into(),
        name: format!("Group {id}"),
        email: format!("{id}@example.com"),
        creation_time: None,
        direct_members_count: None,
    }
}

/// `n` groups with ids `g0`..`g{n-1}`.
pub fn groups(n: usize) -> Vec<Group> {
    (0..n).map(|i| group(&format!("g{i}"))).collect()
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(usize, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(usize, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_report(&self, count: usize, domain: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((count, domain.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Prompter
// ---------------------------------------------------------------------------

/// Gives a fixed answer to every confirmation and records the questions.
pub struct ScriptedPrompter {
    pub answer: bool,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> AppResult<bool> {
        self.asked.lock().unwrap().push(question.to_string());
        Ok(self.answer)
    }

    fn select_command(&self) -> AppResult<Option<Command>> {
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub struct Harness {
    pub state: AppState,
    pub directory: Arc<FakeDirectory>,
    pub notifier: Arc<RecordingNotifier>,
    pub sheet: Arc<MemorySheetBackend>,
    pub store: Arc<MemoryStateStore>,
}

impl Harness {
    pub fn new(directory: FakeDirectory) -> Self {
        Self::with_sheet(directory, MemorySheetBackend::new("Empty Groups"), Vec::new())
    }

    pub fn with_sheet(
        directory: FakeDirectory,
        sheet: MemorySheetBackend,
        triggers: Vec<Trigger>,
    ) -> Self {
        let directory = Arc::new(directory);
        let notifier = Arc::new(RecordingNotifier::default());
        let sheet = Arc::new(sheet);
        let store = Arc::new(MemoryStateStore::with_triggers(triggers));

        let state = AppState {
            directory: directory.clone(),
            sheet: ReportSheet::new(sheet.clone()),
            notifier: notifier.clone(),
            properties: store.clone(),
            triggers: store.clone(),
            customer_id: CUSTOMER.into(),
            timezone: ReportTimezone::default(),
        };

        Self {
            state,
            directory,
            notifier,
            sheet,
            store,
        }
    }

    /// Data rows of the sheet (header excluded).
    pub fn data_rows(&self) -> Vec<Vec<String>> {
        self.sheet.snapshot().into_iter().skip(1).collect()
    }

    /// Email column of every data row.
    pub fn emails(&self) -> Vec<String> {
        self.data_rows().into_iter().map(|r| r[4].clone()).collect()
    }
}

/// A sheet already holding the header and one row per email.
pub fn listed_sheet(emails: &[&str]) -> MemorySheetBackend {
    let mut rows = vec![groupsweep_core::report::HEADER
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>()];
    for email in emails {
        rows.push(vec![
            format!("Name of {email}"),
            "0".into(),
            "0".into(),
            "2020-01-01".into(),
            email.to_string(),
        ]);
    }
    MemorySheetBackend::with_rows("Empty Groups", rows)
}
