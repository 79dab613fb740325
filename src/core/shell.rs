//! Application shell: the single owner of the credential list.
//!
//! Every mutation goes through [`Shell::save`], which writes to the store and
//! then discards the local list and reloads it. Nothing is patched locally.

use crate::core::filter;
use crate::core::form::{CredentialForm, FormError};
use crate::core::store::{CredentialStore, StoreError};
use crate::models::credential::{Credential, SaveRequest};
use crate::util::clipboard::Clipboard;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient notification for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Stats {
    pub total: usize,
    pub unique_platforms: usize,
    pub with_domain: usize,
    pub matching: usize,
}

/// Identifies one load. Only the most recently issued ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

pub struct Shell {
    store: Box<dyn CredentialStore>,
    credentials: Vec<Credential>,
    search: String,
    form: CredentialForm,
    loading: bool,
    last_ticket: u64,
    notices: Vec<Notice>,
}

impl Shell {
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            store,
            credentials: Vec::new(),
            search: String::new(),
            form: CredentialForm::default(),
            loading: false,
            last_ticket: 0,
            notices: Vec::new(),
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.last_ticket += 1;
        self.loading = true;
        LoadTicket(self.last_ticket)
    }

    /// Apply a finished load. Returns `false` when the ticket is stale and the
    /// result was dropped. On failure the current list is kept.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Credential>, StoreError>,
    ) -> bool {
        if ticket.0 != self.last_ticket {
            tracing::debug!(ticket = ticket.0, latest = self.last_ticket, "dropping stale load");
            return false;
        }
        self.loading = false;
        match result {
            Ok(list) => {
                tracing::debug!(count = list.len(), "credential list loaded");
                self.credentials = list;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load credentials");
                self.notify(NoticeLevel::Error, format!("Could not load credentials: {}", e));
            }
        }
        true
    }

    /// Fetch the full list from the store.
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let result = self.store.list().await;
        self.finish_load(ticket, result);
    }

    pub fn credentials(&self) -> &[Credential] {
        &self.credentials
    }

    pub fn find(&self, id: &str) -> Option<&Credential> {
        self.credentials.iter().find(|c| c.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible(&self) -> Vec<&Credential> {
        filter::filter(&self.credentials, &self.search)
    }

    pub fn stats(&self) -> Stats {
        let platforms: HashSet<String> = self
            .credentials
            .iter()
            .map(|c| c.platform.to_lowercase())
            .collect();
        Stats {
            total: self.credentials.len(),
            unique_platforms: platforms.len(),
            with_domain: self.credentials.iter().filter(|c| c.domain.is_some()).count(),
            matching: self.visible().len(),
        }
    }

    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CredentialForm {
        &mut self.form
    }

    pub fn open_create(&mut self) {
        self.form.open(None);
    }

    /// Open the form on a loaded credential. Returns `false` if the id is unknown.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(credential) = self.credentials.iter().find(|c| c.id == id) else {
            self.notify(NoticeLevel::Error, format!("Credential {} not found", id));
            return false;
        };
        self.form.open(Some(credential));
        true
    }

    pub fn cancel_form(&mut self) {
        self.form.cancel();
    }

    pub fn generate_password(&mut self) {
        match self.form.generate_password() {
            Ok(_) => self.notify(NoticeLevel::Success, "Password generated"),
            Err(e) => self.notify(NoticeLevel::Error, e.to_string()),
        }
    }

    /// Validate the open form and write it to the store. On success the form
    /// closes and the list is reloaded; on failure form and list are untouched.
    pub async fn save(&mut self) -> Result<(), SaveError> {
        let request = match self.form.submit() {
            Ok(r) => r,
            Err(e) => {
                self.notify(NoticeLevel::Error, e.to_string());
                return Err(SaveError::Invalid(e));
            }
        };

        let result = match &request {
            SaveRequest::Create(fields) => self.store.insert(fields).await.map(|_| ()),
            SaveRequest::Update { id, fields } => self.store.update(id, fields).await,
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save credential");
            self.notify(NoticeLevel::Error, format!("Could not save credential: {}", e));
            return Err(SaveError::Store(e));
        }

        self.form.cancel();
        let message = if request.is_update() {
            "Credential updated"
        } else {
            "Credential saved"
        };
        self.notify(NoticeLevel::Success, message);
        self.load().await;
        Ok(())
    }

    /// Copy one field of a loaded credential to the clipboard.
    pub fn copy(&mut self, clipboard: &dyn Clipboard, id: &str, target: CopyTarget) -> bool {
        let Some(credential) = self.find(id) else {
            self.notify(NoticeLevel::Error, format!("Credential {} not found", id));
            return false;
        };
        let (text, what) = match target {
            CopyTarget::Username => (credential.username.clone(), "Username"),
            CopyTarget::Password => (credential.password.clone(), "Password"),
        };
        match clipboard.write_text(&text) {
            Ok(()) => {
                self.notify(NoticeLevel::Success, format!("{} copied", what));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard write failed");
                self.notify(NoticeLevel::Error, "Could not copy to clipboard");
                false
            }
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    /// Take all pending notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::Field;
    use crate::core::store::MemoryStore;
    use crate::models::credential::CredentialFields;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Wraps a memory store, counting writes and optionally failing them.
    #[derive(Default)]
    struct Probe {
        inner: MemoryStore,
        inserts: AtomicUsize,
        updates: AtomicUsize,
        lists: AtomicUsize,
        fail_writes: AtomicBool,
        fail_lists: AtomicBool,
        last_update_id: Mutex<Option<String>>,
    }

    struct ProbeStore(Arc<Probe>);

    #[async_trait]
    impl CredentialStore for ProbeStore {
        async fn list(&self) -> Result<Vec<Credential>, StoreError> {
            self.0.lists.fetch_add(1, Ordering::SeqCst);
            if self.0.fail_lists.load(Ordering::SeqCst) {
                return Err(StoreError::Timeout);
            }
            self.0.inner.list().await
        }

        async fn insert(&self, fields: &CredentialFields) -> Result<Credential, StoreError> {
            self.0.inserts.fetch_add(1, Ordering::SeqCst);
            if self.0.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Api {
                    status_code: 400,
                    message: "rejected".into(),
                });
            }
            self.0.inner.insert(fields).await
        }

        async fn update(&self, id: &str, fields: &CredentialFields) -> Result<(), StoreError> {
            self.0.updates.fetch_add(1, Ordering::SeqCst);
            *self.0.last_update_id.lock().unwrap() = Some(id.to_string());
            if self.0.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Timeout);
            }
            self.0.inner.update(id, fields).await
        }
    }

    struct FakeClipboard {
        written: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Clipboard for FakeClipboard {
        fn write_text(&self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("no clipboard");
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn shell() -> (Shell, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (Shell::new(Box::new(ProbeStore(probe.clone()))), probe)
    }

    fn fill(shell: &mut Shell, platform: &str, domain: &str, user: &str, pw: &str) {
        let form = shell.form_mut();
        form.set(Field::Platform, platform).unwrap();
        form.set(Field::Domain, domain).unwrap();
        form.set(Field::Username, user).unwrap();
        form.set(Field::Password, pw).unwrap();
    }

    async fn add(shell: &mut Shell, platform: &str, domain: &str, user: &str) {
        shell.open_create();
        fill(shell, platform, domain, user, "pw");
        shell.save().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_on_start() {
        let probe = Arc::new(Probe {
            inner: MemoryStore::with_demo_data(),
            ..Default::default()
        });
        let mut shell = Shell::new(Box::new(ProbeStore(probe.clone())));
        shell.load().await;
        assert!(!shell.is_loading());
        assert_eq!(shell.credentials().len(), 2);
        assert!(shell.drain_notices().is_empty());
    }

    #[tokio::test]
    async fn test_load_failure_leaves_list_empty_and_notifies() {
        let (mut shell, probe) = shell();
        probe.fail_lists.store(true, Ordering::SeqCst);
        shell.load().await;
        assert!(shell.credentials().is_empty());
        assert!(!shell.is_loading());
        let notices = shell.drain_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_round_trip_insert_then_list() {
        let (mut shell, probe) = shell();
        shell.open_create();
        fill(&mut shell, "Gmail", "gmail.com", "a@b.com", "Xx1!");
        shell.save().await.unwrap();

        assert_eq!(probe.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(probe.lists.load(Ordering::SeqCst), 1);
        let stored = &shell.credentials()[0];
        assert!(!stored.id.is_empty());
        assert_eq!(stored.platform, "Gmail");
        assert_eq!(stored.domain.as_deref(), Some("gmail.com"));
        assert_eq!(stored.username, "a@b.com");
        assert_eq!(stored.password, "Xx1!");
        assert!(!shell.form().is_open());
        assert_eq!(
            shell.drain_notices(),
            vec![Notice {
                level: NoticeLevel::Success,
                message: "Credential saved".into()
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_never_calls_store() {
        let (mut shell, probe) = shell();
        shell.open_create();
        fill(&mut shell, "Gmail", "", "", "pw");
        let err = shell.save().await.unwrap_err();
        assert!(matches!(err, SaveError::Invalid(FormError::MissingFields(_))));
        assert_eq!(probe.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(probe.updates.load(Ordering::SeqCst), 0);
        assert!(shell.form().is_open());
        assert_eq!(shell.drain_notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_edit_submits_one_update_with_id() {
        let (mut shell, probe) = shell();
        add(&mut shell, "GitHub", "", "octo").await;
        let id = shell.credentials()[0].id.clone();

        assert!(shell.open_edit(&id));
        shell.form_mut().set(Field::Username, "octocat").unwrap();
        shell.save().await.unwrap();

        assert_eq!(probe.updates.load(Ordering::SeqCst), 1);
        assert_eq!(probe.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(probe.last_update_id.lock().unwrap().as_deref(), Some(id.as_str()));
        assert_eq!(shell.find(&id).unwrap().username, "octocat");
    }

    #[tokio::test]
    async fn test_cancel_edit_leaves_store_unchanged() {
        let (mut shell, probe) = shell();
        add(&mut shell, "GitHub", "github.com", "octo").await;
        let before = shell.credentials().to_vec();
        let id = before[0].id.clone();

        shell.open_edit(&id);
        shell.form_mut().set(Field::Password, "changed").unwrap();
        shell.cancel_form();
        shell.load().await;

        assert_eq!(probe.updates.load(Ordering::SeqCst), 0);
        assert_eq!(shell.credentials(), before.as_slice());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_and_list() {
        let (mut shell, probe) = shell();
        add(&mut shell, "GitHub", "", "octo").await;
        shell.drain_notices();
        let before = shell.credentials().to_vec();

        probe.fail_writes.store(true, Ordering::SeqCst);
        shell.open_create();
        fill(&mut shell, "Gmail", "", "me", "pw");
        let err = shell.save().await.unwrap_err();

        assert!(matches!(err, SaveError::Store(_)));
        assert!(shell.form().is_open());
        assert_eq!(shell.form().inputs().platform, "Gmail");
        assert_eq!(shell.credentials(), before.as_slice());
        assert_eq!(probe.lists.load(Ordering::SeqCst), 1);
        assert_eq!(shell.drain_notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_open_edit_unknown_id() {
        let (mut shell, _) = shell();
        assert!(!shell.open_edit("missing"));
        assert!(!shell.form().is_open());
    }

    #[test]
    fn test_stale_load_is_dropped() {
        let (mut shell, _) = shell();
        let first = shell.begin_load();
        let second = shell.begin_load();
        let newer = vec![Credential {
            id: "new".into(),
            platform: "New".into(),
            domain: None,
            username: "u".into(),
            password: "p".into(),
            created_at: None,
            updated_at: None,
        }];

        assert!(shell.finish_load(second, Ok(newer.clone())));
        assert!(!shell.finish_load(first, Ok(Vec::new())));
        assert_eq!(shell.credentials(), newer.as_slice());
        assert!(!shell.is_loading());
    }

    #[test]
    fn test_loading_until_latest_finishes() {
        let (mut shell, _) = shell();
        let first = shell.begin_load();
        let _second = shell.begin_load();
        shell.finish_load(first, Ok(Vec::new()));
        assert!(shell.is_loading());
    }

    #[tokio::test]
    async fn test_stats_and_search() {
        let (mut shell, _) = shell();
        add(&mut shell, "GitHub", "github.com", "octo").await;
        add(&mut shell, "github", "", "work").await;
        add(&mut shell, "Gmail", "gmail.com", "me").await;

        let stats = shell.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unique_platforms, 2);
        assert_eq!(stats.with_domain, 2);
        assert_eq!(stats.matching, 3);

        shell.set_search("GMAIL");
        assert_eq!(shell.visible().len(), 1);
        assert_eq!(shell.stats().matching, 1);
        assert_eq!(shell.stats().total, 3);
    }

    #[tokio::test]
    async fn test_copy_notifies() {
        let (mut shell, _) = shell();
        add(&mut shell, "GitHub", "", "octo").await;
        shell.drain_notices();
        let id = shell.credentials()[0].id.clone();

        let clipboard = FakeClipboard {
            written: Mutex::new(Vec::new()),
            fail: false,
        };
        assert!(shell.copy(&clipboard, &id, CopyTarget::Username));
        assert!(shell.copy(&clipboard, &id, CopyTarget::Password));
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["octo", "pw"]);
        let notices = shell.drain_notices();
        assert_eq!(notices[0].message, "Username copied");
        assert_eq!(notices[1].message, "Password copied");
    }

    #[tokio::test]
    async fn test_copy_failure_notifies_error() {
        let (mut shell, _) = shell();
        add(&mut shell, "GitHub", "", "octo").await;
        shell.drain_notices();
        let id = shell.credentials()[0].id.clone();

        let clipboard = FakeClipboard {
            written: Mutex::new(Vec::new()),
            fail: true,
        };
        assert!(!shell.copy(&clipboard, &id, CopyTarget::Password));
        assert_eq!(shell.drain_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_generate_password_requires_open_form() {
        let (mut shell, _) = shell();
        shell.generate_password();
        assert_eq!(shell.drain_notices()[0].level, NoticeLevel::Error);

        shell.open_create();
        shell.generate_password();
        assert_eq!(shell.form().inputs().password.len(), 16);
        assert_eq!(shell.drain_notices()[0].level, NoticeLevel::Success);
    }
}
