use std::{future::Future, sync::Arc};

use chrono::Utc;
use tokio::sync::watch;

use crate::{
    documents::{update_timestamp, AntiCheatVocabulary, Note, Record, Update},
    submission::{SubmissionCoordinator, SubmissionState},
    traits::SubmitTransport,
    Status,
};

use super::{
    validate, ChangeNotice, CollectionStore, FieldIssue, FieldValue, Snapshot, SubItem,
    SubItemKind,
};

/// Everything a view needs to drive one editing session: the live
/// collection, the anti-cheat vocabulary computed at load and the
/// submission workflow.
pub struct EditorSession<T: SubmitTransport> {
    store: CollectionStore,
    vocabulary: AntiCheatVocabulary,
    coordinator: Arc<SubmissionCoordinator<T>>,
}

impl<T: SubmitTransport> EditorSession<T> {
    pub fn new(seed: Vec<Record>, transport: Arc<T>) -> Self {
        EditorSession {
            vocabulary: AntiCheatVocabulary::from_records(&seed),
            store: CollectionStore::new(seed),
            coordinator: Arc::new(SubmissionCoordinator::new(transport)),
        }
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn vocabulary(&self) -> &AntiCheatVocabulary {
        &self.vocabulary
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.store.slugs()
    }

    pub fn subscribe(&self) -> watch::Receiver<ChangeNotice> {
        self.store.subscribe()
    }

    pub fn add_record(&mut self) -> usize {
        self.store.insert_record()
    }

    pub fn remove_record(&mut self, index: usize) -> Result<Record, Status> {
        self.store.remove_record(index)
    }

    pub fn set_field(
        &mut self,
        index: usize,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), Status> {
        self.store.set_field(index, path, value)
    }

    /// Adds an empty update dated now.
    pub fn add_update(&mut self, index: usize) -> Result<usize, Status> {
        let now = update_timestamp(Utc::now());
        self.store
            .insert_sub_item(index, SubItem::Update(Update::dated(now)))
    }

    /// Adds a note with both slots empty.
    pub fn add_note(&mut self, index: usize) -> Result<usize, Status> {
        self.store
            .insert_sub_item(index, SubItem::Note(Note::default()))
    }

    pub fn remove_update(&mut self, index: usize, update: usize) -> Result<(), Status> {
        self.store
            .remove_sub_item(index, SubItemKind::Updates, update)
    }

    pub fn remove_note(&mut self, index: usize, note: usize) -> Result<(), Status> {
        self.store.remove_sub_item(index, SubItemKind::Notes, note)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn validate(&self) -> Vec<FieldIssue> {
        validate(self.store.records())
    }

    pub fn submission(&self) -> SubmissionState {
        self.coordinator.state()
    }

    pub fn watch_submission(&self) -> watch::Receiver<SubmissionState> {
        self.coordinator.subscribe()
    }

    pub fn reset_submission(&self) -> bool {
        self.coordinator.reset()
    }

    /// Submits the collection as it is right now. The snapshot is taken
    /// before this returns, so the session stays editable while the request
    /// is in flight and those edits are not part of it.
    pub fn submit(&self) -> impl Future<Output = Option<SubmissionState>> + Send + 'static
    where
        T: 'static,
    {
        let coordinator = Arc::clone(&self.coordinator);
        let snapshot = self.store.snapshot();
        async move { coordinator.submit(snapshot).await }
    }

    /// Like `submit` but returns the field issues instead of submitting when
    /// there are any.
    pub fn submit_validated(
        &self,
    ) -> impl Future<Output = Result<Option<SubmissionState>, Vec<FieldIssue>>> + Send + 'static
    where
        T: 'static,
    {
        let issues = self.validate();
        let submit = issues.is_empty().then(|| self.submit());
        async move {
            match submit {
                Some(submit) => Ok(submit.await),
                None => Err(issues),
            }
        }
    }
}
