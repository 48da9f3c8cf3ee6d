use std::collections::HashSet;

use tokio::sync::watch;
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{
    documents::{Note, Record, Update},
    logging::EditEvent,
    Status,
};

use super::{
    Change, ChangeNotice, FieldPath, FieldValue, RecordField, Snapshot, SubItemKind, UpdateField,
};

/// A new entry for one of a record's sub-sequences.
#[derive(Clone, PartialEq, Debug)]
pub enum SubItem {
    Update(Update),
    Note(Note),
}

impl SubItem {
    pub fn kind(&self) -> SubItemKind {
        match self {
            SubItem::Update(_) => SubItemKind::Updates,
            SubItem::Note(_) => SubItemKind::Notes,
        }
    }
}

/// Owns the ordered collection of records being edited.
///
/// Records and their sub-items are addressed by position. Positions shift
/// on every insert or remove below them, so callers must not hold on to an
/// index across mutations. Each mutation either applies completely and
/// publishes a `ChangeNotice`, or fails with the collection untouched.
pub struct CollectionStore {
    records: Vec<Record>,
    changes: watch::Sender<ChangeNotice>,
}

impl CollectionStore {
    /// Takes ownership of the seed collection.
    pub fn new(seed: Vec<Record>) -> Self {
        let (changes, _) = watch::channel(ChangeNotice::default());
        CollectionStore {
            records: seed,
            changes,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Result<&Record, Status> {
        self.records
            .get(index)
            .ok_or_else(|| out_of_range("record", index, self.records.len()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.changes.borrow().revision
    }

    /// Returns a receiver that observes every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<ChangeNotice> {
        self.changes.subscribe()
    }

    /// Current slugs in collection order.
    pub fn slugs(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.slug.as_str()).collect()
    }

    /// Appends a blank record under a fresh `new-game-*` slug and returns its
    /// index.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_record(&mut self) -> usize {
        let slug = self.placeholder_slug();
        self.records.push(Record::placeholder(slug));

        let index = self.records.len() - 1;
        self.notify(Change::RecordInserted { index });
        index
    }

    /// Removes the record at `index` together with its updates and notes.
    #[instrument(level = "trace", skip(self))]
    pub fn remove_record(&mut self, index: usize) -> Result<Record, Status> {
        if index >= self.records.len() {
            return Err(self.reject(
                "remove_record",
                index,
                out_of_range("record", index, self.records.len()),
            ));
        }

        let record = self.records.remove(index);
        self.notify(Change::RecordRemoved { index });
        Ok(record)
    }

    /// Writes `value` into the field addressed by `path` (see `FieldPath`) on
    /// the record at `index`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn set_field(
        &mut self,
        index: usize,
        path: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), Status> {
        let path = match path.parse::<FieldPath>() {
            Ok(path) => path,
            Err(status) => return Err(self.reject("set_field", index, status)),
        };
        self.set_field_at(index, path, value.into())
    }

    /// Like `set_field` with an already parsed path.
    pub fn set_field_at(
        &mut self,
        index: usize,
        path: FieldPath,
        value: FieldValue,
    ) -> Result<(), Status> {
        let len = self.records.len();
        let result = match self.records.get_mut(index) {
            Some(record) => write_field(record, path, value),
            None => Err(out_of_range("record", index, len)),
        };

        match result {
            Ok(()) => {
                self.notify(Change::FieldSet { index, path });
                Ok(())
            }
            Err(status) => Err(self.reject("set_field", index, status)),
        }
    }

    /// Appends `item` to the matching sub-sequence of the record at `index`
    /// and returns its position there. Update dates are stored as given.
    #[instrument(level = "trace", skip(self, item))]
    pub fn insert_sub_item(&mut self, index: usize, item: SubItem) -> Result<usize, Status> {
        let len = self.records.len();
        let Some(record) = self.records.get_mut(index) else {
            return Err(self.reject("insert_sub_item", index, out_of_range("record", index, len)));
        };

        let kind = item.kind();
        let sub_index = match item {
            SubItem::Update(update) => {
                record.updates.push(update);
                record.updates.len() - 1
            }
            SubItem::Note(note) => {
                record.notes.push(note);
                record.notes.len() - 1
            }
        };

        self.notify(Change::SubItemInserted {
            index,
            kind,
            sub_index,
        });
        Ok(sub_index)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn remove_sub_item(
        &mut self,
        index: usize,
        kind: SubItemKind,
        sub_index: usize,
    ) -> Result<(), Status> {
        let len = self.records.len();
        let result = match self.records.get_mut(index) {
            Some(record) => match kind {
                SubItemKind::Updates => remove_at(&mut record.updates, kind, sub_index),
                SubItemKind::Notes => remove_at(&mut record.notes, kind, sub_index),
            },
            None => Err(out_of_range("record", index, len)),
        };

        match result {
            Ok(()) => {
                self.notify(Change::SubItemRemoved {
                    index,
                    kind,
                    sub_index,
                });
                Ok(())
            }
            Err(status) => Err(self.reject("remove_sub_item", index, status)),
        }
    }

    /// Deep copy of the current collection.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.records.clone(), self.revision())
    }

    fn placeholder_slug(&self) -> String {
        let taken = self
            .records
            .iter()
            .map(|r| r.slug.as_str())
            .collect::<HashSet<_>>();
        loop {
            let id = Uuid::new_v4().simple().to_string();
            let slug = format!("new-game-{}", &id[..10]);
            if !taken.contains(slug.as_str()) {
                return slug;
            }
        }
    }

    fn notify(&self, change: Change) {
        EditEvent::applied(&change);
        self.changes.send_modify(|notice| {
            notice.revision += 1;
            notice.last = Some(change);
        });
    }

    fn reject(&self, op: &'static str, index: usize, status: Status) -> Status {
        warn!("{op}({index}) rejected: {status}");
        EditEvent::rejected(op, index, &status);
        status
    }
}

fn write_field(record: &mut Record, path: FieldPath, value: FieldValue) -> Result<(), Status> {
    match path {
        FieldPath::Record(field) => match (field, value) {
            (RecordField::Url, FieldValue::Text(text)) => record.url = text,
            (RecordField::Slug, FieldValue::Text(text)) => record.slug = text,
            (RecordField::Name, FieldValue::Text(text)) => record.name = text,
            (RecordField::Logo, FieldValue::Text(text)) => record.logo = text,
            (RecordField::Reference, FieldValue::Text(text)) => record.reference = text,
            (RecordField::Native, FieldValue::Flag(flag)) => record.native = flag,
            (RecordField::Status, FieldValue::Status(status)) => record.status = status,
            (RecordField::Status, FieldValue::Text(text)) => record.status = text.parse()?,
            (RecordField::Anticheats, FieldValue::Set(names)) => record.anticheats = names,
            (_, value) => return Err(type_mismatch(path, &value)),
        },
        FieldPath::Update { index, field } => {
            let len = record.updates.len();
            let update = record
                .updates
                .get_mut(index)
                .ok_or_else(|| out_of_range(SubItemKind::Updates.as_str(), index, len))?;
            let text = match value {
                FieldValue::Text(text) => text,
                value => return Err(type_mismatch(path, &value)),
            };
            match field {
                UpdateField::Name => update.name = text,
                UpdateField::Reference => update.reference = text,
                UpdateField::Date => update.date = text,
            }
        }
        FieldPath::Note { index, slot } => {
            let len = record.notes.len();
            let note = record
                .notes
                .get_mut(index)
                .ok_or_else(|| out_of_range(SubItemKind::Notes.as_str(), index, len))?;
            note.0[slot] = match value {
                FieldValue::Text(text) => Some(text),
                FieldValue::Empty => None,
                value => return Err(type_mismatch(path, &value)),
            };
        }
    }
    Ok(())
}

fn remove_at<T>(items: &mut Vec<T>, kind: SubItemKind, index: usize) -> Result<(), Status> {
    if index >= items.len() {
        return Err(out_of_range(kind.as_str(), index, items.len()));
    }
    items.remove(index);
    Ok(())
}

fn out_of_range(what: &str, index: usize, len: usize) -> Status {
    Status::invalid_index(format!("{what} index {index} out of range (len {len})"))
}

fn type_mismatch(path: FieldPath, value: &FieldValue) -> Status {
    Status::invalid_argument(format!(
        "Field '{path}' does not accept a {} value",
        value.kind()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::GameStatus;
    use proptest::prelude::*;

    fn record(slug: &str) -> Record {
        Record {
            slug: slug.to_owned(),
            name: slug.to_uppercase(),
            ..Default::default()
        }
    }

    fn store(slugs: &[&str]) -> CollectionStore {
        CollectionStore::new(slugs.iter().map(|slug| record(slug)).collect())
    }

    #[test]
    fn insert_record_defaults() {
        let mut store = store(&["a"]);

        let index = store.insert_record();
        assert_eq!(index, 1);

        let record = store.record(1).unwrap();
        assert!(record.slug.starts_with("new-game-"));
        assert_eq!(record.status, GameStatus::Broken);
        assert!(!record.native);
        assert!(record.anticheats.is_empty());
        assert!(record.updates.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn insert_record_unique_slugs() {
        let mut store = store(&[]);
        for _ in 0..50 {
            store.insert_record();
        }

        let slugs = store.slugs().into_iter().collect::<HashSet<_>>();
        assert_eq!(slugs.len(), 50);
    }

    #[test]
    fn remove_record_shifts_down() {
        let mut store = store(&["a", "b", "c"]);

        let removed = store.remove_record(1).unwrap();
        assert_eq!(removed.slug, "b");
        assert_eq!(store.slugs(), vec!["a", "c"]);
    }

    #[test]
    fn remove_record_out_of_range() {
        let mut store = store(&["a"]);

        assert!(matches!(store.remove_record(1), Err(Status::InvalidIndex(_))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn remove_then_insert_does_not_alias_sub_items() {
        let mut store = store(&["a", "b"]);
        store
            .insert_sub_item(1, SubItem::Note(Note::new("b note", "")))
            .unwrap();
        store
            .insert_sub_item(0, SubItem::Update(Update::dated("yesterday")))
            .unwrap();

        store.remove_record(0).unwrap();
        let index = store.insert_record();

        assert_eq!(store.record(0).unwrap().slug, "b");
        assert_eq!(store.record(0).unwrap().notes.len(), 1);
        assert!(store.record(0).unwrap().updates.is_empty());
        assert!(store.record(index).unwrap().updates.is_empty());
        assert!(store.record(index).unwrap().notes.is_empty());
    }

    #[test]
    fn set_record_fields() {
        let mut store = store(&["a"]);

        store.set_field(0, "name", "Apex Legends").unwrap();
        store.set_field(0, "native", true).unwrap();
        store.set_field(0, "status", "Denied").unwrap();
        store
            .set_field(0, "anticheats", vec!["Easy Anti-Cheat".to_owned()])
            .unwrap();

        let record = store.record(0).unwrap();
        assert_eq!(record.name, "Apex Legends");
        assert!(record.native);
        assert_eq!(record.status, GameStatus::Denied);
        assert!(record.anticheats.contains("Easy Anti-Cheat"));
        assert_eq!(store.revision(), 4);
    }

    #[test]
    fn anticheats_are_a_set() {
        let mut store = store(&["a"]);
        store
            .set_field(
                0,
                "anticheats",
                vec!["BattlEye".to_owned(), "BattlEye".to_owned()],
            )
            .unwrap();

        assert_eq!(store.record(0).unwrap().anticheats.len(), 1);
    }

    #[test]
    fn set_field_type_mismatch() {
        let mut store = store(&["a"]);

        assert!(matches!(
            store.set_field(0, "native", "yes"),
            Err(Status::InvalidArgument(_))
        ));
        assert!(matches!(
            store.set_field(0, "status", "Fine"),
            Err(Status::InvalidArgument(_))
        ));
        assert!(matches!(
            store.set_field(0, "storeIds", "x"),
            Err(Status::InvalidArgument(_))
        ));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn set_field_out_of_range() {
        let mut store = store(&["a"]);

        assert!(matches!(
            store.set_field(3, "name", "x"),
            Err(Status::InvalidIndex(_))
        ));
        assert!(matches!(
            store.set_field(0, "updates.0.name", "x"),
            Err(Status::InvalidIndex(_))
        ));
    }

    #[test]
    fn set_sub_item_fields() {
        let mut store = store(&["a"]);
        store
            .insert_sub_item(0, SubItem::Update(Update::dated("now")))
            .unwrap();
        store
            .insert_sub_item(0, SubItem::Note(Note::default()))
            .unwrap();

        store.set_field(0, "updates.0.name", "Denied").unwrap();
        store
            .set_field(0, "updates.0.reference", "https://example.com")
            .unwrap();
        store.set_field(0, "notes.0.1", "https://example.com/note").unwrap();

        let record = store.record(0).unwrap();
        assert_eq!(record.updates[0].name, "Denied");
        assert_eq!(record.updates[0].reference, "https://example.com");
        assert_eq!(record.notes[0].title(), None);
        assert_eq!(record.notes[0].reference(), Some("https://example.com/note"));

        store.set_field(0, "notes.0.1", FieldValue::Empty).unwrap();
        assert_eq!(store.record(0).unwrap().notes[0].reference(), None);
    }

    #[test]
    fn update_date_is_stored_verbatim() {
        let mut store = store(&["a"]);
        let now = "Sat, 17 Oct 2026 09:30:00 GMT";

        let sub_index = store
            .insert_sub_item(0, SubItem::Update(Update::dated(now)))
            .unwrap();

        assert_eq!(store.record(0).unwrap().updates[sub_index].date, now);
    }

    #[test]
    fn sub_items_keep_insertion_order() {
        let mut store = store(&["a"]);
        for date in ["1", "2", "3"] {
            store
                .insert_sub_item(0, SubItem::Update(Update::dated(date)))
                .unwrap();
        }

        store.remove_sub_item(0, SubItemKind::Updates, 1).unwrap();

        let dates = store.record(0).unwrap().updates.iter().map(|u| u.date.as_str()).collect::<Vec<_>>();
        assert_eq!(dates, vec!["1", "3"]);
    }

    #[test]
    fn remove_sub_item_out_of_range() {
        let mut store = store(&["a"]);
        store
            .insert_sub_item(0, SubItem::Note(Note::default()))
            .unwrap();

        assert!(matches!(
            store.remove_sub_item(0, SubItemKind::Notes, 1),
            Err(Status::InvalidIndex(_))
        ));
        assert!(matches!(
            store.remove_sub_item(0, SubItemKind::Updates, 0),
            Err(Status::InvalidIndex(_))
        ));
        assert!(matches!(
            store.remove_sub_item(2, SubItemKind::Notes, 0),
            Err(Status::InvalidIndex(_))
        ));
        assert_eq!(store.record(0).unwrap().notes.len(), 1);
    }

    #[test]
    fn insert_sub_item_out_of_range() {
        let mut store = store(&[]);
        assert!(matches!(
            store.insert_sub_item(0, SubItem::Note(Note::default())),
            Err(Status::InvalidIndex(_))
        ));
    }

    #[test]
    fn snapshot_is_isolated_from_edits() {
        let mut store = store(&["a"]);
        store
            .insert_sub_item(0, SubItem::Note(Note::new("title", "")))
            .unwrap();

        let snapshot = store.snapshot();
        store.set_field(0, "name", "X").unwrap();
        store.set_field(0, "notes.0.0", "changed").unwrap();
        store.remove_record(0).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.records()[0].name, "A");
        assert_eq!(snapshot.records()[0].notes[0].title(), Some("title"));
    }

    #[test]
    fn notifies_after_each_mutation() {
        let mut store = store(&["a"]);
        let mut changes = store.subscribe();

        let index = store.insert_record();
        assert!(changes.has_changed().unwrap());
        let notice = changes.borrow_and_update().clone();
        assert_eq!(notice.revision, 1);
        assert_eq!(notice.last, Some(Change::RecordInserted { index }));

        store.set_field(0, "slug", "renamed").unwrap();
        let notice = changes.borrow_and_update().clone();
        assert_eq!(notice.revision, 2);
        assert_eq!(
            notice.last,
            Some(Change::FieldSet {
                index: 0,
                path: FieldPath::Record(RecordField::Slug)
            })
        );
        assert_eq!(store.slugs()[0], "renamed");
    }

    #[test]
    fn failed_mutation_does_not_notify() {
        let mut store = store(&["a"]);
        let changes = store.subscribe();

        assert!(store.remove_record(5).is_err());
        assert!(!changes.has_changed().unwrap());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert,
        Remove(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Insert), (0usize..16).prop_map(Op::Remove)]
    }

    proptest! {
        #[test]
        fn length_and_order_follow_inserts_and_removes(ops in prop::collection::vec(op(), 0..64)) {
            let mut store = store(&[]);
            let mut model: Vec<String> = vec![];

            for op in ops {
                match op {
                    Op::Insert => {
                        let index = store.insert_record();
                        model.push(store.record(index).unwrap().slug.clone());
                    }
                    Op::Remove(i) if i < model.len() => {
                        store.remove_record(i).unwrap();
                        model.remove(i);
                    }
                    Op::Remove(i) => {
                        prop_assert!(store.remove_record(i).is_err());
                    }
                }
            }

            prop_assert_eq!(store.len(), model.len());
            prop_assert_eq!(store.slugs(), model.iter().map(|s| s.as_str()).collect::<Vec<_>>());
        }
    }
}
