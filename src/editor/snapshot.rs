use serde::Serialize;

use crate::{documents::Record, Status};

/// Immutable point-in-time copy of the collection. Owns its records, so
/// later edits to the live collection never reach it.
#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
    records: Vec<Record>,
    revision: u64,
}

impl Snapshot {
    pub(crate) fn new(records: Vec<Record>, revision: u64) -> Self {
        Snapshot { records, revision }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Collection revision the snapshot was taken at.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Canonical payload encoding: pretty-printed JSON with 4-space indent.
    pub fn to_json(&self) -> Result<String, Status> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.records.serialize(&mut serializer)?;
        String::from_utf8(buffer).map_err(|e| Status::new("Payload is not valid UTF-8", e))
    }

    /// Hands back the records, e.g. to seed a new collection.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_four_space_indent() {
        let snapshot = Snapshot::new(vec![Record::placeholder("a")], 0);
        let json = snapshot.to_json().unwrap();

        assert!(json.starts_with("[\n    {\n        \"url\""));
    }

    #[test]
    fn empty_collection_encodes_as_empty_array() {
        let snapshot = Snapshot::new(vec![], 0);
        assert_eq!(snapshot.to_json().unwrap(), "[]");
    }
}
