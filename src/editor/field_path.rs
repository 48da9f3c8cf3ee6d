use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{documents::GameStatus, Status};

/// Address of an editable field inside a record, written in dotted form:
/// `name`, `updates.2.reference`, `notes.0.1`.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldPath {
    Record(RecordField),
    Update { index: usize, field: UpdateField },
    Note { index: usize, slot: usize },
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordField {
    Url,
    Slug,
    Name,
    Logo,
    Native,
    Status,
    Reference,
    Anticheats,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum UpdateField {
    Name,
    Reference,
    Date,
}

impl RecordField {
    fn as_str(&self) -> &'static str {
        match self {
            RecordField::Url => "url",
            RecordField::Slug => "slug",
            RecordField::Name => "name",
            RecordField::Logo => "logo",
            RecordField::Native => "native",
            RecordField::Status => "status",
            RecordField::Reference => "reference",
            RecordField::Anticheats => "anticheats",
        }
    }
}

impl UpdateField {
    fn as_str(&self) -> &'static str {
        match self {
            UpdateField::Name => "name",
            UpdateField::Reference => "reference",
            UpdateField::Date => "date",
        }
    }
}

impl FromStr for FieldPath {
    type Err = Status;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let parts = path.split('.').collect::<Vec<_>>();
        match parts.as_slice() {
            [field] => Ok(FieldPath::Record(match *field {
                "url" => RecordField::Url,
                "slug" => RecordField::Slug,
                "name" => RecordField::Name,
                "logo" => RecordField::Logo,
                "native" => RecordField::Native,
                "status" => RecordField::Status,
                "reference" => RecordField::Reference,
                "anticheats" => RecordField::Anticheats,
                "storeIds" => {
                    return Err(Status::invalid_argument(
                        "Field 'storeIds' is not editable",
                    ))
                }
                _ => return Err(unknown_field(path)),
            })),
            ["updates", index, field] => Ok(FieldPath::Update {
                index: parse_index(path, index)?,
                field: match *field {
                    "name" => UpdateField::Name,
                    "reference" => UpdateField::Reference,
                    "date" => UpdateField::Date,
                    _ => return Err(unknown_field(path)),
                },
            }),
            ["notes", index, slot] => match parse_index(path, slot)? {
                slot @ 0..=1 => Ok(FieldPath::Note {
                    index: parse_index(path, index)?,
                    slot,
                }),
                _ => Err(unknown_field(path)),
            },
            _ => Err(unknown_field(path)),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Record(field) => write!(f, "{}", field.as_str()),
            FieldPath::Update { index, field } => {
                write!(f, "updates.{index}.{}", field.as_str())
            }
            FieldPath::Note { index, slot } => write!(f, "notes.{index}.{slot}"),
        }
    }
}

fn parse_index(path: &str, index: &str) -> Result<usize, Status> {
    index
        .parse::<usize>()
        .map_err(|_| Status::invalid_argument(format!("Bad index '{index}' in path '{path}'")))
}

fn unknown_field(path: &str) -> Status {
    Status::invalid_argument(format!("Unknown field path '{path}'"))
}

/// A value written through `set_field`. The target field decides which
/// variants it accepts.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Status(GameStatus),
    Set(BTreeSet<String>),
    /// Clears an optional slot (note title or reference).
    Empty,
}

impl FieldValue {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Flag(_) => "flag",
            FieldValue::Status(_) => "status",
            FieldValue::Set(_) => "set",
            FieldValue::Empty => "empty",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<GameStatus> for FieldValue {
    fn from(value: GameStatus) -> Self {
        FieldValue::Status(value)
    }
}

impl From<BTreeSet<String>> for FieldValue {
    fn from(value: BTreeSet<String>) -> Self {
        FieldValue::Set(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Set(value.into_iter().collect())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => FieldValue::Text(text),
            None => FieldValue::Empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_record_fields() {
        assert_eq!(
            "name".parse::<FieldPath>(),
            Ok(FieldPath::Record(RecordField::Name))
        );
        assert_eq!(
            "anticheats".parse::<FieldPath>(),
            Ok(FieldPath::Record(RecordField::Anticheats))
        );
    }

    #[test]
    fn parse_sub_item_fields() {
        assert_eq!(
            "updates.2.reference".parse::<FieldPath>(),
            Ok(FieldPath::Update {
                index: 2,
                field: UpdateField::Reference
            })
        );
        assert_eq!(
            "notes.0.1".parse::<FieldPath>(),
            Ok(FieldPath::Note { index: 0, slot: 1 })
        );
    }

    #[test]
    fn reject_bad_paths() {
        assert!("".parse::<FieldPath>().is_err());
        assert!("title".parse::<FieldPath>().is_err());
        assert!("storeIds".parse::<FieldPath>().is_err());
        assert!("notes.0.2".parse::<FieldPath>().is_err());
        assert!("notes.x.0".parse::<FieldPath>().is_err());
        assert!("updates.0".parse::<FieldPath>().is_err());
        assert!("updates.0.slug".parse::<FieldPath>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for path in ["slug", "updates.3.date", "notes.1.0"] {
            assert_eq!(path.parse::<FieldPath>().unwrap().to_string(), path);
        }
    }
}
