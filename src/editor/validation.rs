use std::{collections::HashSet, fmt};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::documents::Record;

/// A problem with a single form field, addressed like `set_field` paths.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct FieldIssue {
    pub index: usize,
    pub path: String,
    pub problem: Problem,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Problem {
    Required,
    BadSlug,
    DuplicateSlug,
    BadUrl,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let problem = match self.problem {
            Problem::Required => "is required",
            Problem::BadSlug => "must be lowercase words separated by dashes",
            Problem::DuplicateSlug => "is already used by another game",
            Problem::BadUrl => "must be an http(s) URL",
        };
        write!(f, "#{} {}: {problem}", self.index, self.path)
    }
}

/// Runs the per-field required and format checks over the whole collection.
pub fn validate(records: &[Record]) -> Vec<FieldIssue> {
    let mut issues = vec![];
    let mut seen_slugs = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let mut report = |path: String, problem| {
            issues.push(FieldIssue {
                index,
                path,
                problem,
            })
        };

        if record.slug.is_empty() {
            report("slug".to_owned(), Problem::Required);
        } else if !is_slug(&record.slug) {
            report("slug".to_owned(), Problem::BadSlug);
        } else if !seen_slugs.insert(record.slug.as_str()) {
            report("slug".to_owned(), Problem::DuplicateSlug);
        }

        if record.name.trim().is_empty() {
            report("name".to_owned(), Problem::Required);
        }

        if record.anticheats.is_empty() {
            report("anticheats".to_owned(), Problem::Required);
        }

        // Logos may be bare file names resolved elsewhere, so they are not
        // checked here.
        for (path, value) in [("url", &record.url), ("reference", &record.reference)] {
            if !is_url_or_empty(value) {
                report(path.to_owned(), Problem::BadUrl);
            }
        }

        for (i, update) in record.updates.iter().enumerate() {
            if !is_url_or_empty(&update.reference) {
                report(format!("updates.{i}.reference"), Problem::BadUrl);
            }
        }

        for (i, note) in record.notes.iter().enumerate() {
            if !is_url_or_empty(note.reference().unwrap_or_default()) {
                report(format!("notes.{i}.1"), Problem::BadUrl);
            }
        }
    }

    issues
}

fn is_slug(slug: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    }
    RE.is_match(slug)
}

fn is_url_or_empty(value: &str) -> bool {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
    }
    value.is_empty() || RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{Note, Update};

    fn record(slug: &str, name: &str) -> Record {
        Record {
            slug: slug.to_owned(),
            name: name.to_owned(),
            anticheats: ["Easy Anti-Cheat".to_owned()].into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_collection() {
        let mut game = record("apex-legends", "Apex Legends");
        game.url = "https://www.ea.com/games/apex-legends".to_owned();
        game.updates.push(Update {
            reference: "https://example.com/news".to_owned(),
            ..Default::default()
        });
        game.notes.push(Note::default());

        assert!(validate(&[game, record("rust", "Rust")]).is_empty());
    }

    #[test]
    fn required_fields() {
        let mut game = record("", " ");
        game.anticheats.clear();

        let issues = validate(&[game]);

        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|issue| issue.problem == Problem::Required));
        let paths = issues.iter().map(|issue| issue.path.as_str()).collect::<Vec<_>>();
        assert_eq!(paths, vec!["slug", "name", "anticheats"]);
    }

    #[test]
    fn logo_file_name_is_accepted() {
        let mut game = record("a", "A");
        game.logo = "some-game.webp".to_owned();

        assert!(validate(&[game]).is_empty());
    }

    #[test]
    fn bad_slug() {
        let issues = validate(&[record("Apex Legends", "Apex Legends")]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].problem, Problem::BadSlug);
    }

    #[test]
    fn duplicate_slug_reported_after_first() {
        let issues = validate(&[record("a", "A"), record("b", "B"), record("a", "Other A")]);

        assert_eq!(
            issues,
            vec![FieldIssue {
                index: 2,
                path: "slug".to_owned(),
                problem: Problem::DuplicateSlug,
            }]
        );
    }

    #[test]
    fn bad_urls_in_sub_items() {
        let mut game = record("a", "A");
        game.reference = "not a url".to_owned();
        game.updates.push(Update::default());
        game.updates.push(Update {
            reference: "ftp://example.com".to_owned(),
            ..Default::default()
        });
        game.notes.push(Note::new("title", "example.com"));

        let paths = validate(&[game])
            .into_iter()
            .map(|issue| issue.path)
            .collect::<Vec<_>>();
        assert_eq!(paths, vec!["reference", "updates.1.reference", "notes.0.1"]);
    }

    #[test]
    fn display_issue() {
        let issue = FieldIssue {
            index: 3,
            path: "name".to_owned(),
            problem: Problem::Required,
        };
        assert_eq!(issue.to_string(), "#3 name: is required");
    }
}
