//! Loading example posts from a directory of JSON files.
//!
//! Each `*.json` file holds an array of records with a required `text`
//! string and an optional `tags` array of strings. Loading is best-effort:
//! a bad file or record becomes a [`ParseWarning`] and is skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{Document, DomainError};

/// A skipped file (`record: None`) or record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    pub path: PathBuf,
    pub record: Option<usize>,
    pub reason: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record {
            Some(index) => write!(f, "{} record {index}: {}", self.path.display(), self.reason),
            None => write!(f, "{}: {}", self.path.display(), self.reason),
        }
    }
}

#[derive(Debug, Default)]
pub struct Corpus {
    pub documents: Vec<Document>,
    pub warnings: Vec<ParseWarning>,
}

/// Reads every `*.json` file in `dir`, in file-name order.
///
/// Only an unreadable directory is an error.
pub fn load_corpus(dir: &Path) -> Result<Corpus, DomainError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| DomainError::corpus_load(format!("{}: {e}", dir.display())))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut corpus = Corpus::default();
    for path in files {
        load_file(&path, &mut corpus);
    }

    for warning in &corpus.warnings {
        tracing::warn!(%warning, "skipped corpus entry");
    }
    tracing::info!(
        dir = %dir.display(),
        documents = corpus.documents.len(),
        skipped = corpus.warnings.len(),
        "corpus loaded"
    );

    Ok(corpus)
}

fn load_file(path: &Path, corpus: &mut Corpus) {
    let warn = |record: Option<usize>, reason: String| ParseWarning {
        path: path.to_path_buf(),
        record,
        reason,
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            corpus.warnings.push(warn(None, e.to_string()));
            return;
        }
    };

    let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            corpus.warnings.push(warn(None, format!("not a JSON array: {e}")));
            return;
        }
    };

    for (index, record) in records.into_iter().enumerate() {
        match Document::from_record(record) {
            Ok(document) => corpus.documents.push(document),
            Err(e) => corpus.warnings.push(warn(Some(index), e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_load_counts_well_formed_records() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "b.json",
            br#"[{"text": "second file", "tags": ["x"]}]"#,
        );
        write(
            dir.path(),
            "a.json",
            br#"[
                {"text": "  first  ", "tags": ["growth", "sales"]},
                {"tags": ["orphan"]},
                {"text": "   "},
                {"text": "no tags", "id": "17", "created_at": "2024-01-01T00:00:00.000Z"},
                {"text": "bad tags", "tags": "ai"}
            ]"#,
        );

        let corpus = load_corpus(dir.path()).unwrap();

        let texts: Vec<&str> = corpus.documents.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "no tags", "second file"]);
        assert_eq!(corpus.documents[0].tags, vec!["growth", "sales"]);
        assert!(corpus.documents[1].tags.is_empty());

        let skipped: Vec<Option<usize>> = corpus.warnings.iter().map(|w| w.record).collect();
        assert_eq!(skipped, vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_load_skips_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.json", b"[{\"text\": ");
        write(dir.path(), "object.json", br#"{"text": "not an array"}"#);
        write(dir.path(), "latin1.json", b"[{\"text\": \"caf\xe9\"}]");
        write(dir.path(), "good.json", br#"[{"text": "kept"}]"#);
        write(dir.path(), "notes.txt", b"ignored entirely");

        let corpus = load_corpus(dir.path()).unwrap();

        assert_eq!(corpus.documents.len(), 1);
        assert_eq!(corpus.documents[0].text, "kept");
        assert_eq!(corpus.warnings.len(), 3);
        assert!(corpus.warnings.iter().all(|w| w.record.is_none()));
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = load_corpus(dir.path()).unwrap();
        assert!(corpus.documents.is_empty());
        assert!(corpus.warnings.is_empty());
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = load_corpus(&missing).unwrap_err();
        assert!(matches!(err, DomainError::CorpusLoad(_)));
    }

    #[test]
    fn test_warning_display() {
        let warning = ParseWarning {
            path: PathBuf::from("data/a.json"),
            record: Some(3),
            reason: "missing field `text`".into(),
        };
        assert_eq!(warning.to_string(), "data/a.json record 3: missing field `text`");
    }
}
