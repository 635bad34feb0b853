//! Authors Directory
//!
//! Maps two-letter initials to the co-author they stand for. The directory is
//! read from a plain-text authors file, one `INITIALS,Name,email_local` record
//! per line:
//!
//! ```text
//! # initials, display name, email local part
//! TS, Tony Stark, tstark
//! CK, Clark Kent, ckent
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use tracing::warn;

use crate::errors::{AuthorsError, Result};

/// A single co-author entry of the authors file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub name: String,
    pub email_local: String,
}

impl AuthorRecord {
    /// Full email address of the author for the given domain.
    #[must_use]
    pub fn email(&self, domain: &str) -> String {
        format!("{}@{domain}", self.email_local)
    }
}

/// Immutable lookup table from upper-cased initials to author records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDirectory {
    records: BTreeMap<String, AuthorRecord>,
}

impl AuthorDirectory {
    /// Reads and parses the authors file at `path`.
    ///
    /// # Errors
    /// * `AuthorsError::Unreadable` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| AuthorsError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse(&content))
    }

    /// Parses the content of an authors file.
    ///
    /// Blank lines and `#` comments are ignored. Lines with fewer than three
    /// fields are skipped. A repeated key replaces the earlier record.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut records = BTreeMap::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.splitn(3, ',').map(str::trim).collect();

            let [initials, name, email_local] = fields.as_slice() else {
                warn!(line = index + 1, "skipping malformed authors line: {line}");
                continue;
            };

            records.insert(
                initials.to_uppercase(),
                AuthorRecord {
                    name: name.to_string(),
                    email_local: email_local.to_string(),
                },
            );
        }

        Self { records }
    }

    /// Looks up an author. `initials` are matched case-insensitively.
    #[must_use]
    pub fn get(&self, initials: &str) -> Option<&AuthorRecord> {
        self.records.get(&initials.trim().to_uppercase())
    }

    #[must_use]
    pub fn contains(&self, initials: &str) -> bool {
        self.get(initials).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over `(initials, record)` pairs sorted by initials.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorRecord)> {
        self.records.iter().map(|(key, record)| (key.as_str(), record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CocoError;
    use tempfile::TempDir;

    const AUTHORS: &str = "# team\nTS, Tony Stark, tstark\n\nck,Clark Kent ,  ckent\n";

    #[test]
    fn test_parse_authors_file() {
        let directory = AuthorDirectory::parse(AUTHORS);

        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.get("TS"),
            Some(&AuthorRecord {
                name: "Tony Stark".to_string(),
                email_local: "tstark".to_string(),
            })
        );
        // Keys are stored upper-cased and fields trimmed
        assert_eq!(directory.get("ck").unwrap().name, "Clark Kent");
        assert_eq!(directory.get(" Ck ").unwrap().email_local, "ckent");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let directory = AuthorDirectory::parse("TS, Tony Stark\nBW,Bruce Wayne,bwayne\n");

        assert_eq!(directory.len(), 1);
        assert!(!directory.contains("TS"));
        assert!(directory.contains("bw"));
    }

    #[test]
    fn test_later_duplicate_replaces_earlier() {
        let directory = AuthorDirectory::parse("TS,Tony Stark,tstark\nts,Tom Sawyer,tsawyer\n");

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("TS").unwrap().email_local, "tsawyer");
    }

    #[test]
    fn test_iter_is_sorted_by_initials() {
        let directory = AuthorDirectory::parse("ZZ,Zed,zed\nAA,Aaron,aaron\n");
        let keys: Vec<&str> = directory.iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec!["AA", "ZZ"]);
    }

    #[test]
    fn test_email() {
        let record = AuthorRecord {
            name: "Tony Stark".to_string(),
            email_local: "tstark".to_string(),
        };

        assert_eq!(record.email("example.com"), "tstark@example.com");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("authors.txt");
        std::fs::write(&path, AUTHORS).unwrap();

        let directory = AuthorDirectory::load(&path).unwrap();
        assert_eq!(directory, AuthorDirectory::parse(AUTHORS));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        assert!(matches!(
            AuthorDirectory::load(&path),
            Err(CocoError::Authors(AuthorsError::Unreadable { .. }))
        ));
    }
}
