use serde::{Deserialize, Serialize};

/// One indexed sequence: the file it came from, its length and its name.
/// Entries are stored in index order, so the entry position is the sequence ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub source_file: String,
    pub length: u64,
    pub name: String,
}

impl DirectoryEntry {
    pub fn new(source_file: impl Into<String>, length: u64, name: impl Into<String>) -> Self {
        Self { source_file: source_file.into(), length, name: name.into() }
    }

    /// Terminating record. Its empty file name never equals a real one, so a
    /// scan over the list is forced to close the last group on reaching it.
    pub fn sentinel() -> Self {
        Self { source_file: String::new(), length: 0, name: String::new() }
    }

    pub fn is_sentinel(&self) -> bool {
        self.source_file.is_empty() && self.length == 0 && self.name.is_empty()
    }
}

/// Entries followed by the sentinel.
pub fn with_sentinel(entries: &[DirectoryEntry]) -> impl Iterator<Item = DirectoryEntry> + '_ {
    entries.iter().cloned().chain(std::iter::once(DirectoryEntry::sentinel()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_terminates_listing() {
        let entries = vec![DirectoryEntry::new("a.fa", 3, "chr1")];
        let all: Vec<_> = with_sentinel(&entries).collect();
        assert_eq!(all.len(), 2);
        assert!(!all[0].is_sentinel());
        assert!(all[1].is_sentinel());
        assert_ne!(all[1].source_file, all[0].source_file);
    }
}
