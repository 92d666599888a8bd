use crate::index::DirectoryEntry;

/// Maps sequence ordinals to source-file groups, so that hits in several
/// sequences of the same file count once. Built once per run; when disabled
/// every sequence is its own group.
#[derive(Debug, Clone, Default)]
pub struct PseudoGroupMapper {
    groups: Option<Vec<u64>>,
}

impl PseudoGroupMapper {
    pub fn build(entries: &[DirectoryEntry], enabled: bool) -> Self {
        if !enabled {
            return Self::disabled();
        }
        let mut groups = Vec::with_capacity(entries.len());
        let mut id = 0u64;
        let mut file = entries.first().map(|e| e.source_file.as_str());
        for entry in entries.iter().filter(|e| !e.is_sentinel()) {
            if file != Some(entry.source_file.as_str()) {
                file = Some(entry.source_file.as_str());
                id += 1;
            }
            groups.push(id);
        }
        Self { groups: Some(groups) }
    }

    pub fn disabled() -> Self {
        Self { groups: None }
    }

    #[inline]
    pub fn group_of(&self, seq: u64) -> u64 {
        match &self.groups {
            Some(g) => g[seq as usize],
            None => seq,
        }
    }
}
