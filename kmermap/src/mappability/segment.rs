use std::ops::Range;

use crate::error::MappabilityError;
use crate::index::directory::{self, DirectoryEntry};
use crate::index::BiIndex;

/// The sequences of one source file, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub source_file: String,
    /// Total length of all segments before this one.
    pub text_offset: u64,
    /// Ordinal of the segment's first sequence.
    pub first_sequence: usize,
    pub chrom_names: Vec<String>,
    pub chrom_lengths: Vec<u64>,
}

impl Segment {
    fn open(source_file: String, text_offset: u64, first_sequence: usize) -> Self {
        Self { source_file, text_offset, first_sequence, chrom_names: Vec::new(), chrom_lengths: Vec::new() }
    }

    fn push(&mut self, name: String, length: u64) {
        self.chrom_names.push(name);
        self.chrom_lengths.push(length);
    }

    /// Text length of the segment: the sum of its chromosome lengths.
    pub fn len(&self) -> u64 {
        self.chrom_lengths.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sequence ordinals covered by the segment.
    pub fn sequences(&self) -> Range<usize> {
        self.first_sequence..self.first_sequence + self.chrom_lengths.len()
    }

    /// `(sequence ordinal, start inside the segment, length)` per chromosome.
    pub fn chromosomes(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let mut start = 0usize;
        self.chrom_lengths.iter().enumerate().map(move |(j, &len)| {
            let item = (self.first_sequence + j, start, len as usize);
            start += len as usize;
            item
        })
    }

    /// Fails unless the indexed sequences add up to the recorded lengths.
    pub fn check(&self, index: &BiIndex) -> Result<(), MappabilityError> {
        let expected = self.len();
        let mut actual = 0u64;
        let mut consistent = true;
        for (seq, len) in self.sequences().zip(&self.chrom_lengths) {
            if seq >= index.num_sequences() {
                consistent = false;
                continue;
            }
            let indexed = index.sequence_len(seq);
            consistent &= indexed == *len;
            actual += indexed;
        }
        if consistent {
            return Ok(());
        }
        Err(MappabilityError::IndexInconsistency { file: self.source_file.clone(), expected, actual })
    }
}

/// Splits the directory into per-file segments.
///
/// Entries are scanned in order followed by the sentinel; a change of source
/// file closes the running segment. Yields segments lazily so only one of
/// them needs to be alive at a time.
pub struct SequenceSegmenter {
    entries: Vec<DirectoryEntry>,
    pos: usize,
    offset: u64,
    current: Option<Segment>,
}

impl SequenceSegmenter {
    pub fn new(entries: &[DirectoryEntry]) -> Self {
        Self { entries: directory::with_sentinel(entries).collect(), pos: 0, offset: 0, current: None }
    }
}

impl Iterator for SequenceSegmenter {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        while let Some(entry) = self.entries.get(self.pos) {
            if self.current.as_ref().is_some_and(|s| s.source_file != entry.source_file) {
                let done = self.current.take()?;
                self.offset += done.len();
                return Some(done);
            }
            let ordinal = self.pos;
            self.pos += 1;
            if entry.is_sentinel() {
                continue;
            }
            let offset = self.offset;
            self.current
                .get_or_insert_with(|| Segment::open(entry.source_file.clone(), offset, ordinal))
                .push(entry.name.clone(), entry.length);
        }
        None
    }
}
