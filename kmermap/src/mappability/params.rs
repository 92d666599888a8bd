use crate::error::MappabilityError;

/// Largest supported number of mismatches per k-mer.
pub const MAX_ERRORS: u8 = 4;

/// Numeric form of the per-position score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    /// `1 / frequency` as f32
    #[default]
    Mappability,
    /// Frequency as u8, saturating at 255
    FrequencySmall,
    /// Frequency as u16, saturating at 65535
    FrequencyLarge,
}

/// Validated run configuration of the mappability engine.
///
/// `overlap` is the number of extra windows searched together with the first
/// one of a batch: a batch holds `overlap + 1` consecutive start positions
/// whose common region has length `k - overlap`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub k: usize,
    pub errors: u8,
    pub reverse_complement: bool,
    pub exclude_pseudo: bool,
    pub overlap: usize,
    pub threads: usize,
}

impl SearchParams {
    /// Parameters with the default overlap for `k` and `errors`.
    pub fn new(k: usize, errors: u8) -> Self {
        let overlap = Self::max_overlap(k, errors)
            .map_or(0, |max| Self::default_overlap(k, errors).min(max));
        Self { k, errors, reverse_complement: false, exclude_pseudo: false, overlap, threads: 1 }
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_reverse_complement(mut self, on: bool) -> Self {
        self.reverse_complement = on;
        self
    }

    pub fn with_exclude_pseudo(mut self, on: bool) -> Self {
        self.exclude_pseudo = on;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// `0.7 k` without errors, `k * min(max(k, 30), 100) * 0.7^e / 100` otherwise,
    /// rounded down. Computed in integers so the floor is exact.
    pub fn default_overlap(k: usize, errors: u8) -> usize {
        if errors == 0 {
            return k * 7 / 10;
        }
        let e = u32::from(errors);
        k * k.clamp(30, 100) * 7usize.pow(e) / (100 * 10usize.pow(e))
    }

    /// `min(k - 1, k - errors - 2)`: the common region must keep at least one
    /// character per window and split into `errors + 2` blocks.
    pub fn max_overlap(k: usize, errors: u8) -> Option<usize> {
        let need = usize::from(errors) + 2;
        if k < need {
            return None;
        }
        Some((k - 1).min(k - need))
    }

    pub fn validate(&self) -> Result<(), MappabilityError> {
        if self.errors > MAX_ERRORS {
            return Err(MappabilityError::UnsupportedErrors(self.errors));
        }
        if self.k == 0 {
            return Err(MappabilityError::InvalidLength);
        }
        let max = Self::max_overlap(self.k, self.errors)
            .ok_or(MappabilityError::KmerTooShort { k: self.k, errors: self.errors })?;
        if self.overlap > max {
            return Err(MappabilityError::OverlapTooLarge {
                overlap: self.overlap,
                k: self.k,
                errors: self.errors,
                max,
            });
        }
        Ok(())
    }

    /// Length of the region shared by all windows of a batch.
    pub fn shared_len(&self) -> usize {
        self.k - self.overlap
    }

    pub fn batch_size(&self) -> usize {
        self.overlap + 1
    }
}
