//! Per-segment result files.
//!
//! Every segment produces files named after the stem of its source file,
//! e.g. `chr21.fa` -> `<outdir>/chr21.map`, `<outdir>/chr21.wig`, ...

pub mod csv;
pub mod raw;
pub mod text;
pub mod track;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::mappability::{MappabilityVector, Score, Segment};
use crate::pipeline::{SegmentOutput, SegmentSink};

/// Which files to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFormats {
    pub raw: bool,
    pub txt: bool,
    pub wig: bool,
    pub bed: bool,
    pub csv: bool,
}

impl OutputFormats {
    pub fn any(&self) -> bool {
        self.raw || self.txt || self.wig || self.bed || self.csv
    }

    /// Only the csv report lists individual hits.
    pub fn needs_locations(&self) -> bool {
        self.csv
    }
}

/// Writes the selected formats for each segment it receives.
#[derive(Debug)]
pub struct OutputDispatcher {
    outdir: PathBuf,
    formats: OutputFormats,
    written: Vec<PathBuf>,
}

impl OutputDispatcher {
    pub fn new(outdir: impl Into<PathBuf>, formats: OutputFormats) -> Self {
        Self { outdir: outdir.into(), formats, written: Vec::new() }
    }

    /// Every file written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// `<outdir>/<file name up to its last dot>`
    pub fn base_path(&self, segment: &Segment) -> PathBuf {
        let file = segment.source_file.as_str();
        let stem = file.rfind('.').map_or(file, |i| &file[..i]);
        self.outdir.join(stem)
    }

    fn write_scores<T: Score>(&mut self, base: &Path, segment: &Segment, scores: &[T]) -> Result<()> {
        if self.formats.raw {
            let path = with_suffix(base, raw::extension::<T>());
            timed("raw", || raw::write_raw(&path, scores))?;
            self.written.push(path);
        }
        if self.formats.txt {
            let path = with_suffix(base, ".txt");
            timed("txt", || text::write_txt(&path, segment, scores))?;
            self.written.push(path);
        }
        if self.formats.wig {
            let path = with_suffix(base, ".wig");
            let sizes = with_suffix(base, ".chrom.sizes");
            timed("wig", || {
                track::write_wig(&path, segment, scores)?;
                track::write_chrom_sizes(&sizes, segment)
            })?;
            self.written.push(path);
            self.written.push(sizes);
        }
        if self.formats.bed {
            let path = with_suffix(base, ".bed");
            timed("bed", || track::write_bed(&path, segment, scores))?;
            self.written.push(path);
        }
        Ok(())
    }
}

impl SegmentSink for OutputDispatcher {
    fn consume(&mut self, output: SegmentOutput<'_>) -> Result<()> {
        let base = self.base_path(output.segment);
        match output.scores {
            MappabilityVector::Mappability(v) => self.write_scores(&base, output.segment, v)?,
            MappabilityVector::FrequencySmall(v) => self.write_scores(&base, output.segment, v)?,
            MappabilityVector::FrequencyLarge(v) => self.write_scores(&base, output.segment, v)?,
        }
        if self.formats.csv {
            let path = with_suffix(&base, ".csv");
            match output.locations {
                Some(locations) => {
                    timed("csv", || csv::write_csv(&path, locations, output.params, output.directory))?;
                    self.written.push(path);
                }
                None => log::warn!("no locations recorded for '{}', csv skipped", output.segment.source_file),
            }
        }
        log::info!("Output for '{}' written to {}", output.segment.source_file, self.outdir.display());
        Ok(())
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s = base.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

fn timed(what: &str, f: impl FnOnce() -> Result<()>) -> Result<()> {
    let t0 = Instant::now();
    f()?;
    log::debug!("{} file written in {:.2}s", what.to_uppercase(), t0.elapsed().as_secs_f64());
    Ok(())
}

/// Maximal runs of equal defined values: `(start, end, value)`, half-open.
pub(crate) fn defined_runs<T: Score>(values: &[T]) -> Vec<(usize, usize, T)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < values.len() {
        let v = values[i];
        let mut j = i + 1;
        while j < values.len() && values[j] == v {
            j += 1;
        }
        if v.is_defined() {
            runs.push((i, j, v));
        }
        i = j;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(file: &str) -> Segment {
        let entries = vec![crate::index::DirectoryEntry::new(file, 4, "chr1")];
        crate::mappability::SequenceSegmenter::new(&entries).next().unwrap()
    }

    #[test]
    fn base_path_strips_last_extension() {
        let d = OutputDispatcher::new("/out", OutputFormats { raw: true, ..Default::default() });
        assert_eq!(d.base_path(&segment("hg38.chr1.fa")), PathBuf::from("/out/hg38.chr1"));
        assert_eq!(d.base_path(&segment("plain")), PathBuf::from("/out/plain"));
    }

    #[test]
    fn runs_skip_undefined_values() {
        let v: Vec<u8> = vec![0, 3, 3, 1, 0, 0, 1, 1];
        assert_eq!(defined_runs(&v), vec![(1, 3, 3), (3, 4, 1), (6, 8, 1)]);
        assert!(defined_runs::<f32>(&[]).is_empty());
    }

    #[test]
    fn formats_flags() {
        assert!(!OutputFormats::default().any());
        let f = OutputFormats { csv: true, ..Default::default() };
        assert!(f.any() && f.needs_locations());
    }
}
