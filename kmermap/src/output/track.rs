//! Genome browser tracks: wig + chrom.sizes, and bed.

use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::defined_runs;
use crate::mappability::{Score, Segment};

fn create(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let f = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

/// One `variableStep` block per run of equal defined values. Positions are
/// 1-based.
pub fn write_wig<T: Score>(path: &Path, segment: &Segment, scores: &[T]) -> Result<()> {
    let mut out = create(path)?;
    for ((_, start, len), name) in segment.chromosomes().zip(&segment.chrom_names) {
        for (s, e, v) in defined_runs(&scores[start..start + len]) {
            writeln!(out, "variableStep chrom={} span={}", name, e - s)?;
            writeln!(out, "{} {}", s + 1, v)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// `name<TAB>length` per chromosome.
pub fn write_chrom_sizes(path: &Path, segment: &Segment) -> Result<()> {
    let mut out = create(path)?;
    for (name, len) in segment.chrom_names.iter().zip(&segment.chrom_lengths) {
        writeln!(out, "{}\t{}", name, len)?;
    }
    out.flush()?;
    Ok(())
}

/// `name start end - value` per run of equal defined values, 0-based and
/// half-open.
pub fn write_bed<T: Score>(path: &Path, segment: &Segment, scores: &[T]) -> Result<()> {
    let mut out = create(path)?;
    for ((_, start, len), name) in segment.chromosomes().zip(&segment.chrom_names) {
        for (s, e, v) in defined_runs(&scores[start..start + len]) {
            writeln!(out, "{}\t{}\t{}\t-\t{}", name, s, e, v)?;
        }
    }
    out.flush()?;
    Ok(())
}
