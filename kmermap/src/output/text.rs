use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mappability::{Score, Segment};

/// Per chromosome: `>name` followed by one line of space-separated values.
pub fn write_txt<T: Score>(path: &Path, segment: &Segment, scores: &[T]) -> Result<()> {
    let f = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(f);
    for ((_, start, len), name) in segment.chromosomes().zip(&segment.chrom_names) {
        writeln!(out, ">{}", name)?;
        let values = &scores[start..start + len];
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{}", v)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
