//! Detailed location report.
//!
//! ```text
//! # k=4 errors=1 reverse_complement=true
//! #0,a.fa,chr1
//! #1,b.fa,chrX
//! "seq,offset";"forward hits";"reverse hits"
//! 0,0;0,0|1,5;0,3
//! ```
//! Hits are `seq,offset` pairs joined by `|`, ascending per strand.

use anyhow::{Context, Result};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::index::DirectoryEntry;
use crate::mappability::{LocationMap, Position, SearchParams};

fn write_positions(out: &mut impl Write, hits: &[Position]) -> std::io::Result<()> {
    for (i, p) in hits.iter().enumerate() {
        if i > 0 {
            out.write_all(b"|")?;
        }
        write!(out, "{},{}", p.seq, p.offset)?;
    }
    Ok(())
}

pub fn write_csv(path: &Path, locations: &LocationMap, params: &SearchParams, directory: &[DirectoryEntry]) -> Result<()> {
    let f = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(f);

    writeln!(
        out,
        "# k={} errors={} reverse_complement={}",
        params.k, params.errors, params.reverse_complement
    )?;
    for (i, e) in directory.iter().enumerate() {
        writeln!(out, "#{},{},{}", i, e.source_file, e.name)?;
    }
    writeln!(out, "\"seq,offset\";\"forward hits\";\"reverse hits\"")?;

    for (query, hits) in locations {
        write!(out, "{},{};", query.seq, query.offset)?;
        write_positions(&mut out, &hits.forward)?;
        out.write_all(b";")?;
        write_positions(&mut out, &hits.reverse)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
