use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::mappability::{OutputKind, Score};

/// `.map` for f32 mappability, `.freq8` / `.freq16` for frequencies.
pub fn extension<T: Score>() -> &'static str {
    match T::KIND {
        OutputKind::Mappability => ".map",
        OutputKind::FrequencySmall => ".freq8",
        OutputKind::FrequencyLarge => ".freq16",
    }
}

/// One little-endian value per segment position, no header.
pub fn write_raw<T: Score>(path: &Path, scores: &[T]) -> Result<()> {
    let mut buf = Vec::with_capacity(scores.len() * T::WIDTH);
    for &v in scores {
        v.write_le(&mut buf);
    }
    let mut f = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path.display()))?;
    f.write_all(&buf)?;
    Ok(())
}

/// Reads back a `.freq16` file.
pub fn read_raw_u16(path: &Path) -> Result<Vec<u16>> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read '{}'", path.display()))?;
    Ok(bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect())
}

/// Reads back a `.map` file.
pub fn read_raw_f32(path: &Path) -> Result<Vec<f32>> {
    let bytes = std::fs::read(path).with_context(|| format!("cannot read '{}'", path.display()))?;
    Ok(bytes.chunks_exact(4).map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])).collect())
}
