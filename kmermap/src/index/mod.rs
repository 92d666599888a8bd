//! 基因组索引：双向 FM 索引 + 序列目录 + 构建元信息。

pub mod bidir;
pub mod directory;
pub mod fm;
pub mod sa;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::io::fasta::{self, FastaRecord};
use crate::util::dna;

pub use bidir::{BiIndex, BiState, Position};
pub use directory::DirectoryEntry;

/// Occ 采样块大小
pub const OCC_BLOCK: usize = 64;

pub const INDEX_EXTENSION: &str = "idx";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMeta {
    pub input_files: Vec<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenomeIndex {
    pub bi: BiIndex,
    /// One entry per indexed sequence, in sequence-ordinal order.
    pub directory: Vec<DirectoryEntry>,
    pub meta: IndexMeta,
}

impl GenomeIndex {
    /// Builds from already parsed FASTA files, given as `(file name, records)`
    /// in indexing order. Empty sequences are skipped.
    pub fn build(inputs: &[(String, Vec<FastaRecord>)], block: usize) -> Result<Self> {
        let mut directory = Vec::new();
        let mut encoded = Vec::new();
        for (file, records) in inputs {
            for rec in records.iter().filter(|r| !r.seq.is_empty()) {
                directory.push(DirectoryEntry::new(file.clone(), rec.seq.len() as u64, rec.name.clone()));
                encoded.push(dna::encode(&rec.seq));
            }
        }
        if encoded.is_empty() {
            bail!("no non-empty sequences to index");
        }

        let bi = BiIndex::build(&encoded, block);
        let meta = IndexMeta {
            input_files: inputs.iter().map(|(f, _)| f.clone()).collect(),
            ..IndexMeta::default()
        };
        Ok(Self { bi, directory, meta })
    }

    /// Reads every FASTA file named by `paths` (directories expand to the
    /// FASTA files they contain, sorted by name) and builds the index.
    pub fn build_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let files = expand_inputs(paths)?;
        let mut inputs = Vec::with_capacity(files.len());
        for path in &files {
            let records = fasta::read_fasta_file(path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            log::info!("{}: {} sequences", name, records.len());
            inputs.push((name, records));
        }
        Self::build(&inputs, OCC_BLOCK)
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    pub fn num_sequences(&self) -> usize {
        self.directory.len()
    }

    /// Encoded text of sequence `seq`.
    pub fn sequence(&self, seq: usize) -> &[u8] {
        self.bi.sequence(seq)
    }

    /// Checks that directory and indexed text describe the same sequences.
    pub fn verify(&self) -> Result<()> {
        if self.directory.len() != self.bi.num_sequences() {
            bail!(
                "index lists {} directory entries but holds {} sequences",
                self.directory.len(),
                self.bi.num_sequences()
            );
        }
        for (i, entry) in self.directory.iter().enumerate() {
            let actual = self.bi.sequence_len(i);
            if entry.length != actual {
                bail!(
                    "sequence '{}' of '{}' is recorded with length {} but indexed with length {}",
                    entry.name,
                    entry.source_file,
                    entry.length,
                    actual
                );
            }
        }
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let f = std::fs::File::create(path)
            .with_context(|| format!("cannot create index file '{}'", path.display()))?;
        bincode::serialize_into(std::io::BufWriter::new(f), self)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("cannot open index file '{}'", path.display()))?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))
            .with_context(|| format!("malformed index file '{}'", path.display()))?;
        idx.verify()?;
        Ok(idx)
    }

    /// 以内存映射方式读取索引文件，按页从映射区反序列化，不经过读缓冲。
    #[allow(unsafe_code)]
    pub fn load_mapped(path: &Path) -> Result<Self> {
        let f = std::fs::File::open(path)
            .with_context(|| format!("cannot open index file '{}'", path.display()))?;
        // SAFETY: the map is read-only and dropped before this function returns
        let mmap = unsafe { memmap2::Mmap::map(&f) }
            .with_context(|| format!("cannot memory-map index file '{}'", path.display()))?;
        log::debug!("Memory-mapped {}: {:.1} MB", path.display(), mmap.len() as f64 / 1024.0 / 1024.0);
        let idx: Self = bincode::deserialize(&mmap[..])
            .with_context(|| format!("malformed index file '{}'", path.display()))?;
        idx.verify()?;
        Ok(idx)
    }
}

/// `<prefix>.idx`
pub fn index_path(prefix: &Path) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(".");
    s.push(INDEX_EXTENSION);
    PathBuf::from(s)
}

fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(path)
                .with_context(|| format!("cannot read directory '{}'", path.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && fasta::is_fasta_path(p))
                .collect();
            found.sort();
            if found.is_empty() {
                log::warn!("directory '{}' contains no FASTA files", path.display());
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        bail!("no FASTA input files given");
    }
    Ok(files)
}
