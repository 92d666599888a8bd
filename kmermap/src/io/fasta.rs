use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

const FASTA_EXTENSIONS: [&str; 5] = ["fa", "fasta", "fna", "fas", "ffn"];

#[derive(Debug, Clone)]
pub struct FastaRecord {
    /// Header up to the first whitespace.
    pub name: String,
    pub seq: Vec<u8>,
}

/// Streaming multi-FASTA reader. Sequence lines are concatenated with
/// whitespace removed; lines before the first header are ignored.
pub struct FastaReader<R: BufRead> {
    reader: R,
    line: String,
    pending: Option<String>,
    done: bool,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), pending: None, done: false }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        Ok(self.reader.read_line(&mut self.line)? > 0)
    }

    fn header_name(line: &str) -> String {
        line[1..].split_whitespace().next().unwrap_or("").to_string()
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        let name = match self.pending.take() {
            Some(h) => h,
            None => loop {
                if !self.read_line()? {
                    self.done = true;
                    return Ok(None);
                }
                if self.line.starts_with('>') {
                    break Self::header_name(&self.line);
                }
            },
        };

        let mut seq = Vec::new();
        loop {
            if !self.read_line()? {
                self.done = true;
                break;
            }
            if self.line.starts_with('>') {
                self.pending = Some(Self::header_name(&self.line));
                break;
            }
            seq.extend(self.line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        Ok(Some(FastaRecord { name, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

pub fn read_fasta_file(path: &Path) -> Result<Vec<FastaRecord>> {
    let fh = std::fs::File::open(path)
        .with_context(|| format!("cannot open FASTA file '{}'", path.display()))?;
    FastaReader::new(std::io::BufReader::new(fh)).collect()
}

pub fn is_fasta_path(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let trimmed = name.strip_suffix(".txt").unwrap_or(name);
    Path::new(trimmed)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FASTA_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_multi_fasta() {
        let data = b">chr1 first\nACgTNN\n>chr2\nAAA\n";
        let records: Vec<FastaRecord> =
            FastaReader::new(Cursor::new(&data[..])).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "chr1");
        assert_eq!(records[0].seq, b"ACgTNN");
        assert_eq!(records[1].name, "chr2");
        assert_eq!(records[1].seq, b"AAA");
    }

    #[test]
    fn parse_fasta_with_crlf_blank_lines_and_empty_record() {
        let data = b"\n\n>chr1 desc\r\nAC g t\r\n acgt\r\n>empty\n>chr3\nNN\n";
        let mut r = FastaReader::new(Cursor::new(&data[..]));
        let r1 = r.next_record().unwrap().unwrap();
        assert_eq!(r1.name, "chr1");
        assert_eq!(r1.seq, b"ACgtacgt");
        let r2 = r.next_record().unwrap().unwrap();
        assert_eq!(r2.name, "empty");
        assert!(r2.seq.is_empty());
        let r3 = r.next_record().unwrap().unwrap();
        assert_eq!(r3.seq, b"NN");
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn fasta_extensions() {
        assert!(is_fasta_path(Path::new("dir/genome.fa")));
        assert!(is_fasta_path(Path::new("x.FASTA")));
        assert!(is_fasta_path(Path::new("x.fa.txt")));
        assert!(!is_fasta_path(Path::new("notes.txt")));
        assert!(!is_fasta_path(Path::new("reads.fq")));
    }
}
