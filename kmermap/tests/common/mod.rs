#![allow(dead_code)]

use std::collections::BTreeSet;

use kmermap::index::GenomeIndex;
use kmermap::io::fasta::FastaRecord;
use kmermap::mappability::{MappabilityVector, OutputKind, SearchParams};
use kmermap::pipeline::{self, CollectSink, RunConfig};
use kmermap::util::dna;

/// `(file name, sequences)` per input file.
pub type Files<'a> = [(&'a str, Vec<Vec<u8>>)];

pub fn build_index(files: &Files<'_>) -> GenomeIndex {
    let inputs: Vec<(String, Vec<FastaRecord>)> = files
        .iter()
        .map(|(file, seqs)| {
            let records = seqs
                .iter()
                .enumerate()
                .map(|(i, s)| FastaRecord { name: format!("{}_{}", file, i), seq: s.clone() })
                .collect();
            (file.to_string(), records)
        })
        .collect();
    GenomeIndex::build(&inputs, 16).unwrap()
}

pub fn run(index: &GenomeIndex, params: SearchParams, kind: OutputKind) -> Vec<MappabilityVector> {
    let mut config = RunConfig::new(params);
    config.kind = kind;
    let mut sink = CollectSink::default();
    pipeline::run(index, &config, &mut sink).unwrap();
    sink.segments.into_iter().map(|(_, v, _)| v).collect()
}

fn hamming(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// Brute-force frequency of every valid window, per segment, in the same
/// layout the pipeline produces (`0` where no window fits).
pub fn naive_frequencies(files: &Files<'_>, k: usize, errors: u8, rc: bool, per_file: bool) -> Vec<Vec<u64>> {
    let encoded: Vec<(usize, Vec<u8>)> = files
        .iter()
        .enumerate()
        .flat_map(|(f, (_, seqs))| seqs.iter().filter(|s| !s.is_empty()).map(move |s| (f, dna::encode(s))))
        .collect();
    let e = usize::from(errors);

    let count = |window: &[u8]| -> u64 {
        let rc_window = dna::revcomp_codes(window);
        let mut hits = BTreeSet::new();
        for (seq, (file, text)) in encoded.iter().enumerate() {
            if text.len() < k {
                continue;
            }
            for q in 0..=text.len() - k {
                let w = &text[q..q + k];
                if hamming(w, window) <= e || (rc && hamming(w, &rc_window) <= e) {
                    hits.insert(if per_file { (*file, 0) } else { (seq, q) });
                }
            }
        }
        hits.len() as u64
    };

    files
        .iter()
        .map(|(_, seqs)| {
            let mut out = Vec::new();
            for s in seqs.iter().filter(|s| !s.is_empty()) {
                let text = dna::encode(s);
                for p in 0..text.len() {
                    out.push(if p + k <= text.len() { count(&text[p..p + k]) } else { 0 });
                }
            }
            out
        })
        .collect()
}
