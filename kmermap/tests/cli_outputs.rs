//! End-to-end runs of the binary: index two FASTA files, then map them and
//! inspect the files written for every output format.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use kmermap::output::raw;

fn kmermap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kmermap"))
}

fn write_fasta(path: &Path, records: &[(&str, &str)]) {
    let mut s = String::new();
    for (name, seq) in records {
        s.push_str(&format!(">{} description\n{}\n", name, seq));
    }
    fs::write(path, s).unwrap();
}

fn build_index(dir: &TempDir) -> std::path::PathBuf {
    let genome = dir.path().join("genome");
    fs::create_dir(&genome).unwrap();
    write_fasta(&genome.join("a.fa"), &[("chr1", "ACGTTGCAAG")]);
    write_fasta(&genome.join("b.fasta"), &[("chrX", "GGATCCTTAC"), ("chrY", "ACGTT")]);
    fs::write(genome.join("notes.md"), "not a fasta file").unwrap();

    let prefix = dir.path().join("ref");
    let status = kmermap().arg("index").arg(&genome).arg("-o").arg(&prefix).status().unwrap();
    assert!(status.success());
    assert!(dir.path().join("ref.idx").is_file());
    prefix
}

#[test]
fn map_writes_every_requested_format() {
    let dir = TempDir::new().unwrap();
    let prefix = build_index(&dir);
    let out = dir.path().join("out");

    let status = kmermap()
        .args(["map", "-K", "4", "-E", "0", "-r", "-t", "-w", "-b", "-d", "--frequency-large", "-T", "2"])
        .arg("-I")
        .arg(&prefix)
        .arg("-O")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    // chrY = ACGTT repeats the first two 4-mers of chr1
    let a = raw::read_raw_u16(&out.join("a.freq16")).unwrap();
    assert_eq!(a, vec![2, 2, 1, 1, 1, 1, 1, 0, 0, 0]);

    let b = raw::read_raw_u16(&out.join("b.freq16")).unwrap();
    assert_eq!(b.len(), 15);
    assert_eq!(&b[10..], &[2, 2, 0, 0, 0]);

    let txt = fs::read_to_string(out.join("b.txt")).unwrap();
    assert_eq!(txt, ">chrX\n1 1 1 1 1 1 1 0 0 0\n>chrY\n2 2 0 0 0\n");

    let sizes = fs::read_to_string(out.join("b.chrom.sizes")).unwrap();
    assert_eq!(sizes, "chrX\t10\nchrY\t5\n");

    let bed = fs::read_to_string(out.join("a.bed")).unwrap();
    assert_eq!(bed, "chr1\t0\t2\t-\t2\nchr1\t2\t7\t-\t1\n");

    let wig = fs::read_to_string(out.join("a.wig")).unwrap();
    assert!(wig.starts_with("variableStep chrom=chr1 span=2\n1 2\n"));

    let csv = fs::read_to_string(out.join("a.csv")).unwrap();
    assert!(csv.contains("#0,a.fa,chr1\n#1,b.fasta,chrX\n#2,b.fasta,chrY\n"));
    assert!(csv.lines().any(|l| l == "0,0;0,0|2,0;"));
}

#[test]
fn mappability_is_the_default_precision() {
    let dir = TempDir::new().unwrap();
    build_index(&dir);
    let out = dir.path().join("out");
    let status = kmermap()
        .args(["map", "-K", "4", "-r"])
        .arg("-I")
        .arg(dir.path().join("ref.idx"))
        .arg("-O")
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let a = raw::read_raw_f32(&out.join("a.map")).unwrap();
    assert_eq!(&a[..3], &[0.5, 0.5, 1.0]);
    assert!(!out.join("a.txt").exists());
}

#[test]
fn memory_mapped_index_gives_same_output() {
    let dir = TempDir::new().unwrap();
    let prefix = build_index(&dir);
    let map_into = |out: &Path, extra: &[&str]| {
        let status = kmermap()
            .args(["map", "-K", "4", "-E", "1", "-c", "-r", "-d", "--frequency-large"])
            .args(extra)
            .arg("-I")
            .arg(&prefix)
            .arg("-O")
            .arg(out)
            .status()
            .unwrap();
        assert!(status.success());
    };
    let buffered = dir.path().join("buffered");
    let mapped = dir.path().join("mapped");
    map_into(&buffered, &[]);
    map_into(&mapped, &["-m"]);

    for name in ["a.freq16", "b.freq16", "a.csv", "b.csv"] {
        let expected = fs::read(buffered.join(name)).unwrap();
        assert!(!expected.is_empty(), "{}", name);
        assert_eq!(fs::read(mapped.join(name)).unwrap(), expected, "{}", name);
    }
}

#[test]
fn invalid_runs_exit_non_zero() {
    let dir = TempDir::new().unwrap();
    let prefix = build_index(&dir);
    let out = dir.path().join("out");

    let too_many_errors = kmermap()
        .args(["map", "-K", "10", "-E", "5", "-r"])
        .arg("-I")
        .arg(&prefix)
        .arg("-O")
        .arg(&out)
        .output()
        .unwrap();
    assert!(!too_many_errors.status.success());
    assert!(String::from_utf8_lossy(&too_many_errors.stderr).contains("at most 4"));

    let no_format = kmermap().args(["map", "-K", "4"]).arg("-I").arg(&prefix).arg("-O").arg(&out).status().unwrap();
    assert!(!no_format.success());

    let missing_index = kmermap()
        .args(["map", "-K", "4", "-r", "-I"])
        .arg(dir.path().join("nope"))
        .arg("-O")
        .arg(&out)
        .status()
        .unwrap();
    assert!(!missing_index.success());
}
