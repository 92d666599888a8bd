use criterion::{black_box, criterion_group, criterion_main, Criterion};

use kmermap::index::{sa, BiIndex, DirectoryEntry};
use kmermap::mappability::scheme::SearchScheme;
use kmermap::mappability::search::ApproxSearcher;
use kmermap::mappability::{MappabilityComputer, Progress, PseudoGroupMapper, SearchParams, SequenceSegmenter};
use kmermap::util::dna;

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn build_index(seq: &[u8]) -> BiIndex {
    BiIndex::build(&[dna::encode(seq)], 64)
}

fn bench_build_sa(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let text: Vec<u8> = dna::encode(&reference).into_iter().chain(std::iter::once(0u8)).collect();

    c.bench_function("build_sa_10k", |b| {
        b.iter(|| {
            black_box(sa::build_sa(black_box(&text)));
        })
    });
}

fn bench_exact_count(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let index = build_index(&reference);
    let pattern = dna::encode(&reference[100..120]);

    c.bench_function("exact_count_20bp", |b| {
        b.iter(|| {
            black_box(index.count(black_box(&pattern)));
        })
    });
}

fn bench_approx_search(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let index = build_index(&reference);
    let pattern = dna::encode(&reference[500..536]);

    for errors in [1u8, 2, 3] {
        let scheme = SearchScheme::pigeonhole(errors);
        let searcher = ApproxSearcher::new(&index, &scheme, pattern.len());
        c.bench_function(&format!("approx_search_36bp_e{}", errors), |b| {
            b.iter(|| {
                black_box(searcher.search(black_box(&pattern)));
            })
        });
    }
}

fn bench_segment(c: &mut Criterion) {
    let reference = make_reference(5_000);
    let index = build_index(&reference);
    let entries = vec![DirectoryEntry::new("bench.fa", reference.len() as u64, "bench")];
    let segment = SequenceSegmenter::new(&entries).next().unwrap();
    let groups = PseudoGroupMapper::disabled();

    for (name, overlap) in [("segment_5k_k24_e2_unbatched", Some(0)), ("segment_5k_k24_e2_batched", None)] {
        let mut params = SearchParams::new(24, 2);
        if let Some(o) = overlap {
            params = params.with_overlap(o);
        }
        let computer = MappabilityComputer::new(&index, params, &groups, false).unwrap();
        c.bench_function(name, |b| {
            b.iter(|| {
                black_box(computer.compute::<u16>(black_box(&segment), &Progress::silent()).unwrap());
            })
        });
    }
}

criterion_group!(benches, bench_build_sa, bench_exact_count, bench_approx_search, bench_segment);
criterion_main!(benches);
