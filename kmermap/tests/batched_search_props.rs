mod common;

use common::{build_index, naive_frequencies, run};
use kmermap::mappability::{OutputKind, SearchParams};
use proptest::prelude::*;

fn sequence(min: usize, max: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')], min..max)
}

/// Low-entropy sequences so that approximate hits are plentiful.
fn repetitive(min: usize, max: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(prop_oneof![4 => Just(b'A'), 1 => Just(b'C'), 1 => Just(b'N')], min..max)
}

fn frequencies(out: &[kmermap::mappability::MappabilityVector]) -> Vec<Vec<u64>> {
    out.iter()
        .map(|v| v.as_frequency_large().unwrap().iter().map(|&x| u64::from(x)).collect())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn batched_counts_match_brute_force(
        a in sequence(6, 40),
        b in sequence(6, 30),
        c in sequence(6, 20),
        k in 6usize..12,
        errors in 0u8..=4,
        overlap_frac in 0usize..=100,
        rc in any::<bool>(),
    ) {
        prop_assume!(k >= usize::from(errors) + 2);
        let input = vec![("one.fa", vec![a, b]), ("two.fa", vec![c])];
        let idx = build_index(&input);
        let max = SearchParams::max_overlap(k, errors).unwrap();
        let params = SearchParams::new(k, errors)
            .with_overlap(max * overlap_frac / 100)
            .with_reverse_complement(rc);

        let got = frequencies(&run(&idx, params, OutputKind::FrequencyLarge));
        let expected = naive_frequencies(&input, k, errors, rc, false);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn overlap_does_not_change_results(
        a in repetitive(10, 50),
        k in 5usize..10,
        errors in 0u8..=3,
    ) {
        prop_assume!(k >= usize::from(errors) + 2);
        let input = vec![("r.fa", vec![a])];
        let idx = build_index(&input);
        let max = SearchParams::max_overlap(k, errors).unwrap();

        let unbatched = frequencies(&run(&idx, SearchParams::new(k, errors).with_overlap(0), OutputKind::FrequencyLarge));
        for overlap in 1..=max {
            let batched = frequencies(&run(&idx, SearchParams::new(k, errors).with_overlap(overlap), OutputKind::FrequencyLarge));
            prop_assert_eq!(&batched, &unbatched, "overlap {}", overlap);
        }
    }

    #[test]
    fn exclude_pseudo_counts_distinct_files(
        a in repetitive(8, 30),
        b in repetitive(8, 30),
        c in repetitive(8, 30),
        errors in 0u8..=2,
    ) {
        let k = 6;
        let input = vec![("x.fa", vec![a, b]), ("y.fa", vec![c])];
        let idx = build_index(&input);
        let params = SearchParams::new(k, errors).with_exclude_pseudo(true);
        let got = frequencies(&run(&idx, params, OutputKind::FrequencyLarge));
        prop_assert_eq!(got, naive_frequencies(&input, k, errors, false, true));
    }
}
