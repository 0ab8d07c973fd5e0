//! Property checks: pipelines agree with the equivalent std iterator chain,
//! and reductions respect their algebraic laws.

use std::collections::HashSet;

use lazyseq::Sequence;
use proptest::prelude::*;

fn values() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(-1_000..1_000, 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn filter_map_matches_iterator(items in values()) {
        let seq = Sequence::of(items.clone()).filter(|x| x % 3 != 0).map(|x| x * 2);
        let expected: Vec<i32> = items.iter().filter(|x| *x % 3 != 0).map(|x| x * 2).collect();
        prop_assert_eq!(seq.to_list().unwrap(), expected);
    }

    #[test]
    fn map_composes(items in values()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x - 7;
        let seq = Sequence::of(items);
        prop_assert_eq!(
            seq.map(f).map(g).to_list().unwrap(),
            seq.map(move |x| g(f(x))).to_list().unwrap()
        );
    }

    #[test]
    fn take_has_bounded_length(items in values(), n in 0_i64..80) {
        let taken = Sequence::of(items.clone()).try_take(n).unwrap().to_list().unwrap();
        let expected = items.len().min(usize::try_from(n).unwrap());
        prop_assert_eq!(taken.as_slice(), &items[..expected]);
    }

    #[test]
    fn take_then_drop_partitions(items in values(), n in 0_usize..80) {
        let seq = Sequence::of(items.clone());
        let mut joined = seq.take(n).to_list().unwrap();
        joined.extend(seq.drop(n).to_list().unwrap());
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn count_matches_length(items in values()) {
        prop_assert_eq!(Sequence::of(items.clone()).count().unwrap(), items.len());
    }

    #[test]
    fn distinct_keeps_first_occurrences(items in values()) {
        let mut seen = HashSet::new();
        let expected: Vec<i32> = items.iter().copied().filter(|x| seen.insert(*x)).collect();
        prop_assert_eq!(Sequence::of(items).distinct().to_list().unwrap(), expected);
    }

    #[test]
    fn sorted_matches_stable_sort(items in values()) {
        let mut expected = items.clone();
        expected.sort();
        prop_assert_eq!(Sequence::of(items).sorted().to_list().unwrap(), expected);
    }

    #[test]
    fn drop_while_matches_skip_while(items in values(), pivot in -1_000..1_000) {
        let expected: Vec<i32> = items.iter().copied().skip_while(|x| *x < pivot).collect();
        let seq = Sequence::of(items).drop_while(move |x| *x < pivot);
        prop_assert_eq!(seq.to_list().unwrap(), expected);
    }

    #[test]
    fn indexed_counts_from_zero(items in values()) {
        let indices: Vec<usize> = Sequence::of(items.clone())
            .indexed()
            .map(|(i, _)| i)
            .to_list()
            .unwrap();
        prop_assert_eq!(indices, (0..items.len()).collect::<Vec<_>>());
    }

    #[test]
    fn summary_agrees_with_separate_reductions(items in values()) {
        let seq = Sequence::of(items.clone());
        let summary = seq.summary(|x| *x).unwrap();
        prop_assert_eq!(summary.count(), items.len());
        prop_assert_eq!(summary.sum(), items.iter().map(|x| i64::from(*x)).sum::<i64>());
        prop_assert_eq!(summary.min(), seq.min_opt().unwrap());
        prop_assert_eq!(summary.max(), seq.max_opt().unwrap());
    }

    #[test]
    fn group_by_preserves_every_element(items in values()) {
        let groups = Sequence::of(items.clone()).group_by(|x| x.rem_euclid(7)).unwrap();
        let regrouped: usize = groups.iter().map(|(_, bucket)| bucket.len()).sum();
        prop_assert_eq!(regrouped, items.len());
        for (key, bucket) in &groups {
            prop_assert!(bucket.iter().all(|x| x.rem_euclid(7) == *key));
        }
    }

    #[test]
    fn traversals_are_repeatable(items in values()) {
        let seq = Sequence::of(items).map(|x| x ^ 0x55).filter(|x| x & 1 == 0);
        prop_assert_eq!(seq.to_list().unwrap(), seq.to_list().unwrap());
    }
}
