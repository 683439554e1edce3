// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

#![allow(non_snake_case)]

#[cfg(test)]
mod model_tests {
    use std::collections::BTreeSet;

    use proptest::{
        collection::vec,
        proptest,
    };
    use rand::{
        rngs::SmallRng,
        SeedableRng,
    };

    use super::super::tests::assert_well_formed;
    use crate::{
        comparator::NaturalOrder,
        config::Config,
        skiplist::SkipList,
    };

    fn seeded(max_level: usize, seed: u64) -> SkipList<u16> {
        SkipList::with_config(Config::new(max_level).with_seed(seed), NaturalOrder).unwrap()
    }

    fn assert_matches_model(list: &SkipList<u16>, model: &BTreeSet<u16>) {
        assert_eq!(list.len(), model.len());
        assert!(list.iter().eq(model.iter()));
        assert_well_formed(list);
    }

    proptest! {
        #[test]
        fn test_random_operations_match_btreeset(
            operations in vec((0..5u8, 0..512u16), 1..300),
            max_level in 1usize..12,
            seed in 0u64..1024,
        ) {
            let mut list = seeded(max_level, seed);
            let mut model = BTreeSet::new();

            for (op, value) in operations {
                match op {
                    // add
                    0 | 1 => {
                        let node = list.add(value);
                        model.insert(value);
                        assert_eq!(list.value(node), Some(&value));
                    },
                    // delete by value
                    2 => {
                        assert_eq!(list.delete(&value), model.remove(&value));
                    },
                    // delete by rank
                    3 => {
                        let rank = value as usize % (model.len() + 1);
                        let expected = model.iter().nth(rank).copied();
                        assert_eq!(list.delete_at(rank), expected.is_some());
                        if let Some(v) = expected {
                            model.remove(&v);
                        }
                    },
                    // overwrite by rank
                    _ => {
                        let rank = value as usize % (model.len() + 1);
                        let expected = model.iter().nth(rank).copied();
                        assert_eq!(list.set_at(rank, value), expected.is_some());
                        if let Some(v) = expected {
                            model.remove(&v);
                        }
                        model.insert(value);
                    },
                }
                assert!(list.current_level() <= list.max_level());
            }

            assert_matches_model(&list, &model);
        }

        #[test]
        fn test_lookups_agree_with_btreeset(
            values in vec(0..1000u16, 0..200),
            probes in vec(0..1000u16, 1..50),
        ) {
            let mut list = seeded(8, 17);
            list.add_many(values.iter().copied());
            let model: BTreeSet<u16> = values.into_iter().collect();
            assert_matches_model(&list, &model);

            for probe in probes {
                assert_eq!(list.contains(&probe), model.contains(&probe));
                assert_eq!(list.get(&probe), model.get(&probe));

                let high = probe.saturating_add(100);
                let expected: Vec<&u16> = model.range(probe..=high).collect();
                assert_eq!(list.search_range(&probe, &high), expected);

                let rank = probe as usize % (model.len() + 1);
                assert_eq!(list.get_at(rank), model.iter().nth(rank));
            }
        }

        #[test]
        fn test_compact_and_codec_preserve_contents(
            values in vec(0..2000u16, 0..200),
            deletions in vec(0..2000u16, 0..100),
        ) {
            let mut list = seeded(6, 29);
            list.add_many(values.iter().copied());
            let mut model: BTreeSet<u16> = values.into_iter().collect();
            for v in &deletions {
                assert_eq!(list.delete(v), model.remove(v));
            }

            let restored: SkipList<u16> = SkipList::decode(list.encode().unwrap()).unwrap();
            assert_matches_model(&restored, &model);

            list.compact();
            assert_matches_model(&list, &model);
        }

        #[test]
        fn test_samples_are_members(
            values in vec(0..500u16, 1..100),
            k in 0usize..64,
            seed in 0u64..1024,
        ) {
            let mut list = seeded(5, 3);
            list.add_many(values.iter().copied());
            let mut rng = SmallRng::seed_from_u64(seed);

            let picked = list.sample_many_with(k, &mut rng).unwrap();
            assert_eq!(picked.len(), k);
            assert!(picked.windows(2).all(|w| w[0] <= w[1]));
            assert!(picked.iter().all(|v| values.contains(v)));

            let one = list.sample_one().unwrap();
            assert!(values.contains(one));
        }

        #[test]
        fn test_cursor_walks_in_order(values in vec(0..1000u16, 0..100)) {
            let mut list = seeded(4, 11);
            list.add_many(values.iter().copied());
            let model: BTreeSet<u16> = values.into_iter().collect();

            let mut cursor = list.cursor();
            let mut walked = Vec::new();
            while let Some(v) = cursor.current(&list) {
                walked.push(*v);
                cursor.advance(&list);
            }
            assert!(walked.iter().eq(model.iter()));
        }
    }
}
