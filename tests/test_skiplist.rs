extern crate env_logger;
extern crate rand;
extern crate skiplist_multiset;

use rand::{thread_rng, Rng, SeedableRng, XorShiftRng};
use skiplist_multiset::skiplist::{SkipList, SkipListConfig};
use std::vec::Vec;

fn seeded_list(seed: [u32; 4]) -> SkipList<u32> {
    let _ = env_logger::try_init();
    SkipList::with_config(SkipListConfig::default().seed(seed).unwrap())
}

fn count_in(expected: &[u32], value: u32) -> usize {
    expected.iter().filter(|&&other| other == value).count()
}

#[test]
fn int_test_skiplist_insert() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut list = seeded_list([2, 2, 2, 2]);
    let mut expected = Vec::new();

    for _ in 0..10_000 {
        let value = rng.gen_range(0, 1_000);
        list.insert(value);
        expected.push(value);
    }
    list.assert_invariants();

    expected.sort();
    assert_eq!(list.len(), expected.len());
    assert_eq!(list.min(), Some(&expected[0]));
    assert_eq!(list.max(), Some(&expected[expected.len() - 1]));
    assert_eq!(
        list.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );

    for value in 0..1_000 {
        assert_eq!(list.contains(&value), count_in(&expected, value) > 0);
        assert_eq!(list.count(&value), count_in(&expected, value));
    }
}

#[test]
fn int_test_skiplist_remove() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 2, 3, 4]);
    let mut list = seeded_list([4, 3, 2, 1]);
    let mut expected = Vec::new();

    for _ in 0..5_000 {
        let value = rng.gen_range(0, 100);
        list.insert(value);
        expected.push(value);
    }

    thread_rng().shuffle(&mut expected);

    let mut expected_len = expected.len();
    for (index, value) in expected.iter().enumerate() {
        assert_eq!(list.remove(value), Some(*value));
        expected_len -= 1;
        if index % 250 == 0 {
            list.assert_invariants();
            assert_eq!(list.len(), expected_len);
        }
    }

    list.assert_invariants();
    assert!(list.is_empty());
    assert_eq!(list.height(), 0);
    for value in 0..100 {
        assert!(!list.contains(&value));
    }
}

#[test]
fn int_test_skiplist_mixed() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([7, 7, 7, 7]);
    let mut list = seeded_list([5, 6, 7, 8]);
    let mut expected: Vec<u32> = Vec::new();

    for _ in 0..20_000 {
        let value = rng.gen_range(0, 50);
        if rng.gen::<bool>() {
            list.insert(value);
            let index = match expected.binary_search(&value) {
                Ok(index) | Err(index) => index,
            };
            expected.insert(index, value);
        } else {
            let removed = list.remove(&value);
            match expected.binary_search(&value) {
                Ok(index) => {
                    expected.remove(index);
                    assert_eq!(removed, Some(value));
                },
                Err(_) => assert_eq!(removed, None),
            }
        }
    }

    list.assert_invariants();
    assert_eq!(
        list.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
}

#[test]
fn int_test_skiplist_insert_remove_inverse() {
    let mut list = seeded_list([9, 9, 9, 9]);
    for value in &[5, 1, 3, 3, 8, 1] {
        list.insert(*value);
    }
    let before: Vec<u32> = list.iter().cloned().collect();

    for value in 0..10 {
        list.insert(value);
        assert_eq!(list.remove(&value), Some(value));
        list.assert_invariants();
        assert_eq!(list.iter().cloned().collect::<Vec<u32>>(), before);
    }
}

#[test]
fn int_test_skiplist_height_is_logarithmic() {
    let mut list = seeded_list([3, 1, 4, 1]);
    for value in 0..(1 << 14) {
        list.insert(value);
    }
    // expected height is about log2(n) = 14
    assert!(list.height() >= 7);
    assert!(list.height() <= 40);
}

#[test]
fn int_test_skiplist_seed_reproduces_shape() {
    let mut list_1 = seeded_list([1, 2, 3, 4]);
    let mut list_2 = seeded_list([1, 2, 3, 4]);
    for value in 0..500 {
        list_1.insert(value);
        list_2.insert(value);
    }
    assert_eq!(list_1.height(), list_2.height());
    assert_eq!(list_1.to_string(), list_2.to_string());
}
