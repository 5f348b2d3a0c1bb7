use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::container::Container;
use crate::fixture::Fixture;
use crate::key::{MapKey, MAP_ELEMENT};

#[test]
fn test_setup_lookup() {
    let mut rng = StdRng::seed_from_u64(10);
    let fixture = Fixture::setup(3, &mut rng).unwrap();

    assert_eq!(fixture.capacity(), 3);
    let n = fixture.tree().container.len();
    assert!(n >= 1 && n <= 4, "tree len {}", n);
    assert_eq!(fixture.tree_lookup(), Some(MAP_ELEMENT));
    assert_eq!(
        fixture.tree_lookup(),
        Some("MyBenchmark App for \"TreeMap vs HashMap comparison\"")
    );

    let n = fixture.hash().container.len();
    assert!(n >= 1 && n <= 4, "hash len {}", n);
    assert_eq!(fixture.hash_lookup(), Some(MAP_ELEMENT));
}

#[test]
fn test_setup_entropy() {
    for _ in 0..100 {
        let fixture = Fixture::setup(10, &mut StdRng::from_entropy()).unwrap();
        assert!(fixture.tree().container.len() <= 11);
        assert!(fixture.hash().container.len() <= 11);
        assert_eq!(fixture.tree_lookup(), Some(MAP_ELEMENT));
        assert_eq!(fixture.hash_lookup(), Some(MAP_ELEMENT));
    }
}

#[test]
fn test_setup_draw_order() {
    // tree draws first, then hash, from the same source.
    let seed: u64 = rand::random();
    println!("seed {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let (tree_ref, tree_marked) = RefEntries::populate(20, &mut rng);
    let (hash_ref, hash_marked) = RefEntries::populate(20, &mut rng);

    let fixture = Fixture::setup(20, &mut StdRng::seed_from_u64(seed)).unwrap();
    assert_eq!(fixture.tree().marked, tree_marked);
    assert_eq!(fixture.hash().marked, hash_marked);
    assert_eq!(fixture.tree().container.entries(), tree_ref.sorted());
    assert_eq!(sorted_entries(&fixture.hash().container), hash_ref.sorted());
}

#[test]
fn test_seeded_setup_reproducible() {
    let a = Fixture::setup(64, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = Fixture::setup(64, &mut StdRng::seed_from_u64(7)).unwrap();

    assert_eq!(a.tree().marked, b.tree().marked);
    assert_eq!(a.hash().marked, b.hash().marked);
    assert_eq!(a.tree().container.entries(), b.tree().container.entries());
    assert_eq!(sorted_entries(&a.hash().container), sorted_entries(&b.hash().container));
}

#[test]
fn test_reset() {
    let mut fixture = Fixture::setup(10, &mut StdRng::seed_from_u64(8)).unwrap();
    fixture.reset();

    assert!(fixture.tree().container.is_empty());
    assert!(fixture.hash().container.is_empty());
    assert_eq!(fixture.tree_lookup(), None);
    assert_eq!(fixture.hash_lookup(), None);
}

#[test]
fn test_zero_capacity() {
    let fixture = Fixture::setup(0, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(fixture.tree().container.len(), 1);
    assert_eq!(fixture.hash().container.len(), 1);
    assert_eq!(fixture.tree_lookup(), Some(MAP_ELEMENT));
    assert_eq!(fixture.hash_lookup(), Some(MAP_ELEMENT));
}

include!("./ref_test.rs");
