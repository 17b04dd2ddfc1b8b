use bftree::{BufferedTree, BufferedTreeConfig};

#[test]
fn create_tree() {
    let t: BufferedTree<u64, String> = BufferedTree::create(BufferedTreeConfig::default()).unwrap();
    assert_eq!(1, t.height());
    assert_eq!(0, t.put_count());
}

#[test]
fn insert_and_grow_past_a_single_level() {
    let config = BufferedTreeConfig::default()
        .container_threshold(4)
        .payload_threshold(4);
    let mut t: BufferedTree<u64, u64> = BufferedTree::create(config).unwrap();

    for i in 0..10_000u64 {
        t.put(i, i * 2);
        assert_eq!(Some(&(i * 2)), t.get(&i));
    }
    assert!(t.height() > 1);

    for i in 0..10_000u64 {
        assert_eq!(Some(&(i * 2)), t.get(&i));
    }
}

#[test]
fn delete_after_bulk_insert() {
    let config = BufferedTreeConfig::default()
        .container_threshold(4)
        .payload_threshold(4);
    let mut t: BufferedTree<u64, u64> = BufferedTree::create(config).unwrap();

    for i in 0..10_000u64 {
        t.put(i, i);
    }
    for i in 0..10_000u64 {
        t.del(i);
        assert_eq!(None, t.get(&i));
    }
    assert_eq!(0, t.put_count());
}

#[test]
fn rejects_thresholds_that_are_too_small() {
    let config = BufferedTreeConfig::<u64, u64>::default().container_threshold(1);
    assert!(BufferedTree::create(config).is_err());

    let config = BufferedTreeConfig::<u64, u64>::default().payload_threshold(0);
    assert!(BufferedTree::create(config).is_err());
}
