#![no_main]
use fake::{Fake, StringFaker};
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;

use bftree::{BufferedTree, BufferedTreeConfig};

fuzz_target!(|seed: u64| {
    let n_entries = 2000;
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    const ASCII: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let id_faker = StringFaker::with(Vec::from(ASCII), 8..16);
    let name_faker = fake::faker::name::en::Name();

    let mut t: BufferedTree<String, String> =
        BufferedTree::create(BufferedTreeConfig::default()).unwrap();

    for _ in 0..n_entries {
        t.put(
            id_faker.fake_with_rng(&mut rng),
            name_faker.fake_with_rng(&mut rng),
        );
    }

    let search_key: String = id_faker.fake_with_rng(&mut rng);
    let search_value: String = name_faker.fake_with_rng(&mut rng);
    t.put(search_key.clone(), search_value.clone());

    let found = t.get(&search_key).unwrap();
    assert_eq!(&search_value, found);
});
