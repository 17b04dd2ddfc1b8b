use bftree::{BufferedTree, BufferedTreeConfig};
use criterion::{criterion_group, criterion_main, Criterion};
use fake::{Fake, StringFaker};

const ASCII: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn insertion(c: &mut Criterion) {
    c.bench_function("insert 1 string", |b| {
        let n_entries = 10_000;
        let id_faker = StringFaker::with(Vec::from(ASCII), 8..16);
        let name_faker = fake::faker::name::en::Name();

        let mut t: BufferedTree<String, String> =
            BufferedTree::create(BufferedTreeConfig::default()).unwrap();

        for _ in 0..n_entries {
            t.put(id_faker.fake(), name_faker.fake());
        }

        let search_key: String = id_faker.fake();
        let search_value: String = name_faker.fake();

        b.iter(|| {
            t.put(search_key.clone(), search_value.clone());
        })
    });

    c.bench_function("insert u64 key", |b| {
        let n_entries = 10_000;

        let mut t: BufferedTree<u64, u64> = BufferedTree::create(BufferedTreeConfig::default()).unwrap();

        for i in 0..n_entries {
            t.put(i, i);
        }

        b.iter(|| {
            t.put(n_entries, n_entries);
        })
    });
}

fn search(c: &mut Criterion) {
    c.bench_function("search existing string", |b| {
        let n_entries = 10_000;
        let id_faker = StringFaker::with(Vec::from(ASCII), 8..16);
        let name_faker = fake::faker::name::en::Name();

        let mut t: BufferedTree<String, String> =
            BufferedTree::create(BufferedTreeConfig::default()).unwrap();

        for _ in 0..n_entries {
            t.put(id_faker.fake(), name_faker.fake());
        }

        let search_key: String = id_faker.fake();
        let search_value: String = name_faker.fake();
        t.put(search_key.clone(), search_value.clone());

        b.iter(|| {
            let found = t.get(&search_key).unwrap();
            assert_eq!(&search_value, found);
        })
    });
}

fn delete_heavy_churn(c: &mut Criterion) {
    c.bench_function("put then del same key", |b| {
        let mut t: BufferedTree<u64, u64> = BufferedTree::create(BufferedTreeConfig::default()).unwrap();
        for i in 0..10_000u64 {
            t.put(i, i);
        }

        b.iter(|| {
            t.put(1, 1);
            t.del(1);
        })
    });
}

criterion_group!(benches, insertion, search, delete_heavy_churn);
criterion_main!(benches);
