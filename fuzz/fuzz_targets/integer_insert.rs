#![no_main]
use libfuzzer_sys::fuzz_target;

use bftree::{BufferedTree, BufferedTreeConfig};
use std::collections::HashMap;

fuzz_target!(|data: (Vec<(u32, u32)>, u8)| {
    let payload_threshold = (data.1 as usize).max(1);
    let mut m: HashMap<u32, u32> = HashMap::default();
    let config = BufferedTreeConfig::default().payload_threshold(payload_threshold);
    let mut fixture: BufferedTree<u32, u32> = BufferedTree::create(config).unwrap();

    for (key, value) in data.0 {
        m.insert(key, value);
        fixture.put(key, value);
    }

    for (k, v) in m.iter() {
        assert_eq!(Some(v), fixture.get(k));
    }
});
