#![no_main]
use libfuzzer_sys::fuzz_target;

use bftree::{BufferedTree, BufferedTreeConfig};
use std::collections::HashMap;

// `puts` and `deletes` are interleaved: after every `puts[i]`, apply
// `deletes[i % deletes.len()]` (an index into the keys inserted so far) if
// `deletes` is non-empty, exercising tombstone overlay alongside plain writes.
fuzz_target!(|data: (Vec<(String, String)>, Vec<u8>, u8)| {
    let (puts, deletes, payload_threshold_byte) = data;
    let payload_threshold = (payload_threshold_byte as usize).max(1);
    let mut m: HashMap<String, String> = HashMap::default();
    let config = BufferedTreeConfig::default().payload_threshold(payload_threshold);
    let mut t: BufferedTree<String, String> = BufferedTree::create(config).unwrap();

    let mut seen_keys: Vec<String> = Vec::new();
    for (i, (key, value)) in puts.into_iter().enumerate() {
        m.insert(key.clone(), value.clone());
        t.put(key.clone(), value);
        seen_keys.push(key);

        if !deletes.is_empty() && !seen_keys.is_empty() {
            let idx = deletes[i % deletes.len()] as usize % seen_keys.len();
            let victim = seen_keys[idx].clone();
            m.remove(&victim);
            t.del(victim);
        }
    }

    for (k, v) in m.iter() {
        assert_eq!(Some(v), t.get(k));
    }
});
