#![no_main]
use cml::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tree) = parse(s) {
            // every node reachable from the root must resolve by id
            for child in tree.root().children() {
                assert!(tree.node(child.id()).is_some());
            }
        }
    }
});
