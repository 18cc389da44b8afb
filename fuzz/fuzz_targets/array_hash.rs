#![no_main]
use array_hash::ArrayHash;
use libfuzzer_sys::{
    arbitrary::{Arbitrary, Unstructured},
    fuzz_target,
};
use std::collections::HashSet;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(Vec<u8>),
    Find(Vec<u8>),
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    if let Ok(ops) = <Vec<Op> as Arbitrary>::arbitrary(&mut unstructured) {
        let mut set: ArrayHash<64> = ArrayHash::new();
        let mut model = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => match set.insert(&key) {
                    Ok(inserted) => assert_eq!(model.insert(key), inserted),
                    Err(_) => assert!(key.contains(&0) || key.len() > array_hash::MAX_KEY_LEN),
                },
                Op::Find(key) => assert_eq!(model.contains(&key), set.find(&key)),
            }
        }

        assert_eq!(model.len(), set.size());

        let keys = set.iter().map(<[u8]>::to_vec).collect::<HashSet<_>>();
        assert_eq!(model, keys);
    }
});
