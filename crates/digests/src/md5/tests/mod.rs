use proptest::prelude::*;

pub(super) fn chunked_sequences() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..=80), 1..=8)
}

pub(super) fn prefix_and_suffixes() -> impl Strategy<Value = (Vec<u8>, Vec<u8>, Vec<u8>)> {
    (
        prop::collection::vec(any::<u8>(), 0..=96),
        prop::collection::vec(any::<u8>(), 0..=96),
        prop::collection::vec(any::<u8>(), 0..=96),
    )
}
