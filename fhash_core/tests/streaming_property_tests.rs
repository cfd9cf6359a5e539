//! Property tests for chunked digests

use fhash_core::Digester;
use proptest::prelude::*;
use std::io::Cursor;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chunk_size_does_not_change_digests(
        data in prop::collection::vec(any::<u8>(), 0..4096),
        chunk_size in 1usize..512,
    ) {
        let tiny = Digester::new().with_chunk_size(1).unwrap();
        let sized = Digester::new().with_chunk_size(chunk_size).unwrap();
        let large = Digester::new().with_chunk_size(1024 * 1024).unwrap();

        let expected = large.digest_reader(Cursor::new(data.clone())).unwrap();
        prop_assert_eq!(&tiny.digest_reader(Cursor::new(data.clone())).unwrap(), &expected);
        prop_assert_eq!(&sized.digest_reader(Cursor::new(data.clone())).unwrap(), &expected);
        prop_assert_eq!(&Digester::new().digest_bytes(&data), &expected);
    }

    #[test]
    fn text_digest_is_deterministic(text in ".*") {
        let digester = Digester::new();
        prop_assert_eq!(digester.digest_text(&text), digester.digest_text(&text));
    }

    #[test]
    fn file_digest_matches_bytes(data in prop::collection::vec(any::<u8>(), 0..20_000)) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("evidence.bin");
        std::fs::write(&path, &data).unwrap();

        let digester = Digester::new();
        prop_assert_eq!(digester.digest_file(&path).unwrap(), digester.digest_bytes(&data));
    }
}
