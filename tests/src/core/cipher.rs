use proptest::prelude::*;
use shroud_core::cipher::{self, IV_LEN};

proptest! {
    #[test]
    fn prop_round_trip(plaintext in "\\PC*", key in "\\PC{1,48}") {
        let envelope = cipher::encrypt(&plaintext, &key).unwrap();
        prop_assert_eq!(cipher::decrypt(&envelope, &key), Some(plaintext));
    }

    #[test]
    fn prop_keys_sharing_prefix_interchange(
        prefix in "[a-zA-Z0-9]{32}",
        tail_a in "[a-z]{0,16}",
        tail_b in "[A-Z]{1,16}",
        plaintext in "\\PC{0,64}",
    ) {
        let key_a = format!("{prefix}{tail_a}");
        let key_b = format!("{prefix}{tail_b}");
        let envelope = cipher::encrypt(&plaintext, &key_a).unwrap();
        prop_assert_eq!(cipher::decrypt(&envelope, &key_b), Some(plaintext));
    }

    #[test]
    fn prop_envelope_is_whole_blocks(plaintext in "\\PC{0,100}") {
        let envelope = cipher::encrypt(&plaintext, "k").unwrap();
        let raw_len = envelope.len() / 4 * 3 - envelope.matches('=').count();
        prop_assert!(raw_len >= IV_LEN + 16);
        prop_assert_eq!((raw_len - IV_LEN) % 16, 0);
        // PKCS#7 always adds at least one byte
        prop_assert!(raw_len - IV_LEN > plaintext.len());
    }
}

#[test]
fn test_same_plaintext_differs_per_call() {
    let a = cipher::encrypt("hello", "k").unwrap();
    let b = cipher::encrypt("hello", "k").unwrap();
    assert_ne!(a, b);
    assert_eq!(cipher::decrypt(&a, "k"), cipher::decrypt(&b, "k"));
}

#[test]
fn test_garbage_degrades_to_none() {
    assert_eq!(cipher::decrypt("", "k"), None);
    assert_eq!(cipher::decrypt("%%%", "k"), None);
    assert_eq!(cipher::decrypt("AAAA", "k"), None);
}
