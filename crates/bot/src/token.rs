#![forbid(unsafe_code)]

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Uniform random alphanumeric token, sampled with replacement.
///
/// These are display references (order ids, withdrawal references), not
/// persisted unique keys; collisions are tolerated rather than mitigated.
pub(crate) fn alphanumeric(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_the_62_char_set() {
        assert_eq!(ALPHABET.len(), 62);
        let mut seen = std::collections::HashSet::new();
        for &b in ALPHABET {
            assert!(b.is_ascii_alphanumeric());
            assert!(seen.insert(b), "duplicate alphabet entry");
        }
    }

    #[test]
    fn tokens_have_requested_length_and_charset() {
        for len in [8, 15] {
            let token = alphanumeric(len);
            assert_eq!(token.chars().count(), len);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn tokens_vary_between_calls() {
        // 15 chars from a 62-char alphabet; a collision here means the rng
        // is broken, not unlucky.
        assert_ne!(alphanumeric(15), alphanumeric(15));
    }
}
