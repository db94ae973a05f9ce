//! Project-specific utilities live here.

use rand::Rng;

/// URL-safe alphabet used for generated identifiers.
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of identifiers handed out for new records.
pub const ID_LENGTH: usize = 10;

/// Generate a random identifier of `len` characters drawn from a 64-symbol alphabet.
pub fn generate_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_use_the_url_safe_alphabet() {
        let id = generate_id(ID_LENGTH);
        assert_eq!(id.len(), ID_LENGTH);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id(ID_LENGTH)).collect();
        assert_eq!(ids.len(), 1000);
    }
}
