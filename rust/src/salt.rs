//! Salt derivation. The salt is a pure function of the input set and is
//! recomputed wherever a stage needs it rather than threaded through.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::crypto::digest::sha256_digest;
use crate::input::{DateText, InputSet};

/// Number of base64url characters kept from the encoded digest.
pub const SALT_LEN: usize = 32;

/// SHA-256 of the millisecond canonical text, base64url encoded and cut to
/// [`SALT_LEN`] characters.
pub fn derive_salt(input: &InputSet) -> String {
    let digest = sha256_digest(input.canonical(DateText::Millis).as_bytes());
    let mut salt = URL_SAFE_NO_PAD.encode(digest);
    salt.truncate(SALT_LEN);
    salt
}

#[cfg(test)]
mod tests {
    use super::{derive_salt, SALT_LEN};
    use crate::input::InputSet;
    use time::macros::date;

    #[test]
    fn empty_input_salt() {
        assert_eq!(derive_salt(&InputSet::default()), "47DEQpj8HBSa-_TImW-5JCeuQeRkm5NM");
    }

    #[test]
    fn empty_phrases_match_empty_input() {
        let input = InputSet::from(vec![String::new(); 3]);
        assert_eq!(derive_salt(&input), derive_salt(&InputSet::default()));
    }

    #[test]
    fn salt_covers_dates() {
        let input = InputSet::default()
            .with_string("1")
            .with_string("2")
            .with_string("3")
            .with_date(date!(2025 - 02 - 28));
        let salt = derive_salt(&input);
        assert_eq!(salt, "Ij2aRnI0n8FrWtUg62mmyVLwKd4AVdsN");
        assert_eq!(salt.len(), SALT_LEN);
    }

    #[test]
    fn salt_is_url_safe() {
        let input = InputSet::default()
            .with_string("héllo wörld 🔐")
            .with_number(-42)
            .with_number(7)
            .with_date(date!(1969 - 07 - 20))
            .with_date(date!(2000 - 01 - 01));
        let salt = derive_salt(&input);
        assert_eq!(salt, "KDD5hwMHH8pWUTLF8F1Q-tX8mqgAqiee");
        assert!(salt
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
