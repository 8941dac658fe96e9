//! Invitation code generation.

use rand::Rng;

/// Length of a generated invitation code.
pub const INVITATION_CODE_LEN: usize = 32;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates an opaque invitation code.
///
/// 32 alphanumeric characters from a CSPRNG-seeded thread RNG; the code is
/// the bearer secret for joining a bingo, so it is stored and compared
/// verbatim and must never be derived from invitation contents.
pub fn generate_invitation_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITATION_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CODE_CHARSET.len());
            CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length() {
        assert_eq!(generate_invitation_code().len(), INVITATION_CODE_LEN);
    }

    #[test]
    fn test_code_is_alphanumeric() {
        let code = generate_invitation_code();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_are_unique() {
        let a = generate_invitation_code();
        let b = generate_invitation_code();
        assert_ne!(a, b);
    }
}
