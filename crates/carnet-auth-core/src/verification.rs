//! Verification code generation
//!
//! Codes are drawn from uppercase letters and digits. The default length
//! of 16 gives roughly 82 bits of entropy; shorter codes are brute
//! forceable and should only be used with aggressive rate limiting on
//! the verification endpoint. Codes carry no
//! expiry; consumption is a single-use compare-and-clear in the store.

use rand::Rng;
use subtle::ConstantTimeEq;

/// Code alphabet: uppercase letters and digits
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default verification code length (~82 bits over a 36-symbol alphabet)
pub const DEFAULT_CODE_LENGTH: usize = 16;

/// Generate a random verification code of the given length
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Compare a submitted code against a stored one in constant time
pub fn codes_match(submitted: &str, stored: &str) -> bool {
    submitted.as_bytes().ct_eq(stored.as_bytes()).into()
}
