//! Anti-forgery `state` token for the authorization redirect.

/// Length of each base-36 fragment.
const FRAGMENT_LEN: usize = 13;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Two random base-36 fragments, concatenated.
pub fn generate_state() -> String {
    let mut state = String::with_capacity(FRAGMENT_LEN * 2);
    state.push_str(&fragment());
    state.push_str(&fragment());
    state
}

fn fragment() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(FRAGMENT_LEN);

    for _ in 0..FRAGMENT_LEN {
        out.push(ALPHABET[(n % 36) as usize] as char);
        n /= 36;
    }

    out
}

/// Constant-time comparison, so a mismatch doesn't leak a prefix length.
pub(crate) fn states_match(expected: &str, actual: &str) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    expected
        .bytes()
        .zip(actual.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
