//! Session token generation

use rand::distr::Alphanumeric;
use rand::Rng;

use pomodoro_shared::constants::TOKEN_LENGTH;

/// Fresh random token of `TOKEN_LENGTH` characters drawn uniformly from
/// `[A-Za-z0-9]`. Collisions are not retried.
pub fn generate_token() -> String {
    generate_token_with_len(TOKEN_LENGTH)
}

pub fn generate_token_with_len(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate_token();
        assert_eq!(token.len(), 16);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(generate_token(), generate_token());
    }
}
