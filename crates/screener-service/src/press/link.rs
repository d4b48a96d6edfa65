//! Press link token generation.

use std::sync::Arc;

use screener_core::traits::Clock;

/// Number of random bytes in a token.
const TOKEN_RANDOM_BYTES: usize = 32;

/// Mints unguessable press link tokens.
///
/// A token is 32 bytes from the thread-local CSPRNG, hex encoded, followed by
/// `-` and the current epoch milliseconds in base 36.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Creates a new token issuer.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Generates a fresh token.
    pub fn generate_token(&self) -> String {
        let bytes: [u8; TOKEN_RANDOM_BYTES] = rand::random();
        let millis = u64::try_from(self.clock.now().timestamp_millis()).unwrap_or_default();
        format!("{}-{}", hex::encode(bytes), to_base36(millis))
    }
}

/// Lowercase base-36 rendering of `value`.
fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(char::from(DIGITS[(value % 36) as usize]));
        value /= 36;
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};
    use screener_core::traits::{ManualClock, SystemClock};

    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
        assert_eq!(to_base36(u64::MAX), "3w5e11264sgsf");
    }

    #[test]
    fn test_token_shape() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let issuer = TokenIssuer::new(Arc::new(ManualClock::new(at)));
        let token = issuer.generate_token();

        let (random, suffix) = token.split_once('-').unwrap();
        assert_eq!(random.len(), 64);
        assert!(random.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(suffix, "loyw3v28");
    }

    #[test]
    fn test_tokens_are_unique() {
        let issuer = TokenIssuer::new(Arc::new(SystemClock));
        let tokens: HashSet<String> = (0..100_000).map(|_| issuer.generate_token()).collect();
        assert_eq!(tokens.len(), 100_000);
    }
}
