//! Password hashing for the in-memory provider.
//!
//! Iterated, salted key stretching with no external crypto dependency.
//! Good enough for a development/test provider; a production deployment
//! talks to a real identity service and never stores passwords here.

use crate::error::AuthError;

/// Password hasher configuration.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Number of mixing iterations.
    pub iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { iterations: 10_000 }
    }
}

impl PasswordHasher {
    /// Create a hasher with custom iterations.
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    /// Hash a password.
    ///
    /// Returns a string in format: `$shopkdf$iterations$salt$digest`
    pub fn hash(&self, password: &str) -> String {
        let salt = generate_salt();
        let digest = self.stretch(password, &salt);
        format!(
            "$shopkdf${}${}${}",
            self.iterations,
            hex_encode(&salt),
            hex_encode(&digest)
        )
    }

    /// Verify a password against a stored hash.
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AuthError> {
        let parts: Vec<&str> = stored.split('$').collect();
        if parts.len() != 5 || parts[1] != "shopkdf" {
            return Err(AuthError::Unknown("malformed password hash".to_string()));
        }

        let iterations: u32 = parts[2]
            .parse()
            .map_err(|_| AuthError::Unknown("malformed iteration count".to_string()))?;
        let salt = hex_decode(parts[3])
            .ok_or_else(|| AuthError::Unknown("malformed salt".to_string()))?;
        let expected = hex_decode(parts[4])
            .ok_or_else(|| AuthError::Unknown("malformed digest".to_string()))?;

        let computed = PasswordHasher::new(iterations).stretch(password, &salt);
        Ok(constant_time_eq(&computed, &expected))
    }

    /// Enforce minimum password strength at sign-up.
    pub fn check_strength(password: &str) -> Result<(), AuthError> {
        if password.chars().count() < 8 {
            return Err(AuthError::WeakPassword(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        let has_letter = password.chars().any(|c| c.is_alphabetic());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(AuthError::WeakPassword(
                "Password must contain letters and numbers".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive a 32-byte digest from password and salt.
    fn stretch(&self, password: &str, salt: &[u8]) -> [u8; 32] {
        let mut state = [0u8; 32];
        for (i, &b) in password.as_bytes().iter().enumerate() {
            state[i % 32] = state[i % 32].wrapping_add(b).rotate_left(1);
        }
        for (i, &b) in salt.iter().enumerate() {
            state[(i * 7 + 3) % 32] ^= b;
        }

        for round in 0..self.iterations {
            state = mix(&state, round);
        }
        state
    }
}

/// One mixing round over the 32-byte state.
fn mix(input: &[u8; 32], round: u32) -> [u8; 32] {
    let mut output = [0u8; 32];
    let tweak = (round as u8).wrapping_mul(0x9d);
    for i in 0..32 {
        let a = input[i];
        let b = input[(i + 5) % 32];
        let c = input[(i + 11) % 32];
        output[i] = a
            .rotate_left(3)
            .wrapping_add(b ^ tweak)
            .wrapping_mul(c | 1);
    }
    for i in 0..32 {
        output[i] ^= output[(i + 17) % 32].rotate_right(2);
    }
    output
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Generate a 16-byte pseudo-random salt.
fn generate_salt() -> Vec<u8> {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0x5eed);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = ts ^ COUNTER.fetch_add(0x9e37_79b9, Ordering::Relaxed);

    let mut salt = Vec::with_capacity(16);
    for _ in 0..16 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        salt.push((state & 0xFF) as u8);
    }
    salt
}

/// Encode bytes as hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decode hex string to bytes.
fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
