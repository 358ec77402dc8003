use sha2::{Digest, Sha256};

/// Compute SHA256 hash of input bytes
pub fn sha256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Compare two secrets without leaking where they differ.
///
/// Both sides are hashed first so the comparison also takes the same time
/// regardless of the presented secret's length.
pub fn secrets_match(presented: &[u8], expected: &[u8]) -> bool {
    let a = sha256(presented);
    let b = sha256(expected);

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }

    result == 0
}
