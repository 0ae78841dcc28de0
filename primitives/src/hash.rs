use tiny_keccak::{Hasher, Keccak};

use crate::B256;

/// Keccak-256 of `bytes`.
pub fn keccak256(bytes: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(bytes.as_ref());
    hasher.finalize()
}

/// Streaming keccak-256, for digests assembled from several buffers.
pub struct Keccak256 {
    inner: Keccak,
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Keccak256 {
    /// A fresh hasher.
    pub fn new() -> Self {
        Self {
            inner: Keccak::v256(),
        }
    }

    /// Absorb `bytes`.
    pub fn update(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    /// Squeeze the 32 byte digest.
    pub fn finalize(self) -> B256 {
        let mut output = [0u8; 32];
        self.inner.finalize(&mut output);
        B256(output)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(
            keccak256(b""),
            B256(hex!(
                "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            ))
        );
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut hasher = Keccak256::new();
        hasher.update(b"Transfer(");
        hasher.update(b"address,address,uint256)");
        assert_eq!(
            hasher.finalize(),
            keccak256("Transfer(address,address,uint256)")
        );
        assert_eq!(
            keccak256("Transfer(address,address,uint256)"),
            B256(hex!(
                "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
            ))
        );
    }
}
