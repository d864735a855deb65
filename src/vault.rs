//! Word vault: the "secure channel" between the two players
//!
//! Player 1's secret word is sealed before the handover so it never sits
//! in plain text, and a BLAKE3 digest travels with it so tampering is
//! caught at the integrity check. The XOR keystream cipher is demo-grade
//! obfuscation for a party game, not a security boundary; the digest is
//! what actually detects the simulated transit attack.

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Errors surfaced when opening a sealed word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultError {
    /// Ciphertext no longer decodes to UTF-8 (corrupted in transit)
    Garbled,
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Garbled => write!(f, "sealed word is garbled"),
        }
    }
}

impl std::error::Error for VaultError {}

/// A sealed word in transit: nonce, ciphertext and integrity digest.
/// Serializes only; the state dump is a one-way snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct SealedWord {
    pub nonce: u64,
    pub ciphertext: Vec<u8>,
    digest: [u8; 32],
}

/// Per-round sealing context. Each round derives a fresh key.
#[derive(Debug, Clone)]
pub struct WordVault {
    key: [u8; 32],
}

impl WordVault {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Derive a key from the round seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            key: blake3::derive_key("gibbet word vault v1", &seed.to_le_bytes()),
        }
    }

    /// Keyed XOF keystream for one nonce.
    fn keystream(&self, nonce: u64, len: usize) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new_keyed(&self.key);
        hasher.update(&nonce.to_le_bytes());
        let mut out = vec![0u8; len];
        hasher.finalize_xof().fill(&mut out);
        out
    }

    /// Seal a word under a fresh random nonce.
    pub fn seal<R: Rng>(&self, rng: &mut R, word: &str) -> SealedWord {
        let nonce: u64 = rng.random();
        let mut ciphertext = word.as_bytes().to_vec();
        for (byte, k) in ciphertext.iter_mut().zip(self.keystream(nonce, word.len())) {
            *byte ^= k;
        }
        SealedWord {
            nonce,
            ciphertext,
            digest: *blake3::hash(word.as_bytes()).as_bytes(),
        }
    }

    /// Recover the word from a sealed buffer.
    pub fn open(&self, sealed: &SealedWord) -> Result<String, VaultError> {
        let mut bytes = sealed.ciphertext.clone();
        let keystream = self.keystream(sealed.nonce, bytes.len());
        for (byte, k) in bytes.iter_mut().zip(keystream) {
            *byte ^= k;
        }
        String::from_utf8(bytes).map_err(|_| VaultError::Garbled)
    }

    /// True when the sealed buffer still opens to the digested word.
    pub fn verify(&self, sealed: &SealedWord) -> bool {
        match self.open(sealed) {
            Ok(word) => blake3::hash(word.as_bytes()).as_bytes() == &sealed.digest,
            Err(VaultError::Garbled) => false,
        }
    }
}

/// Attack simulation: flip one uniformly random bit of the ciphertext.
pub fn tamper<R: Rng>(rng: &mut R, sealed: &mut SealedWord) {
    if sealed.ciphertext.is_empty() {
        return;
    }
    let bit = rng.random_range(0..sealed.ciphertext.len() * 8);
    sealed.ciphertext[bit / 8] ^= 1 << (bit % 8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_seal_open_round_trip() {
        let vault = WordVault::from_seed(99);
        let mut rng = Pcg32::seed_from_u64(1);
        let sealed = vault.seal(&mut rng, "GALLOWS");
        assert_ne!(sealed.ciphertext, b"GALLOWS");
        assert_eq!(vault.open(&sealed).unwrap(), "GALLOWS");
        assert!(vault.verify(&sealed));
    }

    #[test]
    fn test_nonces_differ_between_seals() {
        let vault = WordVault::from_seed(99);
        let mut rng = Pcg32::seed_from_u64(1);
        let a = vault.seal(&mut rng, "NOOSE");
        let b = vault.seal(&mut rng, "NOOSE");
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn test_bit_flip_breaks_verification() {
        let vault = WordVault::from_seed(99);
        let mut rng = Pcg32::seed_from_u64(1);
        for word in ["HANGMAN", "AB", "ENCRYPTION"] {
            let mut sealed = vault.seal(&mut rng, word);
            tamper(&mut rng, &mut sealed);
            assert!(!vault.verify(&sealed), "tamper went undetected for {word}");
        }
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let vault = WordVault::from_seed(99);
        let other = WordVault::from_seed(100);
        let mut rng = Pcg32::seed_from_u64(1);
        let sealed = vault.seal(&mut rng, "GIBBET");
        assert!(!other.verify(&sealed));
    }

    #[test]
    fn test_tamper_flips_exactly_one_bit() {
        let vault = WordVault::from_seed(99);
        let mut rng = Pcg32::seed_from_u64(1);
        let sealed = vault.seal(&mut rng, "WORD");
        let mut tampered = sealed.clone();
        tamper(&mut rng, &mut tampered);
        let flipped: u32 = sealed
            .ciphertext
            .iter()
            .zip(&tampered.ciphertext)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum();
        assert_eq!(flipped, 1);
    }
}
