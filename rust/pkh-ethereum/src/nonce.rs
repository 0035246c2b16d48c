//! Replay-protection nonce generation.

use crate::ConditionalSync;
use rand::RngCore;

/// Alphabet nonces are drawn from.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Number of characters in a generated nonce.
pub const NONCE_LENGTH: usize = 10;

/// A source of replay-protection tokens.
///
/// Nonces guard issued capabilities against replay, so a production
/// source must be cryptographically strong and never repeat. The trait
/// exists so tests can substitute a deterministic source.
pub trait NonceGenerator: ConditionalSync {
    /// Produce `length` characters drawn from the 62-character
    /// alphanumeric alphabet.
    fn alphanumeric(&self, length: usize) -> String;
}

/// Nonce source backed by the operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNonce;

impl NonceGenerator for SystemNonce {
    fn alphanumeric(&self, length: usize) -> String {
        let mut rng = rand::thread_rng();
        let mut buffer = [0u8; 32];
        let mut nonce = String::with_capacity(length);
        while nonce.len() < length {
            rng.fill_bytes(&mut buffer);
            for byte in buffer {
                // Reject bytes past the largest multiple of the
                // alphabet size so the draw stays uniform.
                if (byte as usize) < ALPHABET.len() * 4 {
                    nonce.push(ALPHABET[byte as usize % ALPHABET.len()] as char);
                    if nonce.len() == length {
                        break;
                    }
                }
            }
        }
        nonce
    }
}
