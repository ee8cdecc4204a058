//! Identifier generation for output file names.

use uuid::Uuid;

/// Symbols a generated code is drawn from.
pub const CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the code appended to generated file names.
pub const CODE_LEN: usize = 6;

/// Source of the short codes that keep generated targets unique.
pub trait CodeGenerator: Send {
    /// Returns a code of `len` characters from [`CODE_ALPHABET`].
    fn generate(&mut self, len: usize) -> String;
}

impl<F> CodeGenerator for F
where
    F: FnMut(usize) -> String + Send,
{
    fn generate(&mut self, len: usize) -> String {
        self(len)
    }
}

/// Draws codes from the random bits of v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

// Largest multiple of the alphabet size that fits in a byte; bytes at or
// above it are rejected so every symbol is equally likely.
const REJECT_FROM: u8 = (256 / CODE_ALPHABET.len() * CODE_ALPHABET.len()) as u8;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&mut self, len: usize) -> String {
        let mut out = String::with_capacity(len);
        while out.len() < len {
            let id = Uuid::new_v4();
            // Bytes 6 and 8 carry the version and variant bits.
            for (idx, byte) in id.as_bytes().iter().enumerate() {
                if idx == 6 || idx == 8 || *byte >= REJECT_FROM {
                    continue;
                }
                out.push(CODE_ALPHABET[*byte as usize % CODE_ALPHABET.len()] as char);
                if out.len() == len {
                    break;
                }
            }
        }
        out
    }
}
