//! Password-seeded key stream.
//!
//! A password's length and a fixed-size zero-padded copy of it are absorbed
//! by BLAKE3 in derive-key mode, and the extendable output is read as a
//! deterministic keystream. Equal passwords yield equal streams.

use blake3::{Hasher, OutputReader};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{BadgeError, Result};

/// Longest accepted password, in bytes.
pub const MAX_PASSWORD_LEN: usize = 64;

/// Domain separation for the stream. Changing it changes every derived key.
const STREAM_CONTEXT: &str = "badger 2013-06-01 password key stream v1";

/// Upper bound on output; key generation needs a few dozen bytes.
const MAX_STREAM_BYTES: u64 = 1 << 20;

/// Deterministic random stream seeded from a password.
///
/// The hasher state is wiped as soon as the stream is ready, and the output
/// state is wiped on drop.
pub struct PasswordStream {
    reader: OutputReader,
    produced: u64,
}

impl PasswordStream {
    /// Seed a stream from `password`.
    pub fn new(password: &[u8]) -> Result<Self> {
        if password.len() > MAX_PASSWORD_LEN {
            return Err(BadgeError::PasswordTooLong {
                len: password.len(),
                max: MAX_PASSWORD_LEN,
            });
        }

        let mut padded = Zeroizing::new([0u8; MAX_PASSWORD_LEN]);
        padded[..password.len()].copy_from_slice(password);

        // Length first, so trailing NULs are not lost in the padding.
        let mut hasher = Hasher::new_derive_key(STREAM_CONTEXT);
        hasher.update(&(password.len() as u64).to_le_bytes());
        hasher.update(&padded[..]);
        let reader = hasher.finalize_xof();
        hasher.zeroize();

        Ok(Self {
            reader,
            produced: 0,
        })
    }
}

impl RngCore for PasswordStream {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("password stream: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        let wanted = dest.len() as u64;
        if self.produced.saturating_add(wanted) > MAX_STREAM_BYTES {
            return Err(rand::Error::new("password stream exhausted"));
        }
        self.reader.fill(dest);
        self.produced += wanted;
        Ok(())
    }
}

impl CryptoRng for PasswordStream {}

impl Drop for PasswordStream {
    fn drop(&mut self) {
        self.reader.zeroize();
        self.produced = 0;
    }
}
