//! The PRINCE block cipher: a 64-bit block, 128-bit key, low-latency cipher
//! built around an involutive middle layer that lets decryption under the
//! full round count be expressed as encryption with a modified key.

pub(crate) mod constants;
mod core;
pub(crate) mod key;
pub(crate) mod linear;
pub(crate) mod nibbles;
pub(crate) mod sbox;

use docext::docext;

/// Encrypt a 64-bit block `m` under the 128-bit key `(k0, k1)`, running
/// `rounds` rounds of the core permutation (`4..=12`; `12` is the full
/// cipher).
///
/// # Panics
///
/// Panics if `rounds` is outside `4..=12` (see [`core::prince_core`]).
pub fn encrypt(k0: u64, k1: u64, m: u64, rounds: u8) -> u64 {
    let k0_prime = key::derive_k0_prime(k0);
    k0_prime ^ core::prince_core(k1, k0 ^ m, rounds)
}

/// Decrypt a 64-bit block `c` under the full 12-round cipher. Reduced-round
/// variants have no corresponding decryption operation: the middle layer's
/// round constants don't reflect for `rounds < 12`, so the $\alpha$-trick
/// doesn't apply.
#[docext]
pub fn decrypt(k0: u64, k1: u64, c: u64) -> u64 {
    let k0_prime = key::derive_k0_prime(k0);
    k0 ^ core::prince_core(k1 ^ constants::ALPHA, k0_prime ^ c, 12)
}
