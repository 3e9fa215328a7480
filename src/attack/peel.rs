//! Peeling the last round off a ciphertext once its round key is known, to
//! expose a fresh integral distinguisher one layer further in.

use crate::cipher::{
    constants::RC,
    linear::m,
    nibbles::{pack, unpack, xor},
    sbox::sub,
};

/// Undo the cipher's final affine step (`^ RC[11]`, `^ last_round_key`) and
/// then walk back across the last backward round's `InvSBoxLayer` and
/// `InvMLayer` by applying their forward counterparts, landing on the state
/// just after that round's key addition, still XORed with the unknown `k1`.
///
/// `last_round_key` is the nibble-wise `k0' ^ k1` recovered from a prior
/// [`crate::attack::candidates::CandidateSet`] pass; it is independent of
/// how many total rounds the cipher ran, since the two layers being undone
/// here sit at the very end of every reduced variant this attack targets.
pub fn peel_last_round(ciphertext: u64, last_round_key: u64) -> u64 {
    let mut s = unpack(ciphertext ^ last_round_key);
    s = xor(s, RC[11]);
    s = sub(s);
    s = m(s);
    s = xor(s, RC[10]);
    pack(s)
}
