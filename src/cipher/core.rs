//! The reduced-round symmetric construction around the middle `M'` layer.

use {
    crate::cipher::{
        constants::RC,
        linear::{inv_m, m, m_prime},
        nibbles::{pack, unpack, xor},
        sbox::{inv_sub, sub},
    },
    docext::docext,
};

/// Encrypt `x` under core key `k` using `rounds` rounds (`4 <= rounds <=
/// 12`), following the forward-rounds / middle-layer / backward-rounds
/// structure that makes PRINCE's $\alpha$-reflection property hold for
/// reduced round counts too.
///
/// # Panics
///
/// Panics if `rounds` is outside `4..=12`; an out-of-range round count is a
/// programmer error, not a recoverable one.
#[docext]
pub fn prince_core(k: u64, x: u64, rounds: u8) -> u64 {
    assert!(
        (4..=12).contains(&rounds),
        "rounds must be between 4 and 12, got {rounds}"
    );

    let key = unpack(k);
    let mut s = unpack(x);
    s = xor(s, key);
    s = xor(s, RC[0]);

    let rounds = usize::from(rounds);
    let fwd = (rounds - 2 + 1) / 2; // ceil((rounds - 2) / 2)
    let bwd = (rounds - 2) / 2; // floor((rounds - 2) / 2)

    for i in 1..=fwd {
        s = sub(s);
        s = m(s);
        s = xor(s, RC[i]);
        s = xor(s, key);
    }

    s = sub(s);
    s = m_prime(s);
    s = inv_sub(s);

    for i in 1..=bwd {
        let j = i + fwd + 12 - rounds;
        s = xor(s, key);
        s = xor(s, RC[j]);
        s = inv_m(s);
        s = inv_sub(s);
    }

    s = xor(s, RC[11]);
    s = xor(s, key);
    pack(s)
}
