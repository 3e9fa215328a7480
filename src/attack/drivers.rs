//! End-to-end nibble-by-nibble key recovery for the two round-reduced
//! variants this attack is published against.
//!
//! Each driver is a two-phase pipeline: Phase 1 recovers the combined round
//! key `k0' ^ k1` by saturating the nibble positions the cipher's diffusion
//! balances after the reduced round count, then Phase 2 peels that round off
//! and repeats the same elimination one layer further in to recover `k1`
//! alone. `k0` falls out by inverting the key schedule.

use {
    crate::{
        attack::{
            candidates::CandidateSet,
            parity::ParityTable,
            peel::peel_last_round,
            plaintext::{saturate, saturate_locked},
            source::BaseValueSource,
        },
        cipher::{constants::RC, key::invert_k0_prime},
    },
    docext::docext,
    std::{error::Error, fmt},
};

/// Which half of a driver's pipeline ran out of structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Recovering the combined round key `k0' ^ k1`.
    One,
    /// Recovering `k1` after peeling Phase 1's round off.
    Two,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::One => write!(f, "phase one (k0' ^ k1 recovery)"),
            Phase::Two => write!(f, "phase two (k1 recovery)"),
        }
    }
}

/// A driver gave up before every nibble position converged to a single
/// candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryError {
    pub phase: Phase,
    pub position: usize,
    pub remaining: u32,
    pub structures_tried: usize,
}

impl fmt::Display for RecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} did not converge after {} structures: nibble {} still has {} candidates",
            self.phase, self.structures_tried, self.position, self.remaining
        )
    }
}

impl Error for RecoveryError {}

/// Run one elimination phase to convergence, or until `cap` structures have
/// been tried.
fn run_phase(
    phase: Phase,
    active: &[usize],
    locked: bool,
    rc_bias: impl Fn(usize) -> u8,
    oracle: &mut dyn FnMut(u64) -> u64,
    source: &mut dyn BaseValueSource,
    peel_with: Option<u64>,
    cap: usize,
) -> Result<u64, RecoveryError> {
    let mut candidates = CandidateSet::all();
    let mut structures = 0;

    while !candidates.is_solved() {
        if structures >= cap {
            let (position, remaining) = (0..16)
                .map(|p| (p, candidates.remaining(p)))
                .find(|&(_, r)| r != 1)
                .expect("is_solved is false, so some position has != 1 candidate");
            return Err(RecoveryError { phase, position, remaining, structures_tried: structures });
        }

        let base = source.next_base();
        let plaintexts = if locked { saturate_locked(active, base) } else { saturate(active, base) };

        let mut table = ParityTable::new();
        for pt in plaintexts {
            let ct = oracle(pt);
            let observed = match peel_with {
                Some(last_round_key) => peel_last_round(ct, last_round_key),
                None => ct,
            };
            table.absorb(observed);
        }

        for position in 0..16 {
            candidates.eliminate(position, &table, rc_bias(position));
        }
        structures += 1;
    }

    Ok(candidates.recovered().expect("is_solved implies recovered"))
}

/// Positions the 4-round attack's Phase 2 drives together via
/// [`saturate_locked`]: one nibble per $M'$ column group, chosen so that
/// after one round of diffusion the resulting S-box inputs balance under the
/// correct `k1` guess.
#[docext]
const PHASE_TWO_DIAGONAL: [usize; 4] = [0, 7, 10, 13];

/// The single active position the 5-round attack's Phase 2 sweeps. Peeling
/// one round off a 5-round ciphertext already lands on the same distance
/// from the balanced layer that 4-round Phase 1 starts from, so Phase 2 here
/// reuses Phase 1's single-nibble shape rather than the 4-round diagonal.
const PHASE_TWO_SINGLE: [usize; 1] = [15];

fn recover_k1(
    oracle: &mut dyn FnMut(u64) -> u64,
    source: &mut dyn BaseValueSource,
    last_round_key: u64,
    cap: usize,
    active: &[usize],
    locked: bool,
) -> Result<u64, RecoveryError> {
    run_phase(Phase::Two, active, locked, |_| 0, oracle, source, Some(last_round_key), cap)
}

fn finish(last_round_key: u64, k1: u64) -> (u64, u64) {
    let k0_prime = last_round_key ^ k1;
    (invert_k0_prime(k0_prime), k1)
}

/// Recover `(k0, k1)` for a cipher encrypting under the 4-round reduced
/// variant, given an oracle that encrypts a chosen plaintext and a source of
/// fresh base values for each structure. `cap` bounds how many structures
/// each phase may try before giving up.
pub fn square4_full(
    oracle: &mut dyn FnMut(u64) -> u64,
    source: &mut dyn BaseValueSource,
    cap: usize,
) -> Result<(u64, u64), RecoveryError> {
    let last_round_key = run_phase(Phase::One, &[15], false, |p| RC[11][p], oracle, source, None, cap)?;
    let k1 = recover_k1(oracle, source, last_round_key, cap, &PHASE_TWO_DIAGONAL, true)?;
    Ok(finish(last_round_key, k1))
}

/// Recover `(k0, k1)` for a cipher encrypting under the 5-round reduced
/// variant. Phase 1 here saturates the three least significant nibbles at
/// once (4096 plaintexts per structure) since the balance property needs
/// more active input bits to hold one round further in. Phase 2 reverts to
/// a single active nibble rather than the 4-round attack's diagonal-4
/// structure, since peeling one round off a 5-round ciphertext leaves the
/// S-box inputs one round further from balanced than the 4-round case.
pub fn square5_full(
    oracle: &mut dyn FnMut(u64) -> u64,
    source: &mut dyn BaseValueSource,
    cap: usize,
) -> Result<(u64, u64), RecoveryError> {
    let last_round_key = run_phase(Phase::One, &[13, 14, 15], false, |p| RC[11][p], oracle, source, None, cap)?;
    let k1 = recover_k1(oracle, source, last_round_key, cap, &PHASE_TWO_SINGLE, false)?;
    Ok(finish(last_round_key, k1))
}
