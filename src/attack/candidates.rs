//! Per-nibble key-candidate elimination against a [`ParityTable`].
//!
//! The Square distinguisher says: guess a round-key nibble, partially decrypt
//! every value the [`ParityTable`] says occurred an odd number of times back
//! through the S-box, and XOR the results together. A correct guess yields
//! zero; almost every wrong guess doesn't. Repeating this per structure
//! whittles each position's 16 candidates down, usually to one.

use crate::{attack::parity::ParityTable, cipher::sbox::S_BOX};

/// The surviving key-nibble candidates at each of the 16 state positions,
/// tracked as a 16-bit mask per position (bit `k` set means nibble value `k`
/// hasn't been ruled out there yet).
#[derive(Clone)]
pub struct CandidateSet {
    masks: [u16; 16],
}

impl CandidateSet {
    /// Every nibble value still a candidate at every position.
    pub fn all() -> Self {
        Self { masks: [0xffff; 16] }
    }

    /// How many candidates remain at `position`.
    pub fn remaining(&self, position: usize) -> u32 {
        self.masks[position].count_ones()
    }

    /// Whether every position has exactly one surviving candidate.
    pub fn is_solved(&self) -> bool {
        (0..16).all(|p| self.remaining(p) == 1)
    }

    /// Rule out candidates at `position` using one structure's
    /// [`ParityTable`], biasing every partial decryption by `rc_bias` (the
    /// round constant nibble folded into the key addition being undone; use
    /// `0` where no round constant applies).
    ///
    /// A no-op once `position` is already down to a single candidate.
    pub fn eliminate(&mut self, position: usize, table: &ParityTable, rc_bias: u8) {
        if self.remaining(position) <= 1 {
            return;
        }
        for k in 0u8..16 {
            if self.masks[position] & (1 << k) == 0 {
                continue;
            }
            let parity = table
                .set_values(position)
                .fold(0u8, |acc, v| acc ^ S_BOX[(v ^ k ^ rc_bias) as usize]);
            if parity != 0 {
                self.masks[position] &= !(1 << k);
            }
        }
    }

    /// The single surviving candidate at `position`, if elimination has
    /// narrowed it down that far.
    pub fn solved_nibble(&self, position: usize) -> Option<u8> {
        (self.remaining(position) == 1).then(|| self.masks[position].trailing_zeros() as u8)
    }

    /// Pack every position's sole surviving candidate into a 64-bit value,
    /// most significant nibble first. Returns `None` until [`Self::is_solved`].
    pub fn recovered(&self) -> Option<u64> {
        if !self.is_solved() {
            return None;
        }
        let mut out = 0u64;
        for position in 0..16 {
            out = (out << 4) | u64::from(self.masks[position].trailing_zeros());
        }
        Some(out)
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::sbox::INV_S_BOX;

    #[test]
    fn fresh_set_has_all_candidates_everywhere() {
        let set = CandidateSet::all();
        for p in 0..16 {
            assert_eq!(set.remaining(p), 16);
        }
        assert!(!set.is_solved());
        assert_eq!(set.recovered(), None);
    }

    #[test]
    fn single_parity_bit_narrows_to_exactly_one_candidate() {
        // With one value `v` marked, the S-box is a bijection so exactly one
        // key guess `k` satisfies S_BOX[v ^ k] == 0: k = v ^ INV_S_BOX[0].
        let v = 0x5u8;
        let expected_key = v ^ INV_S_BOX[0];

        let mut table = ParityTable::new();
        table.flip(0, v);

        let mut set = CandidateSet::all();
        set.eliminate(0, &table, 0);
        assert_eq!(set.solved_nibble(0), Some(expected_key));
    }

    #[test]
    fn rc_bias_shifts_the_surviving_candidate() {
        let v = 0x9u8;
        let rc_bias = 0x3u8;
        let expected_key = v ^ rc_bias ^ INV_S_BOX[0];

        let mut table = ParityTable::new();
        table.flip(2, v);

        let mut set = CandidateSet::all();
        set.eliminate(2, &table, rc_bias);
        assert_eq!(set.solved_nibble(2), Some(expected_key));
    }

    #[test]
    fn eliminate_is_idempotent_once_solved() {
        let v = 0x1u8;
        let mut table = ParityTable::new();
        table.flip(3, v);

        let mut set = CandidateSet::all();
        set.eliminate(3, &table, 0);
        let first = set.solved_nibble(3);
        set.eliminate(3, &table, 0);
        assert_eq!(set.solved_nibble(3), first);
    }

    #[test]
    fn two_distinct_values_eliminate_every_candidate() {
        // S_BOX is injective, so for any key both values map to distinct
        // outputs and the XOR is never zero: nothing survives.
        let mut table = ParityTable::new();
        table.flip(0, 0x2);
        table.flip(0, 0x9);

        let mut set = CandidateSet::all();
        set.eliminate(0, &table, 0);
        assert_eq!(set.remaining(0), 0);
    }
}
