//! Integral (Square) key recovery against round-reduced PRINCE.
//!
//! This exploits the cipher's zero-sum distinguisher: encrypt a plaintext
//! multiset that saturates a few input nibbles and holds the rest fixed, and
//! at 4 or 5 rounds certain output nibble positions are balanced (every
//! value appears an even number of times) under the correct round-key
//! guess. [`drivers::square4_full`] and [`drivers::square5_full`] turn that
//! into full key recovery by guessing one nibble at a time.

pub mod candidates;
pub mod drivers;
pub mod parity;
pub mod peel;
pub mod plaintext;
pub mod source;

pub use drivers::{square4_full, square5_full, Phase, RecoveryError};
pub use source::BaseValueSource;
