//! PRINCE: a 64-bit block, 128-bit key, low-latency cipher, plus an integral
//! (Square) key-recovery attack against its 4- and 5-round reduced variants.

#[cfg(test)]
mod test;

pub mod attack;
mod cipher;

pub use cipher::{decrypt, encrypt};
