//! Technical indicator implementations.

pub mod rsi;
pub mod sma;

pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};
