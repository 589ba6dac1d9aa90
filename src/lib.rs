//! Conquest engine library.
//!
//! Exposes the board representation, battle odds, action generation,
//! evaluation, and turn search for use by integration tests and the
//! self-play binary.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod resolve;
pub mod search;
pub mod selfplay;
