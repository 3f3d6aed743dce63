//! smartstart-core — Assessment engine, game logic, and scoring.
//!
//! This crate defines the stimulus catalog, the three game engines, the
//! virtual-clock scheduler that sequences them, and the scoring logic
//! that the rest of the smartstart system builds on.

pub mod assessment;
pub mod catalog;
pub mod error;
pub mod games;
pub mod parser;
pub mod report;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod shuffle;
pub mod traits;
