//! Pure simulation rules for PetSim.
//!
//! This crate holds the game rules that need neither randomness nor I/O:
//! functions and types take plain data and return results, so they are
//! unit-testable and can sit under any front end (terminal menu, GUI, or
//! the headless harness).
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Session configuration (balance, categories, listings, action costs) and validation |
//! | [`constants`] | Stat thresholds, per-action multipliers, daily decay |
//! | [`economy`] | Cash balance and categorized expense ledger |
//! | [`pet`] | Pet vitals, care actions, daily decay, mood, loss detection |
//! | [`species`] | Species profiles (stat caps) and the registry that resolves them |

pub mod config;
pub mod constants;
pub mod economy;
pub mod pet;
pub mod species;
