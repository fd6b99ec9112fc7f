//! PetSim Core - Game Engine
//!
//! Wires the pure rules from `petsim_logic` (pet, ledger, config) to the
//! pieces that need randomness or I/O:
//! - **market**: seeded momentum random walk with a holdings ledger
//! - **engine**: `GameSession`, one pet + economy + market per game
//! - **persistence**: versioned save/load in bincode or JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use petsim_core::prelude::*;
//!
//! let registry = SpeciesRegistry::default();
//! let mut game = GameSession::new("Biscuit", "dog", &registry, GameConfig::default());
//!
//! loop {
//!     let report = game.advance_days(1).expect("game over");
//!     if report.loss.is_some() {
//!         break;
//!     }
//!     let _ = game.feed();
//! }
//! ```

pub mod market;
pub mod engine;
pub mod persistence;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{ActionError, ActionOutcome, DayReport, GameSession, SessionSnapshot};
    pub use crate::market::{HoldingLine, Quote, StockMarket, TradeError, TradeReceipt};
    pub use petsim_logic::config::GameConfig;
    pub use petsim_logic::economy::{Economy, ExpenseCategory};
    pub use petsim_logic::pet::{LossReason, Mood, PetState};
    pub use petsim_logic::species::SpeciesRegistry;
}
