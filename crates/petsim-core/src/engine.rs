//! Game session - main entry point for playing a pet

use std::fmt;
use std::io::{Read, Write};

use petsim_logic::config::{validate_config, GameConfig};
use petsim_logic::economy::{Economy, EconomyError, ExpenseCategory};
use petsim_logic::pet::{LossReason, Mood, PetState};
use petsim_logic::species::{SpeciesRegistry, StatBlock};
use serde::Serialize;

use crate::market::{HoldingLine, PricePoint, Quote, StockMarket, TradeError, TradeReceipt};
use crate::persistence::{self, LoadedGame, SaveError};

/// Window used for the session's moving-average view.
pub const DEFAULT_MA_WINDOW: usize = 3;
/// Horizon used for the session's price projection.
pub const DEFAULT_PREDICT_DAYS: u32 = 5;

/// Why a session action was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The pet has already reached a loss condition.
    GameOver(LossReason),
    Funds(EconomyError),
    Trade(TradeError),
}

impl From<EconomyError> for ActionError {
    fn from(e: EconomyError) -> Self {
        ActionError::Funds(e)
    }
}

impl From<TradeError> for ActionError {
    fn from(e: TradeError) -> Self {
        ActionError::Trade(e)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::GameOver(reason) => write!(f, "Game over: {}", reason.message()),
            ActionError::Funds(e) => write!(f, "{}", e),
            ActionError::Trade(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ActionError {}

/// Result of a care action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    pub mood: Mood,
    pub loss: Option<LossReason>,
}

/// Result of advancing the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    /// Days actually simulated; fewer than requested when the pet was lost.
    pub days_elapsed: u32,
    pub loss: Option<LossReason>,
    /// Prices after the last market tick.
    pub quotes: Vec<Quote>,
}

/// Read-only view of everything a screen needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub name: String,
    pub species: String,
    pub stats: StatBlock,
    pub caps: StatBlock,
    pub mood: Mood,
    pub age_days: u32,
    pub balance: i64,
    pub expenses: Vec<(ExpenseCategory, i64)>,
    pub quotes: Vec<Quote>,
    pub holdings: Vec<HoldingLine>,
    pub portfolio_value: f64,
    pub total_profit: f64,
    pub loss: Option<LossReason>,
}

/// One pet, its ledger and its market.
pub struct GameSession {
    pet: PetState,
    economy: Economy,
    market: StockMarket,
    config: GameConfig,
    loss: Option<LossReason>,
}

impl GameSession {
    /// Start a new game. Configuration problems are logged, not fatal.
    pub fn new(name: &str, species: &str, registry: &SpeciesRegistry, config: GameConfig) -> Self {
        for problem in validate_config(&config) {
            log::warn!("config: {}", problem);
        }
        let pet = PetState::new(name, registry.resolve(species));
        let economy = Economy::with_categories(config.starting_balance, &config.expense_categories);
        let market = StockMarket::with_listings(&config.listings, config.market_seed);
        log::info!(
            "new game: {} the {} with {} in the bank",
            pet.name(),
            pet.species(),
            economy.balance()
        );
        Self {
            pet,
            economy,
            market,
            config,
            loss: None,
        }
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn market(&self) -> &StockMarket {
        &self.market
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn loss(&self) -> Option<LossReason> {
        self.loss
    }

    pub fn is_over(&self) -> bool {
        self.loss.is_some()
    }

    fn ensure_playing(&self) -> Result<(), ActionError> {
        match self.loss {
            Some(reason) => Err(ActionError::GameOver(reason)),
            None => Ok(()),
        }
    }

    fn charge(&mut self, category: ExpenseCategory, cost: i64) -> Result<(), ActionError> {
        if cost > 0 {
            self.economy.spend_on(category, cost)?;
        }
        Ok(())
    }

    fn settle(&mut self) -> ActionOutcome {
        if let Some(reason) = self.pet.detect_loss() {
            self.loss = Some(reason);
        }
        ActionOutcome {
            mood: self.pet.mood(),
            loss: self.loss,
        }
    }

    pub fn feed(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_playing()?;
        let a = &self.config.actions;
        let (cost, amount) = (a.feed_cost, a.feed_amount);
        self.charge(ExpenseCategory::Food, cost)?;
        self.pet.feed(amount);
        Ok(self.settle())
    }

    pub fn play(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_playing()?;
        let a = &self.config.actions;
        let (cost, duration) = (a.play_cost, a.play_duration);
        self.charge(ExpenseCategory::Toys, cost)?;
        self.pet.play(duration);
        Ok(self.settle())
    }

    pub fn groom(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_playing()?;
        let a = &self.config.actions;
        let (cost, duration) = (a.groom_cost, a.groom_duration);
        self.charge(ExpenseCategory::Grooming, cost)?;
        self.pet.groom(duration);
        Ok(self.settle())
    }

    pub fn sleep(&mut self) -> Result<ActionOutcome, ActionError> {
        self.ensure_playing()?;
        self.pet.sleep(self.config.actions.sleep_hours);
        Ok(self.settle())
    }

    /// Let `days` pass. The market ticks once for every day the pet lived
    /// through; a loss stops both.
    pub fn advance_days(&mut self, days: u32) -> Result<DayReport, ActionError> {
        self.ensure_playing()?;
        let report = self.pet.advance_time(days);
        let mut quotes = self.market.quotes();
        for _ in 0..report.days_elapsed {
            quotes = self.market.tick();
        }
        if let Some(reason) = report.loss {
            self.loss = Some(reason);
        }
        Ok(DayReport {
            days_elapsed: report.days_elapsed,
            loss: report.loss,
            quotes,
        })
    }

    pub fn buy(&mut self, symbol: &str, shares: u32) -> Result<TradeReceipt, ActionError> {
        self.ensure_playing()?;
        Ok(self.market.buy(&mut self.economy, symbol, shares)?)
    }

    pub fn sell(&mut self, symbol: &str, shares: u32) -> Result<TradeReceipt, ActionError> {
        self.ensure_playing()?;
        Ok(self.market.sell(&mut self.economy, symbol, shares)?)
    }

    pub fn moving_average(&self, symbol: &str) -> Vec<PricePoint> {
        self.market.moving_average(symbol, DEFAULT_MA_WINDOW)
    }

    pub fn predict(&self, symbol: &str) -> Vec<PricePoint> {
        self.market.predict(symbol, DEFAULT_PREDICT_DAYS)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let report = self.economy.report();
        SessionSnapshot {
            name: self.pet.name().to_string(),
            species: self.pet.species().to_string(),
            stats: *self.pet.stats(),
            caps: *self.pet.caps(),
            mood: self.pet.mood(),
            age_days: self.pet.age_days(),
            balance: report.balance,
            expenses: report.expenses,
            quotes: self.market.quotes(),
            holdings: self.market.holdings_report(),
            portfolio_value: self.market.portfolio_value(),
            total_profit: self.market.total_profit(),
            loss: self.loss,
        }
    }

    // ── Save/Load ───────────────────────────────────────────────────────

    /// Save the pet and ledger (bincode). The market is not saved.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game(writer, &self.pet, &self.economy)
    }

    /// Replace the pet and ledger with a saved game. Loss state is
    /// re-derived from the loaded stats.
    pub fn load<R: Read>(&mut self, reader: R, registry: &SpeciesRegistry) -> Result<(), SaveError> {
        let loaded = persistence::load_game(reader, registry)?;
        self.install(loaded);
        Ok(())
    }

    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_game_json(writer, &self.pet, &self.economy)
    }

    pub fn load_json<R: Read>(
        &mut self,
        reader: R,
        registry: &SpeciesRegistry,
    ) -> Result<(), SaveError> {
        let loaded = persistence::load_game_json(reader, registry)?;
        self.install(loaded);
        Ok(())
    }

    fn install(&mut self, loaded: LoadedGame) {
        self.pet = loaded.pet;
        self.economy = loaded.economy;
        self.loss = self.pet.detect_loss();
    }
}
