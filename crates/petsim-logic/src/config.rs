//! Session configuration and its validation.
//!
//! A [`GameConfig`] is read once when a session starts (from JSON, or the
//! defaults) and fixes the starting cash, the tracked expense categories,
//! the market listings and seed, and what each care action costs.
//!
//! ```
//! use petsim_logic::config::{validate_config, GameConfig};
//!
//! let mut config = GameConfig::default();
//! config.market_seed = Some(7);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STARTING_BALANCE;
use crate::economy::ExpenseCategory;

/// A tradable symbol and its opening price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: String,
    pub price: f64,
}

impl Listing {
    pub fn new(symbol: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
        }
    }
}

/// The four synthetic instruments every session starts with.
pub fn default_listings() -> Vec<Listing> {
    vec![
        Listing::new("PAW", 50.0),
        Listing::new("MEOW", 35.0),
        Listing::new("BONE", 20.0),
        Listing::new("NUT", 15.0),
    ]
}

/// Price and size of each care action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    /// Charged to `food`.
    pub feed_cost: i64,
    pub feed_amount: i32,
    /// Charged to `toys`.
    pub play_cost: i64,
    pub play_duration: i32,
    /// Charged to `grooming`; 0 makes grooming free.
    pub groom_cost: i64,
    pub groom_duration: i32,
    pub sleep_hours: i32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            feed_cost: 10,
            feed_amount: 20,
            play_cost: 5,
            play_duration: 10,
            groom_cost: 0,
            groom_duration: 5,
            sleep_hours: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_balance: i64,
    pub expense_categories: Vec<ExpenseCategory>,
    /// Fixed seed for the market's random walk (None = seeded from the OS).
    pub market_seed: Option<u64>,
    pub listings: Vec<Listing>,
    pub actions: ActionCosts,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            expense_categories: ExpenseCategory::ALL.to_vec(),
            market_seed: None,
            listings: default_listings(),
            actions: ActionCosts::default(),
        }
    }
}

/// Collect every problem with a configuration. Empty means valid.
pub fn validate_config(config: &GameConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.starting_balance < 0 {
        errors.push(format!(
            "starting_balance must not be negative (got {})",
            config.starting_balance
        ));
    }

    if config.expense_categories.is_empty() {
        errors.push("at least one expense category is required".into());
    }

    let needs_category = |category: ExpenseCategory, cost: i64| {
        cost > 0 && !config.expense_categories.contains(&category)
    };
    let a = &config.actions;
    for (label, category, cost) in [
        ("feed_cost", ExpenseCategory::Food, a.feed_cost),
        ("play_cost", ExpenseCategory::Toys, a.play_cost),
        ("groom_cost", ExpenseCategory::Grooming, a.groom_cost),
    ] {
        if cost < 0 {
            errors.push(format!("{} must not be negative (got {})", label, cost));
        }
        if needs_category(category, cost) {
            errors.push(format!(
                "{} is charged to '{}', which is not a tracked category",
                label, category
            ));
        }
    }
    for (label, value) in [
        ("feed_amount", a.feed_amount),
        ("play_duration", a.play_duration),
        ("groom_duration", a.groom_duration),
        ("sleep_hours", a.sleep_hours),
    ] {
        if value < 0 {
            errors.push(format!("{} must not be negative (got {})", label, value));
        }
    }

    if !config.listings.is_empty()
        && !config
            .expense_categories
            .contains(&ExpenseCategory::Investments)
    {
        errors.push("listings require the 'investments' expense category".into());
    }

    let mut seen: Vec<&str> = Vec::new();
    for listing in &config.listings {
        let symbol = listing.symbol.as_str();
        if symbol.trim().is_empty() {
            errors.push("listing symbol must not be blank".into());
            continue;
        }
        if symbol != symbol.to_uppercase() {
            errors.push(format!("listing symbol '{}' must be uppercase", symbol));
        }
        if seen.contains(&symbol) {
            errors.push(format!("duplicate listing symbol '{}'", symbol));
        }
        seen.push(symbol);
        if !(listing.price.is_finite() && listing.price > 0.0) {
            errors.push(format!(
                "listing '{}' needs a positive opening price (got {})",
                symbol, listing.price
            ));
        }
    }

    errors
}
