//! Toy stock market - a momentum-biased random walk over a few synthetic
//! instruments, plus a holdings ledger with cost-basis accounting.
//!
//! Cash never lives here: purchases are charged to the session's
//! [`Economy`] under `investments` and sale proceeds are earned back into
//! it. With a seed, every draw (initial momentum included) comes from one
//! `StdRng`, so two markets built from the same seed and driven through
//! the same calls end up identical.

use std::collections::BTreeMap;
use std::fmt;

use petsim_logic::config::{default_listings, Listing};
use petsim_logic::economy::{Economy, EconomyError, ExpenseCategory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Prices never fall below this.
pub const PRICE_FLOOR: f64 = 0.5;
/// A crash never takes the pre-swing price below this.
const CRASH_FLOOR: f64 = 0.75;

const SWING: (f64, f64) = (-0.1, 0.1);
const SURGE_CHANCE: f64 = 0.07;
const SURGE: (f64, f64) = (0.15, 0.4);
const CRASH_CHANCE: f64 = 0.04;
const CRASH_FACTOR: (f64, f64) = (0.2, 0.7);
const CRASH_MOMENTUM: (f64, f64) = (-0.05, -0.01);

const INITIAL_MOMENTUM: (f64, f64) = (-0.02, 0.03);
const MOMENTUM_DECAY: f64 = 0.9;
const MOMENTUM_DRIFT: (f64, f64) = (-0.01, 0.02);
const MOMENTUM_MIN: f64 = -0.1;
const MOMENTUM_MAX: f64 = 0.08;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One (day, price) sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub day: u32,
    pub price: f64,
}

/// Current price of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
}

#[derive(Debug, Clone)]
struct Instrument {
    symbol: String,
    price: f64,
    momentum: f64,
    history: Vec<PricePoint>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Position {
    shares: u32,
    cost_basis: f64,
}

impl Position {
    fn average_cost(&self) -> f64 {
        if self.shares == 0 {
            0.0
        } else {
            self.cost_basis / self.shares as f64
        }
    }
}

/// One held symbol, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingLine {
    pub symbol: String,
    pub shares: u32,
    pub average_cost: f64,
    pub market_value: f64,
    pub unrealized: f64,
}

impl fmt::Display for HoldingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4} {:>4} sh @ ${:>6.2}  (${:>7.2})  P/L ${:>7.2}",
            self.symbol, self.shares, self.average_cost, self.market_value, self.unrealized
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A completed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub side: TradeSide,
    pub symbol: String,
    pub shares: u32,
    /// Market price per share at execution.
    pub price: f64,
    /// Whole-currency cash moved: cost of a buy, proceeds of a sale.
    pub amount: i64,
}

impl fmt::Display for TradeReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.side {
            TradeSide::Buy => "Bought",
            TradeSide::Sell => "Sold",
        };
        write!(f, "{} {} {} for ${}", verb, self.shares, self.symbol, self.amount)
    }
}

/// Why a trade was refused. A refused trade changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    NonPositiveShares,
    UnknownSymbol(String),
    InsufficientFunds { cost: i64, balance: i64 },
    InsufficientShares { requested: u32, held: u32 },
    /// Buying would push the position past the largest share count.
    PositionLimit { requested: u32, held: u32 },
    /// The ledger refused the charge for a reason other than funds.
    Ledger(EconomyError),
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeError::NonPositiveShares => write!(f, "Enter a positive share count."),
            TradeError::UnknownSymbol(_) => write!(f, "Unknown symbol."),
            TradeError::InsufficientFunds { .. } => write!(f, "Not enough balance."),
            TradeError::InsufficientShares { .. } => write!(f, "Not enough shares to sell."),
            TradeError::PositionLimit { .. } => write!(f, "Position is too large."),
            TradeError::Ledger(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TradeError {}

impl From<EconomyError> for TradeError {
    fn from(e: EconomyError) -> Self {
        match e {
            EconomyError::InsufficientFunds { requested, balance } => {
                TradeError::InsufficientFunds {
                    cost: requested,
                    balance,
                }
            }
            other => TradeError::Ledger(other),
        }
    }
}

/// The session's market.
#[derive(Debug, Clone)]
pub struct StockMarket {
    instruments: Vec<Instrument>,
    day: u32,
    positions: BTreeMap<String, Position>,
    realized_profit: f64,
    rng: StdRng,
}

impl StockMarket {
    /// Market over the default four listings.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_listings(&default_listings(), seed)
    }

    pub fn with_listings(listings: &[Listing], seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let instruments = listings
            .iter()
            .map(|listing| Instrument {
                symbol: listing.symbol.to_uppercase(),
                price: listing.price,
                momentum: rng.gen_range(INITIAL_MOMENTUM.0..INITIAL_MOMENTUM.1),
                history: vec![PricePoint {
                    day: 0,
                    price: listing.price,
                }],
            })
            .collect();
        Self {
            instruments,
            day: 0,
            positions: BTreeMap::new(),
            realized_profit: 0.0,
            rng,
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        let key = symbol.to_uppercase();
        self.instruments.iter().find(|i| i.symbol == key)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.instruments.iter().map(|i| i.symbol.as_str())
    }

    pub fn price(&self, symbol: &str) -> Option<f64> {
        self.instrument(symbol).map(|i| i.price)
    }

    pub fn momentum(&self, symbol: &str) -> Option<f64> {
        self.instrument(symbol).map(|i| i.momentum)
    }

    /// Current prices in listing order.
    pub fn quotes(&self) -> Vec<Quote> {
        self.instruments
            .iter()
            .map(|i| Quote {
                symbol: i.symbol.clone(),
                price: i.price,
            })
            .collect()
    }

    pub fn history(&self, symbol: &str) -> &[PricePoint] {
        self.instrument(symbol)
            .map(|i| i.history.as_slice())
            .unwrap_or(&[])
    }

    /// Full price history per symbol.
    pub fn price_history(&self) -> BTreeMap<&str, &[PricePoint]> {
        self.instruments
            .iter()
            .map(|i| (i.symbol.as_str(), i.history.as_slice()))
            .collect()
    }

    /// Advance one day and move every price.
    pub fn tick(&mut self) -> Vec<Quote> {
        self.day += 1;
        let day = self.day;
        let rng = &mut self.rng;

        for inst in &mut self.instruments {
            let mut price = inst.price;
            let mut swing = rng.gen_range(SWING.0..SWING.1) + inst.momentum;

            if rng.gen::<f64>() < SURGE_CHANCE {
                let surge = rng.gen_range(SURGE.0..SURGE.1);
                swing += surge;
                log::debug!("day {}: {} surges (+{:.2})", day, inst.symbol, surge);
            }

            if rng.gen::<f64>() < CRASH_CHANCE {
                let factor = rng.gen_range(CRASH_FACTOR.0..CRASH_FACTOR.1);
                price = (price * factor).max(CRASH_FLOOR);
                // Negative momentum keeps a crashed price down for a while.
                inst.momentum = rng.gen_range(CRASH_MOMENTUM.0..CRASH_MOMENTUM.1);
                log::debug!("day {}: {} crashes (x{:.2})", day, inst.symbol, factor);
            }

            let new_price = round2(price * (1.0 + swing)).max(PRICE_FLOOR);
            let drift = rng.gen_range(MOMENTUM_DRIFT.0..MOMENTUM_DRIFT.1);
            inst.momentum = (inst.momentum * MOMENTUM_DECAY + drift).clamp(MOMENTUM_MIN, MOMENTUM_MAX);
            inst.price = new_price;
            inst.history.push(PricePoint {
                day,
                price: new_price,
            });
        }

        self.quotes()
    }

    /// Buy at the current price; the rounded cost is charged to `investments`.
    pub fn buy(
        &mut self,
        economy: &mut Economy,
        symbol: &str,
        shares: u32,
    ) -> Result<TradeReceipt, TradeError> {
        let symbol = symbol.to_uppercase();
        if shares == 0 {
            return Err(TradeError::NonPositiveShares);
        }
        let price = self
            .price(&symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.clone()))?;

        let held = self.shares_held(&symbol);
        let total = held
            .checked_add(shares)
            .ok_or(TradeError::PositionLimit { requested: shares, held })?;

        let cost = (price * shares as f64).round() as i64;
        economy.spend_on(ExpenseCategory::Investments, cost)?;

        // Basis is the amount actually charged.
        let position = self.positions.entry(symbol.clone()).or_default();
        position.shares = total;
        position.cost_basis += cost as f64;

        log::info!("bought {} {} @ {:.2} for {}", shares, symbol, price, cost);
        Ok(TradeReceipt {
            side: TradeSide::Buy,
            symbol,
            shares,
            price,
            amount: cost,
        })
    }

    /// Sell at the current price; rounded proceeds are earned back.
    pub fn sell(
        &mut self,
        economy: &mut Economy,
        symbol: &str,
        shares: u32,
    ) -> Result<TradeReceipt, TradeError> {
        let symbol = symbol.to_uppercase();
        if shares == 0 {
            return Err(TradeError::NonPositiveShares);
        }
        let price = self
            .price(&symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.clone()))?;
        let held = self.shares_held(&symbol);
        if shares > held {
            return Err(TradeError::InsufficientShares {
                requested: shares,
                held,
            });
        }

        let proceeds = (price * shares as f64).round() as i64;
        let (sold_basis, closed) = match self.positions.get_mut(&symbol) {
            Some(position) => {
                let basis = if shares == position.shares {
                    position.cost_basis
                } else {
                    position.average_cost() * shares as f64
                };
                position.shares -= shares;
                position.cost_basis = (position.cost_basis - basis).max(0.0);
                (basis, position.shares == 0)
            }
            None => (0.0, false),
        };
        if closed {
            self.positions.remove(&symbol);
        }
        self.realized_profit += proceeds as f64 - sold_basis;
        economy.earn(proceeds);

        log::info!("sold {} {} @ {:.2} for {}", shares, symbol, price, proceeds);
        Ok(TradeReceipt {
            side: TradeSide::Sell,
            symbol,
            shares,
            price,
            amount: proceeds,
        })
    }

    pub fn shares_held(&self, symbol: &str) -> u32 {
        self.positions
            .get(&symbol.to_uppercase())
            .map_or(0, |p| p.shares)
    }

    /// Cost basis per held share, 0 when nothing is held.
    pub fn average_cost(&self, symbol: &str) -> f64 {
        self.positions
            .get(&symbol.to_uppercase())
            .map_or(0.0, Position::average_cost)
    }

    pub fn realized_profit(&self) -> f64 {
        self.realized_profit
    }

    fn held(&self) -> impl Iterator<Item = (&Instrument, &Position)> {
        self.instruments.iter().filter_map(move |inst| {
            self.positions
                .get(&inst.symbol)
                .filter(|p| p.shares > 0)
                .map(|p| (inst, p))
        })
    }

    pub fn portfolio_value(&self) -> f64 {
        round2(
            self.held()
                .map(|(inst, p)| inst.price * p.shares as f64)
                .sum(),
        )
    }

    pub fn unrealized_profit(&self) -> f64 {
        round2(
            self.held()
                .map(|(inst, p)| (inst.price - p.average_cost()) * p.shares as f64)
                .sum(),
        )
    }

    pub fn total_profit(&self) -> f64 {
        round2(self.realized_profit + self.unrealized_profit())
    }

    /// Per-symbol holdings with P/L, sorted by symbol.
    pub fn holdings_report(&self) -> Vec<HoldingLine> {
        let mut lines: Vec<HoldingLine> = self
            .held()
            .map(|(inst, p)| {
                let average_cost = p.average_cost();
                HoldingLine {
                    symbol: inst.symbol.clone(),
                    shares: p.shares,
                    average_cost,
                    market_value: inst.price * p.shares as f64,
                    unrealized: (inst.price - average_cost) * p.shares as f64,
                }
            })
            .collect();
        lines.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        lines
    }

    /// Trailing simple moving average. One point per history index once
    /// `window` samples exist, stamped with the last day in its window.
    pub fn moving_average(&self, symbol: &str, window: usize) -> Vec<PricePoint> {
        if window == 0 {
            return Vec::new();
        }
        self.history(symbol)
            .windows(window)
            .filter_map(|w| {
                let last = w.last()?;
                let mean = w.iter().map(|p| p.price).sum::<f64>() / window as f64;
                Some(PricePoint {
                    day: last.day,
                    price: round2(mean),
                })
            })
            .collect()
    }

    /// Naive projection from the last slope and current momentum. Purely
    /// illustrative; empty with fewer than two samples.
    pub fn predict(&self, symbol: &str, days_ahead: u32) -> Vec<PricePoint> {
        let Some(inst) = self.instrument(symbol) else {
            return Vec::new();
        };
        let [.., prev, last] = inst.history.as_slice() else {
            return Vec::new();
        };
        let gap = last.day.saturating_sub(prev.day).max(1) as f64;
        let slope = (last.price - prev.price) / gap;

        let mut price = last.price;
        (1..=days_ahead)
            .map(|ahead| {
                price = (price * (1.0 + inst.momentum * 0.5) + slope * 0.5).max(PRICE_FLOOR);
                PricePoint {
                    day: last.day + ahead,
                    price: round2(price),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> StockMarket {
        StockMarket::new(Some(42))
    }

    #[test]
    fn test_initial_state() {
        let m = market();
        assert_eq!(m.day(), 0);
        assert_eq!(
            m.symbols().collect::<Vec<_>>(),
            vec!["PAW", "MEOW", "BONE", "NUT"]
        );
        assert_eq!(m.price("paw"), Some(50.0));
        assert_eq!(m.history("NUT"), &[PricePoint { day: 0, price: 15.0 }]);
        for symbol in ["PAW", "MEOW", "BONE", "NUT"] {
            let momentum = m.momentum(symbol).unwrap();
            assert!((-0.02..0.03).contains(&momentum));
        }
        assert_eq!(m.portfolio_value(), 0.0);
        assert_eq!(m.total_profit(), 0.0);
    }

    #[test]
    fn test_tick_appends_history_and_respects_bounds() {
        let mut m = market();
        for day in 1..=500 {
            let quotes = m.tick();
            assert_eq!(quotes.len(), 4);
            for q in &quotes {
                assert!(q.price >= PRICE_FLOOR);
                assert_eq!((q.price * 100.0).round() / 100.0, q.price);
                let momentum = m.momentum(&q.symbol).unwrap();
                assert!((MOMENTUM_MIN..=MOMENTUM_MAX).contains(&momentum));
                assert_eq!(m.history(&q.symbol).len(), day + 1);
                assert_eq!(m.history(&q.symbol).last().unwrap().day, day as u32);
            }
        }
        assert_eq!(m.day(), 500);
    }

    #[test]
    fn test_same_seed_same_walk() {
        let mut a = StockMarket::new(Some(7));
        let mut b = StockMarket::new(Some(7));
        for _ in 0..50 {
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.price_history(), b.price_history());
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = StockMarket::new(Some(1));
        let mut b = StockMarket::new(Some(2));
        for _ in 0..20 {
            a.tick();
            b.tick();
        }
        assert_ne!(a.quotes(), b.quotes());
    }

    #[test]
    fn test_buy_charges_investments() {
        let mut m = market();
        let mut economy = Economy::new(1000);
        let receipt = m.buy(&mut economy, "paw", 3).unwrap();
        assert_eq!(receipt.symbol, "PAW");
        assert_eq!(receipt.amount, 150);
        assert_eq!(receipt.to_string(), "Bought 3 PAW for $150");
        assert_eq!(economy.balance(), 850);
        assert_eq!(economy.spent_on(ExpenseCategory::Investments), Some(150));
        assert_eq!(m.shares_held("PAW"), 3);
        assert!((m.average_cost("PAW") - 50.0).abs() < 1e-9);
        assert_eq!(m.portfolio_value(), 150.0);
    }

    #[test]
    fn test_buy_rejections_change_nothing() {
        let mut m = market();
        let mut economy = Economy::new(100);
        assert_eq!(
            m.buy(&mut economy, "PAW", 0),
            Err(TradeError::NonPositiveShares)
        );
        assert_eq!(
            m.buy(&mut economy, "WOOF", 1),
            Err(TradeError::UnknownSymbol("WOOF".into()))
        );
        let err = m.buy(&mut economy, "PAW", 3).unwrap_err();
        assert_eq!(
            err,
            TradeError::InsufficientFunds {
                cost: 150,
                balance: 100
            }
        );
        assert_eq!(err.to_string(), "Not enough balance.");
        assert_eq!(economy.balance(), 100);
        assert_eq!(m.shares_held("PAW"), 0);
    }

    #[test]
    fn test_buy_without_investments_category() {
        let mut m = market();
        let mut economy = Economy::with_categories(500, &[ExpenseCategory::Food]);
        assert!(matches!(
            m.buy(&mut economy, "NUT", 1),
            Err(TradeError::Ledger(EconomyError::UnknownCategory(_)))
        ));
        assert_eq!(m.shares_held("NUT"), 0);
    }

    #[test]
    fn test_round_trip_at_same_price_is_flat() {
        let mut m = market();
        let mut economy = Economy::new(1000);
        m.buy(&mut economy, "MEOW", 4).unwrap();
        let receipt = m.sell(&mut economy, "MEOW", 4).unwrap();
        assert_eq!(receipt.amount, 140);
        assert_eq!(receipt.to_string(), "Sold 4 MEOW for $140");
        assert_eq!(m.realized_profit(), 0.0);
        assert_eq!(m.shares_held("MEOW"), 0);
        assert_eq!(m.average_cost("MEOW"), 0.0);
        assert_eq!(economy.balance(), 1000);
        assert!(m.holdings_report().is_empty());
    }

    #[test]
    fn test_round_trip_at_fractional_price_is_flat() {
        let mut m = StockMarket::with_listings(&[Listing::new("MEOW", 46.07)], Some(42));
        let mut economy = Economy::new(10_000);
        let bought = m.buy(&mut economy, "MEOW", 3).unwrap();
        assert_eq!(bought.amount, 138);
        assert!((m.average_cost("MEOW") - 46.0).abs() < 1e-9);
        let sold = m.sell(&mut economy, "MEOW", 3).unwrap();
        assert_eq!(sold.amount, 138);
        assert_eq!(m.realized_profit(), 0.0);
        assert_eq!(economy.balance(), 10_000);
    }

    #[test]
    fn test_round_trip_after_tick_is_flat() {
        let mut m = market();
        let mut economy = Economy::new(10_000);
        m.tick();
        for symbol in ["PAW", "MEOW", "BONE", "NUT"] {
            let bought = m.buy(&mut economy, symbol, 3).unwrap();
            let sold = m.sell(&mut economy, symbol, 3).unwrap();
            assert_eq!(bought.amount, sold.amount);
            assert_eq!(m.shares_held(symbol), 0);
        }
        assert_eq!(m.realized_profit(), 0.0);
        assert_eq!(economy.balance(), 10_000);
    }

    #[test]
    fn test_buy_past_share_limit_is_refused() {
        let mut m = market();
        let mut economy = Economy::new(i64::MAX / 4);
        m.buy(&mut economy, "NUT", u32::MAX).unwrap();
        let balance = economy.balance();

        assert_eq!(
            m.buy(&mut economy, "NUT", 1),
            Err(TradeError::PositionLimit {
                requested: 1,
                held: u32::MAX
            })
        );
        assert_eq!(economy.balance(), balance);
        assert_eq!(m.shares_held("NUT"), u32::MAX);
    }

    #[test]
    fn test_sell_rejections() {
        let mut m = market();
        let mut economy = Economy::new(1000);
        m.buy(&mut economy, "BONE", 2).unwrap();
        assert_eq!(
            m.sell(&mut economy, "BONE", 0),
            Err(TradeError::NonPositiveShares)
        );
        assert_eq!(
            m.sell(&mut economy, "ZZZ", 1),
            Err(TradeError::UnknownSymbol("ZZZ".into()))
        );
        assert_eq!(
            m.sell(&mut economy, "BONE", 3),
            Err(TradeError::InsufficientShares {
                requested: 3,
                held: 2
            })
        );
        assert_eq!(m.shares_held("BONE"), 2);
        assert_eq!(economy.balance(), 960);
    }

    #[test]
    fn test_partial_sell_uses_average_cost() {
        let mut m = market();
        let mut economy = Economy::new(10_000);
        m.buy(&mut economy, "PAW", 2).unwrap();
        for _ in 0..10 {
            m.tick();
        }
        let second = m.buy(&mut economy, "PAW", 2).unwrap();
        let avg = (100.0 + second.amount as f64) / 4.0;
        assert!((m.average_cost("PAW") - avg).abs() < 1e-9);

        let receipt = m.sell(&mut economy, "PAW", 1).unwrap();
        let expected = receipt.amount as f64 - avg;
        assert!((m.realized_profit() - expected).abs() < 1e-9);
        assert_eq!(m.shares_held("PAW"), 3);
        assert!((m.average_cost("PAW") - avg).abs() < 1e-9);
    }

    #[test]
    fn test_unrealized_and_total_profit() {
        let mut m = market();
        let mut economy = Economy::new(10_000);
        m.buy(&mut economy, "NUT", 10).unwrap();
        for _ in 0..5 {
            m.tick();
        }
        let price = m.price("NUT").unwrap();
        let expected = ((price - 15.0) * 10.0 * 100.0).round() / 100.0;
        assert!((m.unrealized_profit() - expected).abs() < 1e-9);
        assert!((m.total_profit() - expected).abs() < 1e-9);

        let lines = m.holdings_report();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].symbol, "NUT");
        assert_eq!(lines[0].shares, 10);
        assert!(lines[0].to_string().starts_with("NUT    10 sh @ $ 15.00"));
    }

    #[test]
    fn test_holdings_report_sorted() {
        let mut m = market();
        let mut economy = Economy::new(10_000);
        m.buy(&mut economy, "PAW", 1).unwrap();
        m.buy(&mut economy, "BONE", 1).unwrap();
        m.buy(&mut economy, "MEOW", 1).unwrap();
        let symbols: Vec<_> = m.holdings_report().into_iter().map(|l| l.symbol).collect();
        assert_eq!(symbols, vec!["BONE", "MEOW", "PAW"]);
    }

    #[test]
    fn test_moving_average() {
        let mut m = market();
        assert!(m.moving_average("PAW", 3).is_empty());
        for _ in 0..4 {
            m.tick();
        }
        let history = m.history("PAW").to_vec();
        let ma = m.moving_average("PAW", 3);
        assert_eq!(ma.len(), 3);
        assert_eq!(ma[0].day, 2);
        assert_eq!(ma[2].day, 4);
        let mean = (history[2].price + history[3].price + history[4].price) / 3.0;
        assert!((ma[2].price - (mean * 100.0).round() / 100.0).abs() < 1e-9);

        assert_eq!(m.moving_average("PAW", 1).len(), 5);
        assert!(m.moving_average("PAW", 0).is_empty());
        assert!(m.moving_average("PAW", 6).is_empty());
        assert!(m.moving_average("NOPE", 2).is_empty());
    }

    #[test]
    fn test_predict() {
        let mut m = market();
        assert!(m.predict("PAW", 5).is_empty());
        m.tick();
        m.tick();
        let projection = m.predict("PAW", 5);
        assert_eq!(projection.len(), 5);
        assert_eq!(projection[0].day, 3);
        assert_eq!(projection[4].day, 7);
        assert!(projection.iter().all(|p| p.price >= PRICE_FLOOR));

        let history = m.history("PAW");
        let last = history[2];
        let prev = history[1];
        let slope = last.price - prev.price;
        let momentum = m.momentum("PAW").unwrap();
        let first = (last.price * (1.0 + momentum * 0.5) + slope * 0.5).max(PRICE_FLOOR);
        assert!((projection[0].price - (first * 100.0).round() / 100.0).abs() < 1e-9);

        assert!(m.predict("PAW", 0).is_empty());
    }

    #[test]
    fn test_custom_listings_uppercased() {
        let m = StockMarket::with_listings(&[Listing::new("fish", 3.0)], Some(1));
        assert_eq!(m.symbols().collect::<Vec<_>>(), vec!["FISH"]);
        assert_eq!(m.price("Fish"), Some(3.0));
    }
}
