//! Integration tests for a whole game session.
//!
//! Exercises: GameConfig -> GameSession -> care actions + market trades
//! -> day advance -> save/load. Seeded markets only.

use petsim_core::market::{StockMarket, TradeError};
use petsim_core::prelude::*;
use petsim_logic::config::{default_listings, Listing};

// ── Helpers ────────────────────────────────────────────────────────────

fn seeded_config(seed: u64) -> GameConfig {
    GameConfig {
        market_seed: Some(seed),
        ..GameConfig::default()
    }
}

/// A fixed week of play: trade, feed daily, play or rest.
fn play_a_week(game: &mut GameSession) {
    game.buy("PAW", 4).unwrap();
    game.buy("NUT", 10).unwrap();
    for day in 0..7 {
        game.advance_days(1).unwrap();
        game.feed().unwrap();
        if day == 3 {
            game.sell("NUT", 6).unwrap();
        }
        if game.pet().stats().energy >= 50 {
            game.play().unwrap();
        } else {
            game.sleep().unwrap();
        }
    }
    game.sell("PAW", 2).unwrap();
}

// ── Determinism ───────────────────────────────────────────────────────

#[test]
fn seeded_sessions_replay_identically() {
    let registry = SpeciesRegistry::default();
    let mut a = GameSession::new("A", "cat", &registry, seeded_config(42));
    let mut b = GameSession::new("B", "cat", &registry, seeded_config(42));

    play_a_week(&mut a);
    play_a_week(&mut b);

    assert_eq!(a.market().price_history(), b.market().price_history());
    assert_eq!(a.market().holdings_report(), b.market().holdings_report());
    assert_eq!(a.economy(), b.economy());
    assert_eq!(a.pet().stats(), b.pet().stats());
    assert_eq!(
        a.market().realized_profit().to_bits(),
        b.market().realized_profit().to_bits()
    );
}

#[test]
fn different_seeds_diverge() {
    let mut a = StockMarket::new(Some(1));
    let mut b = StockMarket::new(Some(2));
    for _ in 0..30 {
        a.tick();
        b.tick();
    }
    assert_ne!(a.price_history(), b.price_history());
}

#[test]
fn market_over_custom_listings() {
    let listings = vec![Listing::new("kibble", 12.0), Listing::new("YARN", 3.0)];
    let mut market = StockMarket::with_listings(&listings, Some(8));
    let symbols: Vec<&str> = market.symbols().collect();
    assert_eq!(symbols, vec!["KIBBLE", "YARN"]);

    for _ in 0..200 {
        for quote in market.tick() {
            assert!(quote.price >= 0.5);
        }
    }
    assert_eq!(market.history("KIBBLE").len(), 201);
}

// ── Money flow ────────────────────────────────────────────────────────

#[test]
fn ledger_balances_through_trades_and_care() {
    let registry = SpeciesRegistry::default();
    let mut game = GameSession::new("Pip", "guinea pig", &registry, seeded_config(7));
    play_a_week(&mut game);

    let economy = game.economy();
    assert_eq!(
        economy.balance(),
        economy.starting_balance() + economy.total_earned() - economy.total_spent()
    );
    assert!(economy.spent_on(ExpenseCategory::Investments).unwrap_or(0) > 0);
    assert_eq!(game.market().shares_held("PAW"), 2);
    assert_eq!(game.market().shares_held("NUT"), 4);
}

#[test]
fn buying_more_than_balance_fails_cleanly() {
    let config = GameConfig {
        starting_balance: 60,
        ..seeded_config(11)
    };
    let mut game = GameSession::new("Rex", "dog", &SpeciesRegistry::default(), config);
    let err = game.buy("PAW", 2).unwrap_err();
    assert_eq!(err, ActionError::Trade(TradeError::InsufficientFunds { cost: 100, balance: 60 }));
    assert_eq!(game.economy().balance(), 60);
    assert_eq!(game.market().shares_held("PAW"), 0);
    assert_eq!(game.market().portfolio_value(), 0.0);
}

#[test]
fn untracked_investments_cannot_trade() {
    let config = GameConfig {
        expense_categories: vec![ExpenseCategory::Food, ExpenseCategory::Toys],
        listings: default_listings(),
        ..seeded_config(3)
    };
    let mut game = GameSession::new("Rex", "dog", &SpeciesRegistry::default(), config);
    assert!(matches!(
        game.buy("BONE", 1),
        Err(ActionError::Trade(TradeError::Ledger(_)))
    ));
    assert_eq!(game.economy().balance(), 1000);
}

// ── Save/Load ─────────────────────────────────────────────────────────

#[test]
fn json_save_survives_reload_into_fresh_session() {
    let registry = SpeciesRegistry::default();
    let mut game = GameSession::new("Mochi", "cat", &registry, seeded_config(21));
    play_a_week(&mut game);

    let mut buffer = Vec::new();
    game.save_json(&mut buffer).unwrap();

    let mut fresh = GameSession::new("Nobody", "dog", &registry, GameConfig::default());
    fresh.load_json(&buffer[..], &registry).unwrap();

    assert_eq!(fresh.pet().name(), "Mochi");
    assert_eq!(fresh.pet().species(), "cat");
    assert_eq!(fresh.pet().stats(), game.pet().stats());
    assert_eq!(fresh.pet().age_days(), 7);
    assert_eq!(fresh.economy().balance(), game.economy().balance());
    assert_eq!(fresh.economy().expenses(), game.economy().expenses());
    assert_eq!(fresh.pet().mood(), game.pet().mood());
    // Market state is per session
    assert_eq!(fresh.market().day(), 0);
}

#[test]
fn loading_a_lost_game_ends_the_session() {
    let registry = SpeciesRegistry::default();
    let mut lost = GameSession::new("Ghost", "dog", &registry, seeded_config(1));
    let report = lost.advance_days(500).unwrap();
    assert!(report.loss.is_some());

    let mut buffer = Vec::new();
    lost.save(&mut buffer).unwrap();

    let mut game = GameSession::new("Rex", "dog", &registry, seeded_config(1));
    game.load(&buffer[..], &registry).unwrap();
    assert_eq!(game.loss(), report.loss);
    assert!(matches!(game.feed(), Err(ActionError::GameOver(_))));
}
