//! PetSim Headless Simulation Harness
//!
//! Plays scripted games against the pet, ledger and market rules and prints
//! a pass/fail table. Runs entirely in-process, no UI.
//!
//! Usage:
//!   cargo run -p petsim-simtest
//!   cargo run -p petsim-simtest -- --verbose
//!   cargo run -p petsim-simtest -- --seed 7 --config game.json

use clap::Parser;
use petsim_core::market::StockMarket;
use petsim_core::persistence::{load_game, load_game_json, save_game, save_game_json};
use petsim_core::prelude::*;
use petsim_logic::config::validate_config;
use petsim_logic::economy::EconomyError;
use petsim_logic::species::{SpeciesProfile, StatBlock};
use tracing::info;

const DEFAULT_SEED: u64 = 42;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Parser)]
#[command(name = "petsim-simtest")]
#[command(about = "Play scripted PetSim games and check the rules")]
struct Options {
    /// Print every check and debug-level logs
    #[arg(long)]
    verbose: bool,

    /// Market seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game configuration
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<String>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();
}

fn load_config(options: &Options) -> Result<GameConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path, e))?;
            serde_json::from_str(&text).map_err(|e| format!("bad config {}: {}", path, e))?
        }
        None => GameConfig::default(),
    };
    config.market_seed = options.seed.or(config.market_seed).or(Some(DEFAULT_SEED));
    Ok(config)
}

fn main() {
    let options = Options::parse();
    init_logging(options.verbose);
    let verbose = options.verbose;

    println!("=== PetSim Simulation Harness ===\n");

    let config = match load_config(&options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    info!(seed = ?config.market_seed, "configuration loaded");

    let mut results = Vec::new();

    // 0. Configuration
    results.extend(validate_configuration(&config));

    // 1. Pet rules
    results.extend(validate_pet_rules(verbose));

    // 2. Ledger
    results.extend(validate_economy_rules(&config));

    // 3. Market
    results.extend(validate_market(&config, verbose));

    // 4. Full sessions and save/load
    results.extend(validate_sessions(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 0. Configuration ────────────────────────────────────────────────────

fn validate_configuration(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let problems = validate_config(config);
    vec![TestResult {
        name: "config_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!(
                "balance {}, {} categories, {} listings",
                config.starting_balance,
                config.expense_categories.len(),
                config.listings.len()
            )
        } else {
            problems.join("; ")
        },
    }]
}

// ── 1. Pet rules ────────────────────────────────────────────────────────

fn within_caps(stats: &StatBlock, caps: &StatBlock) -> bool {
    stats
        .entries()
        .iter()
        .zip(caps.entries().iter())
        .all(|((_, v), (_, cap))| *v >= 0 && v <= cap)
}

fn validate_pet_rules(verbose: bool) -> Vec<TestResult> {
    println!("--- Pet Rules ---");
    let mut results = Vec::new();

    let mut registry = SpeciesRegistry::default();
    registry.register(SpeciesProfile::with_caps(
        "hamster",
        StatBlock {
            hunger: 40,
            happiness: 60,
            health: 30,
            energy: 50,
            cleanliness: 20,
        },
    ));

    // Every action keeps every stat inside its cap, for extreme inputs too
    let inputs = [i32::MIN, -1000, -1, 0, 1, 3, 20, 1000, i32::MAX];
    let mut checked = 0;
    let mut violations = Vec::new();
    for species in registry.names() {
        for &amount in &inputs {
            for start_days in [0u32, 25] {
                let mut pet = PetState::new("Sweep", registry.resolve(species));
                pet.advance_time(start_days);
                let actions: [(&str, fn(&mut PetState, i32)); 4] = [
                    ("feed", PetState::feed),
                    ("play", PetState::play),
                    ("sleep", PetState::sleep),
                    ("groom", PetState::groom),
                ];
                for (label, action) in actions {
                    let mut p = pet.clone();
                    action(&mut p, amount);
                    checked += 1;
                    if !within_caps(p.stats(), p.caps()) {
                        violations.push(format!("{} {}({})", species, label, amount));
                    }
                }
            }
        }
    }
    results.push(TestResult {
        name: "pet_stats_clamped".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} action calls stayed within caps", checked)
        } else {
            violations.join(", ")
        },
    });

    // Daily decay is exactly 2 per day while health is untouched
    let mut pet = PetState::new("Decay", registry.resolve("dog"));
    pet.advance_time(10);
    let s = *pet.stats();
    results.push(TestResult {
        name: "pet_decay_exact".into(),
        passed: s.hunger == 80
            && s.happiness == 80
            && s.energy == 80
            && s.cleanliness == 80
            && s.health == 100,
        detail: format!(
            "after 10 days: hunger={} happiness={} energy={} cleanliness={} health={}",
            s.hunger, s.happiness, s.energy, s.cleanliness, s.health
        ),
    });

    // Loss precedence: health beats hunger
    let mut doomed = PetState::restore(
        "Doomed",
        registry.resolve("cat"),
        StatBlock {
            health: 0,
            hunger: 0,
            ..StatBlock::uniform(100)
        },
        3,
        0,
    );
    let reason = doomed.detect_loss();
    results.push(TestResult {
        name: "pet_loss_precedence".into(),
        passed: reason == Some(LossReason::HealthCollapsed),
        detail: format!("{:?}", reason.map(|r| r.message())),
    });

    // Mood precedence: sick beats hungry
    let sick = PetState::restore(
        "Sick",
        registry.resolve("cat"),
        StatBlock {
            health: 10,
            hunger: 10,
            ..StatBlock::uniform(100)
        },
        0,
        0,
    );
    results.push(TestResult {
        name: "pet_mood_precedence".into(),
        passed: sick.mood() == Mood::Sick,
        detail: format!("mood = {}", sick.mood()),
    });

    // Three sad evaluations in a row end the game
    let mut sad = PetState::restore(
        "Blue",
        registry.resolve("dog"),
        StatBlock {
            happiness: 25,
            ..StatBlock::uniform(100)
        },
        0,
        0,
    );
    for _ in 0..3 {
        sad.feed(0);
    }
    let sad_reason = sad.detect_loss();
    results.push(TestResult {
        name: "pet_sad_streak".into(),
        passed: sad.sad_streak() == 3 && sad_reason == Some(LossReason::ProlongedSadness),
        detail: format!("streak {} -> {:?}", sad.sad_streak(), sad_reason),
    });

    // Neglect ends every built-in species, and stops the clock on that day
    for species in petsim_logic::species::BUILTIN_SPECIES {
        let mut pet = PetState::new("Neglect", registry.resolve(species));
        let report = pet.advance_time(10_000);
        if verbose {
            println!(
                "  {} neglected: lost on day {} ({:?})",
                species, report.days_elapsed, report.loss
            );
        }
        results.push(TestResult {
            name: format!("pet_neglect_{}", species.replace(' ', "_")),
            passed: report.triggered() && pet.age_days() == report.days_elapsed,
            detail: format!("day {}: {:?}", report.days_elapsed, report.loss),
        });
    }

    results
}

// ── 2. Ledger ───────────────────────────────────────────────────────────

fn validate_economy_rules(config: &GameConfig) -> Vec<TestResult> {
    println!("--- Economy ---");
    let mut results = Vec::new();

    let mut economy = Economy::new(1000);
    let all_in = economy.spend("food", 1000);
    let one_more = economy.spend("food", 1);
    results.push(TestResult {
        name: "economy_spend_to_zero".into(),
        passed: all_in.is_ok()
            && matches!(one_more, Err(EconomyError::InsufficientFunds { .. }))
            && economy.balance() == 0
            && economy.spent_on(ExpenseCategory::Food) == Some(1000),
        detail: format!("balance {} after {:?}", economy.balance(), one_more),
    });

    let mut rich = Economy::new(i64::MAX / 2);
    results.push(TestResult {
        name: "economy_unknown_category".into(),
        passed: rich.spend("unknown_category", 1).is_err() && rich.total_spent() == 0,
        detail: "unknown categories never spend".into(),
    });

    // Mixed activity keeps balance = start + earned - spent
    let mut ledger =
        Economy::with_categories(config.starting_balance, &config.expense_categories);
    let mut refused = 0;
    for (i, category) in config.expense_categories.iter().cycle().take(40).enumerate() {
        if ledger.spend_on(*category, (i as i64 * 37) % 90).is_err() {
            refused += 1;
        }
        if i % 5 == 0 {
            ledger.earn(i as i64 * 3);
        }
    }
    let balanced =
        ledger.balance() == ledger.starting_balance() + ledger.total_earned() - ledger.total_spent();
    results.push(TestResult {
        name: "economy_ledger_invariant".into(),
        passed: balanced && ledger.balance() >= 0,
        detail: format!(
            "balance {} spent {} earned {} ({} refused)",
            ledger.balance(),
            ledger.total_spent(),
            ledger.total_earned(),
            refused
        ),
    });

    results
}

// ── 3. Market ───────────────────────────────────────────────────────────

fn validate_market(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Stock Market ---");
    let mut results = Vec::new();
    let seed = config.market_seed.unwrap_or(DEFAULT_SEED);

    // Same seed, same calls, same outcome
    let run = |seed: u64| {
        let mut market = StockMarket::with_listings(&config.listings, Some(seed));
        let mut economy = Economy::new(10_000);
        let symbols: Vec<String> = market.symbols().map(String::from).collect();
        for day in 0..120usize {
            market.tick();
            if let Some(symbol) = symbols.get(day % symbols.len().max(1)) {
                if day % 3 == 0 {
                    let _ = market.buy(&mut economy, symbol, 2);
                } else if day % 7 == 0 {
                    let _ = market.sell(&mut economy, symbol, 1);
                }
            }
        }
        (market, economy)
    };
    let (a, econ_a) = run(seed);
    let (b, econ_b) = run(seed);
    results.push(TestResult {
        name: "market_seed_determinism".into(),
        passed: a.price_history() == b.price_history()
            && a.holdings_report() == b.holdings_report()
            && econ_a == econ_b,
        detail: format!(
            "seed {}: balance {} portfolio {:.2} profit {:.2}",
            seed,
            econ_a.balance(),
            a.portfolio_value(),
            a.total_profit()
        ),
    });

    // Floors and momentum bounds hold over a long run
    let mut long = StockMarket::with_listings(&config.listings, Some(seed));
    let mut lowest = f64::MAX;
    let mut momentum_ok = true;
    for _ in 0..2000 {
        for quote in long.tick() {
            lowest = lowest.min(quote.price);
            let m = long.momentum(&quote.symbol).unwrap_or(0.0);
            momentum_ok &= (-0.1..=0.08).contains(&m);
        }
    }
    results.push(TestResult {
        name: "market_price_floor".into(),
        passed: lowest >= 0.5,
        detail: format!("lowest price over 2000 days: {:.2}", lowest),
    });
    results.push(TestResult {
        name: "market_momentum_bounded".into(),
        passed: momentum_ok,
        detail: "momentum stayed in [-0.10, 0.08]".into(),
    });

    if verbose {
        for quote in long.quotes() {
            let projection = long.predict(&quote.symbol, 3);
            println!(
                "  {} @ {:.2} -> {:?}",
                quote.symbol,
                quote.price,
                projection.iter().map(|p| p.price).collect::<Vec<_>>()
            );
        }
    }

    // Round trip at an unchanged (post-tick, fractional) price realizes nothing
    let mut flat = StockMarket::with_listings(&config.listings, Some(seed));
    flat.tick();
    let mut economy = Economy::with_categories(config.starting_balance, &config.expense_categories);
    let start = economy.balance();
    let symbol = flat.symbols().next().map(String::from);
    let round_trip = symbol.as_deref().map(|s| {
        let bought = flat.buy(&mut economy, s, 3);
        let sold = flat.sell(&mut economy, s, 3);
        (bought.is_ok() && sold.is_ok(), flat.shares_held(s))
    });
    results.push(TestResult {
        name: "market_flat_round_trip".into(),
        passed: matches!(round_trip, Some((true, 0)))
            && flat.realized_profit().abs() < 1e-9
            && economy.balance() == start,
        detail: format!(
            "{:?}: realized {:.2}, balance {}",
            symbol,
            flat.realized_profit(),
            economy.balance()
        ),
    });

    results.push(TestResult {
        name: "market_empty_portfolio".into(),
        passed: StockMarket::new(Some(seed)).portfolio_value() == 0.0,
        detail: "no holdings, no value".into(),
    });

    results
}

// ── 4. Sessions ─────────────────────────────────────────────────────────

/// Feed, play, rest and groom whenever a stat runs low.
fn attentive_day(game: &mut GameSession) -> Result<(), ActionError> {
    game.advance_days(1)?;
    let s = *game.pet().stats();
    if s.hunger < 70 {
        game.feed()?;
    }
    if s.happiness < 70 {
        game.play()?;
    }
    if game.pet().stats().energy < 60 {
        game.sleep()?;
    }
    if game.pet().stats().cleanliness < 60 {
        game.groom()?;
    }
    Ok(())
}

fn validate_sessions(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Sessions ---");
    let mut results = Vec::new();
    let registry = SpeciesRegistry::default();

    let mut game = GameSession::new("Biscuit", "dog", &registry, config.clone());
    let mut failure = None;
    for _ in 0..60 {
        if let Err(e) = attentive_day(&mut game) {
            failure = Some(e);
            break;
        }
    }
    let snapshot = game.snapshot();
    if verbose {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => println!("  snapshot not serializable: {}", e),
        }
    }
    results.push(TestResult {
        name: "session_attentive_owner".into(),
        passed: failure.is_none() && !game.is_over(),
        detail: match &failure {
            Some(e) => format!("stopped on day {}: {}", game.pet().age_days(), e),
            None => format!(
                "day {} mood {} balance {}",
                snapshot.age_days, snapshot.mood, snapshot.balance
            ),
        },
    });

    let mut neglected = GameSession::new("Dusty", "cat", &registry, config.clone());
    let report = neglected.advance_days(1000);
    let blocked = matches!(neglected.feed(), Err(ActionError::GameOver(_)));
    results.push(TestResult {
        name: "session_neglect_game_over".into(),
        passed: report.as_ref().map(|r| r.loss.is_some()).unwrap_or(false) && blocked,
        detail: format!("{:?}", neglected.loss().map(|r| r.message())),
    });

    // Save/load round trips are integer-exact
    let mut binary = Vec::new();
    let bin_ok = save_game(&mut binary, game.pet(), game.economy())
        .and_then(|_| load_game(&binary[..], &registry))
        .map(|loaded| {
            loaded.pet.stats() == game.pet().stats()
                && loaded.pet.age_days() == game.pet().age_days()
                && loaded.economy == *game.economy()
        });
    results.push(TestResult {
        name: "persistence_bincode_round_trip".into(),
        passed: matches!(bin_ok, Ok(true)),
        detail: format!("{} bytes: {:?}", binary.len(), bin_ok.as_ref().map_err(|e| e.to_string())),
    });

    let mut text = Vec::new();
    let json_ok = save_game_json(&mut text, game.pet(), game.economy())
        .and_then(|_| load_game_json(&text[..], &registry))
        .map(|loaded| {
            loaded.pet.stats() == game.pet().stats()
                && loaded.pet.mood() == game.pet().mood()
                && loaded.economy.expenses() == game.economy().expenses()
        });
    results.push(TestResult {
        name: "persistence_json_round_trip".into(),
        passed: matches!(json_ok, Ok(true)),
        detail: format!("{} bytes: {:?}", text.len(), json_ok.as_ref().map_err(|e| e.to_string())),
    });

    results
}
