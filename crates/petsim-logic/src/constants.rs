//! Game constants - stat thresholds, per-action multipliers, daily decay.
//!
//! Plain integer constants shared by the pet rules, the session engine,
//! and the headless harness.

/// Default cap for every vital stat when a species does not override it.
pub const DEFAULT_STAT_MAX: i32 = 100;

/// Starting cash for a fresh economy.
pub const DEFAULT_STARTING_BALANCE: i64 = 1000;

pub mod decay {
    /// Points lost per day by hunger, happiness, energy and cleanliness.
    pub const DAILY_DECAY: i32 = 2;
    /// Hunger or cleanliness below this hurts health during a day.
    pub const NEGLECT_THRESHOLD: i32 = 20;
    /// Health lost on a neglected day.
    pub const NEGLECT_HEALTH_PENALTY: i32 = 5;
}

pub mod actions {
    /// Feeding adds `amount / FEED_HEALTH_DIVISOR` health.
    pub const FEED_HEALTH_DIVISOR: i32 = 5;
    pub const PLAY_HAPPINESS_PER_UNIT: i32 = 5;
    pub const PLAY_ENERGY_PER_UNIT: i32 = 3;
    pub const PLAY_HUNGER_PER_UNIT: i32 = 2;
    pub const SLEEP_ENERGY_PER_UNIT: i32 = 10;
    pub const SLEEP_HUNGER_PER_UNIT: i32 = 2;
    pub const GROOM_HAPPINESS_PER_UNIT: i32 = 2;
    pub const GROOM_CLEANLINESS_PER_UNIT: i32 = 4;
}

pub mod mood {
    /// Any of health/hunger/energy/cleanliness/happiness below this drives the mood.
    pub const LOW: i32 = 30;
    /// Happiness above this reads as happy.
    pub const HAPPY_ABOVE: i32 = 70;
}

pub mod loss {
    /// Hunger at or below this ends the game.
    pub const HUNGER_FLOOR: i32 = 5;
    /// Energy at or below this ends the game.
    pub const ENERGY_FLOOR: i32 = 5;
    /// Consecutive sad evaluations that end the game.
    pub const SAD_STREAK_LIMIT: u32 = 3;
}
