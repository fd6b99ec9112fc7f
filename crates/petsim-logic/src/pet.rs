//! Pet state machine - vital stats, care actions, daily decay, mood and
//! loss detection.
//!
//! Every mutator clamps all five stats into `[0, cap]` for the pet's
//! species and then re-evaluates the mood to maintain the sad streak.
//! Nothing here renders or prompts; loss is reported as a value and the
//! caller decides what to do with it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{actions, decay, loss, mood};
use crate::species::{SpeciesProfile, StatBlock};

/// Derived classification of a pet's current stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Sick,
    Hungry,
    Tired,
    Dirty,
    Sad,
    Happy,
    Neutral,
}

impl Mood {
    /// Classify stats. Checks run in a fixed order and the first match wins,
    /// so a pet low on both health and hunger is `Sick`.
    pub fn from_stats(stats: &StatBlock) -> Self {
        if stats.health < mood::LOW {
            Self::Sick
        } else if stats.hunger < mood::LOW {
            Self::Hungry
        } else if stats.energy < mood::LOW {
            Self::Tired
        } else if stats.cleanliness < mood::LOW {
            Self::Dirty
        } else if stats.happiness < mood::LOW {
            Self::Sad
        } else if stats.happiness > mood::HAPPY_ABOVE {
            Self::Happy
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sick => "sick",
            Self::Hungry => "hungry",
            Self::Tired => "tired",
            Self::Dirty => "dirty",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    HealthCollapsed,
    Starved,
    Exhausted,
    Miserable,
    Filthy,
    ProlongedSadness,
}

impl LossReason {
    /// Evaluate loss conditions in precedence order.
    pub fn evaluate(stats: &StatBlock, sad_streak: u32) -> Option<Self> {
        if stats.health <= 0 {
            Some(Self::HealthCollapsed)
        } else if stats.hunger <= loss::HUNGER_FLOOR {
            Some(Self::Starved)
        } else if stats.energy <= loss::ENERGY_FLOOR {
            Some(Self::Exhausted)
        } else if stats.happiness <= 0 {
            Some(Self::Miserable)
        } else if stats.cleanliness <= 0 {
            Some(Self::Filthy)
        } else if sad_streak >= loss::SAD_STREAK_LIMIT {
            Some(Self::ProlongedSadness)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::HealthCollapsed => "Health collapsed.",
            Self::Starved => "Hunger fell too low.",
            Self::Exhausted => "Energy fell too low.",
            Self::Miserable => "Happiness hit zero.",
            Self::Filthy => "Cleanliness hit zero.",
            Self::ProlongedSadness => "Stayed sad for too long.",
        }
    }
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of [`PetState::advance_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReport {
    /// Days actually simulated; less than requested when a loss cut the batch short.
    pub days_elapsed: u32,
    pub loss: Option<LossReason>,
}

impl TimeReport {
    pub fn triggered(&self) -> bool {
        self.loss.is_some()
    }
}

/// One pet for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetState {
    name: String,
    profile: SpeciesProfile,
    stats: StatBlock,
    age_days: u32,
    sad_streak: u32,
    last_loss_reason: Option<LossReason>,
}

impl PetState {
    /// A newborn pet: every stat at its species cap.
    pub fn new(name: &str, profile: SpeciesProfile) -> Self {
        let stats = *profile.caps();
        Self {
            name: name.to_string(),
            profile,
            stats,
            age_days: 0,
            sad_streak: 0,
            last_loss_reason: None,
        }
    }

    /// Rebuild a pet from stored values. Stats are clamped to the profile caps.
    pub fn restore(
        name: &str,
        profile: SpeciesProfile,
        stats: StatBlock,
        age_days: u32,
        sad_streak: u32,
    ) -> Self {
        let stats = stats.clamped(profile.caps());
        Self {
            name: name.to_string(),
            profile,
            stats,
            age_days,
            sad_streak,
            last_loss_reason: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> &SpeciesProfile {
        &self.profile
    }

    pub fn species(&self) -> &str {
        self.profile.name()
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn caps(&self) -> &StatBlock {
        self.profile.caps()
    }

    pub fn age_days(&self) -> u32 {
        self.age_days
    }

    pub fn sad_streak(&self) -> u32 {
        self.sad_streak
    }

    pub fn last_loss_reason(&self) -> Option<LossReason> {
        self.last_loss_reason
    }

    pub fn mood(&self) -> Mood {
        Mood::from_stats(&self.stats)
    }

    /// Hunger goes up by `amount`, health by `amount / 5`.
    pub fn feed(&mut self, amount: i32) {
        self.stats.hunger = self.stats.hunger.saturating_add(amount);
        self.stats.health = self
            .stats
            .health
            .saturating_add(amount / actions::FEED_HEALTH_DIVISOR);
        self.settle();
    }

    pub fn play(&mut self, duration: i32) {
        self.stats.happiness = self
            .stats
            .happiness
            .saturating_add(duration.saturating_mul(actions::PLAY_HAPPINESS_PER_UNIT));
        self.stats.energy = self
            .stats
            .energy
            .saturating_sub(duration.saturating_mul(actions::PLAY_ENERGY_PER_UNIT));
        self.stats.hunger = self
            .stats
            .hunger
            .saturating_sub(duration.saturating_mul(actions::PLAY_HUNGER_PER_UNIT));
        self.settle();
    }

    pub fn sleep(&mut self, duration: i32) {
        self.stats.energy = self
            .stats
            .energy
            .saturating_add(duration.saturating_mul(actions::SLEEP_ENERGY_PER_UNIT));
        self.stats.hunger = self
            .stats
            .hunger
            .saturating_sub(duration.saturating_mul(actions::SLEEP_HUNGER_PER_UNIT));
        self.settle();
    }

    /// Shower the pet. Cleaner, but a little grumpier.
    pub fn groom(&mut self, duration: i32) {
        self.stats.happiness = self
            .stats
            .happiness
            .saturating_sub(duration.saturating_mul(actions::GROOM_HAPPINESS_PER_UNIT));
        self.stats.cleanliness = self
            .stats
            .cleanliness
            .saturating_add(duration.saturating_mul(actions::GROOM_CLEANLINESS_PER_UNIT));
        self.settle();
    }

    /// Age the pet day by day. The batch stops on the first day that ends
    /// in a loss; the remaining days are not simulated.
    pub fn advance_time(&mut self, days: u32) -> TimeReport {
        let mut elapsed = 0;
        for _ in 0..days {
            self.age_days = self.age_days.saturating_add(1);
            self.stats.hunger -= decay::DAILY_DECAY;
            self.stats.happiness -= decay::DAILY_DECAY;
            self.stats.energy -= decay::DAILY_DECAY;
            self.stats.cleanliness -= decay::DAILY_DECAY;
            if self.stats.hunger < decay::NEGLECT_THRESHOLD
                || self.stats.cleanliness < decay::NEGLECT_THRESHOLD
            {
                self.stats.health -= decay::NEGLECT_HEALTH_PENALTY;
            }
            self.settle();
            elapsed += 1;

            if let Some(reason) = self.detect_loss() {
                return TimeReport {
                    days_elapsed: elapsed,
                    loss: Some(reason),
                };
            }
        }
        TimeReport {
            days_elapsed: elapsed,
            loss: None,
        }
    }

    /// Check loss conditions and remember the reason when one matches.
    /// A clean check leaves the previous reason untouched.
    pub fn detect_loss(&mut self) -> Option<LossReason> {
        let reason = LossReason::evaluate(&self.stats, self.sad_streak)?;
        if self.last_loss_reason != Some(reason) {
            log::info!("{} lost at age {}: {}", self.name, self.age_days, reason);
        }
        self.last_loss_reason = Some(reason);
        Some(reason)
    }

    /// Clamp stats, then advance or reset the sad streak.
    fn settle(&mut self) {
        self.stats = self.stats.clamped(self.profile.caps());
        if self.mood() == Mood::Sad {
            self.sad_streak = self.sad_streak.saturating_add(1);
        } else {
            self.sad_streak = 0;
        }
    }
}
