//! Species profiles and the registry used to resolve them by name.
//!
//! A pet's species is always a concrete [`SpeciesProfile`] value, fixed at
//! creation time. Profiles come either from a registry lookup or from an
//! explicit set of stat caps; names that are not registered resolve to a
//! default profile so that any species name typed by a player is playable.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STAT_MAX;

/// The five vital stats, used both for current values and for caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hunger: i32,
    pub happiness: i32,
    pub health: i32,
    pub energy: i32,
    pub cleanliness: i32,
}

impl StatBlock {
    /// Every stat set to the same value.
    pub const fn uniform(value: i32) -> Self {
        Self {
            hunger: value,
            happiness: value,
            health: value,
            energy: value,
            cleanliness: value,
        }
    }

    /// Clamp each stat into `[0, cap]` for the matching cap.
    pub fn clamped(self, caps: &StatBlock) -> Self {
        Self {
            hunger: self.hunger.clamp(0, caps.hunger.max(0)),
            happiness: self.happiness.clamp(0, caps.happiness.max(0)),
            health: self.health.clamp(0, caps.health.max(0)),
            energy: self.energy.clamp(0, caps.energy.max(0)),
            cleanliness: self.cleanliness.clamp(0, caps.cleanliness.max(0)),
        }
    }

    /// `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, i32); 5] {
        [
            ("hunger", self.hunger),
            ("happiness", self.happiness),
            ("health", self.health),
            ("energy", self.energy),
            ("cleanliness", self.cleanliness),
        ]
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::uniform(DEFAULT_STAT_MAX)
    }
}

/// Static per-species data: the species name and its stat caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    name: String,
    caps: StatBlock,
}

impl SpeciesProfile {
    /// Profile with default caps. The name is trimmed and lower-cased.
    pub fn new(name: &str) -> Self {
        Self::with_caps(name, StatBlock::default())
    }

    /// Profile with explicit stat caps.
    pub fn with_caps(name: &str, caps: StatBlock) -> Self {
        Self {
            name: normalize_name(name),
            caps,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caps(&self) -> &StatBlock {
        &self.caps
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Species offered out of the box.
pub const BUILTIN_SPECIES: [&str; 3] = ["dog", "cat", "guinea pig"];

/// Lookup table of known species profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesRegistry {
    profiles: Vec<SpeciesProfile>,
}

impl SpeciesRegistry {
    /// A registry with no profiles; every name resolves to default caps.
    pub fn empty() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Add a profile, replacing any existing profile of the same name.
    pub fn register(&mut self, profile: SpeciesProfile) {
        match self.profiles.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Registered profile for `name`, case-insensitive.
    pub fn lookup(&self, name: &str) -> Option<&SpeciesProfile> {
        let key = normalize_name(name);
        self.profiles.iter().find(|p| p.name == key)
    }

    /// Registered profile for `name`, or a default-capped profile carrying
    /// the normalized name.
    pub fn resolve(&self, name: &str) -> SpeciesProfile {
        match self.lookup(name) {
            Some(profile) => profile.clone(),
            None => {
                log::debug!("species '{}' not registered, using default caps", name);
                SpeciesProfile::new(name)
            }
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.name())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for SpeciesRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for name in BUILTIN_SPECIES {
            registry.register(SpeciesProfile::new(name));
        }
        registry
    }
}
