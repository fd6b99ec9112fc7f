//! Cash ledger - a balance plus cumulative spending per expense category.
//!
//! Every outgoing payment in the game goes through [`Economy::spend`], which
//! refuses unknown categories, non-positive amounts, and anything the
//! balance cannot cover. A refused spend leaves the ledger untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_STARTING_BALANCE;

/// Spending categories a ledger can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Clothing,
    Entertainment,
    Toys,
    Vet,
    Grooming,
    Investments,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        Self::Food,
        Self::Clothing,
        Self::Entertainment,
        Self::Toys,
        Self::Vet,
        Self::Grooming,
        Self::Investments,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Clothing => "clothing",
            Self::Entertainment => "entertainment",
            Self::Toys => "toys",
            Self::Vet => "vet",
            Self::Grooming => "grooming",
            Self::Investments => "investments",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = EconomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| EconomyError::UnknownCategory(s.to_string()))
    }
}

/// Why a spend was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EconomyError {
    UnknownCategory(String),
    NonPositiveAmount(i64),
    InsufficientFunds { requested: i64, balance: i64 },
}

impl fmt::Display for EconomyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EconomyError::UnknownCategory(name) => write!(f, "Unknown expense category: {}", name),
            EconomyError::NonPositiveAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            EconomyError::InsufficientFunds { requested, balance } => write!(
                f,
                "Cannot spend {}. Current balance: {}",
                requested, balance
            ),
        }
    }
}

impl std::error::Error for EconomyError {}

/// Read-only view of the ledger for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EconomyReport {
    pub balance: i64,
    pub expenses: Vec<(ExpenseCategory, i64)>,
}

impl fmt::Display for EconomyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Current Balance: {}", self.balance)?;
        write!(f, "Expenses Breakdown:")?;
        for (category, amount) in &self.expenses {
            write!(f, "\n  {}: {}", category, amount)?;
        }
        Ok(())
    }
}

/// One session's money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Economy {
    balance: i64,
    starting_balance: i64,
    total_earned: i64,
    expenses: BTreeMap<ExpenseCategory, i64>,
}

impl Economy {
    /// Ledger tracking every known category.
    pub fn new(starting_balance: i64) -> Self {
        Self::with_categories(starting_balance, &ExpenseCategory::ALL)
    }

    /// Ledger tracking only `categories`; spends in any other category fail.
    pub fn with_categories(starting_balance: i64, categories: &[ExpenseCategory]) -> Self {
        Self {
            balance: starting_balance,
            starting_balance,
            total_earned: 0,
            expenses: categories.iter().map(|&c| (c, 0)).collect(),
        }
    }

    /// Rebuild a ledger from stored totals.
    pub fn restore(
        balance: i64,
        starting_balance: i64,
        total_earned: i64,
        expenses: BTreeMap<ExpenseCategory, i64>,
    ) -> Self {
        Self {
            balance,
            starting_balance,
            total_earned,
            expenses,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn starting_balance(&self) -> i64 {
        self.starting_balance
    }

    pub fn total_earned(&self) -> i64 {
        self.total_earned
    }

    pub fn expenses(&self) -> &BTreeMap<ExpenseCategory, i64> {
        &self.expenses
    }

    /// Lifetime spend in one category, `None` if the ledger does not track it.
    pub fn spent_on(&self, category: ExpenseCategory) -> Option<i64> {
        self.expenses.get(&category).copied()
    }

    pub fn total_spent(&self) -> i64 {
        self.expenses.values().sum()
    }

    pub fn tracks(&self, category: ExpenseCategory) -> bool {
        self.expenses.contains_key(&category)
    }

    /// Spend by category name, as typed by a player or read from a menu.
    pub fn spend(&mut self, category: &str, amount: i64) -> Result<(), EconomyError> {
        let parsed = category.parse::<ExpenseCategory>();
        match parsed {
            Ok(c) => self.spend_on(c, amount),
            Err(e) => {
                log::warn!("Cannot spend {} on {}: {}", amount, category, e);
                Err(e)
            }
        }
    }

    pub fn spend_on(&mut self, category: ExpenseCategory, amount: i64) -> Result<(), EconomyError> {
        let result = self.try_spend(category, amount);
        if let Err(e) = &result {
            log::warn!("Cannot spend {} on {}: {}", amount, category, e);
        }
        result
    }

    fn try_spend(&mut self, category: ExpenseCategory, amount: i64) -> Result<(), EconomyError> {
        let balance = self.balance;
        let total = self
            .expenses
            .get_mut(&category)
            .ok_or_else(|| EconomyError::UnknownCategory(category.to_string()))?;
        if amount <= 0 {
            return Err(EconomyError::NonPositiveAmount(amount));
        }
        if amount > balance {
            return Err(EconomyError::InsufficientFunds {
                requested: amount,
                balance,
            });
        }
        *total += amount;
        self.balance -= amount;
        Ok(())
    }

    /// Add income. Non-positive amounts are ignored; returns whether the
    /// balance changed.
    pub fn earn(&mut self, amount: i64) -> bool {
        if amount <= 0 {
            log::warn!("Earning amount must be positive, got {}", amount);
            return false;
        }
        self.balance += amount;
        self.total_earned += amount;
        true
    }

    pub fn report(&self) -> EconomyReport {
        EconomyReport {
            balance: self.balance,
            expenses: self.expenses.iter().map(|(&c, &a)| (c, a)).collect(),
        }
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}
