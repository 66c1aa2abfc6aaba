//! Duplicate-fusion upgrade ranks. A sticker starts at Normal and is
//! promoted by consuming copies of the rank below; promotion never
//! moves backwards.
//!
//! This is a different scale from [`crate::RankLevel`] (the 1-5
//! acquisition tiers). The two must never be conflated, so they are
//! separate types with no shared integer representation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpgradeRank {
    Normal,
    Silver,
    Gold,
    Prism,
}

pub const UPGRADE_RANKS: [UpgradeRank; 4] = [
    UpgradeRank::Normal,
    UpgradeRank::Silver,
    UpgradeRank::Gold,
    UpgradeRank::Prism,
];

/// Copies of `from` consumed to produce one copy of the target rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeRequirement {
    pub from: UpgradeRank,
    pub count: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("{0:?} cannot be produced by upgrading")]
    NoRequirement(UpgradeRank),
    #[error("needs {needed} copies, have {have}")]
    NotEnoughCopies { needed: u32, have: u32 },
}

impl UpgradeRank {
    pub fn display_name(self) -> &'static str {
        match self {
            UpgradeRank::Normal => "ノーマル",
            UpgradeRank::Silver => "シルバー",
            UpgradeRank::Gold => "ゴールド",
            UpgradeRank::Prism => "プリズム",
        }
    }

    /// Gacha-style rarity suffix shown after a sticker name.
    pub fn suffix(self) -> &'static str {
        match self {
            UpgradeRank::Normal => "",
            UpgradeRank::Silver => " SR",
            UpgradeRank::Gold => " SSR",
            UpgradeRank::Prism => " UR",
        }
    }

    /// Cumulative star bonus granted at this rank.
    pub fn star_bonus(self) -> u32 {
        match self {
            UpgradeRank::Normal => 0,
            UpgradeRank::Silver => 1,
            UpgradeRank::Gold => 3,
            UpgradeRank::Prism => 5,
        }
    }

    /// Decoration marks rendered next to the name.
    pub fn mark_count(self) -> u32 {
        match self {
            UpgradeRank::Normal => 0,
            UpgradeRank::Silver => 1,
            UpgradeRank::Gold => 2,
            UpgradeRank::Prism => 3,
        }
    }

    pub fn effect(self) -> RankEffect {
        match self {
            UpgradeRank::Normal => RankEffect::None,
            UpgradeRank::Silver => RankEffect::Glow,
            UpgradeRank::Gold => RankEffect::Sparkle,
            UpgradeRank::Prism => RankEffect::Prism,
        }
    }

    pub fn next(self) -> Option<UpgradeRank> {
        match self {
            UpgradeRank::Normal => Some(UpgradeRank::Silver),
            UpgradeRank::Silver => Some(UpgradeRank::Gold),
            UpgradeRank::Gold => Some(UpgradeRank::Prism),
            UpgradeRank::Prism => None,
        }
    }

    pub fn is_max(self) -> bool {
        self == UpgradeRank::Prism
    }

    /// Copies of the rank below consumed for one copy of `self`.
    /// Normal is the floor and has no requirement.
    pub fn requirement(self) -> Option<UpgradeRequirement> {
        match self {
            UpgradeRank::Normal => None,
            UpgradeRank::Silver => Some(UpgradeRequirement {
                from: UpgradeRank::Normal,
                count: 5,
            }),
            UpgradeRank::Gold => Some(UpgradeRequirement {
                from: UpgradeRank::Silver,
                count: 2,
            }),
            UpgradeRank::Prism => Some(UpgradeRequirement {
                from: UpgradeRank::Gold,
                count: 2,
            }),
        }
    }

    /// Total Normal copies folded into one copy of this rank: the
    /// cumulative product of the requirement chain (1, 5, 10, 20).
    pub fn total_required_count(self) -> u32 {
        match self.requirement() {
            None => 1,
            Some(req) => req.from.total_required_count() * req.count,
        }
    }
}

/// Visual treatment class per upgrade rank. Carried here because the
/// tier assignment is a rule, even though rendering is not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RankEffect {
    None,
    Glow,
    Sparkle,
    Prism,
}

pub fn format_name_with_rank(name: &str, rank: UpgradeRank) -> String {
    format!("{}{}", name, rank.suffix())
}

/// Per-sticker copy counts by upgrade rank, the state an upgrade
/// transition reads and rewrites. Persistence stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct RankCounts {
    counts: HashMap<UpgradeRank, u32>,
}

impl RankCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, rank: UpgradeRank) -> u32 {
        self.counts.get(&rank).copied().unwrap_or(0)
    }

    pub fn add(&mut self, rank: UpgradeRank, quantity: u32) {
        *self.counts.entry(rank).or_insert(0) += quantity;
    }

    /// Spend copies at a rank outside the upgrade path, e.g. when they
    /// are converted into star points. Spent copies must leave the
    /// counts or they could be consumed twice.
    pub fn remove(&mut self, rank: UpgradeRank, quantity: u32) -> Result<(), UpgradeError> {
        let have = self.count(rank);
        if have < quantity {
            return Err(UpgradeError::NotEnoughCopies {
                needed: quantity,
                have,
            });
        }
        *self.counts.entry(rank).or_insert(0) -= quantity;
        Ok(())
    }

    pub fn can_upgrade(&self, target: UpgradeRank) -> Result<(), UpgradeError> {
        let req = target
            .requirement()
            .ok_or(UpgradeError::NoRequirement(target))?;
        let have = self.count(req.from);
        if have < req.count {
            return Err(UpgradeError::NotEnoughCopies {
                needed: req.count,
                have,
            });
        }
        Ok(())
    }

    /// Consume the required copies of the rank below and produce one
    /// copy of `target`.
    pub fn apply_upgrade(&mut self, target: UpgradeRank) -> Result<(), UpgradeError> {
        self.can_upgrade(target)?;
        let req = target
            .requirement()
            .ok_or(UpgradeError::NoRequirement(target))?;
        *self.counts.entry(req.from).or_insert(0) -= req.count;
        *self.counts.entry(target).or_insert(0) += 1;
        Ok(())
    }

    /// Highest rank with at least one copy, if any copies exist.
    pub fn best_rank(&self) -> Option<UpgradeRank> {
        UPGRADE_RANKS
            .iter()
            .rev()
            .copied()
            .find(|rank| self.count(*rank) > 0)
    }
}
