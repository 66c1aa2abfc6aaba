//! Star-point conversion. Two separate currencies paths live here and
//! must stay independent:
//!
//! * the rank-level path: base rate per rarity, multiplied by type and
//!   level bonuses, floored;
//! * the upgrade-rank path: a flat per-rarity/per-rank table, linear
//!   in quantity, no bonus compounding.
//!
//! Every lookup degrades to a documented default instead of failing,
//! so malformed legacy data still converts deterministically.

use crate::{Rarity, RankLevel, StickerType, UpgradeRank};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base star points per rarity, rank-level path.
const STAR_POINT_RATES: [u64; 5] = [10, 25, 50, 100, 250];

/// Flat points per rarity x upgrade rank, upgrade path. Tuned so a
/// fully upgraded low-rarity sticker stays below the next rarity up,
/// which blocks conversion arbitrage loops.
const UPGRADE_POINTS: [[u64; 4]; 5] = [
    [5, 20, 60, 100],
    [15, 35, 80, 180],
    [50, 100, 200, 600],
    [150, 225, 450, 1200],
    [500, 750, 1250, 3000],
];

fn type_bonus(kind: StickerType) -> f64 {
    match kind {
        StickerType::Normal => 1.0,
        StickerType::Puffy => 1.2,
        StickerType::Sparkle => 1.5,
    }
}

fn rank_bonus(level: RankLevel) -> f64 {
    match level {
        RankLevel::R1 => 1.0,
        RankLevel::R2 => 1.1,
        RankLevel::R3 => 1.2,
        RankLevel::R4 => 1.3,
        RankLevel::R5 => 1.5,
    }
}

/// `floor(base * type_bonus * rank_bonus)`. Floor only - handing the
/// user fractional-rounding gains is not allowed.
pub fn sticker_points(rarity: Rarity, kind: StickerType, level: RankLevel) -> u64 {
    let base = STAR_POINT_RATES[rarity.index()] as f64;
    (base * type_bonus(kind) * rank_bonus(level)).floor() as u64
}

/// Flat table lookup for the upgrade-rank currency path.
pub fn upgrade_points(rarity: Rarity, rank: UpgradeRank) -> u64 {
    UPGRADE_POINTS[rarity.index()][rank as usize]
}

/// Upgrade-path conversion for a batch of identical stickers. Linear;
/// quantity never compounds bonuses.
pub fn convert_to_star_points(rarity: Rarity, rank: UpgradeRank, quantity: u32) -> u64 {
    upgrade_points(rarity, rank) * quantity as u64
}

pub fn format_points(points: u64) -> String {
    let digits = points.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{} SP", grouped)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Convert,
    Purchase,
    Reward,
    Bonus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Positive for credit, negative for debit.
    pub amount: i64,
    pub description: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u64, need: u64 },
}

/// Account-side star-point state. The core computes amounts; this
/// ledger is the in-process stand-in for the external balance store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarPointLedger {
    balance: u64,
    total_earned: u64,
    total_spent: u64,
    transactions: Vec<Transaction>,
}

impl StarPointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn total_earned(&self) -> u64 {
        self.total_earned
    }

    pub fn total_spent(&self) -> u64 {
        self.total_spent
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn credit(&mut self, amount: u64, kind: TransactionKind, description: &str) {
        self.balance += amount;
        self.total_earned += amount;
        self.transactions.push(Transaction {
            kind,
            amount: amount as i64,
            description: description.to_string(),
        });
    }

    pub fn debit(
        &mut self,
        amount: u64,
        kind: TransactionKind,
        description: &str,
    ) -> Result<(), LedgerError> {
        if self.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                have: self.balance,
                need: amount,
            });
        }
        self.balance -= amount;
        self.total_spent += amount;
        self.transactions.push(Transaction {
            kind,
            amount: -(amount as i64),
            description: description.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_and_ceiling_points() {
        assert_eq!(
            sticker_points(Rarity::new(1), StickerType::Normal, RankLevel::R1),
            10
        );
        // 250 * 1.5 * 1.5 = 562.5 floors to 562
        assert_eq!(
            sticker_points(Rarity::new(5), StickerType::Sparkle, RankLevel::R5),
            562
        );
    }

    #[test]
    fn points_monotone_in_rarity_and_level() {
        for kind in [StickerType::Normal, StickerType::Puffy, StickerType::Sparkle] {
            for level in crate::RANK_LEVELS {
                let mut previous = 0;
                for rarity in 1..=5 {
                    let points = sticker_points(Rarity::new(rarity), kind, level);
                    assert!(points >= previous);
                    previous = points;
                }
            }
            for rarity in 1..=5 {
                let mut previous = 0;
                for level in crate::RANK_LEVELS {
                    let points = sticker_points(Rarity::new(rarity), kind, level);
                    assert!(points >= previous);
                    previous = points;
                }
            }
        }
    }

    #[test]
    fn upgrade_path_is_linear_in_quantity() {
        assert_eq!(convert_to_star_points(Rarity::new(1), UpgradeRank::Normal, 1), 5);
        assert_eq!(convert_to_star_points(Rarity::new(1), UpgradeRank::Normal, 5), 25);
        assert_eq!(convert_to_star_points(Rarity::new(3), UpgradeRank::Prism, 2), 1200);
    }

    #[test]
    fn prism_low_rarity_stays_below_next_tiers() {
        // No arbitrage: Prism *1 must stay under a plain *4.
        assert!(
            upgrade_points(Rarity::new(1), UpgradeRank::Prism)
                < upgrade_points(Rarity::new(4), UpgradeRank::Normal)
        );
    }

    #[test]
    fn ledger_enforces_balance() {
        let mut ledger = StarPointLedger::new();
        ledger.credit(100, TransactionKind::Convert, "convert");
        assert_eq!(ledger.balance(), 100);
        assert_eq!(
            ledger.debit(250, TransactionKind::Purchase, "theme"),
            Err(LedgerError::InsufficientBalance {
                have: 100,
                need: 250
            })
        );
        ledger.debit(60, TransactionKind::Purchase, "charm").unwrap();
        assert_eq!(ledger.balance(), 40);
        assert_eq!(ledger.total_earned(), 100);
        assert_eq!(ledger.total_spent(), 60);
        assert_eq!(ledger.transactions().len(), 3);
    }

    #[test]
    fn points_format_with_thousands_groups() {
        assert_eq!(format_points(0), "0 SP");
        assert_eq!(format_points(950), "950 SP");
        assert_eq!(format_points(1234), "1,234 SP");
        assert_eq!(format_points(1234567), "1,234,567 SP");
    }
}
