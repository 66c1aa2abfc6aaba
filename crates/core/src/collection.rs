//! Owned-sticker progression. The core only computes next states;
//! reading and writing them back belongs to the storage collaborator.

use crate::{convert_to_star_points, RankLevel, Rarity, UpgradeRank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// One user's holding of one sticker. Only Normal-rank copies gain
/// quantity from pulls; higher ranks come out of explicit upgrades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OwnedSticker {
    pub sticker_id: String,
    pub quantity: u32,
    pub total_acquired: u32,
    pub rank: RankLevel,
    pub upgrade_rank: UpgradeRank,
}

/// What a single acquisition did to the holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquisition {
    pub rank_up: bool,
    pub previous_rank: RankLevel,
    pub new_rank: RankLevel,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("conversion quantity must be positive")]
    ZeroQuantity,
    #[error("not enough copies: have {have}, asked {asked}")]
    NotEnoughCopies { have: u32, asked: u32 },
}

impl OwnedSticker {
    pub fn first_acquired(sticker_id: &str) -> Self {
        Self {
            sticker_id: sticker_id.to_string(),
            quantity: 1,
            total_acquired: 1,
            rank: RankLevel::R1,
            upgrade_rank: UpgradeRank::Normal,
        }
    }

    /// Apply one more gacha copy: bump quantity and the cumulative
    /// count, then recompute the level from the threshold table.
    pub fn record_acquisition(&mut self) -> Acquisition {
        let previous_rank = self.rank;
        self.quantity += 1;
        self.total_acquired += 1;
        self.rank = RankLevel::for_total(self.total_acquired);
        Acquisition {
            rank_up: self.rank > previous_rank,
            previous_rank,
            new_rank: self.rank,
        }
    }

    /// Remove `quantity` copies and report the star points they earn
    /// through the upgrade-rank conversion path. `total_acquired` and
    /// the level are cumulative and unaffected.
    pub fn convert_quantity(
        &mut self,
        rarity: Rarity,
        quantity: u32,
    ) -> Result<u64, ConvertError> {
        if quantity == 0 {
            return Err(ConvertError::ZeroQuantity);
        }
        if quantity > self.quantity {
            return Err(ConvertError::NotEnoughCopies {
                have: self.quantity,
                asked: quantity,
            });
        }
        self.quantity -= quantity;
        Ok(convert_to_star_points(rarity, self.upgrade_rank, quantity))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub total_stickers: usize,
    pub owned_stickers: usize,
    /// Rounded percent of the catalog owned.
    pub completion_rate: u32,
    pub max_rank_count: usize,
}

impl CollectionStats {
    pub fn measure(owned: &[OwnedSticker], catalog_len: usize) -> Self {
        let owned_stickers = owned.len();
        let max_rank_count = owned.iter().filter(|item| item.rank.is_max()).count();
        let completion_rate = if catalog_len == 0 {
            0
        } else {
            ((owned_stickers as f64 / catalog_len as f64) * 100.0).round() as u32
        };
        Self {
            total_stickers: catalog_len,
            owned_stickers,
            completion_rate,
            max_rank_count,
        }
    }
}

/// Session-scoped peel counter for the "stickiness" flavor text.
/// Owned and passed by the caller; nothing process-wide.
#[derive(Debug, Clone, Default)]
pub struct PeelCounter {
    counts: HashMap<String, u32>,
}

impl PeelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peel(&mut self, sticker_id: &str) -> u32 {
        let count = self.counts.entry(sticker_id.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, sticker_id: &str) -> u32 {
        self.counts.get(sticker_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquisitions_drive_rank_ups() {
        let mut owned = OwnedSticker::first_acquired("pofun_01");
        assert_eq!(owned.rank, RankLevel::R1);

        let second = owned.record_acquisition();
        assert!(!second.rank_up);

        // Third copy crosses the level-2 threshold.
        let third = owned.record_acquisition();
        assert!(third.rank_up);
        assert_eq!(third.previous_rank, RankLevel::R1);
        assert_eq!(third.new_rank, RankLevel::R2);
        assert_eq!(owned.quantity, 3);
        assert_eq!(owned.total_acquired, 3);
    }

    #[test]
    fn conversion_spends_quantity_not_history() {
        let mut owned = OwnedSticker::first_acquired("pofun_01");
        owned.record_acquisition();
        owned.record_acquisition();

        let points = owned.convert_quantity(Rarity::new(1), 2).unwrap();
        assert_eq!(points, 10);
        assert_eq!(owned.quantity, 1);
        assert_eq!(owned.total_acquired, 3);
        assert_eq!(owned.rank, RankLevel::R2);

        assert_eq!(
            owned.convert_quantity(Rarity::new(1), 2),
            Err(ConvertError::NotEnoughCopies { have: 1, asked: 2 })
        );
        assert_eq!(
            owned.convert_quantity(Rarity::new(1), 0),
            Err(ConvertError::ZeroQuantity)
        );
    }

    #[test]
    fn stats_count_completion_and_max_ranks() {
        let mut a = OwnedSticker::first_acquired("a");
        for _ in 0..20 {
            a.record_acquisition();
        }
        let b = OwnedSticker::first_acquired("b");
        let stats = CollectionStats::measure(&[a, b], 150);
        assert_eq!(stats.owned_stickers, 2);
        assert_eq!(stats.completion_rate, 1);
        assert_eq!(stats.max_rank_count, 1);
    }

    #[test]
    fn peel_counter_is_per_sticker() {
        let mut peels = PeelCounter::new();
        assert_eq!(peels.peel("a"), 1);
        assert_eq!(peels.peel("a"), 2);
        assert_eq!(peels.peel("b"), 1);
        assert_eq!(peels.count("a"), 2);
        assert_eq!(peels.count("missing"), 0);
    }
}
