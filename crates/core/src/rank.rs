//! Acquisition-based rank levels (1-5). A sticker's level is driven by
//! how many copies of it were ever acquired, independent of the
//! duplicate-fusion [`crate::UpgradeRank`] scale.

use serde::{Deserialize, Serialize};

/// Cumulative `total_acquired` needed for levels 1 through 5.
pub const RANK_THRESHOLDS: [u32; 5] = [1, 3, 6, 10, 15];

/// Percent bonus applied to a sticker's base conversion rate per level.
const RATE_BONUS_PERCENT: [i64; 5] = [0, 10, 25, 50, 100];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RankLevel {
    R1,
    R2,
    R3,
    R4,
    R5,
}

pub const RANK_LEVELS: [RankLevel; 5] = [
    RankLevel::R1,
    RankLevel::R2,
    RankLevel::R3,
    RankLevel::R4,
    RankLevel::R5,
];

impl RankLevel {
    pub const MAX: RankLevel = RankLevel::R5;

    /// Highest level whose threshold is covered by `total_acquired`.
    /// Total and monotone; level 1 is the floor even at zero.
    pub fn for_total(total_acquired: u32) -> RankLevel {
        let mut level = RankLevel::R1;
        for (idx, threshold) in RANK_THRESHOLDS.iter().enumerate() {
            if total_acquired >= *threshold {
                level = RANK_LEVELS[idx];
            }
        }
        level
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 1-based level number for display.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn threshold(self) -> u32 {
        RANK_THRESHOLDS[self.index()]
    }

    pub fn next(self) -> Option<RankLevel> {
        RANK_LEVELS.get(self.index() + 1).copied()
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }
}

/// Copies still needed to reach the next level, `None` at level 5.
pub fn next_rank_requirement(total_acquired: u32) -> Option<u32> {
    let next = RankLevel::for_total(total_acquired).next()?;
    Some(next.threshold().saturating_sub(total_acquired))
}

/// Progress toward the next level as a percentage, interpolated
/// between the current and next thresholds. 100 at max level.
pub fn rank_progress(total_acquired: u32) -> u8 {
    let level = RankLevel::for_total(total_acquired);
    let Some(next) = level.next() else {
        return 100;
    };
    let current = level.threshold();
    let span = next.threshold() - current;
    let into = total_acquired.saturating_sub(current).min(span);
    ((into * 100) / span) as u8
}

/// `floor(base_rate * (1 + bonus/100))` with the per-level bonus table.
pub fn rate_with_bonus(base_rate: i64, level: RankLevel) -> i64 {
    let bonus = RATE_BONUS_PERCENT[level.index()];
    base_rate + base_rate * bonus / 100
}
