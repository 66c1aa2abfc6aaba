//! Trade scout matching: want/offer lists crossed between two users,
//! plus the rarity-tolerance pairing used by the mystery post.

use crate::Rarity;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SCOUT_LIST: usize = 5;

/// Rarity distance accepted when pairing blind trades.
pub const RARITY_TOLERANCE: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoutSticker {
    pub sticker_id: String,
    pub name: String,
    pub image: String,
    pub rarity: Rarity,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoutError {
    #[error("scout list is limited to {MAX_SCOUT_LIST} stickers")]
    ListFull,
    #[error("sticker is already on the list")]
    Duplicate,
}

/// Bounded want/offer list, at most [`MAX_SCOUT_LIST`] distinct
/// stickers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutList {
    stickers: Vec<ScoutSticker>,
}

impl ScoutList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stickers(&self) -> &[ScoutSticker] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn push(&mut self, sticker: ScoutSticker) -> Result<(), ScoutError> {
        if self.stickers.len() >= MAX_SCOUT_LIST {
            return Err(ScoutError::ListFull);
        }
        if self.contains(&sticker.sticker_id) {
            return Err(ScoutError::Duplicate);
        }
        self.stickers.push(sticker);
        Ok(())
    }

    pub fn remove(&mut self, sticker_id: &str) -> Option<ScoutSticker> {
        let idx = self
            .stickers
            .iter()
            .position(|sticker| sticker.sticker_id == sticker_id)?;
        Some(self.stickers.remove(idx))
    }

    pub fn contains(&self, sticker_id: &str) -> bool {
        self.stickers
            .iter()
            .any(|sticker| sticker.sticker_id == sticker_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoutSettings {
    pub want: ScoutList,
    pub offer: ScoutList,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoutMatch {
    /// Stickers I offer that the counterpart wants.
    pub my_offers_they_want: Vec<ScoutSticker>,
    /// Stickers I want that the counterpart offers.
    pub their_offers_i_want: Vec<ScoutSticker>,
    pub score: u32,
}

/// Sum of both intersection sizes, doubled when both directions hit:
/// a mutually useful trade outranks any one-sided one.
pub fn match_score(my_offers_they_want: usize, their_offers_i_want: usize) -> u32 {
    let base = (my_offers_they_want + their_offers_i_want) as u32;
    if my_offers_they_want > 0 && their_offers_i_want > 0 {
        base * 2
    } else {
        base
    }
}

/// Cross two users' settings. `None` when nothing intersects, so
/// zero-score matches never surface.
pub fn match_settings(mine: &ScoutSettings, theirs: &ScoutSettings) -> Option<ScoutMatch> {
    let my_offers_they_want = intersect(&mine.offer, &theirs.want);
    let their_offers_i_want = intersect(&mine.want, &theirs.offer);
    let score = match_score(my_offers_they_want.len(), their_offers_i_want.len());
    if score == 0 {
        return None;
    }
    Some(ScoutMatch {
        my_offers_they_want,
        their_offers_i_want,
        score,
    })
}

/// Entries of `left` present in `right`, keyed by sticker id and kept
/// in `left` order.
fn intersect(left: &ScoutList, right: &ScoutList) -> Vec<ScoutSticker> {
    left.stickers()
        .iter()
        .filter(|sticker| right.contains(&sticker.sticker_id))
        .cloned()
        .collect()
}

pub fn is_rarity_match(a: Rarity, b: Rarity) -> bool {
    a.distance(b) <= RARITY_TOLERANCE
}

/// One sticker dropped into the mystery post, waiting for a partner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostedSticker {
    pub sticker_id: String,
    pub user_id: String,
    pub rarity: Rarity,
}

/// Greedy pairing of pending posts: earliest-first, each post pairs
/// with the first later post from a different user whose rarity is
/// within tolerance. Returns index pairs into `pending`.
pub fn pair_posts(pending: &[PostedSticker]) -> Vec<(usize, usize)> {
    let mut taken = vec![false; pending.len()];
    let mut pairs = Vec::new();
    for i in 0..pending.len() {
        if taken[i] {
            continue;
        }
        for j in (i + 1)..pending.len() {
            if taken[j] || pending[i].user_id == pending[j].user_id {
                continue;
            }
            if is_rarity_match(pending[i].rarity, pending[j].rarity) {
                taken[i] = true;
                taken[j] = true;
                pairs.push((i, j));
                break;
            }
        }
    }
    pairs
}
