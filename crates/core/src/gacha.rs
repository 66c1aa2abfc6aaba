//! Weighted sticker draws. A pool is a filtered view over the catalog;
//! pool order follows catalog order so draws are reproducible for a
//! given seed.

use crate::{Catalog, Rarity, RngState, StickerMaster};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GachaType {
    Normal,
    Premium,
    Event,
    Collab,
}

impl GachaType {
    /// Pool admission rule per gacha type. Premium spans the whole
    /// catalog and leans on the weight table for its rarity bias.
    fn admits(self, sticker: &StickerMaster) -> bool {
        match self {
            GachaType::Normal => !sticker.limited,
            GachaType::Premium => true,
            GachaType::Event | GachaType::Collab => sticker.limited,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GachaError {
    #[error("gacha pool is empty or has zero total weight")]
    EmptyPool,
}

#[derive(Debug, Clone)]
pub struct GachaPool<'a> {
    gacha_type: GachaType,
    stickers: Vec<&'a StickerMaster>,
    total_weight: u64,
}

/// One row of the published drop-rate table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityRate {
    pub rarity: Rarity,
    /// Share of total weight, as a percent rounded to 2 decimals.
    pub rate: f64,
    pub count: usize,
}

impl<'a> GachaPool<'a> {
    pub fn build(catalog: &'a Catalog, gacha_type: GachaType) -> Self {
        let stickers: Vec<&StickerMaster> = catalog
            .stickers()
            .iter()
            .filter(|sticker| sticker.gacha_weight > 0 && gacha_type.admits(sticker))
            .collect();
        let total_weight = stickers
            .iter()
            .map(|sticker| sticker.gacha_weight as u64)
            .sum();
        Self {
            gacha_type,
            stickers,
            total_weight,
        }
    }

    pub fn gacha_type(&self) -> GachaType {
        self.gacha_type
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Weighted draw of a single sticker. Walks the pool in stable
    /// order subtracting weights from a uniform roll; if float drift
    /// exhausts the walk, the last entry wins.
    pub fn pull(&self, rng: &mut RngState) -> Result<&'a StickerMaster, GachaError> {
        let (last, rest) = self.stickers.split_last().ok_or(GachaError::EmptyPool)?;
        if self.total_weight == 0 {
            return Err(GachaError::EmptyPool);
        }
        let mut remaining = rng.next_f64() * self.total_weight as f64;
        for sticker in rest.iter().copied() {
            remaining -= sticker.gacha_weight as f64;
            if remaining <= 0.0 {
                return Ok(sticker);
            }
        }
        Ok(*last)
    }

    pub fn pull_many(
        &self,
        count: usize,
        rng: &mut RngState,
    ) -> Result<Vec<&'a StickerMaster>, GachaError> {
        (0..count).map(|_| self.pull(rng)).collect()
    }

    /// Uniform pick among non-limited stickers of rarity 3 or higher,
    /// used for the guaranteed-good first draw. Falls back to a
    /// regular pull when the catalog has no such stickers.
    pub fn tutorial_pull(
        catalog: &'a Catalog,
        rng: &mut RngState,
    ) -> Result<&'a StickerMaster, GachaError> {
        let good: Vec<&StickerMaster> = catalog
            .stickers()
            .iter()
            .filter(|sticker| sticker.rarity >= Rarity::new(3) && !sticker.limited)
            .collect();
        if good.is_empty() {
            return Self::build(catalog, GachaType::Normal).pull(rng);
        }
        let idx = (rng.next_u64() % good.len() as u64) as usize;
        Ok(good[idx])
    }

    /// Drop-rate table grouped by rarity, highest rarity first.
    pub fn rates(&self) -> Vec<RarityRate> {
        if self.total_weight == 0 {
            return Vec::new();
        }
        let mut rows: Vec<RarityRate> = Vec::new();
        for sticker in &self.stickers {
            match rows.iter_mut().find(|row| row.rarity == sticker.rarity) {
                Some(row) => {
                    row.rate += sticker.gacha_weight as f64;
                    row.count += 1;
                }
                None => rows.push(RarityRate {
                    rarity: sticker.rarity,
                    rate: sticker.gacha_weight as f64,
                    count: 1,
                }),
            }
        }
        for row in &mut rows {
            row.rate = (row.rate / self.total_weight as f64 * 10000.0).round() / 100.0;
        }
        rows.sort_by(|a, b| b.rarity.cmp(&a.rarity));
        rows
    }
}
