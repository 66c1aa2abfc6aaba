//! Immutable sticker master data. Built once at startup and only read
//! afterwards.

use serde::{Deserialize, Serialize};

/// Star rating 1-5. Construction clamps, so out-of-range input from
/// legacy data degrades instead of failing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "u8", into = "u8")]
pub struct Rarity(u8);

impl From<u8> for Rarity {
    fn from(value: u8) -> Self {
        Rarity::new(value)
    }
}

impl From<Rarity> for u8 {
    fn from(rarity: Rarity) -> Self {
        rarity.0
    }
}

impl Rarity {
    pub const MIN: Rarity = Rarity(1);
    pub const MAX: Rarity = Rarity(5);

    pub fn new(value: u8) -> Self {
        Rarity(value.clamp(1, 5))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "ノーマル",
            2 => "レア",
            3 => "スーパーレア",
            4 => "ウルトラレア",
            _ => "レジェンド",
        }
    }

    /// Absolute difference used by tolerance checks.
    pub fn distance(self, other: Rarity) -> u8 {
        self.0.abs_diff(other.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StickerType {
    Normal,
    Puffy,
    Sparkle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StickerMaster {
    pub id: String,
    pub name: String,
    pub character: String,
    pub variant: u32,
    pub rarity: Rarity,
    pub kind: StickerType,
    pub series: String,
    pub image: String,
    /// Base conversion rate into star points.
    pub base_rate: i64,
    /// Draw weight; zero keeps the sticker out of every gacha pool.
    pub gacha_weight: u32,
    #[serde(default)]
    pub limited: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stickers: Vec<StickerMaster>,
}

impl Catalog {
    pub fn new(stickers: Vec<StickerMaster>) -> Self {
        Self { stickers }
    }

    pub fn stickers(&self) -> &[StickerMaster] {
        &self.stickers
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&StickerMaster> {
        self.stickers.iter().find(|sticker| sticker.id == id)
    }

    pub fn of_rarity(&self, rarity: Rarity) -> impl Iterator<Item = &StickerMaster> {
        self.stickers
            .iter()
            .filter(move |sticker| sticker.rarity == rarity)
    }

    pub fn of_character<'a>(
        &'a self,
        character: &'a str,
    ) -> impl Iterator<Item = &'a StickerMaster> {
        self.stickers
            .iter()
            .filter(move |sticker| sticker.character == character)
    }

    pub fn of_series<'a>(&'a self, series: &'a str) -> impl Iterator<Item = &'a StickerMaster> {
        self.stickers
            .iter()
            .filter(move |sticker| sticker.series == series)
    }

    /// Distinct series names, sorted.
    pub fn series(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .stickers
            .iter()
            .map(|sticker| sticker.series.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_clamps_out_of_range() {
        assert_eq!(Rarity::new(0), Rarity::MIN);
        assert_eq!(Rarity::new(3).get(), 3);
        assert_eq!(Rarity::new(9), Rarity::MAX);
    }

    #[test]
    fn rarity_distance_is_symmetric() {
        assert_eq!(Rarity::new(2).distance(Rarity::new(4)), 2);
        assert_eq!(Rarity::new(4).distance(Rarity::new(2)), 2);
    }
}
