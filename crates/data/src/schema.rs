use serde::{Deserialize, Serialize};

pub use pokeseal_core::{Catalog, Rarity, StickerMaster, StickerType};

fn default_variants() -> u32 {
    15
}

/// One character line in the roster file. Every variant of a character
/// shares its rarity, type, series, rate and draw weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterConfig {
    pub name: String,
    pub rarity: Rarity,
    pub kind: StickerType,
    pub series: String,
    pub base_rate: i64,
    pub gacha_weight: u32,
    pub file_prefix: String,
    #[serde(default = "default_variants")]
    pub variants: u32,
    #[serde(default)]
    pub limited: bool,
}
