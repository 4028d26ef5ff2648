use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub perp_index: u64,
    pub szi: i64,
    pub entry_ntl: u64,
    pub isolated_raw_usd: i64,
    pub leverage: u32,
    pub is_isolated: bool,
}

impl Position {
    pub fn is_long(&self) -> bool {
        self.szi > 0
    }

    pub fn is_short(&self) -> bool {
        self.szi < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotBalance {
    pub token_index: u64,
    pub total: u64,
    pub hold: u64,
    pub entry_ntl: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerpAssetInfo {
    pub index: u64,
    pub coin: String,
    pub margin_table_id: u64,
    pub sz_decimals: u32,
    pub max_leverage: u32,
    pub only_isolated: bool,
}

/// Raw price for one index; scale depends on the source precompile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub index: u64,
    pub raw: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Position,
    SpotBalance,
    PerpAssetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrecompileRecord {
    Position(Position),
    SpotBalance(SpotBalance),
    PerpAssetInfo(PerpAssetInfo),
}

impl PrecompileRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            PrecompileRecord::Position(_) => RecordKind::Position,
            PrecompileRecord::SpotBalance(_) => RecordKind::SpotBalance,
            PrecompileRecord::PerpAssetInfo(_) => RecordKind::PerpAssetInfo,
        }
    }

    pub fn index(&self) -> u64 {
        match self {
            PrecompileRecord::Position(position) => position.perp_index,
            PrecompileRecord::SpotBalance(balance) => balance.token_index,
            PrecompileRecord::PerpAssetInfo(info) => info.index,
        }
    }
}
