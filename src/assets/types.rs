//! DAS `getAssetsByOwner` request and response types.

use serde::{Deserialize, Serialize};

/// One page of assets owned by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPage {
    pub total: u64,
    pub limit: u64,
    pub page: u64,
    pub items: Vec<AssetRecord>,
    /// Present when native-balance enrichment is requested.
    #[serde(rename = "nativeBalance", default, skip_serializing_if = "Option::is_none")]
    pub native_balance: Option<NativeBalance>,
}

impl AssetPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether more assets exist beyond this page.
    ///
    /// The lister never follows up on this; it is informational.
    pub fn is_truncated(&self) -> bool {
        self.total > self.page.saturating_mul(self.limit)
    }
}

/// Snapshot of one owned token or collectible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Interface tag, e.g. `V1_NFT`, `ProgrammableNFT`, `FungibleToken`.
    pub interface: String,
    pub id: String,
    #[serde(default)]
    pub content: Option<AssetContent>,
    #[serde(default)]
    pub authorities: Vec<Authority>,
    #[serde(default)]
    pub compression: Option<Compression>,
    #[serde(default)]
    pub grouping: Vec<Grouping>,
    #[serde(default)]
    pub royalty: Option<Royalty>,
    #[serde(default)]
    pub creators: Vec<Creator>,
    pub ownership: Ownership,
    #[serde(default)]
    pub supply: Option<Supply>,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub burnt: bool,
    /// Fungible token details, present when fungibles are requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
}

impl AssetRecord {
    /// Display name from the off-chain metadata, if any.
    pub fn name(&self) -> Option<&str> {
        self.content
            .as_ref()
            .and_then(|c| c.metadata.as_ref())
            .and_then(|m| m.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn is_fungible(&self) -> bool {
        matches!(self.interface.as_str(), "FungibleToken" | "FungibleAsset")
    }

    pub fn is_compressed(&self) -> bool {
        self.compression.as_ref().is_some_and(|c| c.compressed)
    }

    /// Collection address from the grouping metadata.
    pub fn collection(&self) -> Option<&str> {
        self.grouping
            .iter()
            .find(|g| g.group_key == "collection")
            .and_then(|g| g.group_value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetContent {
    #[serde(rename = "$schema")]
    pub schema: Option<String>,
    pub json_uri: Option<String>,
    pub files: Vec<AssetFile>,
    pub metadata: Option<AssetMetadata>,
    pub links: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetFile {
    pub uri: Option<String>,
    pub cdn_uri: Option<String>,
    pub mime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub token_standard: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authority {
    pub address: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// State-compression metadata for compressed NFTs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compression {
    pub eligible: bool,
    pub compressed: bool,
    pub data_hash: String,
    pub creator_hash: String,
    pub asset_hash: String,
    pub tree: String,
    pub seq: u64,
    pub leaf_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    pub group_key: String,
    #[serde(default)]
    pub group_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Royalty {
    pub royalty_model: String,
    pub target: Option<String>,
    pub percent: f64,
    pub basis_points: u32,
    pub primary_sale_happened: bool,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub address: String,
    #[serde(default)]
    pub share: u32,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    #[serde(default)]
    pub frozen: bool,
    #[serde(default)]
    pub delegated: bool,
    #[serde(default)]
    pub delegate: Option<String>,
    #[serde(default)]
    pub ownership_model: String,
    pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supply {
    pub print_max_supply: Option<u64>,
    pub print_current_supply: Option<u64>,
    pub edition_nonce: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenInfo {
    pub symbol: Option<String>,
    pub balance: Option<u64>,
    pub supply: Option<u64>,
    pub decimals: Option<u8>,
    pub token_program: Option<String>,
    pub associated_token_address: Option<String>,
    pub price_info: Option<TokenPriceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenPriceInfo {
    pub price_per_token: f64,
    pub total_price: f64,
    pub currency: String,
}

/// Native SOL holdings reported alongside the asset list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeBalance {
    pub lamports: u64,
    pub price_per_sol: Option<f64>,
    pub total_price: Option<f64>,
}

/// Enrichment flags sent with every listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_fungible: bool,
    pub show_native_balance: bool,
    pub show_inscription: bool,
}

impl DisplayOptions {
    /// Fungible tokens, native balance and inscription data all included.
    pub const ENRICHED: Self = Self {
        show_fungible: true,
        show_native_balance: true,
        show_inscription: true,
    };
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAssetsByOwnerParams<'a> {
    pub owner_address: &'a str,
    pub page: u32,
    pub limit: u32,
    pub display_options: DisplayOptions,
}
