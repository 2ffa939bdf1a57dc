//! Asset listing through a DAS indexing service.
//!
//! # Data Flow
//! ```text
//! owner address
//!     → validate (MalformedAddress, no request)
//!     → POST getAssetsByOwner (page 1, enrichment flags on)
//!     → decode JSON-RPC envelope → AssetPage
//! ```

pub mod lister;
pub mod types;

pub use lister::AssetLister;
pub use types::{AssetPage, AssetRecord, DisplayOptions, NativeBalance, TokenInfo};
