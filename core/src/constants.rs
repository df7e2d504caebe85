//! Ledger and distribution constants

/// Maximum memo length in bytes
pub const MAX_MEMO_BYTES: usize = 256;

/// Largest absolute raw amount an asset may carry (2^62 - 1)
pub const MAX_ASSET_AMOUNT: i64 = (1 << 62) - 1;

/// Largest supported decimal precision for a symbol
pub const MAX_PRECISION: u8 = 18;

/// Longest ticker code
pub const MAX_SYMBOL_CODE_LEN: usize = 7;

/// Longest account name
pub const MAX_ACCOUNT_NAME_LEN: usize = 12;

/// A distribution batch needs at least this many groups
pub const MIN_GROUPS: usize = 2;

/// Smallest allowed group
pub const MIN_GROUP_SIZE: usize = 4;

/// Largest allowed group, also the number of reward tiers
pub const MAX_GROUP_SIZE: usize = 6;

/// Account that hosts the contract
pub const DEFAULT_CONTRACT_ACCOUNT: &str = "edencreator";

/// Default administrator
pub const DEFAULT_ADMIN: &str = "dan";

/// Primary (distribution-only) token ticker
pub const PRIMARY_TICKER: &str = "CREATOR";

/// Secondary (pool-funded) token ticker
pub const SECONDARY_TICKER: &str = "EOS";

/// Precision shared by both default symbols
pub const DEFAULT_PRECISION: u8 = 4;
