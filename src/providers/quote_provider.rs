use async_trait::async_trait;
use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };

use crate::error::Result;

/// Both balances of one wallet in nano units, plus their
/// human-readable renderings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalances {
    pub address: String,
    pub ton_balance: u128,
    pub spw_balance: u128,
    pub ton_human: String,
    pub spw_human: String,
    pub fetched_at: DateTime<Utc>,
}

impl WalletBalances {
    pub fn zero(address: &str) -> Self {
        WalletBalances {
            address: address.to_string(),
            ton_balance: 0,
            spw_balance: 0,
            ton_human: "0.00".to_string(),
            spw_human: "0.00".to_string(),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.ton_balance == 0 && self.spw_balance == 0
    }
}

/// Source of live balance quotes for a wallet address.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch TON and SPW balances for one address. The tonapi
    /// implementation is fail-soft and degrades to zeros instead of
    /// returning `Err`; the error arm exists for the aggregation
    /// routine to catch defensively.
    async fn wallet_balances(&self, address: &str) -> Result<WalletBalances>;
}
