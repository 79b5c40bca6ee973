use crate::db::Wallet;
use crate::chains::ton::address::short_address;

/// Listing display: label when present, shortened address otherwise.
pub fn wallet_pick_name(wallet: &Wallet) -> String {
    wallet.label.clone().unwrap_or_else(|| short_address(&wallet.address, 10, 5))
}
