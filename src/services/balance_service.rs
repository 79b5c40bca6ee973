use std::sync::Arc;

use chrono::Utc;

use crate::chains::ton::address::short_address;
use crate::chains::ton::provider::{ format_balance, SPW_DECIMALS, TON_DECIMALS };
use crate::db::{ Wallet, WalletStore };
use crate::providers::{ QuoteProvider, WalletBalances };

/// Aggregates live balances across all wallets of one owner.
///
/// Wallets are queried strictly in sequence; one wallet's failure is
/// recorded per-line and never aborts the batch.
pub struct BalanceService {
    store: Arc<dyn WalletStore>,
    quotes: Arc<dyn QuoteProvider>,
}

#[derive(Debug)]
pub enum BalanceOutcome {
    Fetched(WalletBalances),
    /// The provider returned an error for this wallet.
    Error,
}

#[derive(Debug)]
pub struct WalletReport {
    pub display_name: String,
    pub short_address: String,
    pub outcome: BalanceOutcome,
}

#[derive(Debug, PartialEq)]
pub struct SnapshotSummary {
    pub saved: usize,
    pub failed: usize,
}

impl BalanceService {
    pub fn new(store: Arc<dyn WalletStore>, quotes: Arc<dyn QuoteProvider>) -> Self {
        Self { store, quotes }
    }

    /// One report entry per linked wallet, or `None` when the owner has
    /// no wallets.
    pub async fn collect_reports(&self, owner_id: i64) -> Option<Vec<WalletReport>> {
        let wallets = self.store.list_wallets(owner_id).await;
        if wallets.is_empty() {
            return None;
        }

        let mut reports = Vec::with_capacity(wallets.len());
        for (i, wallet) in wallets.iter().enumerate() {
            let outcome = match self.quotes.wallet_balances(&wallet.address).await {
                Ok(balances) => BalanceOutcome::Fetched(balances),
                Err(e) => {
                    tracing::error!("balance fetch failed for {}: {}", wallet.address, e);
                    BalanceOutcome::Error
                }
            };

            reports.push(WalletReport {
                display_name: display_name(wallet, i + 1),
                short_address: short_address(&wallet.address, 8, 4),
                outcome,
            });
        }

        Some(reports)
    }

    /// The formatted multi-line balance report, or `None` when the
    /// owner has no wallets.
    pub async fn balance_report(&self, owner_id: i64) -> Option<String> {
        self.collect_reports(owner_id).await.map(|reports| render_report(&reports))
    }

    /// Persist one snapshot per wallet; per-wallet failures are counted
    /// independently. `None` when the owner has no wallets.
    pub async fn snapshot_all(&self, owner_id: i64) -> Option<SnapshotSummary> {
        let wallets = self.store.list_wallets(owner_id).await;
        if wallets.is_empty() {
            return None;
        }

        let mut summary = SnapshotSummary { saved: 0, failed: 0 };
        for wallet in &wallets {
            match self.quotes.wallet_balances(&wallet.address).await {
                Ok(balances) => {
                    let saved = self.store.save_snapshot(
                        owner_id,
                        &wallet.address,
                        balances.ton_balance,
                        balances.spw_balance
                    ).await;

                    if saved {
                        summary.saved += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
                Err(e) => {
                    tracing::error!("snapshot fetch failed for {}: {}", wallet.address, e);
                    summary.failed += 1;
                }
            }
        }

        Some(summary)
    }
}

pub fn display_name(wallet: &Wallet, index: usize) -> String {
    wallet.label.clone().unwrap_or_else(|| format!("Wallet {}", index))
}

/// Render the balance report. Zero-balance wallets get their own line
/// but never contribute to the totals; the totals footer only appears
/// when at least one wallet returned nonzero data.
pub fn render_report(reports: &[WalletReport]) -> String {
    let mut total_ton: u128 = 0;
    let mut total_spw: u128 = 0;
    let mut has_data = false;

    let mut text = String::from("💎 *Balances:*\n\n");

    for report in reports {
        match &report.outcome {
            BalanceOutcome::Fetched(balances) if !balances.is_zero() => {
                text.push_str(
                    &format!(
                        "*{}* (`{}`)\nTON: {}\nSPW: {}\n\n",
                        report.display_name,
                        report.short_address,
                        balances.ton_human,
                        balances.spw_human
                    )
                );
                total_ton += balances.ton_balance;
                total_spw += balances.spw_balance;
                has_data = true;
            }
            BalanceOutcome::Fetched(_) => {
                text.push_str(
                    &format!(
                        "*{}* (`{}`)\nBalance: 0.00 TON, 0.00 SPW\n\n",
                        report.display_name,
                        report.short_address
                    )
                );
            }
            BalanceOutcome::Error => {
                text.push_str(&format!("*{}* - ❌ error\n\n", report.display_name));
            }
        }
    }

    if has_data {
        text.push_str(
            &format!(
                "💰 *Total:*\nTON: *{}*\nSPW: *{}*\n",
                format_balance(total_ton, TON_DECIMALS),
                format_balance(total_spw, SPW_DECIMALS)
            )
        );
    }

    text.push_str(&format!("\n_Updated: {}_", Utc::now().format("%H:%M")));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::chains::ton::provider::format_balance;
    use crate::db::memory::MemoryWalletStore;
    use crate::error::{ AppError, Result };

    const FUNDED: &str = "UQfundedfundedfundedfundedfundedfundedfunded";
    const EMPTY: &str = "UQemptyemptyemptyemptyemptyemptyemptyempty";
    const BROKEN: &str = "UQbrokenbrokenbrokenbrokenbrokenbrokenbroken";

    /// Stub provider: one funded wallet, one empty, one that errors.
    struct StubQuotes;

    #[async_trait]
    impl crate::providers::QuoteProvider for StubQuotes {
        async fn wallet_balances(&self, address: &str) -> Result<WalletBalances> {
            match address {
                BROKEN => Err(AppError::Internal("quote source down".into())),
                FUNDED => {
                    let ton = 1_500_000_000_000u128;
                    let spw = 2_000_000_000u128;
                    Ok(WalletBalances {
                        address: address.to_string(),
                        ton_balance: ton,
                        spw_balance: spw,
                        ton_human: format_balance(ton, 9),
                        spw_human: format_balance(spw, 9),
                        fetched_at: Utc::now(),
                    })
                }
                _ => Ok(WalletBalances::zero(address)),
            }
        }
    }

    async fn service_with_wallets(addresses: &[&str]) -> BalanceService {
        let store = MemoryWalletStore::new();
        for address in addresses {
            store.create_wallet(1, address, None).await;
        }
        BalanceService::new(Arc::new(store), Arc::new(StubQuotes))
    }

    #[tokio::test]
    async fn test_no_wallets_short_circuits() {
        let service = service_with_wallets(&[]).await;
        assert!(service.balance_report(1).await.is_none());
        assert!(service.snapshot_all(1).await.is_none());
    }

    #[tokio::test]
    async fn test_one_failure_never_aborts_the_batch() {
        let service = service_with_wallets(&[FUNDED, EMPTY, BROKEN]).await;

        let reports = service.collect_reports(1).await.unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(
            reports
                .iter()
                .filter(|r| matches!(r.outcome, BalanceOutcome::Error))
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_totals_cover_only_nonzero_wallets() {
        let service = service_with_wallets(&[FUNDED, EMPTY, BROKEN]).await;
        let report = service.balance_report(1).await.unwrap();

        // Only the funded wallet feeds the totals
        assert!(report.contains("TON: *1 500.00*"));
        assert!(report.contains("SPW: *2.00*"));
        assert!(report.contains("Balance: 0.00 TON, 0.00 SPW"));
        assert!(report.contains("❌ error"));
    }

    #[tokio::test]
    async fn test_totals_footer_needs_data() {
        let service = service_with_wallets(&[EMPTY]).await;
        let report = service.balance_report(1).await.unwrap();
        assert!(!report.contains("Total:"));
        assert!(report.contains("_Updated:"));
    }

    #[tokio::test]
    async fn test_snapshot_counts_failures_independently() {
        let service = service_with_wallets(&[FUNDED, BROKEN]).await;
        let summary = service.snapshot_all(1).await.unwrap();
        assert_eq!(summary, SnapshotSummary { saved: 1, failed: 1 });
    }

    #[tokio::test]
    async fn test_snapshot_persistence_failure_is_per_wallet() {
        let mut store = MemoryWalletStore::new();
        store.fail_snapshot_for = Some(FUNDED.to_string());
        store.create_wallet(1, FUNDED, None).await;
        store.create_wallet(1, EMPTY, None).await;

        let store = Arc::new(store);
        let service = BalanceService::new(store.clone(), Arc::new(StubQuotes));

        let summary = service.snapshot_all(1).await.unwrap();
        assert_eq!(summary, SnapshotSummary { saved: 1, failed: 1 });
        assert_eq!(store.snapshots_for_owner(1, 10).await.len(), 1);
    }

    #[tokio::test]
    async fn test_display_name_falls_back_to_index() {
        let store = MemoryWalletStore::new();
        store.create_wallet(1, FUNDED, Some("Main")).await;
        let wallet = &store.list_wallets(1).await[0];

        assert_eq!(display_name(wallet, 1), "Main");

        store.create_wallet(1, EMPTY, None).await;
        let unnamed = store
            .list_wallets(1).await
            .into_iter()
            .find(|w| w.label.is_none())
            .unwrap();
        assert_eq!(display_name(&unnamed, 2), "Wallet 2");
    }
}
