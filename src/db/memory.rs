//! In-memory [`WalletStore`] used as a test double.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{ BalanceSnapshot, Wallet, WalletStore };

#[derive(Default)]
pub struct MemoryWalletStore {
    wallets: Mutex<Vec<Wallet>>,
    snapshots: Mutex<Vec<BalanceSnapshot>>,
    /// When set, save_snapshot refuses writes for this address.
    pub fail_snapshot_for: Option<String>,
}

impl MemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WalletStore for MemoryWalletStore {
    async fn create_wallet(&self, owner_id: i64, address: &str, label: Option<&str>) -> bool {
        let mut wallets = self.wallets.lock().await;
        if wallets.iter().any(|w| w.owner_id == owner_id && w.address == address) {
            return false;
        }
        wallets.push(Wallet {
            id: Uuid::new_v4(),
            owner_id,
            address: address.to_string(),
            label: label.map(str::to_string),
            created_at: chrono::Utc::now(),
        });
        true
    }

    async fn list_wallets(&self, owner_id: i64) -> Vec<Wallet> {
        self.wallets
            .lock().await
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect()
    }

    async fn delete_wallet(&self, owner_id: i64, address: &str) -> bool {
        let mut wallets = self.wallets.lock().await;
        let before = wallets.len();
        wallets.retain(|w| !(w.owner_id == owner_id && w.address == address));
        wallets.len() < before
    }

    async fn wallet_exists(&self, owner_id: i64, address: &str) -> bool {
        self.wallets
            .lock().await
            .iter()
            .any(|w| w.owner_id == owner_id && w.address == address)
    }

    async fn save_snapshot(&self, owner_id: i64, address: &str, ton: u128, spw: u128) -> bool {
        if self.fail_snapshot_for.as_deref() == Some(address) {
            return false;
        }
        self.snapshots.lock().await.push(BalanceSnapshot {
            id: Uuid::new_v4(),
            owner_id,
            address: address.to_string(),
            ton_balance: ton,
            spw_balance: spw,
            recorded_at: chrono::Utc::now(),
        });
        true
    }

    async fn snapshots_for_wallet(&self, address: &str, limit: u64) -> Vec<BalanceSnapshot> {
        let mut rows: Vec<_> = self.snapshots
            .lock().await
            .iter()
            .filter(|s| s.address == address)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(limit as usize);
        rows
    }

    async fn snapshots_for_owner(&self, owner_id: i64, limit: u64) -> Vec<BalanceSnapshot> {
        let mut rows: Vec<_> = self.snapshots
            .lock().await
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(limit as usize);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_duplicate_link_rejected() {
        let store = MemoryWalletStore::new();

        assert!(store.create_wallet(1, "UQtestaddress", Some("Main")).await);
        assert!(!store.create_wallet(1, "UQtestaddress", None).await);
        assert_eq!(store.list_wallets(1).await.len(), 1);

        // Same address under a different owner is a distinct link
        assert!(store.create_wallet(2, "UQtestaddress", None).await);
    }

    #[tokio::test]
    async fn test_delete_wallet() {
        let store = MemoryWalletStore::new();
        store.create_wallet(1, "UQtestaddress", None).await;

        assert!(store.delete_wallet(1, "UQtestaddress").await);
        assert!(!store.delete_wallet(1, "UQtestaddress").await);
        assert!(store.list_wallets(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_snapshots_append_only() {
        let store = MemoryWalletStore::new();

        assert!(store.save_snapshot(1, "UQtestaddress", 100, 0).await);
        assert!(store.save_snapshot(1, "UQtestaddress", 200, 5).await);

        let rows = store.snapshots_for_wallet("UQtestaddress", 10).await;
        assert_eq!(rows.len(), 2);

        let owner_rows = store.snapshots_for_owner(1, 1).await;
        assert_eq!(owner_rows.len(), 1);
    }
}
