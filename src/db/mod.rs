use async_trait::async_trait;
use chrono::{ DateTime, Utc };
use sea_orm::{ entity::prelude::*, DatabaseConnection, QueryOrder, QuerySelect, Set };
use uuid::Uuid;

pub mod entity;

#[cfg(test)]
pub mod memory;

/// A wallet linked to a chat account.
#[derive(Clone, Debug, PartialEq)]
pub struct Wallet {
    pub id: Uuid,
    pub owner_id: i64,
    pub address: String,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<entity::wallet::Model> for Wallet {
    fn from(m: entity::wallet::Model) -> Self {
        Wallet {
            id: m.id,
            owner_id: m.owner_id,
            address: m.address,
            label: m.label,
            created_at: m.created_at,
        }
    }
}

/// Immutable record of a wallet's balances at one point in time,
/// nano units.
#[derive(Clone, Debug, PartialEq)]
pub struct BalanceSnapshot {
    pub id: Uuid,
    pub owner_id: i64,
    pub address: String,
    pub ton_balance: u128,
    pub spw_balance: u128,
    pub recorded_at: DateTime<Utc>,
}

impl From<entity::balance_snapshot::Model> for BalanceSnapshot {
    fn from(m: entity::balance_snapshot::Model) -> Self {
        BalanceSnapshot {
            id: m.id,
            owner_id: m.owner_id,
            ton_balance: m.ton_balance.parse().unwrap_or(0),
            spw_balance: m.spw_balance.parse().unwrap_or(0),
            address: m.address,
            recorded_at: m.recorded_at,
        }
    }
}

/// Storage contract consumed by the bot and the balance routines.
///
/// Every operation is fail-soft: a `false` or an empty list signals
/// failure or absence, nothing propagates a database error to callers.
/// Failures are logged here, at the storage boundary.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Link a wallet. Returns false when the (owner, address) pair
    /// already exists or the insert fails.
    async fn create_wallet(&self, owner_id: i64, address: &str, label: Option<&str>) -> bool;

    /// All wallets of one owner, newest first.
    async fn list_wallets(&self, owner_id: i64) -> Vec<Wallet>;

    async fn delete_wallet(&self, owner_id: i64, address: &str) -> bool;

    async fn wallet_exists(&self, owner_id: i64, address: &str) -> bool;

    /// Append a balance snapshot. Never updates existing rows.
    async fn save_snapshot(&self, owner_id: i64, address: &str, ton: u128, spw: u128) -> bool;

    /// Snapshots of one wallet, newest first.
    async fn snapshots_for_wallet(&self, address: &str, limit: u64) -> Vec<BalanceSnapshot>;

    /// Snapshots across all wallets of one owner, newest first.
    async fn snapshots_for_owner(&self, owner_id: i64, limit: u64) -> Vec<BalanceSnapshot>;
}

/// sea-orm implementation of [`WalletStore`]. The back-end (Postgres or
/// SQLite) is whatever `DatabaseConnection` was opened against.
pub struct WalletRepository {
    db: DatabaseConnection,
}

impl WalletRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WalletStore for WalletRepository {
    async fn create_wallet(&self, owner_id: i64, address: &str, label: Option<&str>) -> bool {
        if self.wallet_exists(owner_id, address).await {
            return false;
        }

        let row = entity::wallet::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            address: Set(address.to_string()),
            label: Set(label.map(str::to_string)),
            created_at: Set(chrono::Utc::now()),
        };

        match row.insert(&self.db).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("failed to link wallet for owner {}: {}", owner_id, e);
                false
            }
        }
    }

    async fn list_wallets(&self, owner_id: i64) -> Vec<Wallet> {
        let rows = entity::wallet::Entity
            ::find()
            .filter(entity::wallet::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::wallet::Column::CreatedAt)
            .all(&self.db).await;

        match rows {
            Ok(rows) => rows.into_iter().map(Wallet::from).collect(),
            Err(e) => {
                tracing::error!("failed to list wallets for owner {}: {}", owner_id, e);
                Vec::new()
            }
        }
    }

    async fn delete_wallet(&self, owner_id: i64, address: &str) -> bool {
        let result = entity::wallet::Entity
            ::delete_many()
            .filter(entity::wallet::Column::OwnerId.eq(owner_id))
            .filter(entity::wallet::Column::Address.eq(address))
            .exec(&self.db).await;

        match result {
            Ok(res) => res.rows_affected > 0,
            Err(e) => {
                tracing::error!("failed to delete wallet for owner {}: {}", owner_id, e);
                false
            }
        }
    }

    async fn wallet_exists(&self, owner_id: i64, address: &str) -> bool {
        let found = entity::wallet::Entity
            ::find()
            .filter(entity::wallet::Column::OwnerId.eq(owner_id))
            .filter(entity::wallet::Column::Address.eq(address))
            .one(&self.db).await;

        matches!(found, Ok(Some(_)))
    }

    async fn save_snapshot(&self, owner_id: i64, address: &str, ton: u128, spw: u128) -> bool {
        let row = entity::balance_snapshot::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(owner_id),
            address: Set(address.to_string()),
            ton_balance: Set(ton.to_string()),
            spw_balance: Set(spw.to_string()),
            recorded_at: Set(chrono::Utc::now()),
        };

        match row.insert(&self.db).await {
            Ok(_) => {
                tracing::info!("snapshot saved for {}: TON={}, SPW={}", address, ton, spw);
                true
            }
            Err(e) => {
                tracing::error!("failed to save snapshot for {}: {}", address, e);
                false
            }
        }
    }

    async fn snapshots_for_wallet(&self, address: &str, limit: u64) -> Vec<BalanceSnapshot> {
        let rows = entity::balance_snapshot::Entity
            ::find()
            .filter(entity::balance_snapshot::Column::Address.eq(address))
            .order_by_desc(entity::balance_snapshot::Column::RecordedAt)
            .limit(limit)
            .all(&self.db).await;

        match rows {
            Ok(rows) => rows.into_iter().map(BalanceSnapshot::from).collect(),
            Err(e) => {
                tracing::error!("failed to load snapshots for {}: {}", address, e);
                Vec::new()
            }
        }
    }

    async fn snapshots_for_owner(&self, owner_id: i64, limit: u64) -> Vec<BalanceSnapshot> {
        let rows = entity::balance_snapshot::Entity
            ::find()
            .filter(entity::balance_snapshot::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::balance_snapshot::Column::RecordedAt)
            .limit(limit)
            .all(&self.db).await;

        match rows {
            Ok(rows) => rows.into_iter().map(BalanceSnapshot::from).collect(),
            Err(e) => {
                tracing::error!("failed to load snapshots for owner {}: {}", owner_id, e);
                Vec::new()
            }
        }
    }
}
