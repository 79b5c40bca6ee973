use sea_orm::entity::prelude::*;
use serde::{ Deserialize, Serialize };

/// One append-only row per balance snapshot. Balances are nano units
/// kept as decimal strings so the column round-trips on both back-ends.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wallet_balance_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: i64,
    pub address: String,
    pub ton_balance: String,
    pub spw_balance: String,
    pub recorded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
