use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(
            Table::create()
                .table(WalletBalanceHistory::Table)
                .if_not_exists()
                .col(ColumnDef::new(WalletBalanceHistory::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(WalletBalanceHistory::OwnerId).big_integer().not_null())
                .col(ColumnDef::new(WalletBalanceHistory::Address).string().not_null())
                // Nano units stored as decimal strings, append-only
                .col(ColumnDef::new(WalletBalanceHistory::TonBalance).string().not_null())
                .col(ColumnDef::new(WalletBalanceHistory::SpwBalance).string().not_null())
                .col(
                    ColumnDef::new(WalletBalanceHistory::RecordedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp())
                )
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_balance_history_address")
                .table(WalletBalanceHistory::Table)
                .col(WalletBalanceHistory::Address)
                .col(WalletBalanceHistory::RecordedAt)
                .to_owned()
        ).await?;

        manager.create_index(
            Index::create()
                .if_not_exists()
                .name("idx_balance_history_owner")
                .table(WalletBalanceHistory::Table)
                .col(WalletBalanceHistory::OwnerId)
                .to_owned()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(WalletBalanceHistory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum WalletBalanceHistory {
    Table,
    Id,
    OwnerId,
    Address,
    TonBalance,
    SpwBalance,
    RecordedAt,
}
