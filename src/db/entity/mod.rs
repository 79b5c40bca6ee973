pub mod wallet;
pub mod balance_snapshot;

pub use wallet::Entity as Wallet;
pub use balance_snapshot::Entity as BalanceSnapshot;
