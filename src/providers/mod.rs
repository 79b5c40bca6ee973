pub mod quote_provider;

pub use quote_provider::{ QuoteProvider, WalletBalances };
