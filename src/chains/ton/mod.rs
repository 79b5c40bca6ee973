pub mod address;
pub mod provider;

pub use provider::TonProvider;
