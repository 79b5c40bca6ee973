pub mod bot;
pub mod chains;
pub mod config;
pub mod db;
pub mod error;
pub mod providers;
pub mod services;

pub use config::Config;
pub use error::{ AppError, Result };
