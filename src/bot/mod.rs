pub mod commands;
pub mod constants;
pub mod handlers;
pub mod keyboards;
pub mod modules;
mod callbacks;
mod utils;

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::dispatching::{ UpdateFilterExt, UpdateHandler };
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;

use crate::db::WalletStore;
use crate::services::BalanceService;

/// Per-conversation state of the wallet-linking flow. Scratch data
/// lives here and nowhere else; clearing the entry resets the flow.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DialogueState {
    #[default]
    None,
    /// Waiting for the wallet address
    AwaitingAddress,
    /// Address accepted, waiting for an optional label
    AwaitingLabel {
        address: String,
    },
}

/// Dialogue storage, keyed by user id
pub type DialogueStorage = Arc<RwLock<HashMap<i64, DialogueState>>>;

#[derive(Clone)]
pub struct BotState {
    pub store: Arc<dyn WalletStore>,
    pub balance_service: Arc<BalanceService>,
    pub dialogue_storage: DialogueStorage,
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler = Update::filter_message()
        .filter_command::<commands::Command>()
        .endpoint(handlers::handle_command_dispatch);

    let callback_handler = Update::filter_callback_query().endpoint(callbacks::handle_callback);

    // Plain text feeds the wallet-linking dialogue
    let message_handler = Update::filter_message()
        .filter(|msg: Message| msg.text().is_some() && !msg.text().unwrap().starts_with('/'))
        .endpoint(callbacks::handle_text_message);

    dptree::entry()
        .branch(command_handler)
        .branch(callback_handler)
        .branch(message_handler)
}

pub async fn run_bot(
    bot_token: String,
    store: Arc<dyn WalletStore>,
    balance_service: Arc<BalanceService>,
) {
    tracing::info!("Starting Telegram bot...");

    let bot = Bot::new(bot_token);

    // Set bot commands for the slash menu
    if let Err(e) = bot.set_my_commands(commands::Command::bot_commands()).await {
        tracing::warn!("Failed to set bot commands: {}", e);
    } else {
        tracing::info!("Bot commands registered successfully");
    }

    let state = Arc::new(BotState {
        store,
        balance_service,
        dialogue_storage: Arc::new(RwLock::new(HashMap::new())),
    });

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
