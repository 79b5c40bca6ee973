use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;

use super::callbacks;
use super::constants::messages as msg;
use crate::bot::{ commands::Command, keyboards, modules, BotState, DialogueState };
use crate::chains::ton::address::short_address;
use crate::chains::ton::provider::{ format_balance, SPW_DECIMALS, TON_DECIMALS };

// Handler for dispatcher-based command handling
pub async fn handle_command_dispatch(
    bot: Bot,
    message: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    handle_command(bot, message, cmd, state).await?;
    Ok(())
}

pub async fn handle_command(
    bot: Bot,
    message: Message,
    cmd: Command,
    state: Arc<BotState>
) -> ResponseResult<()> {
    let chat_id = message.chat.id;
    let user_id = message.from
        .as_ref()
        .map(|u| u.id.0 as i64)
        .unwrap_or(chat_id.0);

    match cmd {
        Command::Start => handle_start(bot, chat_id).await,
        Command::Help => handle_help(bot, chat_id).await,
        Command::Wallet => handle_wallet_menu(bot, chat_id).await,
        Command::ConnectWallet(args) => {
            handle_connect_wallet(bot, chat_id, user_id, args, state).await
        }
        Command::MyWallets => handle_my_wallets(bot, chat_id, user_id, state).await,
        Command::Balance => handle_balance(bot, chat_id, user_id, state).await,
        Command::SaveBalance => handle_save_balance(bot, chat_id, user_id, state).await,
        Command::History => handle_history(bot, chat_id, user_id, state).await,
        Command::RemoveWallet => handle_remove_wallet(bot, chat_id, user_id, state).await,
        Command::Ranking => handle_ranking(bot, chat_id).await,
        Command::Skip => handle_skip(bot, chat_id, user_id, state).await,
        Command::Cancel => handle_cancel(bot, chat_id, user_id, state).await,
    }
}

async fn handle_start(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, msg::WELCOME).reply_markup(keyboards::main_menu()).await?;
    Ok(())
}

async fn handle_help(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    let mut text = String::from("📚 *Available commands:*\n\n");
    for module in modules::MODULES {
        for (command, description) in module.commands {
            text.push_str(&format!("🔹 {} - {}\n", command, description));
        }
    }

    bot.send_message(chat_id, text).parse_mode(ParseMode::Markdown).await?;
    Ok(())
}

async fn handle_wallet_menu(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, msg::WALLET_MENU)
        .parse_mode(ParseMode::Markdown)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

pub(crate) async fn handle_connect_wallet(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    args: String,
    state: Arc<BotState>
) -> ResponseResult<()> {
    let address = args.trim();

    if address.is_empty() {
        bot.send_message(chat_id, msg::ENTER_ADDRESS).parse_mode(ParseMode::Markdown).await?;
        state.dialogue_storage.write().await.insert(user_id, DialogueState::AwaitingAddress);
    } else {
        // Inline argument skips the address-collection step
        callbacks::process_address(&bot, chat_id, user_id, address, &state).await?;
    }

    Ok(())
}

pub(crate) async fn handle_my_wallets(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    let wallets = state.store.list_wallets(user_id).await;

    if wallets.is_empty() {
        bot.send_message(chat_id, msg::NO_WALLETS).parse_mode(ParseMode::Markdown).await?;
        return Ok(());
    }

    let mut text = String::from("👛 *Your wallets:*\n\n");
    for (i, wallet) in wallets.iter().enumerate() {
        let name = wallet.label.as_deref().unwrap_or("Unnamed");
        text.push_str(
            &format!("{}. *{}*\n   `{}`\n\n", i + 1, name, short_address(&wallet.address, 10, 5))
        );
    }
    text.push_str(&format!("Total: {} wallets", wallets.len()));

    bot.send_message(chat_id, text).parse_mode(ParseMode::Markdown).await?;
    Ok(())
}

pub(crate) async fn handle_balance(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    bot.send_message(chat_id, msg::CHECKING_BALANCES).parse_mode(ParseMode::Markdown).await?;

    match state.balance_service.balance_report(user_id).await {
        Some(report) => {
            bot.send_message(chat_id, report).parse_mode(ParseMode::Markdown).await?;
        }
        None => {
            bot.send_message(chat_id, msg::LINK_FIRST).parse_mode(ParseMode::Markdown).await?;
        }
    }

    Ok(())
}

async fn handle_save_balance(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    bot.send_message(chat_id, msg::SAVING_BALANCES).parse_mode(ParseMode::Markdown).await?;

    match state.balance_service.snapshot_all(user_id).await {
        Some(summary) => {
            let mut text = String::from("✅ *Balances saved to history!*\n\n");
            text.push_str(&format!("Saved: {} wallets\n", summary.saved));
            if summary.failed > 0 {
                text.push_str(&format!("Failed: {}\n", summary.failed));
            }
            text.push_str(
                &format!("\n_Date: {}_", chrono::Utc::now().format("%d.%m.%Y %H:%M"))
            );

            bot.send_message(chat_id, text).parse_mode(ParseMode::Markdown).await?;
        }
        None => {
            bot.send_message(chat_id, msg::LINK_FIRST).parse_mode(ParseMode::Markdown).await?;
        }
    }

    Ok(())
}

async fn handle_history(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    let snapshots = state.store.snapshots_for_owner(user_id, 10).await;

    if snapshots.is_empty() {
        bot.send_message(chat_id, msg::NO_HISTORY).parse_mode(ParseMode::Markdown).await?;
        return Ok(());
    }

    let mut text = String::from("📈 *Balance history:*\n\n");
    for snapshot in &snapshots {
        text.push_str(
            &format!(
                "• {} `{}`\n   TON: {}, SPW: {}\n",
                snapshot.recorded_at.format("%d.%m %H:%M"),
                short_address(&snapshot.address, 8, 4),
                format_balance(snapshot.ton_balance, TON_DECIMALS),
                format_balance(snapshot.spw_balance, SPW_DECIMALS)
            )
        );
    }

    bot.send_message(chat_id, text).parse_mode(ParseMode::Markdown).await?;
    Ok(())
}

pub(crate) async fn handle_remove_wallet(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    let wallets = state.store.list_wallets(user_id).await;

    if wallets.is_empty() {
        bot.send_message(chat_id, msg::NO_WALLETS_TO_REMOVE)
            .parse_mode(ParseMode::Markdown)
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, msg::PICK_WALLET_TO_REMOVE)
        .reply_markup(keyboards::remove_wallet_list(&wallets))
        .await?;
    Ok(())
}

async fn handle_ranking(bot: Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, msg::RANKING_STUB).await?;
    Ok(())
}

async fn handle_skip(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    // /skip only applies to the label step; an address prompt stays up
    if
        matches!(
            state.dialogue_storage.read().await.get(&user_id),
            Some(DialogueState::AwaitingAddress)
        )
    {
        bot.send_message(chat_id, msg::ENTER_ADDRESS).parse_mode(ParseMode::Markdown).await?;
        return Ok(());
    }

    match
        callbacks::commit_pending_link(
            &state.dialogue_storage,
            state.store.as_ref(),
            user_id,
            None
        ).await
    {
        callbacks::CommitOutcome::NoPendingAddress => {
            bot.send_message(chat_id, msg::NOTHING_TO_SKIP).await?;
        }
        outcome => {
            callbacks::send_commit_reply(&bot, chat_id, None, outcome).await?;
        }
    }

    Ok(())
}

async fn handle_cancel(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    state: Arc<BotState>
) -> ResponseResult<()> {
    if callbacks::cancel_dialogue(&state.dialogue_storage, user_id).await {
        bot.send_message(chat_id, msg::CANCELLED).reply_markup(keyboards::main_menu()).await?;
    } else {
        bot.send_message(chat_id, msg::NOTHING_TO_CANCEL)
            .reply_markup(keyboards::main_menu())
            .await?;
    }
    Ok(())
}
