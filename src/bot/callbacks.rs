use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use uuid::Uuid;

use super::constants::messages as msg;
use super::{ handlers, keyboards, BotState, DialogueState, DialogueStorage };
use crate::bot::utils::wallet_pick_name;
use crate::chains::ton::address::short_address;
use crate::db::WalletStore;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Handle plain text messages feeding the wallet-linking dialogue
pub async fn handle_text_message(bot: Bot, message: Message, state: Arc<BotState>) -> HandlerResult {
    let user_id = message.from
        .as_ref()
        .map(|u| u.id.0 as i64)
        .unwrap_or(0);
    let chat_id = message.chat.id;
    let text = message.text().unwrap_or("").trim().to_string();

    let dialogue_state = {
        let storage = state.dialogue_storage.read().await;
        storage.get(&user_id).cloned().unwrap_or_default()
    };

    match dialogue_state {
        DialogueState::AwaitingAddress => {
            process_address(&bot, chat_id, user_id, &text, &state).await?;
        }
        DialogueState::AwaitingLabel { .. } => {
            let label = if text.is_empty() { None } else { Some(text.as_str()) };
            let outcome = commit_pending_link(
                &state.dialogue_storage,
                state.store.as_ref(),
                user_id,
                label
            ).await;
            send_commit_reply(&bot, chat_id, label, outcome).await?;
        }
        DialogueState::None => {}
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
pub(crate) enum AddressRejection {
    TooShort,
    BadPrefix,
}

/// Shape gates for user-entered addresses: a cheap length check first,
/// then the prefix / workchain-colon check. Full shape validation lives
/// in the quote client.
pub(crate) fn validate_address_shape(address: &str) -> Result<(), AddressRejection> {
    if address.len() < 20 {
        return Err(AddressRejection::TooShort);
    }

    if !(address.starts_with("UQ") || address.starts_with("EQ") || address.contains(':')) {
        return Err(AddressRejection::BadPrefix);
    }

    Ok(())
}

/// Validate an address and, if it passes, stash it and move the
/// dialogue to the label step. Rejections leave the dialogue state
/// untouched.
pub(crate) async fn process_address(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    address: &str,
    state: &Arc<BotState>
) -> ResponseResult<()> {
    match validate_address_shape(address) {
        Err(AddressRejection::TooShort) => {
            bot.send_message(chat_id, msg::ADDRESS_TOO_SHORT)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Err(AddressRejection::BadPrefix) => {
            bot.send_message(chat_id, msg::ADDRESS_BAD_FORMAT)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Ok(()) => {
            state.dialogue_storage.write().await.insert(user_id, DialogueState::AwaitingLabel {
                address: address.to_string(),
            });
            bot.send_message(chat_id, msg::ADDRESS_ACCEPTED)
                .parse_mode(ParseMode::Markdown)
                .await?;
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq)]
pub(crate) enum CommitOutcome {
    Linked {
        address: String,
    },
    /// The (owner, address) pair is already linked
    Duplicate,
    /// No address stashed for this user
    NoPendingAddress,
}

/// Commit the pending link: take the stashed address, try to create the
/// wallet, and clear the scratch state whatever the store said. States
/// other than the label step are left alone.
pub(crate) async fn commit_pending_link(
    storage: &DialogueStorage,
    store: &dyn WalletStore,
    user_id: i64,
    label: Option<&str>
) -> CommitOutcome {
    let pending = {
        let mut guard = storage.write().await;
        if matches!(guard.get(&user_id), Some(DialogueState::AwaitingLabel { .. })) {
            guard.remove(&user_id)
        } else {
            None
        }
    };

    let Some(DialogueState::AwaitingLabel { address }) = pending else {
        return CommitOutcome::NoPendingAddress;
    };

    if store.create_wallet(user_id, &address, label).await {
        CommitOutcome::Linked { address }
    } else {
        CommitOutcome::Duplicate
    }
}

/// Report the commit outcome back to the user. Duplicate links are
/// rejected with a message; either way the flow is over.
pub(crate) async fn send_commit_reply(
    bot: &Bot,
    chat_id: ChatId,
    label: Option<&str>,
    outcome: CommitOutcome
) -> ResponseResult<()> {
    match outcome {
        CommitOutcome::Linked { address } => {
            let display = if address.len() > 25 {
                short_address(&address, 12, 8)
            } else {
                address.clone()
            };

            bot.send_message(
                chat_id,
                format!(
                    "✅ *Wallet linked!*\n\n\
                    Address: `{}`\n\
                    Label: {}\n\n\
                    Use /balance to check the balances",
                    display,
                    label.unwrap_or("Not set")
                )
            )
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        CommitOutcome::Duplicate => {
            bot.send_message(chat_id, msg::WALLET_ALREADY_LINKED)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        CommitOutcome::NoPendingAddress => {}
    }

    Ok(())
}

/// Drop any in-flight dialogue. Returns whether one was active.
pub(crate) async fn cancel_dialogue(storage: &DialogueStorage, user_id: i64) -> bool {
    storage.write().await.remove(&user_id).is_some()
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<BotState>) -> HandlerResult {
    // Answer callback to remove the loading state
    bot.answer_callback_query(q.id.clone()).await?;

    let data = match q.data {
        Some(ref d) => d.as_str(),
        None => {
            return Ok(());
        }
    };

    let chat_id = match q.message {
        Some(ref m) => m.chat().id,
        None => {
            return Ok(());
        }
    };

    let user_id = q.from.id.0 as i64;

    let parts: Vec<&str> = data.split(':').collect();

    match parts.as_slice() {
        ["menu", "main"] => {
            bot.send_message(chat_id, msg::WALLET_MENU)
                .parse_mode(ParseMode::Markdown)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        ["menu", "balance"] => {
            handlers::handle_balance(bot, chat_id, user_id, state).await?;
        }
        ["menu", "wallets"] => {
            handlers::handle_my_wallets(bot, chat_id, user_id, state).await?;
        }
        ["menu", "connect"] => {
            handlers::handle_connect_wallet(bot, chat_id, user_id, String::new(), state).await?;
        }
        ["menu", "remove"] => {
            handlers::handle_remove_wallet(bot, chat_id, user_id, state).await?;
        }
        ["wallet", "remove", id] => {
            remove_wallet_by_id(&bot, chat_id, user_id, id, &state).await?;
        }
        _ => {
            tracing::warn!("unknown callback data: {}", data);
        }
    }

    Ok(())
}

async fn remove_wallet_by_id(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    id: &str,
    state: &Arc<BotState>
) -> ResponseResult<()> {
    let Ok(wallet_id) = id.parse::<Uuid>() else {
        tracing::warn!("malformed wallet id in callback: {}", id);
        return Ok(());
    };

    // Resolve against the caller's own wallets only
    let wallets = state.store.list_wallets(user_id).await;
    let Some(wallet) = wallets.iter().find(|w| w.id == wallet_id) else {
        bot.send_message(chat_id, msg::WALLET_NOT_FOUND)
            .reply_markup(keyboards::main_menu())
            .await?;
        return Ok(());
    };

    let name = wallet_pick_name(wallet);
    if state.store.delete_wallet(user_id, &wallet.address).await {
        bot.send_message(chat_id, format!("✅ Wallet '{}' removed", name))
            .reply_markup(keyboards::main_menu())
            .await?;
    } else {
        bot.send_message(chat_id, msg::REMOVE_FAILED)
            .reply_markup(keyboards::main_menu())
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    use crate::db::memory::MemoryWalletStore;

    const ADDR: &str = "UQATKnigdlBIuU3FJ57VSh4Aqxel9oLbQ4hBzIZ6YzWkbZys";

    #[test]
    fn test_address_gates() {
        // Length gate fires first
        assert_eq!(validate_address_shape("abc"), Err(AddressRejection::TooShort));
        assert_eq!(validate_address_shape("UQab1"), Err(AddressRejection::TooShort));

        // Then the prefix / raw-form gate
        assert_eq!(
            validate_address_shape(&"x".repeat(30)),
            Err(AddressRejection::BadPrefix)
        );

        assert_eq!(validate_address_shape(&format!("UQ{}", "a".repeat(39))), Ok(()));
        assert_eq!(validate_address_shape(&format!("EQ{}", "a".repeat(39))), Ok(()));
        assert_eq!(
            validate_address_shape(&format!("0:{}", "0".repeat(64))),
            Ok(())
        );

        // 41 characters, UQ prefix: passes the flow gates even though
        // the body is not clean base64url
        assert_eq!(validate_address_shape("UQabcabcabcabcabcabcabcabcabcabcabcabc==="), Ok(()));
    }

    #[tokio::test]
    async fn test_cancel_dialogue() {
        let storage: DialogueStorage = Arc::new(RwLock::new(HashMap::new()));

        // Idle cancel is a no-op
        assert!(!cancel_dialogue(&storage, 1).await);

        storage.write().await.insert(1, DialogueState::AwaitingAddress);
        assert!(cancel_dialogue(&storage, 1).await);
        assert!(storage.read().await.get(&1).is_none());

        storage.write().await.insert(1, DialogueState::AwaitingLabel {
            address: "UQsomeaddress".to_string(),
        });
        assert!(cancel_dialogue(&storage, 1).await);
        assert!(storage.read().await.get(&1).is_none());
    }

    #[tokio::test]
    async fn test_label_commit_links_and_clears_state() {
        let storage: DialogueStorage = Arc::new(RwLock::new(HashMap::new()));
        let store = MemoryWalletStore::new();

        storage.write().await.insert(1, DialogueState::AwaitingLabel {
            address: ADDR.to_string(),
        });

        let outcome = commit_pending_link(&storage, &store, 1, Some("Main")).await;
        assert_eq!(outcome, CommitOutcome::Linked { address: ADDR.to_string() });
        assert!(storage.read().await.get(&1).is_none());

        let wallets = store.list_wallets(1).await;
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].address, ADDR);
        assert_eq!(wallets[0].label.as_deref(), Some("Main"));
    }

    #[tokio::test]
    async fn test_skipped_label_commits_unnamed() {
        let storage: DialogueStorage = Arc::new(RwLock::new(HashMap::new()));
        let store = MemoryWalletStore::new();

        storage.write().await.insert(1, DialogueState::AwaitingLabel {
            address: ADDR.to_string(),
        });

        let outcome = commit_pending_link(&storage, &store, 1, None).await;
        assert_eq!(outcome, CommitOutcome::Linked { address: ADDR.to_string() });
        assert!(storage.read().await.get(&1).is_none());

        let wallets = store.list_wallets(1).await;
        assert_eq!(wallets.len(), 1);
        assert_eq!(wallets[0].label, None);
    }

    #[tokio::test]
    async fn test_duplicate_commit_still_ends_the_flow() {
        let storage: DialogueStorage = Arc::new(RwLock::new(HashMap::new()));
        let store = MemoryWalletStore::new();
        store.create_wallet(1, ADDR, None).await;

        storage.write().await.insert(1, DialogueState::AwaitingLabel {
            address: ADDR.to_string(),
        });

        let outcome = commit_pending_link(&storage, &store, 1, Some("Again")).await;
        assert_eq!(outcome, CommitOutcome::Duplicate);
        // Scratch state is cleared on conflict too
        assert!(storage.read().await.get(&1).is_none());
        assert_eq!(store.list_wallets(1).await.len(), 1);
    }

    #[tokio::test]
    async fn test_commit_needs_a_stashed_address() {
        let storage: DialogueStorage = Arc::new(RwLock::new(HashMap::new()));
        let store = MemoryWalletStore::new();

        // Idle user
        let outcome = commit_pending_link(&storage, &store, 1, None).await;
        assert_eq!(outcome, CommitOutcome::NoPendingAddress);

        // Address step is not committable and is left untouched
        storage.write().await.insert(1, DialogueState::AwaitingAddress);
        let outcome = commit_pending_link(&storage, &store, 1, None).await;
        assert_eq!(outcome, CommitOutcome::NoPendingAddress);
        assert_eq!(storage.read().await.get(&1), Some(&DialogueState::AwaitingAddress));
        assert!(store.list_wallets(1).await.is_empty());
    }
}
