use teloxide::types::{ InlineKeyboardButton, InlineKeyboardMarkup };

use crate::bot::utils::wallet_pick_name;
use crate::db::Wallet;

// Main menu keyboard
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("📊 Balance", "menu:balance"),
            InlineKeyboardButton::callback("👛 Wallets", "menu:wallets"),
        ],
        vec![
            InlineKeyboardButton::callback("➕ Add", "menu:connect"),
            InlineKeyboardButton::callback("❌ Remove", "menu:remove"),
        ],
    ])
}

// One row per wallet; callback carries the wallet id
pub fn remove_wallet_list(wallets: &[Wallet]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = wallets
        .iter()
        .map(|wallet| {
            vec![
                InlineKeyboardButton::callback(
                    format!("🗑 {}", wallet_pick_name(wallet)),
                    format!("wallet:remove:{}", wallet.id)
                )
            ]
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback("🔙 Back", "menu:main")]);

    InlineKeyboardMarkup::new(rows)
}
