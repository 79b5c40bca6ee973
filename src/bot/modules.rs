//! Static registry of command bundles.
//!
//! The bot's command surface is declared here as an explicit list built
//! at compile time; /help renders it. Adding a bundle means adding an
//! entry and wiring its handlers in `handlers.rs`.

pub struct ModuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub commands: &'static [(&'static str, &'static str)],
}

pub const MODULES: &[ModuleInfo] = &[
    ModuleInfo {
        name: "Start",
        description: "Greeting and help",
        commands: &[
            ("/start", "start the bot"),
            ("/help", "list available commands"),
        ],
    },
    ModuleInfo {
        name: "TON Wallets",
        description: "Link and track TON wallets",
        commands: &[
            ("/wallet", "wallets overview"),
            ("/connect_wallet [address]", "link a wallet"),
            ("/my_wallets", "your linked wallets"),
            ("/balance", "check balances"),
            ("/save_balance", "save balances to history"),
            ("/history", "recent balance history"),
            ("/remove_wallet", "remove a wallet"),
            ("/cancel", "cancel the current action"),
        ],
    },
    ModuleInfo {
        name: "SPW Ranking",
        description: "Ranking of SPW holders",
        commands: &[("/ranking", "top SPW holders")],
    },
];
