use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "snake_case", description = "Piggy Bank Bot commands:")]
pub enum Command {
    #[command(description = "start the bot and see the welcome message")]
    Start,

    #[command(description = "show all available commands")]
    Help,

    #[command(description = "TON wallets overview")]
    Wallet,

    #[command(description = "link a wallet - Usage: /connect_wallet [address]")] ConnectWallet(
        String,
    ),

    #[command(description = "list your linked wallets")]
    MyWallets,

    #[command(description = "check balances of all linked wallets")]
    Balance,

    #[command(description = "save current balances to history")]
    SaveBalance,

    #[command(description = "recent balance history")]
    History,

    #[command(description = "remove a linked wallet")]
    RemoveWallet,

    #[command(description = "top SPW holders")]
    Ranking,

    #[command(description = "skip the optional wallet label")]
    Skip,

    #[command(description = "cancel the current action")]
    Cancel,
}
