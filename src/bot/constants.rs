// User-facing bot messages
pub mod messages {
    pub const WELCOME: &str =
        "👋 Hi! I'm the Piggy Bank bot.\n\
        I track TON wallets and their SPW balances.\n\
        Use /help for the list of commands.";

    pub const WALLET_MENU: &str =
        "👛 *TON Wallets*\n\n\
        Commands:\n\
        • /connect_wallet - link a wallet\n\
        • /my_wallets - list linked wallets\n\
        • /balance - check balances\n\
        • /save_balance - save balances to history\n\
        • /remove_wallet - remove a wallet";

    pub const ENTER_ADDRESS: &str =
        "📝 *Enter the TON wallet address:*\n\n\
        Format: UQ... or EQ...\n\
        Example: `UQATKnigdlBIuU3FJ57VSh4Aqxel9oLbQ4hBzIZ6YzWkbZys`\n\n\
        You can abort with /cancel";

    pub const ADDRESS_TOO_SHORT: &str = "❌ Address is too short!";

    pub const ADDRESS_BAD_FORMAT: &str =
        "❌ *Invalid address format!*\n\n\
        It must start with UQ or EQ, or be in the 0:xxxx... raw form.";

    pub const ADDRESS_ACCEPTED: &str =
        "✅ *Address accepted!*\n\n\
        Enter a label for the wallet (e.g. 'Main'):\n\
        Or /skip to leave it unnamed";

    pub const WALLET_ALREADY_LINKED: &str = "❌ *This wallet is already linked!*";

    pub const NO_WALLETS: &str = "📭 *No linked wallets*\nUse /connect_wallet";

    pub const LINK_FIRST: &str = "📭 *Link a wallet first*";

    pub const CHECKING_BALANCES: &str = "⏳ *Checking balances...*";

    pub const SAVING_BALANCES: &str = "⏳ *Fetching balances and saving to history...*";

    pub const NO_WALLETS_TO_REMOVE: &str = "📭 *No wallets to remove*";

    pub const PICK_WALLET_TO_REMOVE: &str = "Select a wallet to remove:";

    pub const WALLET_NOT_FOUND: &str = "❌ Wallet not found";

    pub const REMOVE_FAILED: &str = "❌ Failed to remove the wallet";

    pub const CANCELLED: &str = "❌ Action cancelled";

    pub const NOTHING_TO_CANCEL: &str = "❌ Nothing to cancel";

    pub const NOTHING_TO_SKIP: &str = "Nothing to skip.";

    pub const NO_HISTORY: &str =
        "📭 *No balance history yet*\nUse /save_balance to record the first snapshot";

    pub const RANKING_STUB: &str = "🏆 SPW holders ranking (in development)";
}
