//! tonapi.io client.
//!
//! Every call here is fail-soft: timeouts, non-2xx statuses and
//! malformed bodies degrade to a zero balance or an unresolved address
//! and are logged, so a flaky explorer never aborts a whole report.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION };
use serde::Deserialize;

use crate::chains::ton::address;
use crate::error::Result;
use crate::providers::{ QuoteProvider, WalletBalances };

pub const TON_DECIMALS: u32 = 9;
pub const SPW_DECIMALS: u32 = 9;

/// SPW jetton master address in raw form, exactly as tonapi returns it
/// in jetton holdings.
pub const SPW_TOKEN_ADDRESS: &str =
    "0:018bbd60d72dc1167c40fea718fa08926ed471f6002b03dc57a5f799c93a8ffc";

const PARSE_TIMEOUT: Duration = Duration::from_secs(15);
const BALANCE_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TonProvider {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Deserialize)]
struct ParseResponse {
    #[serde(default)]
    non_bounceable: Option<ParsedForm>,
}

#[derive(Deserialize)]
struct ParsedForm {
    #[serde(default)]
    b64url: Option<String>,
}

#[derive(Deserialize)]
struct AccountResponse {
    #[serde(default)]
    balance: u64,
}

#[derive(Deserialize)]
struct JettonsResponse {
    #[serde(default)]
    balances: Vec<JettonHolding>,
}

#[derive(Deserialize)]
struct JettonHolding {
    // tonapi serializes jetton balances as decimal strings
    #[serde(default)]
    balance: String,
    #[serde(default)]
    jetton: JettonInfo,
}

#[derive(Deserialize, Default)]
struct JettonInfo {
    #[serde(default)]
    address: String,
    #[serde(default)]
    symbol: String,
}

impl TonProvider {
    pub fn new(api_base: &str, api_key: Option<&str>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        match api_key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => match HeaderValue::from_str(&format!("Bearer {}", key)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                    tracing::info!("TON API client initialized with key");
                }
                Err(_) => {
                    tracing::warn!("TON_API_KEY is not a valid header value, using public access");
                }
            },
            None => {
                tracing::info!("TON API client initialized without key (public access)");
            }
        }

        Self {
            client: reqwest::Client::builder().default_headers(headers).build().unwrap(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Convert an address to the friendly display form the balance
    /// endpoints require. Friendly input is returned as-is without a
    /// network call; anything else goes through the parse endpoint, and
    /// on any failure the original input comes back unchanged.
    pub async fn resolve_friendly(&self, address: &str) -> String {
        let address = address.trim();

        if address::is_friendly(address) {
            return address.to_string();
        }

        let url = format!("{}/address/{}/parse", self.api_base, address);
        match self.client.get(&url).timeout(PARSE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<ParseResponse>().await {
                    Ok(parsed) => {
                        if let Some(friendly) = parsed.non_bounceable.and_then(|f| f.b64url) {
                            return friendly;
                        }
                        tracing::warn!("parse response for {} carried no b64url", address);
                    }
                    Err(e) => {
                        tracing::error!("malformed parse response for {}: {}", address, e);
                    }
                }
            }
            Ok(response) => {
                tracing::warn!("address parse returned {} for {}", response.status(), address);
            }
            Err(e) => {
                tracing::error!("error converting address {}: {}", address, e);
            }
        }

        address.to_string()
    }

    /// TON balance in nanotons. Any error degrades to 0.
    pub async fn get_ton_balance(&self, address: &str) -> u128 {
        let friendly = self.resolve_friendly(address).await;
        tracing::debug!("getting TON balance for {} -> {}", address, friendly);

        let url = format!("{}/accounts/{}", self.api_base, friendly);
        match self.client.get(&url).timeout(BALANCE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<AccountResponse>().await {
                    Ok(account) => account.balance as u128,
                    Err(e) => {
                        tracing::error!("malformed account response for {}: {}", address, e);
                        0
                    }
                }
            }
            Ok(response) => {
                tracing::warn!("TON API error {} for {}", response.status(), address);
                0
            }
            Err(e) => {
                tracing::error!("error getting TON balance for {}: {}", address, e);
                0
            }
        }
    }

    /// SPW jetton balance in nano units: linear scan of the wallet's
    /// jetton holdings for the SPW master address. Absent token or any
    /// error degrades to 0.
    pub async fn get_spw_balance(&self, address: &str) -> u128 {
        let friendly = self.resolve_friendly(address).await;
        tracing::debug!("getting SPW balance for {} -> {}", address, friendly);

        let url = format!("{}/accounts/{}/jettons", self.api_base, friendly);
        match self.client.get(&url).timeout(BALANCE_TIMEOUT).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<JettonsResponse>().await {
                    Ok(holdings) => {
                        tracing::debug!(
                            "found {} jettons in {}",
                            holdings.balances.len(),
                            friendly
                        );
                        for holding in &holdings.balances {
                            tracing::debug!(
                                "  - {}: {} | {}",
                                holding.jetton.symbol,
                                holding.balance,
                                holding.jetton.address
                            );
                        }

                        holdings.balances
                            .iter()
                            .find(|h| h.jetton.address == SPW_TOKEN_ADDRESS)
                            .map(|h| h.balance.parse().unwrap_or(0))
                            .unwrap_or(0)
                    }
                    Err(e) => {
                        tracing::error!("malformed jettons response for {}: {}", address, e);
                        0
                    }
                }
            }
            Ok(response) => {
                tracing::warn!("TON API jettons error {} for {}", response.status(), address);
                0
            }
            Err(e) => {
                tracing::error!("error getting SPW balance for {}: {}", address, e);
                0
            }
        }
    }

    /// Both balances plus their human-readable renderings. Never fails;
    /// addresses that pass no shape check short-circuit to zeros without
    /// a network round-trip.
    pub async fn get_wallet_balances(&self, address: &str) -> WalletBalances {
        if !address::is_valid_format(address) {
            tracing::warn!("refusing balance fetch for malformed address {:?}", address);
            return WalletBalances::zero(address);
        }

        let ton = self.get_ton_balance(address).await;
        let spw = self.get_spw_balance(address).await;

        WalletBalances {
            address: address.to_string(),
            ton_balance: ton,
            spw_balance: spw,
            ton_human: format_balance(ton, TON_DECIMALS),
            spw_human: format_balance(spw, SPW_DECIMALS),
            fetched_at: Utc::now(),
        }
    }
}

#[async_trait]
impl QuoteProvider for TonProvider {
    async fn wallet_balances(&self, address: &str) -> Result<WalletBalances> {
        Ok(self.get_wallet_balances(address).await)
    }
}

/// Render a nano-unit balance as a display string: divide by
/// 10^decimals, round half-up to exactly two fraction digits, thousands
/// grouped with spaces. Integer math throughout, zero renders as "0.00".
pub fn format_balance(raw: u128, decimals: u32) -> String {
    if raw == 0 {
        return "0.00".to_string();
    }

    let scale = (10u128).pow(decimals);
    let mut whole = raw / scale;
    let frac = raw % scale;
    let mut cents = match decimals {
        0 => 0,
        1 => frac * 10,
        2 => frac,
        d => (frac + 5 * (10u128).pow(d - 3)) / (10u128).pow(d - 2),
    };

    // rounding can carry into the whole part
    if cents >= 100 {
        whole += 1;
        cents -= 100;
    }

    format!("{}.{:02}", group_thousands(whole), cents)
}

fn group_thousands(value: u128) -> String {
    let digits: Vec<char> = value.to_string().chars().collect();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}
