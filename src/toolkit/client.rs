//! SDK client boundary for the DeFi toolkit
//!
//! `AgentClient` is the seam the toolkit delegates all real work through.
//! `SolanaAgentClient` is the production implementation: a nonblocking RPC
//! client for on-chain queries plus an HTTP client for the token-data
//! services (CoinGecko, RugCheck, Jupiter token list).

use async_trait::async_trait;
use serde_json::{json, Value};
use solana_account_decoder::UiAccountData;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{DefikitError, DefikitResult};

const HTTP_TIMEOUT_SECS: u64 = 30;

const COINGECKO_API: &str = "https://api.coingecko.com/api/v3";
const RUGCHECK_API: &str = "https://api.rugcheck.xyz/v1";
const JUPITER_TOKEN_API: &str = "https://tokens.jup.ag";

/// Async boundary to the underlying SDK and token-data services.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Wallet SOL balance in lamports
    async fn sol_balance(&self) -> DefikitResult<u64>;

    /// Aggregate SPL token balance for a mint across the wallet's accounts
    async fn token_balance(&self, mint: &str) -> DefikitResult<Value>;

    /// Current network transactions per second
    async fn network_tps(&self) -> DefikitResult<f64>;

    /// Trending tokens (CoinGecko)
    async fn trending_tokens(&self) -> DefikitResult<Value>;

    /// Token price data (CoinGecko)
    async fn token_price(&self, token_id: &str) -> DefikitResult<Value>;

    /// Token safety report (RugCheck)
    async fn token_report(&self, mint: &str) -> DefikitResult<Value>;

    /// Token metadata (Jupiter token list)
    async fn token_data(&self, mint: &str) -> DefikitResult<Value>;
}

/// Production client backed by Solana RPC and public token-data APIs.
pub struct SolanaAgentClient {
    rpc: RpcClient,
    http: reqwest::Client,
    signer: Keypair,
    coingecko_api_key: Option<String>,
}

impl SolanaAgentClient {
    /// Build a client from an RPC URL and a base58-encoded keypair.
    pub fn new(
        rpc_url: &str,
        private_key_b58: &str,
        coingecko_api_key: Option<String>,
    ) -> DefikitResult<Self> {
        let signer = super::wallet::keypair_from_base58(private_key_b58)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(DefikitError::HttpError)?;

        Ok(Self {
            rpc: RpcClient::new(rpc_url.to_string()),
            http,
            signer,
            coingecko_api_key,
        })
    }

    /// The wallet public key this client signs and queries as.
    pub fn pubkey(&self) -> Pubkey {
        self.signer.pubkey()
    }

    async fn get_json(&self, url: &str) -> DefikitResult<Value> {
        let mut request = self.http.get(url);

        if let Some(key) = &self.coingecko_api_key {
            if url.starts_with(COINGECKO_API) {
                request = request.header("x-cg-demo-api-key", key);
            }
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AgentClient for SolanaAgentClient {
    async fn sol_balance(&self) -> DefikitResult<u64> {
        Ok(self.rpc.get_balance(&self.signer.pubkey()).await?)
    }

    async fn token_balance(&self, mint: &str) -> DefikitResult<Value> {
        let mint = Pubkey::from_str(mint)
            .map_err(|e| DefikitError::InvalidAddress(format!("{}: {}", mint, e)))?;

        let accounts = self
            .rpc
            .get_token_accounts_by_owner(&self.signer.pubkey(), TokenAccountsFilter::Mint(mint))
            .await?;

        let mut amount = 0.0;
        for keyed in &accounts {
            if let UiAccountData::Json(parsed) = &keyed.account.data {
                if let Some(ui_amount) = parsed
                    .parsed
                    .pointer("/info/tokenAmount/uiAmount")
                    .and_then(Value::as_f64)
                {
                    amount += ui_amount;
                }
            }
        }

        Ok(json!({
            "amount": amount,
            "accounts": accounts.len(),
        }))
    }

    async fn network_tps(&self) -> DefikitResult<f64> {
        let samples = self.rpc.get_recent_performance_samples(Some(1)).await?;

        let sample = samples
            .first()
            .ok_or_else(|| DefikitError::NetworkError("No recent performance samples".into()))?;

        if sample.sample_period_secs == 0 {
            return Err(DefikitError::NetworkError(
                "Empty performance sample period".into(),
            ));
        }

        Ok(sample.num_transactions as f64 / f64::from(sample.sample_period_secs))
    }

    async fn trending_tokens(&self) -> DefikitResult<Value> {
        self.get_json(&format!("{}/search/trending", COINGECKO_API))
            .await
    }

    async fn token_price(&self, token_id: &str) -> DefikitResult<Value> {
        self.get_json(&format!(
            "{}/simple/price?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_change=true",
            COINGECKO_API, token_id
        ))
        .await
    }

    async fn token_report(&self, mint: &str) -> DefikitResult<Value> {
        self.get_json(&format!("{}/tokens/{}/report/summary", RUGCHECK_API, mint))
            .await
    }

    async fn token_data(&self, mint: &str) -> DefikitResult<Value> {
        self.get_json(&format!("{}/token/{}", JUPITER_TOKEN_API, mint))
            .await
    }
}
