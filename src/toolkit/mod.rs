//! Cached async DeFi toolkit
//!
//! Thin wrappers around an [`AgentClient`] exposing balance, price,
//! trending-token, safety-report, TPS, and token-metadata operations. Every
//! operation returns a [`ToolResult`] and never raises: SDK and network
//! failures are converted into failure results at the operation boundary.
//! Successful results are cached for a freshness window, and completed
//! operations are appended to a bounded audit trail.

mod cache;
mod client;
mod history;
mod wallet;

pub use cache::ToolCache;
pub use client::{AgentClient, SolanaAgentClient};
pub use history::{OperationHistory, OperationRecord, ToolkitStats, MAX_HISTORY};
pub use wallet::{keypair_from_base58, wallet_json_to_base58};

use crate::config::{Config, ToolCapabilities};
use crate::error::DefikitResult;
use serde::Serialize;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Maximum error length carried in a result envelope
const RESULT_ERROR_LEN: usize = 200;

/// Truncate a message to at most `max` characters.
pub(crate) fn truncate(message: &str, max: usize) -> String {
    message.chars().take(max).collect()
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Standardized result from any toolkit operation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub tool: String,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: f64,
}

impl ToolResult {
    pub fn ok(tool: &str, data: Value, elapsed_ms: f64) -> Self {
        Self {
            success: true,
            tool: tool.to_string(),
            data,
            error: None,
            elapsed_ms,
        }
    }

    pub fn fail(tool: &str, error: impl AsRef<str>, elapsed_ms: f64) -> Self {
        Self {
            success: false,
            tool: tool.to_string(),
            data: Value::Null,
            error: Some(truncate(error.as_ref(), RESULT_ERROR_LEN)),
            elapsed_ms,
        }
    }
}

/// Snapshot of toolkit availability and configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityReport {
    pub initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_error: Option<String>,
    pub rpc_url: String,
    pub operation_count: usize,
    pub tools: ToolCapabilities,
}

/// DeFi toolkit for a single agent wallet.
///
/// Owns its cache and history explicitly; both are mutex-guarded so shared
/// references can race at worst into a duplicate external call or an
/// out-of-order history entry.
pub struct DeFiToolkit {
    config: Config,
    capabilities: ToolCapabilities,
    client: Option<Arc<dyn AgentClient>>,
    init_error: Option<String>,
    cache: ToolCache,
    history: OperationHistory,
}

impl DeFiToolkit {
    /// Create an uninitialized toolkit. Call [`initialize`](Self::initialize)
    /// before invoking operations.
    pub fn new(config: Config) -> Self {
        let capabilities = config.tools.clone();
        let cache = ToolCache::new(Duration::from_secs(config.cache_ttl_secs));

        Self {
            config,
            capabilities,
            client: None,
            init_error: None,
            cache,
            history: OperationHistory::new(),
        }
    }

    /// Create a toolkit around an existing client, skipping wallet setup.
    pub fn with_client(config: Config, client: Arc<dyn AgentClient>) -> Self {
        let mut toolkit = Self::new(config);
        toolkit.client = Some(client);
        toolkit
    }

    /// One-time initialization: derive the signing credential from the wallet
    /// file and construct the SDK client. Returns true on success; on failure
    /// the error is retained and reported by every subsequent operation.
    pub async fn initialize(&mut self) -> bool {
        match self.build_client() {
            Ok(client) => {
                log::info!(
                    "DeFi toolkit initialized (wallet={}, rpc={})",
                    self.config.wallet_path.display(),
                    self.config.rpc_url
                );
                self.client = Some(Arc::new(client));
                self.init_error = None;
                true
            }
            Err(e) => {
                let message = e.to_string();
                log::warn!("DeFi toolkit init failed: {}", message);
                self.init_error = Some(message);
                false
            }
        }
    }

    fn build_client(&self) -> DefikitResult<SolanaAgentClient> {
        let private_key_b58 = wallet::wallet_json_to_base58(&self.config.wallet_path)?;

        let api_key = if self.config.coingecko_api_key.is_empty() {
            None
        } else {
            Some(self.config.coingecko_api_key.clone())
        };

        SolanaAgentClient::new(&self.config.rpc_url, &private_key_b58, api_key)
    }

    /// Whether the toolkit has a usable client.
    pub fn available(&self) -> bool {
        self.client.is_some()
    }

    fn not_ready(&self, tool: &str) -> ToolResult {
        let message = self
            .init_error
            .clone()
            .unwrap_or_else(|| "Toolkit not initialized".to_string());
        ToolResult::fail(tool, message, 0.0)
    }

    fn capability_disabled(tool: &str, capability: &str) -> ToolResult {
        ToolResult::fail(
            tool,
            format!("Capability unavailable: {} is disabled", capability),
            0.0,
        )
    }

    /// Shared operation path: precondition check, cache lookup, timed call,
    /// envelope wrapping, caching of successes, history append.
    ///
    /// Precondition failures and cache hits are not recorded; failures are
    /// recorded but never cached.
    async fn run_tool<F, Fut>(&self, tool: &'static str, cache_key: String, call: F) -> ToolResult
    where
        F: FnOnce(Arc<dyn AgentClient>) -> Fut,
        Fut: Future<Output = DefikitResult<Value>>,
    {
        let Some(client) = self.client.clone() else {
            return self.not_ready(tool);
        };

        if let Some(hit) = self.cache.get(&cache_key) {
            return hit;
        }

        let start = Instant::now();
        let result = match call(client).await {
            Ok(data) => ToolResult::ok(tool, data, elapsed_ms(start)),
            Err(e) => {
                log::warn!("{} operation failed: {}", tool, e);
                ToolResult::fail(tool, e.to_string(), elapsed_ms(start))
            }
        };

        if result.success {
            self.cache.put(cache_key, result.clone());
        }
        self.history.record(&result);

        result
    }

    /// Get SOL balance, or an SPL token balance when a mint is given.
    pub async fn get_balance(&self, token_mint: Option<&str>) -> ToolResult {
        if !self.capabilities.balance {
            return Self::capability_disabled("balance", "balance");
        }

        let cache_key = format!("balance:{}", token_mint.unwrap_or("sol"));
        let mint = token_mint.map(str::to_owned);

        self.run_tool("balance", cache_key, move |client| async move {
            match mint {
                Some(mint) => {
                    let balance = client.token_balance(&mint).await?;
                    Ok(json!({"balance": balance, "token": mint, "unit": "tokens"}))
                }
                None => {
                    let lamports = client.sol_balance().await?;
                    Ok(json!({"balance": lamports, "token": "SOL", "unit": "lamports"}))
                }
            }
        })
        .await
    }

    /// Get current network TPS.
    pub async fn get_tps(&self) -> ToolResult {
        if !self.capabilities.tps {
            return Self::capability_disabled("tps", "tps");
        }

        let network = if self.config.rpc_url.contains("devnet") {
            "devnet"
        } else {
            "mainnet"
        };

        self.run_tool("tps", "tps".to_string(), move |client| async move {
            let tps = client.network_tps().await?;
            Ok(json!({"tps": tps, "network": network}))
        })
        .await
    }

    /// Get trending tokens from CoinGecko.
    pub async fn get_trending_tokens(&self) -> ToolResult {
        if !self.capabilities.coingecko {
            return Self::capability_disabled("trending", "coingecko");
        }

        self.run_tool("trending", "trending".to_string(), |client| async move {
            let trending = client.trending_tokens().await?;
            Ok(json!({"trending": trending}))
        })
        .await
    }

    /// Get token price data via CoinGecko.
    pub async fn get_token_price(&self, token_id: &str) -> ToolResult {
        if !self.capabilities.price {
            return Self::capability_disabled("price", "price");
        }

        let cache_key = format!("price:{}", token_id);
        let token_id = token_id.to_owned();

        self.run_tool("price", cache_key, move |client| async move {
            let price_data = client.token_price(&token_id).await?;
            Ok(json!({"token_id": token_id, "price_data": price_data}))
        })
        .await
    }

    /// Run a RugCheck safety analysis on a token mint.
    pub async fn get_token_report(&self, token_mint: &str) -> ToolResult {
        if !self.capabilities.rugcheck {
            return Self::capability_disabled("rugcheck", "rugcheck");
        }

        let cache_key = format!("rugcheck:{}", token_mint);
        let token_mint = token_mint.to_owned();

        self.run_tool("rugcheck", cache_key, move |client| async move {
            let report = client.token_report(&token_mint).await?;
            Ok(json!({"token_mint": token_mint, "report": report}))
        })
        .await
    }

    /// Get token metadata from the Jupiter token list.
    pub async fn get_token_data(&self, token_mint: &str) -> ToolResult {
        let cache_key = format!("token_data:{}", token_mint);
        let token_mint = token_mint.to_owned();

        self.run_tool("token_data", cache_key, move |client| async move {
            let data = client.token_data(&token_mint).await?;
            Ok(json!({"token_mint": token_mint, "token_data": data}))
        })
        .await
    }

    /// Report availability and configured capabilities.
    pub fn get_capabilities(&self) -> CapabilityReport {
        CapabilityReport {
            initialized: self.available(),
            init_error: self.init_error.clone(),
            rpc_url: self.config.rpc_url.clone(),
            operation_count: self.history.total(),
            tools: self.capabilities.clone(),
        }
    }

    /// Derive usage statistics from the bounded history.
    pub fn get_stats(&self) -> ToolkitStats {
        self.history
            .stats(self.cache.len(), self.capabilities.enabled_count())
    }

    /// Copy of the retained audit trail, oldest first.
    pub fn history(&self) -> Vec<OperationRecord> {
        self.history.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DefikitError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock client that counts invocations and optionally fails, echoing the
    /// requested argument in the error message.
    struct MockClient {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockClient {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn bump(&self, marker: &str) -> DefikitResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DefikitError::NetworkError(marker.to_string()))
            } else {
                Ok(json!({"marker": marker}))
            }
        }
    }

    #[async_trait]
    impl AgentClient for MockClient {
        async fn sol_balance(&self) -> DefikitResult<u64> {
            self.bump("sol")?;
            Ok(1_000_000_000)
        }

        async fn token_balance(&self, mint: &str) -> DefikitResult<Value> {
            self.bump(mint)
        }

        async fn network_tps(&self) -> DefikitResult<f64> {
            self.bump("tps")?;
            Ok(2500.0)
        }

        async fn trending_tokens(&self) -> DefikitResult<Value> {
            self.bump("trending")
        }

        async fn token_price(&self, token_id: &str) -> DefikitResult<Value> {
            self.bump(token_id)
        }

        async fn token_report(&self, mint: &str) -> DefikitResult<Value> {
            self.bump(mint)
        }

        async fn token_data(&self, mint: &str) -> DefikitResult<Value> {
            self.bump(mint)
        }
    }

    fn toolkit_with(client: Arc<MockClient>) -> DeFiToolkit {
        DeFiToolkit::with_client(Config::default(), client)
    }

    fn uncached_toolkit(client: Arc<MockClient>) -> DeFiToolkit {
        let config = Config {
            cache_ttl_secs: 0,
            ..Config::default()
        };
        DeFiToolkit::with_client(config, client)
    }

    #[tokio::test]
    async fn operations_before_initialization_fail_safely() {
        let toolkit = DeFiToolkit::new(Config::default());

        let result = toolkit.get_balance(None).await;
        assert!(!result.success);
        assert!(!result.error.unwrap().is_empty());

        // Precondition failures are not recorded
        assert!(toolkit.history().is_empty());
    }

    #[tokio::test]
    async fn cached_operation_invokes_client_at_most_once() {
        let client = MockClient::ok();
        let toolkit = toolkit_with(client.clone());

        let first = toolkit.get_tps().await;
        let second = toolkit.get_tps().await;

        assert!(first.success && second.success);
        assert_eq!(client.calls(), 1);
        assert_eq!(first.data["tps"], json!(2500.0));
    }

    #[tokio::test]
    async fn cache_keys_are_parameterized_by_argument() {
        let client = MockClient::ok();
        let toolkit = toolkit_with(client.clone());

        toolkit.get_token_price("solana").await;
        toolkit.get_token_price("solana").await;
        toolkit.get_token_price("bonk").await;

        assert_eq!(client.calls(), 2);
        assert_eq!(toolkit.get_stats().cache_size, 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let client = MockClient::failing();
        let toolkit = toolkit_with(client.clone());

        let first = toolkit.get_tps().await;
        let second = toolkit.get_tps().await;

        assert!(!first.success && !second.success);
        assert_eq!(client.calls(), 2);
        assert_eq!(toolkit.get_stats().cache_size, 0);
    }

    #[tokio::test]
    async fn history_is_bounded_to_most_recent_entries() {
        let client = MockClient::failing();
        let toolkit = uncached_toolkit(client.clone());

        for i in 0..150 {
            toolkit.get_token_price(&format!("token-{:03}", i)).await;
        }

        let history = toolkit.history();
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(toolkit.get_stats().total_operations, 150);

        // Oldest 50 evicted; remaining entries are in call order
        let first_error = history.first().and_then(|r| r.error.clone()).unwrap();
        let last_error = history.last().and_then(|r| r.error.clone()).unwrap();
        assert!(first_error.contains("token-050"));
        assert!(last_error.contains("token-149"));
    }

    #[tokio::test]
    async fn result_errors_are_truncated() {
        let toolkit = uncached_toolkit(MockClient::failing());

        let long_id = "x".repeat(500);
        let result = toolkit.get_token_price(&long_id).await;

        assert!(!result.success);
        assert_eq!(result.error.unwrap().chars().count(), 200);

        let record_error = toolkit.history()[0].error.clone().unwrap();
        assert_eq!(record_error.chars().count(), 100);
    }

    #[tokio::test]
    async fn disabled_capability_fails_without_calling_client() {
        let client = MockClient::ok();
        let config = Config {
            tools: ToolCapabilities {
                rugcheck: false,
                ..ToolCapabilities::default()
            },
            ..Config::default()
        };
        let toolkit = DeFiToolkit::with_client(config, client.clone());

        let result = toolkit.get_token_report("So11111111111111111111111111111111111111112").await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("rugcheck"));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn stats_aggregate_over_retained_window() {
        let ok = MockClient::ok();
        let toolkit = toolkit_with(ok.clone());

        toolkit.get_tps().await;
        toolkit.get_balance(None).await;
        toolkit.get_token_report("So11111111111111111111111111111111111111112").await;

        let stats = toolkit.get_stats();
        assert_eq!(stats.total_operations, 3);
        assert_eq!(stats.successful, 3);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.tools_available, 5);
        assert_eq!(stats.cache_size, 3);
    }

    #[tokio::test]
    async fn capability_report_reflects_initialization_state() {
        let toolkit = DeFiToolkit::new(Config::default());
        let report = toolkit.get_capabilities();

        assert!(!report.initialized);
        assert_eq!(report.operation_count, 0);

        let initialized = toolkit_with(MockClient::ok());
        assert!(initialized.get_capabilities().initialized);
    }
}
