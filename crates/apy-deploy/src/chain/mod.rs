mod cheats;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
pub use cheats::{dev_wallet, DevNode};
use ethers::{
    core::utils::Anvil,
    middleware::{
        gas_escalator::{Frequency, GeometricGasPrice},
        nonce_manager::NonceManagerError,
        GasEscalatorMiddleware, NonceManagerMiddleware, SignerMiddleware,
    },
    providers::{
        Http, HttpClientError, HttpRateLimitRetryPolicy, Middleware, Provider, RetryClient,
        RetryClientBuilder, RetryPolicy,
    },
    signers::Signer,
    types::Address,
    utils::AnvilInstance,
};
use eyre::Result;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const ANVIL_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors public nodes return while their view of the chain lags behind the
/// block a transaction was built against. They clear up on their own.
const LAGGING_NODE_ERRORS: &[&str] = &["intrinsic gas too high", "header not found"];

/// A connection to an Ethereum node. Besides handing out providers and
/// signing clients, a `Chain` exposes the cheat codes that development nodes
/// (anvil and hardhat) offer for tests and local rehearsals.
pub struct Chain {
    provider: Provider<Http>,
    client_version: String,
    _maybe_anvil: Option<AnvilInstance>,
}

impl Chain {
    /// Connects to the node behind `maybe_rpc_url`. Without a URL an anvil
    /// node is spawned, forking `maybe_fork_url` when one is given so that
    /// mainnet contracts and whales are available locally.
    pub async fn connect(
        maybe_rpc_url: Option<String>,
        maybe_fork_url: Option<String>,
    ) -> Result<Self> {
        if let Some(rpc_url) = maybe_rpc_url {
            if maybe_fork_url.is_some() {
                warn!("ignoring the fork url since an rpc url was provided");
            }
            let provider = Provider::<Http>::try_from(rpc_url)?.interval(POLL_INTERVAL);
            let client_version = provider.client_version().await?;
            info!(%client_version, "connected");
            Ok(Self {
                provider,
                client_version,
                _maybe_anvil: None,
            })
        } else {
            let anvil = match maybe_fork_url {
                Some(fork_url) => Anvil::new().fork(fork_url).spawn(),
                None => Anvil::new().spawn(),
            };
            let provider =
                Provider::<Http>::try_from(anvil.endpoint())?.interval(ANVIL_POLL_INTERVAL);
            let client_version = provider.client_version().await?;
            info!(endpoint = %anvil.endpoint(), %client_version, "spawned anvil");
            Ok(Self {
                provider,
                client_version,
                _maybe_anvil: Some(anvil),
            })
        }
    }

    /// A provider that can access the chain.
    pub fn provider(&self) -> Provider<Http> {
        self.provider.clone()
    }

    /// A signing client tuned for the node behind this chain.
    pub async fn client<S: Signer + 'static>(&self, signer: S) -> Result<Arc<ChainClient<S>>> {
        let tuning = match DevNode::detect(&self.client_version) {
            Some(_) => ClientTuning::DEV_NODE,
            None => ClientTuning::PUBLIC,
        };
        Ok(Arc::new(
            ChainClient::new(self.provider(), signer, tuning).await?,
        ))
    }

    /// The node's self-reported version, e.g. `anvil/v0.2.0`.
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    pub async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chainid().await?.as_u64())
    }
}

/// How patient a [`ChainClient`] is with its node.
///
/// Development nodes mine instantly, so a script only waits on them when
/// something is broken. Mainnet and the testnets need real backoff and a
/// gas price that keeps climbing while a deployment sits in the mempool.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientTuning {
    pub rate_limit_retries: u32,
    pub timeout_retries: u32,
    pub initial_backoff: Duration,
    /// Backoff for the errors in `LAGGING_NODE_ERRORS`.
    pub lag_backoff: Duration,
    /// Multiplier applied to a stuck transaction's gas price every block.
    pub gas_price_coefficient: f64,
    /// Seconds between gas price bumps.
    pub gas_price_interval: u64,
    /// Upper bound for escalated gas prices, in wei.
    pub max_gas_price: Option<u64>,
}

impl ClientTuning {
    pub const DEV_NODE: Self = Self {
        rate_limit_retries: 3,
        timeout_retries: 1,
        initial_backoff: Duration::from_millis(10),
        lag_backoff: Duration::from_millis(10),
        gas_price_coefficient: 1.125,
        gas_price_interval: 10,
        max_gas_price: None,
    };

    pub const PUBLIC: Self = Self {
        rate_limit_retries: 10,
        timeout_retries: 3,
        initial_backoff: Duration::from_millis(500),
        lag_backoff: Duration::from_secs(2),
        gas_price_coefficient: 1.125,
        gas_price_interval: 60,
        // 500 gwei
        max_gas_price: Some(500_000_000_000),
    };
}

#[derive(Debug)]
struct ChainRetryPolicy {
    rate_limits: HttpRateLimitRetryPolicy,
    lag_backoff: Duration,
}

impl ChainRetryPolicy {
    fn is_lagging(error: &HttpClientError) -> bool {
        let message = error.to_string();
        LAGGING_NODE_ERRORS
            .iter()
            .any(|lagging| message.contains(lagging))
    }
}

impl RetryPolicy<HttpClientError> for ChainRetryPolicy {
    fn should_retry(&self, error: &HttpClientError) -> bool {
        if Self::is_lagging(error) {
            debug!(%error, "node is lagging, retrying");
            return true;
        }
        self.rate_limits.should_retry(error)
    }

    fn backoff_hint(&self, error: &HttpClientError) -> Option<Duration> {
        self.rate_limits
            .backoff_hint(error)
            .or_else(|| Self::is_lagging(error).then_some(self.lag_backoff))
    }
}

type ChainClientProvider = Arc<RetryClient<Http>>;

type ChainClientInner<S> =
    NonceManagerMiddleware<SignerMiddleware<GasEscalatorMiddleware<Provider<ChainClientProvider>>, S>>;

/// The client every script transaction goes through. Requests are retried
/// while the node is rate limiting or lagging, stuck transactions are
/// repriced, and nonces are tracked locally so a deployment sequence doesn't
/// wait on the node between transactions.
#[derive(Debug)]
pub struct ChainClient<S: Signer + 'static> {
    inner: ChainClientInner<S>,
    address: Address,
}

impl<S: Signer + 'static> ChainClient<S> {
    pub async fn new(provider: Provider<Http>, signer: S, tuning: ClientTuning) -> Result<Self> {
        let interval = provider.get_interval();
        let policy = ChainRetryPolicy {
            rate_limits: HttpRateLimitRetryPolicy,
            lag_backoff: tuning.lag_backoff,
        };
        let retrying = RetryClientBuilder::default()
            .rate_limit_retries(tuning.rate_limit_retries)
            .timeout_retries(tuning.timeout_retries)
            .initial_backoff(tuning.initial_backoff)
            .build(provider.as_ref().clone(), Box::new(policy));
        let provider = Provider::new(Arc::new(retrying)).interval(interval);

        let escalator = GeometricGasPrice::new(
            tuning.gas_price_coefficient,
            tuning.gas_price_interval,
            tuning.max_gas_price,
        );
        let inner = GasEscalatorMiddleware::new(provider, escalator, Frequency::PerBlock);
        let inner = SignerMiddleware::new_with_provider_chain(inner, signer).await?;
        let address = inner.address();
        debug!(?address, ?tuning, "built chain client");

        Ok(Self {
            inner: NonceManagerMiddleware::new(inner, address),
            address,
        })
    }

    /// The address transactions are sent from.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl<S: Signer + 'static> Middleware for ChainClient<S> {
    type Error = NonceManagerError<Self::Inner>;
    type Provider = ChainClientProvider;
    type Inner = ChainClientInner<S>;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_tuning_is_more_patient() {
        let (dev, public) = (ClientTuning::DEV_NODE, ClientTuning::PUBLIC);
        assert!(public.initial_backoff > dev.initial_backoff);
        assert!(public.lag_backoff > dev.lag_backoff);
        assert!(public.rate_limit_retries > dev.rate_limit_retries);
        assert!(public.max_gas_price.is_some());
    }
}
