use std::time::Duration;

use ethers::{types::U256, utils::parse_units};
use eyre::{eyre, Result};
use serde::Deserialize;
use tokio::time::sleep;
use tracing::info;

const RETRIES: usize = 5;
const RETRY_TIME: Duration = Duration::from_millis(500);

/// The subset of an EthGasStation style response that we use. Prices are
/// quoted in tenths of a gwei.
#[derive(Debug, Deserialize)]
struct GasStationResponse {
    fast: f64,
}

/// Converts a price in gwei into wei.
pub fn gwei(amount: f64) -> Result<U256> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(eyre!("invalid gas price of {} gwei", amount));
    }
    Ok(parse_units(format!("{:.9}", amount), "gwei")?.into())
}

/// Converts an EthGasStation `fast` reading, which is quoted in tenths of a
/// gwei, into wei.
pub fn gas_price_from_station(fast: f64) -> Result<U256> {
    if !fast.is_finite() || fast < 0.0 {
        return Err(eyre!("invalid gas station reading {}", fast));
    }
    Ok(parse_units(format!("{:.8}", fast), 8u32)?.into())
}

/// Picks the gas price for outgoing transactions. An explicit price wins;
/// otherwise the oracle is consulted. With neither the price is left to the
/// node.
#[derive(Clone, Debug, Default)]
pub struct GasPriceOracle {
    gwei_override: Option<f64>,
    oracle_url: Option<String>,
}

impl GasPriceOracle {
    pub fn new(gwei_override: Option<f64>, oracle_url: Option<String>) -> Self {
        Self {
            gwei_override,
            oracle_url,
        }
    }

    pub async fn gas_price(&self) -> Result<Option<U256>> {
        if let Some(price) = self.gwei_override {
            let gas_price = gwei(price)?;
            info!(gwei = price, "using gas price override");
            return Ok(Some(gas_price));
        }
        let oracle_url = match &self.oracle_url {
            Some(oracle_url) => oracle_url,
            None => return Ok(None),
        };

        let mut maybe_reading = None;
        for _ in 0..RETRIES {
            let response = reqwest::get(oracle_url).await?;
            if response.status().is_success() {
                maybe_reading = Some(response.json::<GasStationResponse>().await?);
                break;
            } else {
                sleep(RETRY_TIME).await;
            }
        }
        let reading = maybe_reading.ok_or(eyre!(
            "couldn't get a gas price from {} after {} retries",
            oracle_url,
            RETRIES
        ))?;
        let gas_price = gas_price_from_station(reading.fast)?;
        info!(gwei = reading.fast / 10.0, "using gas station price");
        Ok(Some(gas_price))
    }
}
