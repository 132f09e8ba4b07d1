// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Prix spot en USD via /simple/price (endpoint public, sans clé).
// ============================================================================

use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{ApiRequest, FetchError, JsonSource};
use crate::config::{join_url, ApiConfig};

/// Identifiants CoinGecko demandés en une seule requête
pub const COIN_IDS: [&str; 2] = ["bitcoin", "ethereum"];

/// Prix spot extraits de la réponse (None = champ absent)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpotPrices {
    pub btc_usd: Option<f64>,
    pub eth_usd: Option<f64>,
}

/// Construit la requête /simple/price
pub fn price_request(config: &ApiConfig) -> ApiRequest {
    let path = format!("simple/price?ids={}&vs_currencies=usd", COIN_IDS.join(","));
    ApiRequest::get(join_url(&config.coingecko_base, &path))
}

/// Extrait `<coin>.usd` pour BTC et ETH
///
/// CONCEPT RUST : Option chaining
/// - .get() renvoie None si la clé manque, .and_then() propage
/// - équivalent de `data.bitcoin?.usd`
pub fn parse_prices(body: &Value) -> SpotPrices {
    let usd = |coin: &str| body.get(coin).and_then(|quote| quote.get("usd")).and_then(Value::as_f64);
    SpotPrices {
        btc_usd: usd("bitcoin"),
        eth_usd: usd("ethereum"),
    }
}

/// Récupère les prix BTC et ETH
#[instrument(skip_all)]
pub async fn fetch_prices(source: &dyn JsonSource, config: &ApiConfig) -> Result<SpotPrices, FetchError> {
    let body = source.get_json(&price_request(config)).await?;
    let prices = parse_prices(&body);
    debug!(btc = ?prices.btc_usd, eth = ?prices.eth_usd, "Parsed spot prices");
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_request_url() {
        let request = price_request(&ApiConfig::default());
        assert_eq!(
            request.url,
            "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd"
        );
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_parse_prices() {
        let body = json!({"bitcoin": {"usd": 65000}, "ethereum": {"usd": 3400.5}});
        let prices = parse_prices(&body);
        assert_eq!(prices.btc_usd, Some(65000.0));
        assert_eq!(prices.eth_usd, Some(3400.5));
    }

    #[test]
    fn test_parse_prices_missing_coin() {
        let body = json!({"ethereum": {"usd": 3400}});
        let prices = parse_prices(&body);
        assert_eq!(prices.btc_usd, None);
        assert_eq!(prices.eth_usd, Some(3400.0));

        assert_eq!(parse_prices(&json!([])), SpotPrices::default());
    }
}
