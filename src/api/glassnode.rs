// ============================================================================
// API Client : Glassnode
// ============================================================================
// Volatilité réalisée sur 1 semaine, résolution 24h. La réponse est un
// tableau de points `{ "t": <timestamp>, "v": <ratio> }` triés par date.
// Authentification par header `X-Api-Key`.
// ============================================================================

use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{ApiRequest, FetchError, JsonSource};
use crate::config::{join_url, ApiConfig};

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Actifs suivis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Btc,
    Eth,
}

impl Asset {
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
        }
    }
}

pub fn volatility_request(config: &ApiConfig, asset: Asset) -> ApiRequest {
    let path = format!(
        "v1/metrics/market/realized_volatility_1w?a={}&i=24h",
        asset.symbol()
    );
    ApiRequest::get(join_url(&config.glassnode_base, &path))
        .header(API_KEY_HEADER, config.glassnode_key.clone())
}

/// Extrait `v` du dernier point de la série
pub fn parse_latest_volatility(body: &Value) -> Option<f64> {
    body.as_array()?.last()?.get("v").and_then(Value::as_f64)
}

#[instrument(skip_all, fields(asset = asset.symbol()))]
pub async fn fetch_volatility(
    source: &dyn JsonSource,
    config: &ApiConfig,
    asset: Asset,
) -> Result<Option<f64>, FetchError> {
    let body = source.get_json(&volatility_request(config, asset)).await?;
    let latest = parse_latest_volatility(&body);
    debug!(latest = ?latest, "Parsed realized volatility");
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_volatility_request() {
        let config = ApiConfig {
            glassnode_key: "gn".to_string(),
            ..ApiConfig::default()
        };
        let request = volatility_request(&config, Asset::Eth);
        assert_eq!(
            request.url,
            "https://api.glassnode.com/v1/metrics/market/realized_volatility_1w?a=ETH&i=24h"
        );
        assert_eq!(request.header_value("x-api-key"), Some("gn"));
    }

    #[test]
    fn test_parse_latest_volatility() {
        let body = json!([{"t": 1, "v": 0.61}, {"t": 2, "v": 0.0523}]);
        assert_eq!(parse_latest_volatility(&body), Some(0.0523));
    }

    #[test]
    fn test_parse_latest_volatility_missing() {
        assert_eq!(parse_latest_volatility(&json!([])), None);
        assert_eq!(parse_latest_volatility(&json!({"v": 0.5})), None);
        assert_eq!(parse_latest_volatility(&json!([{"t": 3, "v": null}])), None);
    }
}
