// ============================================================================
// API Client : Coinglass
// ============================================================================
// Deux métriques, toutes deux authentifiées par le header `coinglassSecret` :
// - historique des flux nets des ETF Bitcoin (première entrée = la plus récente)
// - carte des liquidations futures BTC, qui porte le ratio long/short
// ============================================================================

use serde_json::Value;
use tracing::instrument;

use crate::api::{ApiRequest, FetchError, JsonSource};
use crate::config::{join_url, ApiConfig};
use crate::models::format;

/// Header d'authentification Coinglass
pub const SECRET_HEADER: &str = "coinglassSecret";

/// Requête de l'historique des ETF
pub fn etf_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest::get(join_url(&config.coinglass_base, "public/v2/etf/history"))
        .header(SECRET_HEADER, config.coinglass_key.clone())
}

/// Requête de la carte des liquidations BTC
pub fn long_short_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest::get(join_url(
        &config.coinglass_base,
        "api/futures/liquidationMap?symbol=BTC",
    ))
    .header(SECRET_HEADER, config.coinglass_key.clone())
}

/// Extrait `data[0].netFlow` (en millions USD)
pub fn parse_etf_net_flow(body: &Value) -> Option<String> {
    body.get("data")?.get(0)?.get("netFlow").and_then(format::scalar)
}

/// Extrait `data.longShortRatio`
pub fn parse_long_short_ratio(body: &Value) -> Option<String> {
    body.get("data")?.get("longShortRatio").and_then(format::scalar)
}

#[instrument(skip_all)]
pub async fn fetch_etf_net_flow(source: &dyn JsonSource, config: &ApiConfig) -> Result<Option<String>, FetchError> {
    let body = source.get_json(&etf_request(config)).await?;
    Ok(parse_etf_net_flow(&body))
}

#[instrument(skip_all)]
pub async fn fetch_long_short_ratio(source: &dyn JsonSource, config: &ApiConfig) -> Result<Option<String>, FetchError> {
    let body = source.get_json(&long_short_request(config)).await?;
    Ok(parse_long_short_ratio(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed_config() -> ApiConfig {
        ApiConfig {
            coinglass_key: "cg-key".to_string(),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn test_requests_carry_secret() {
        let config = keyed_config();

        let etf = etf_request(&config);
        assert_eq!(etf.url, "https://open-api.coinglass.com/public/v2/etf/history");
        assert_eq!(etf.header_value("coinglassSecret"), Some("cg-key"));

        let ratio = long_short_request(&config);
        assert_eq!(
            ratio.url,
            "https://open-api.coinglass.com/api/futures/liquidationMap?symbol=BTC"
        );
        assert_eq!(ratio.header_value("coinglasssecret"), Some("cg-key"));
    }

    #[test]
    fn test_parse_etf_uses_first_entry() {
        let body = json!({"data": [{"netFlow": 123.4}, {"netFlow": -50}]});
        assert_eq!(parse_etf_net_flow(&body).as_deref(), Some("123.4"));
        assert_eq!(parse_etf_net_flow(&json!({"data": []})), None);
    }

    #[test]
    fn test_parse_long_short_ratio() {
        assert_eq!(
            parse_long_short_ratio(&json!({"data": {"longShortRatio": 1.08}})).as_deref(),
            Some("1.08")
        );
        assert_eq!(parse_long_short_ratio(&json!({"data": null})), None);
    }
}
