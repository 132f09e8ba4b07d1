// ============================================================================
// API Client : alternative.me
// ============================================================================
// Crypto Fear & Greed Index. L'URL configurée demande déjà la dernière
// valeur seulement (limit=1).
// ============================================================================

use serde_json::Value;
use tracing::instrument;

use crate::api::{ApiRequest, FetchError, JsonSource};
use crate::config::ApiConfig;
use crate::models::format;

pub fn fear_greed_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest::get(config.fear_greed_url.clone())
}

/// Extrait `data[0].value` (une chaîne, ex: "42")
pub fn parse_fear_greed(body: &Value) -> Option<String> {
    body.get("data")?.get(0)?.get("value").and_then(format::scalar)
}

#[instrument(skip_all)]
pub async fn fetch_fear_greed(source: &dyn JsonSource, config: &ApiConfig) -> Result<Option<String>, FetchError> {
    let body = source.get_json(&fear_greed_request(config)).await?;
    Ok(parse_fear_greed(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fear_greed() {
        let body = json!({"name": "Fear and Greed Index", "data": [{"value": "42", "value_classification": "Fear"}]});
        assert_eq!(parse_fear_greed(&body).as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_fear_greed_missing() {
        assert_eq!(parse_fear_greed(&json!({"data": []})), None);
        assert_eq!(parse_fear_greed(&json!({"metadata": {"error": null}})), None);
        assert_eq!(parse_fear_greed(&json!({"data": [{"value": null}]})), None);
    }
}
