// ============================================================================
// API Client : blockchaincenter.net
// ============================================================================
// Altcoin Season Index. Le site n'a pas d'API officielle : on lit le fichier
// JSON servi à sa page, dont `data` est un historique chronologique.
// ============================================================================

use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{ApiRequest, FetchError, JsonSource};
use crate::config::ApiConfig;
use crate::models::format;

pub fn alt_season_request(config: &ApiConfig) -> ApiRequest {
    ApiRequest::get(config.alt_season_url.clone())
}

/// Extrait la `value` de la dernière entrée de `data`
pub fn parse_alt_season(body: &Value) -> Option<String> {
    let history = body.get("data")?.as_array()?;
    debug!(entries = history.len(), "Altcoin season history");
    history.last()?.get("value").and_then(format::scalar)
}

#[instrument(skip_all)]
pub async fn fetch_alt_season(source: &dyn JsonSource, config: &ApiConfig) -> Result<Option<String>, FetchError> {
    let body = source.get_json(&alt_season_request(config)).await?;
    Ok(parse_alt_season(&body))
}
