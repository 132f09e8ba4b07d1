// ============================================================================
// Client HTTP : reqwest
// ============================================================================
// Implémentation de JsonSource au-dessus de reqwest.
//
// Un seul reqwest::Client est créé et réutilisé par toutes les métriques
// (pool de connexions partagé). Pas de retry, pas de timeout : une requête
// qui échoue est simplement journalisée par l'appelant.
// ============================================================================

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::{ApiRequest, FetchError, JsonSource};

/// User-Agent envoyé aux fournisseurs
///
/// Certains endpoints publics refusent les requêtes sans User-Agent.
const USER_AGENT: &str = concat!("lazymetrics/", env!("CARGO_PKG_VERSION"));

/// Source JSON basée sur reqwest
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Crée le client HTTP partagé
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Échec de la création du client HTTP")?;
        Ok(Self::with_client(client))
    }

    /// Utilise un client déjà configuré (proxy, TLS...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonSource for HttpSource {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn get_json(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }

        debug!(headers = request.headers.len(), "Sending HTTP request");
        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        // Vérifie que la réponse est un succès HTTP (200-299)
        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// Un serveur TCP local répond une seule fois avec une réponse HTTP brute :
// pas d'accès réseau, et on peut inspecter la requête envoyée par reqwest.
// ============================================================================
