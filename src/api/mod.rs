// ============================================================================
// Module : api
// ============================================================================
// Clients des fournisseurs de données crypto. Chaque fournisseur construit
// sa requête depuis ApiConfig et extrait ses champs d'un serde_json::Value.
//
// Le transport HTTP passe par le trait JsonSource : en production c'est
// reqwest (http::HttpSource), dans les tests une source simulée.
// ============================================================================

pub mod http;             // Client reqwest
pub mod coingecko;        // Prix spot BTC / ETH
pub mod alternative;      // Fear & Greed Index
pub mod blockchaincenter; // Altcoin Season Index
pub mod coinglass;        // Flux ETF + ratio long/short
pub mod glassnode;        // Volatilité réalisée

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

// Re-export du client principal
pub use http::HttpSource;

/// Requête GET vers un fournisseur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Ajoute un header (ex: clé d'API)
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Valeur d'un header, comparaison insensible à la casse
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Erreurs d'appel à un fournisseur
///
/// Aucune n'est fatale : le MetricsUpdater les journalise et passe à la
/// suite.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Réponse HTTP hors 2xx
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Erreur réseau (DNS, connexion, TLS...)
    #[error("transport error: {0}")]
    Transport(String),

    /// Corps de réponse qui n'est pas du JSON valide
    #[error("invalid JSON body: {0}")]
    Decode(String),
}

/// Source de documents JSON
///
/// CONCEPT RUST : trait objet async
/// - #[async_trait] permet `async fn` dans un trait utilisé via `dyn`
/// - Send + Sync : partagé par Arc entre tâches tokio
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, request: &ApiRequest) -> Result<Value, FetchError>;
}
