// ============================================================================
// Configuration : URLs des fournisseurs et clés d'API
// ============================================================================
// La configuration est une valeur explicite passée au MetricsUpdater,
// jamais un singleton global : chaque routine reste testable avec une
// source simulée.
//
// Une clé vide signifie "fonctionnalité désactivée" : la métrique
// correspondante est ignorée sans aucune requête réseau.
// ============================================================================

/// URL de base par défaut de CoinGecko
pub const DEFAULT_COINGECKO_BASE: &str = "https://api.coingecko.com/api/v3";

/// Endpoint Fear & Greed (alternative.me), dernière valeur uniquement
pub const DEFAULT_FEAR_GREED_URL: &str = "https://api.alternative.me/fng/?limit=1";

/// Fichier JSON de l'Altcoin Season Index (blockchaincenter.net)
pub const DEFAULT_ALT_SEASON_URL: &str =
    "https://www.blockchaincenter.net/altcoin-season-index.json";

/// URL de base de l'API ouverte Coinglass
pub const DEFAULT_COINGLASS_BASE: &str = "https://open-api.coinglass.com";

/// URL de base de l'API Glassnode
pub const DEFAULT_GLASSNODE_BASE: &str = "https://api.glassnode.com";

/// Clés d'API utilisées par les métriques
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKey {
    /// Coinglass : ETF et ratio long/short
    Coinglass,
    /// Glassnode : volatilité réalisée
    Glassnode,
}

impl ApiKey {
    /// Nom lisible pour les logs
    pub fn provider(&self) -> &'static str {
        match self {
            ApiKey::Coinglass => "coinglass",
            ApiKey::Glassnode => "glassnode",
        }
    }
}

/// Configuration des fournisseurs de données
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub coingecko_base: String,
    pub fear_greed_url: String,
    pub alt_season_url: String,
    pub coinglass_base: String,
    pub glassnode_base: String,

    /// Clé Glassnode (vide = volatilité désactivée)
    pub glassnode_key: String,

    /// Clé Coinglass (vide = ETF et long/short désactivés)
    pub coinglass_key: String,

    /// Clé CryptoQuant, réservée aux futures métriques on-chain
    pub cryptoquant_key: String,
}

impl ApiConfig {
    /// Retourne la clé configurée pour un fournisseur
    pub fn key(&self, key: ApiKey) -> &str {
        match key {
            ApiKey::Coinglass => &self.coinglass_key,
            ApiKey::Glassnode => &self.glassnode_key,
        }
    }

    /// Vrai si la clé est renseignée
    ///
    /// Une clé composée uniquement d'espaces compte comme absente.
    pub fn has_key(&self, key: ApiKey) -> bool {
        !self.key(key).trim().is_empty()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            coingecko_base: DEFAULT_COINGECKO_BASE.to_string(),
            fear_greed_url: DEFAULT_FEAR_GREED_URL.to_string(),
            alt_season_url: DEFAULT_ALT_SEASON_URL.to_string(),
            coinglass_base: DEFAULT_COINGLASS_BASE.to_string(),
            glassnode_base: DEFAULT_GLASSNODE_BASE.to_string(),
            glassnode_key: String::new(),
            coinglass_key: String::new(),
            cryptoquant_key: String::new(),
        }
    }
}

/// Joint une URL de base et un chemin sans doubler le '/'
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys_are_disabled() {
        let config = ApiConfig::default();
        assert!(!config.has_key(ApiKey::Coinglass));
        assert!(!config.has_key(ApiKey::Glassnode));
        assert_eq!(config.coingecko_base, DEFAULT_COINGECKO_BASE);
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = ApiConfig {
            coinglass_key: "   ".to_string(),
            glassnode_key: "secret".to_string(),
            ..ApiConfig::default()
        };
        assert!(!config.has_key(ApiKey::Coinglass));
        assert!(config.has_key(ApiKey::Glassnode));
        assert_eq!(config.key(ApiKey::Glassnode), "secret");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a/api/", "/x?y=1"), "http://a/api/x?y=1");
        assert_eq!(join_url("http://a", "x"), "http://a/x");
    }
}
