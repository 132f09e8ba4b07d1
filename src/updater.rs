// ============================================================================
// MetricsUpdater : mise à jour des métriques du tableau de bord
// ============================================================================
// Une routine par métrique : requête GET, extraction d'un ou deux champs,
// formatage, écriture dans la ou les cibles d'affichage.
//
// Règles communes :
// - clé d'API requise absente : aucune requête, aucune erreur
// - échec réseau ou statut HTTP hors 2xx : warning, cibles inchangées
// - champ absent : écriture ignorée silencieusement
// - une routine qui échoue n'affecte jamais les autres
//
// CONCEPTS RUST :
// 1. Injection de dépendances : config, source HTTP et sink passés par Arc
// 2. Futures indépendantes : tokio::join! pour le signal "tout est chargé",
//    tokio::spawn pour du fire-and-forget
// ============================================================================

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::glassnode::Asset;
use crate::api::{alternative, blockchaincenter, coinglass, coingecko, glassnode, FetchError, JsonSource};
use crate::config::ApiConfig;
use crate::models::{format, DisplayTarget, Metric};

pub use crate::models::RenderSink;

/// Résultat d'une routine de mise à jour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// N cibles écrites
    Rendered(usize),
    /// Clé d'API absente, aucune requête
    Skipped,
    /// Réponse reçue mais champ(s) absent(s)
    Missing,
    /// Erreur réseau ou HTTP, journalisée
    Failed,
}

/// Bilan d'un chargement complet, une entrée par métrique
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub outcomes: Vec<(Metric, UpdateOutcome)>,
}

impl UpdateReport {
    pub fn outcome(&self, metric: Metric) -> Option<UpdateOutcome> {
        self.outcomes
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, outcome)| *outcome)
    }

    /// Nombre total de cibles écrites
    pub fn rendered_targets(&self) -> usize {
        self.outcomes
            .iter()
            .map(|(_, outcome)| match outcome {
                UpdateOutcome::Rendered(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == UpdateOutcome::Failed)
            .count()
    }
}

/// Met à jour les métriques depuis leurs fournisseurs
///
/// CONCEPT RUST : Clone sur des Arc
/// - cloner l'updater ne copie que trois pointeurs
/// - chaque tâche spawnée possède son propre clone ('static)
#[derive(Clone)]
pub struct MetricsUpdater {
    config: Arc<ApiConfig>,
    source: Arc<dyn JsonSource>,
    sink: Arc<dyn RenderSink>,
}

impl MetricsUpdater {
    pub fn new(config: Arc<ApiConfig>, source: Arc<dyn JsonSource>, sink: Arc<dyn RenderSink>) -> Self {
        Self { config, source, sink }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Lance toutes les routines en parallèle et attend qu'elles soient
    /// toutes terminées
    ///
    /// L'ordre des complétions n'est pas garanti, seul le bilan l'est.
    pub async fn update_all(&self) -> UpdateReport {
        info!("Updating all metrics");
        let (prices, fear_greed, alt_season, etf, volatility, long_short) = tokio::join!(
            self.update_prices(),
            self.update_fear_greed(),
            self.update_alt_season(),
            self.update_etf(),
            self.update_volatility(),
            self.update_long_short_ratio(),
        );

        let report = UpdateReport {
            outcomes: vec![
                (Metric::Prices, prices),
                (Metric::FearGreed, fear_greed),
                (Metric::AltSeason, alt_season),
                (Metric::EtfFlow, etf),
                (Metric::Volatility, volatility),
                (Metric::LongShortRatio, long_short),
            ],
        };
        info!(
            rendered = report.rendered_targets(),
            failures = report.failures(),
            "Metrics update finished"
        );
        report
    }

    /// Démarre chaque routine comme une tâche tokio indépendante
    ///
    /// Les handles peuvent être ignorés (fire-and-forget) ou attendus.
    pub fn spawn_all(&self) -> Vec<(Metric, JoinHandle<UpdateOutcome>)> {
        Metric::ALL
            .into_iter()
            .map(|metric| {
                let updater = self.clone();
                (metric, tokio::spawn(async move { updater.update(metric).await }))
            })
            .collect()
    }

    /// Met à jour une seule métrique
    pub async fn update(&self, metric: Metric) -> UpdateOutcome {
        match metric {
            Metric::Prices => self.update_prices().await,
            Metric::FearGreed => self.update_fear_greed().await,
            Metric::AltSeason => self.update_alt_season().await,
            Metric::EtfFlow => self.update_etf().await,
            Metric::Volatility => self.update_volatility().await,
            Metric::LongShortRatio => self.update_long_short_ratio().await,
        }
    }

    // ========================================================================
    // Routines par métrique
    // ========================================================================

    /// Prix BTC (et ETH), format localisé "65,000"
    pub async fn update_prices(&self) -> UpdateOutcome {
        let metric = Metric::Prices;
        match coingecko::fetch_prices(self.source.as_ref(), &self.config).await {
            Ok(prices) => {
                let mut rendered = 0;
                if let Some(btc) = prices.btc_usd {
                    rendered += self.render(DisplayTarget::BtcPrice, format::locale_number(btc));
                }
                if let Some(eth) = prices.eth_usd {
                    rendered += self.render(DisplayTarget::EthPrice, format::locale_number(eth));
                }
                self.finish(metric, rendered)
            }
            Err(e) => self.fail(metric, &e),
        }
    }

    /// Fear & Greed : même valeur dans deux cibles
    pub async fn update_fear_greed(&self) -> UpdateOutcome {
        let metric = Metric::FearGreed;
        match alternative::fetch_fear_greed(self.source.as_ref(), &self.config).await {
            Ok(Some(value)) => {
                let rendered = self.render(DisplayTarget::FearGreed, value.clone())
                    + self.render(DisplayTarget::GreedIndex, value);
                self.finish(metric, rendered)
            }
            Ok(None) => self.finish(metric, 0),
            Err(e) => self.fail(metric, &e),
        }
    }

    pub async fn update_alt_season(&self) -> UpdateOutcome {
        let metric = Metric::AltSeason;
        match blockchaincenter::fetch_alt_season(self.source.as_ref(), &self.config).await {
            Ok(Some(value)) => {
                let rendered = self.render(DisplayTarget::AltSeason, value);
                self.finish(metric, rendered)
            }
            Ok(None) => self.finish(metric, 0),
            Err(e) => self.fail(metric, &e),
        }
    }

    /// Flux net ETF, suffixe " M" (millions USD)
    pub async fn update_etf(&self) -> UpdateOutcome {
        let metric = Metric::EtfFlow;
        if !self.is_enabled(metric) {
            return UpdateOutcome::Skipped;
        }
        match coinglass::fetch_etf_net_flow(self.source.as_ref(), &self.config).await {
            Ok(Some(net_flow)) => {
                let rendered = self.render(DisplayTarget::EtfFlows, format!("{} M", net_flow));
                self.finish(metric, rendered)
            }
            Ok(None) => self.finish(metric, 0),
            Err(e) => self.fail(metric, &e),
        }
    }

    /// Volatilité réalisée 1 semaine BTC et ETH
    ///
    /// Les deux requêtes doivent réussir avant d'écrire quoi que ce soit :
    /// les deux cibles restent cohérentes entre elles.
    pub async fn update_volatility(&self) -> UpdateOutcome {
        let metric = Metric::Volatility;
        if !self.is_enabled(metric) {
            return UpdateOutcome::Skipped;
        }

        let source = self.source.as_ref();
        let (btc, eth) = tokio::join!(
            glassnode::fetch_volatility(source, &self.config, Asset::Btc),
            glassnode::fetch_volatility(source, &self.config, Asset::Eth),
        );

        match (btc, eth) {
            (Ok(btc), Ok(eth)) => {
                let mut rendered = 0;
                if let Some(v) = btc {
                    rendered += self.render(DisplayTarget::BtcVol1w, format::percent(v));
                }
                if let Some(v) = eth {
                    rendered += self.render(DisplayTarget::EthVol1w, format::percent(v));
                }
                self.finish(metric, rendered)
            }
            (Err(e), _) | (_, Err(e)) => self.fail(metric, &e),
        }
    }

    pub async fn update_long_short_ratio(&self) -> UpdateOutcome {
        let metric = Metric::LongShortRatio;
        if !self.is_enabled(metric) {
            return UpdateOutcome::Skipped;
        }
        match coinglass::fetch_long_short_ratio(self.source.as_ref(), &self.config).await {
            Ok(Some(ratio)) => {
                let rendered = self.render(DisplayTarget::LongShortRatio, ratio);
                self.finish(metric, rendered)
            }
            Ok(None) => self.finish(metric, 0),
            Err(e) => self.fail(metric, &e),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn is_enabled(&self, metric: Metric) -> bool {
        match metric.required_key() {
            Some(key) if !self.config.has_key(key) => {
                debug!(metric = %metric, provider = key.provider(), "API key not configured, skipping");
                false
            }
            _ => true,
        }
    }

    /// Écrit une cible, retourne 1 pour le comptage
    fn render(&self, target: DisplayTarget, text: String) -> usize {
        debug!(display_target = %target, text = %text, "Rendering display target");
        self.sink.set_text(target, text);
        1
    }

    fn finish(&self, metric: Metric, rendered: usize) -> UpdateOutcome {
        if rendered == 0 {
            debug!(metric = %metric, "Response without the expected field, nothing rendered");
            UpdateOutcome::Missing
        } else {
            debug!(metric = %metric, rendered, "Metric updated");
            UpdateOutcome::Rendered(rendered)
        }
    }

    fn fail(&self, metric: Metric, error: &FetchError) -> UpdateOutcome {
        warn!(metric = %metric, error = %error, "{}", metric.failure_message());
        UpdateOutcome::Failed
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
// MockSource répond selon l'URL exacte et enregistre chaque requête.
// Le Board sert de sink : on lit directement ce qui a été "affiché".
// ============================================================================
