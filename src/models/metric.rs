// ============================================================================
// Métriques et cibles d'affichage
// ============================================================================
// Une métrique est un indicateur externe (prix, sentiment, flux ETF...).
// Une cible d'affichage est un emplacement nommé du tableau de bord qui
// montre exactement une valeur formatée.
//
// CONCEPT RUST : enums fermés
// - L'ensemble des cibles est fixe, le compilateur vérifie que chaque
//   variant est géré (labels, identifiants, ordre d'affichage)
// ============================================================================

use std::fmt;

use crate::config::ApiKey;

/// Emplacement nommé du tableau de bord
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DisplayTarget {
    BtcPrice,
    EthPrice,
    FearGreed,
    GreedIndex,
    AltSeason,
    EtfFlows,
    BtcVol1w,
    EthVol1w,
    LongShortRatio,
}

impl DisplayTarget {
    /// Toutes les cibles, dans l'ordre d'affichage
    pub const ALL: [DisplayTarget; 9] = [
        DisplayTarget::BtcPrice,
        DisplayTarget::EthPrice,
        DisplayTarget::FearGreed,
        DisplayTarget::GreedIndex,
        DisplayTarget::AltSeason,
        DisplayTarget::EtfFlows,
        DisplayTarget::BtcVol1w,
        DisplayTarget::EthVol1w,
        DisplayTarget::LongShortRatio,
    ];

    /// Identifiant stable de la cible (ex: "btc-price")
    pub fn id(&self) -> &'static str {
        match self {
            DisplayTarget::BtcPrice => "btc-price",
            DisplayTarget::EthPrice => "eth-price",
            DisplayTarget::FearGreed => "fear-greed",
            DisplayTarget::GreedIndex => "greed-index",
            DisplayTarget::AltSeason => "alt-season",
            DisplayTarget::EtfFlows => "etf-flows",
            DisplayTarget::BtcVol1w => "btc-vol-1w",
            DisplayTarget::EthVol1w => "eth-vol-1w",
            DisplayTarget::LongShortRatio => "long-short-ratio",
        }
    }

    /// Libellé affiché dans le tableau
    pub fn label(&self) -> &'static str {
        match self {
            DisplayTarget::BtcPrice => "BTC price (USD)",
            DisplayTarget::EthPrice => "ETH price (USD)",
            DisplayTarget::FearGreed => "Fear & Greed",
            DisplayTarget::GreedIndex => "Greed index",
            DisplayTarget::AltSeason => "Altcoin Season",
            DisplayTarget::EtfFlows => "BTC ETF net flow",
            DisplayTarget::BtcVol1w => "BTC volatility 1w",
            DisplayTarget::EthVol1w => "ETH volatility 1w",
            DisplayTarget::LongShortRatio => "Long/short ratio",
        }
    }

    /// Retrouve une cible depuis son identifiant
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|target| target.id() == id)
    }
}

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Indicateur externe affiché sur le tableau de bord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Prix spot BTC / ETH (CoinGecko)
    Prices,
    /// Fear & Greed Index (alternative.me)
    FearGreed,
    /// Altcoin Season Index (blockchaincenter.net)
    AltSeason,
    /// Flux net des ETF Bitcoin (Coinglass)
    EtfFlow,
    /// Volatilité réalisée 1 semaine BTC et ETH (Glassnode)
    Volatility,
    /// Ratio long/short des futures BTC (Coinglass)
    LongShortRatio,
}

impl Metric {
    /// Toutes les métriques mises à jour au chargement
    pub const ALL: [Metric; 6] = [
        Metric::Prices,
        Metric::FearGreed,
        Metric::AltSeason,
        Metric::EtfFlow,
        Metric::Volatility,
        Metric::LongShortRatio,
    ];

    /// Nom court pour les logs
    pub fn id(&self) -> &'static str {
        match self {
            Metric::Prices => "prices",
            Metric::FearGreed => "fear_greed",
            Metric::AltSeason => "alt_season",
            Metric::EtfFlow => "etf_flow",
            Metric::Volatility => "volatility",
            Metric::LongShortRatio => "long_short_ratio",
        }
    }

    /// Préfixe lisible du warning en cas d'échec
    pub fn failure_message(&self) -> &'static str {
        match self {
            Metric::Prices => "Problem while fetching price data",
            Metric::FearGreed => "Problem while fetching the Fear & Greed index",
            Metric::AltSeason => "Problem while fetching the Altcoin Season index",
            Metric::EtfFlow => "Problem while fetching ETF net flows",
            Metric::Volatility => "Problem while fetching volatility data",
            Metric::LongShortRatio => "Problem while fetching the long/short ratio",
        }
    }

    /// Clé d'API requise (None = endpoint public)
    pub fn required_key(&self) -> Option<ApiKey> {
        match self {
            Metric::Prices | Metric::FearGreed | Metric::AltSeason => None,
            Metric::EtfFlow | Metric::LongShortRatio => Some(ApiKey::Coinglass),
            Metric::Volatility => Some(ApiKey::Glassnode),
        }
    }

    /// Cibles d'affichage alimentées par cette métrique
    pub fn targets(&self) -> &'static [DisplayTarget] {
        match self {
            Metric::Prices => &[DisplayTarget::BtcPrice, DisplayTarget::EthPrice],
            Metric::FearGreed => &[DisplayTarget::FearGreed, DisplayTarget::GreedIndex],
            Metric::AltSeason => &[DisplayTarget::AltSeason],
            Metric::EtfFlow => &[DisplayTarget::EtfFlows],
            Metric::Volatility => &[DisplayTarget::BtcVol1w, DisplayTarget::EthVol1w],
            Metric::LongShortRatio => &[DisplayTarget::LongShortRatio],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
