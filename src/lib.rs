// ============================================================================
// LazyMetrics - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod api;       // Clients des fournisseurs (CoinGecko, Coinglass, Glassnode...)
pub mod config;    // Configuration des APIs (URLs + clés)
pub mod models;    // Métriques, cibles d'affichage, tableau de valeurs
pub mod updater;   // Mise à jour indépendante de chaque métrique
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
