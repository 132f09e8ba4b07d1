// ============================================================================
// Module : models
// ============================================================================
// Structures de données du tableau de bord :
// - Metric / DisplayTarget : ce que l'on affiche et où
// - Board : surface de rendu partagée (cible -> texte)
// - format : mise en forme des nombres (locale, pourcentage, JSON)
// ============================================================================

pub mod metric;  // Métriques et cibles d'affichage
pub mod board;   // Tableau des valeurs affichées + trait RenderSink
pub mod format;  // Formatage des valeurs

// Re-export des structures principales
pub use board::{Board, Cell, RenderSink};
pub use metric::{DisplayTarget, Metric};
