// ============================================================================
// Module : ui
// ============================================================================
// Gère l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Rendu du tableau des métriques

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
