// ============================================================================
// Board : surface de rendu du tableau de bord
// ============================================================================
// Chaque routine de mise à jour écrit dans une ou deux cibles qui lui sont
// propres. Le Board associe chaque cible à son dernier texte affiché.
//
// CONCEPTS RUST :
// 1. Trait RenderSink : la logique fetch/parse ne connaît que "set_text",
//    pas l'interface (TUI, sortie texte, mock de test)
// 2. Arc<Mutex<...>> : partage entre les tâches tokio et le thread UI
// 3. Clone bon marché : cloner un Board partage la même map
// ============================================================================

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::models::DisplayTarget;

/// Capacité d'écrire le texte d'une cible d'affichage
///
/// Send + Sync : le sink est partagé entre tâches tokio indépendantes.
pub trait RenderSink: Send + Sync {
    fn set_text(&self, target: DisplayTarget, text: String);
}

/// Valeur affichée dans une cible
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

/// Tableau partagé cible -> valeur
#[derive(Debug, Clone, Default)]
pub struct Board {
    cells: Arc<Mutex<BTreeMap<DisplayTarget, Cell>>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verrouille la map
    ///
    /// Un panic pendant un insert ne laisse pas la map incohérente, on
    /// récupère donc le contenu d'un mutex empoisonné.
    fn cells(&self) -> MutexGuard<'_, BTreeMap<DisplayTarget, Cell>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Texte actuel d'une cible (None = jamais rendue)
    pub fn text(&self, target: DisplayTarget) -> Option<String> {
        self.cells().get(&target).map(|cell| cell.text.clone())
    }

    /// Cellule complète (texte + horodatage)
    pub fn cell(&self, target: DisplayTarget) -> Option<Cell> {
        self.cells().get(&target).cloned()
    }

    /// Photo de toutes les cibles dans l'ordre d'affichage
    ///
    /// CONCEPT RUST : un seul lock pour toute la lecture
    /// - l'UI dessine une vue cohérente même si une tâche écrit en parallèle
    pub fn snapshot(&self) -> Vec<(DisplayTarget, Option<Cell>)> {
        let cells = self.cells();
        DisplayTarget::ALL
            .iter()
            .map(|target| (*target, cells.get(target).cloned()))
            .collect()
    }

    /// Nombre de cibles déjà rendues
    pub fn filled(&self) -> usize {
        self.cells().len()
    }
}

impl RenderSink for Board {
    fn set_text(&self, target: DisplayTarget, text: String) {
        self.cells().insert(
            target,
            Cell {
                text,
                updated_at: Utc::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_starts_empty() {
        let board = Board::new();
        assert_eq!(board.filled(), 0);
        assert!(board.text(DisplayTarget::BtcPrice).is_none());
        assert_eq!(board.snapshot().len(), DisplayTarget::ALL.len());
    }

    #[test]
    fn test_clones_share_cells() {
        let board = Board::new();
        let writer = board.clone();

        writer.set_text(DisplayTarget::FearGreed, "42".to_string());

        assert_eq!(board.text(DisplayTarget::FearGreed).as_deref(), Some("42"));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let board = Board::new();
        board.set_text(DisplayTarget::AltSeason, "30".to_string());
        board.set_text(DisplayTarget::AltSeason, "31".to_string());

        assert_eq!(board.text(DisplayTarget::AltSeason).as_deref(), Some("31"));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_snapshot_follows_display_order() {
        let board = Board::new();
        board.set_text(DisplayTarget::LongShortRatio, "1.2".to_string());

        let snapshot = board.snapshot();
        assert_eq!(snapshot[0].0, DisplayTarget::BtcPrice);
        let (last, cell) = snapshot.last().unwrap();
        assert_eq!(*last, DisplayTarget::LongShortRatio);
        assert_eq!(cell.as_ref().map(|c| c.text.as_str()), Some("1.2"));
    }
}
