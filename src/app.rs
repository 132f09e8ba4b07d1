// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
//
// Les valeurs affichées ne vivent pas ici mais dans le Board, partagé avec
// les tâches de mise à jour : App n'en garde qu'un clone.
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::Board;
use crate::updater::UpdateReport;

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Tableau des valeurs affichées (partagé avec le worker)
    pub board: Board,

    /// Indique si l'utilisateur a demandé à quitter (attend confirmation)
    /// CONCEPT : Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    /// - N'importe quelle autre touche : confirm_quit = false (annulation)
    pub confirm_quit: bool,

    /// Indique si une mise à jour est en cours
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Fin du dernier chargement complet
    pub last_refresh: Option<DateTime<Utc>>,

    /// Bilan du dernier chargement
    pub last_report: Option<UpdateReport>,
}

impl App {
    /// Crée une App qui affiche le Board donné
    pub fn new(board: Board) -> Self {
        Self {
            running: true,
            board,
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            last_refresh: None,
            last_report: None,
        }
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Gère une pression de 'q'
    ///
    /// Retourne true si l'application va vraiment quitter.
    pub fn request_quit(&mut self) -> bool {
        if self.confirm_quit {
            self.quit();
            true
        } else {
            self.confirm_quit = true;
            false
        }
    }

    /// Annule une demande de quit en attente
    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    /// Active l'indicateur de chargement
    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    /// Désactive l'indicateur de chargement
    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    /// Enregistre la fin d'un chargement complet
    pub fn finish_refresh(&mut self, report: UpdateReport) {
        self.stop_loading();
        self.last_refresh = Some(Utc::now());
        self.last_report = Some(report);
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Aucun rafraîchissement automatique : seule la touche 'r' relance
    /// les mises à jour.
    pub fn tick(&mut self) {}
}

impl Default for App {
    fn default() -> Self {
        Self::new(Board::new())
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisplayTarget, Metric, RenderSink};
    use crate::updater::UpdateOutcome;

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert!(!app.is_loading);
        assert!(app.last_refresh.is_none());
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = App::default();

        assert!(!app.request_quit());
        assert!(app.is_awaiting_quit_confirmation());
        assert!(app.is_running());

        assert!(app.request_quit());
        assert!(!app.is_running());
    }

    #[test]
    fn test_cancel_quit() {
        let mut app = App::default();
        app.request_quit();
        app.cancel_quit();

        assert!(!app.is_awaiting_quit_confirmation());
        assert!(!app.request_quit());
        assert!(app.is_running());
    }

    #[test]
    fn test_finish_refresh() {
        let mut app = App::default();
        app.start_loading(Some("Chargement...".to_string()));
        assert!(app.is_loading);

        let report = UpdateReport {
            outcomes: vec![(Metric::FearGreed, UpdateOutcome::Rendered(2))],
        };
        app.finish_refresh(report.clone());

        assert!(!app.is_loading);
        assert!(app.loading_message.is_none());
        assert!(app.last_refresh.is_some());
        assert_eq!(app.last_report, Some(report));
    }

    #[test]
    fn test_app_sees_board_writes() {
        let board = Board::new();
        let app = App::new(board.clone());

        board.set_text(DisplayTarget::AltSeason, "64".to_string());

        assert_eq!(app.board.text(DisplayTarget::AltSeason).as_deref(), Some("64"));
    }
}
