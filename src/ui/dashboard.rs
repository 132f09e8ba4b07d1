// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine le tableau des métriques avec les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage header / contenu / footer
// 3. Table : une ligne par cible d'affichage
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::models::{Cell, DisplayTarget};

/// Texte affiché tant qu'une cible n'a reçu aucune valeur
const PLACEHOLDER: &str = "—";

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_metrics(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Tableau des métriques
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : titre + état du chargement
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyMetrics ")
        .title_alignment(Alignment::Center);

    let status = if app.is_loading {
        Span::styled(
            app.loading_message
                .clone()
                .unwrap_or_else(|| "Chargement des métriques...".to_string()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if let Some(at) = app.last_refresh {
        let failures = app.last_report.as_ref().map(|r| r.failures()).unwrap_or(0);
        let color = if failures == 0 { Color::Green } else { Color::Yellow };
        Span::styled(
            format!(
                "Mis à jour à {} UTC  ({} erreur(s))",
                at.format("%H:%M:%S"),
                failures
            ),
            Style::default().fg(color),
        )
    } else {
        Span::styled("En attente du premier chargement", Style::default().fg(Color::Gray))
    };

    let paragraph = Paragraph::new(Line::from(status))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tableau des métriques
// ============================================================================

/// Construit la ligne d'une cible
///
/// CONCEPT RUST : Option<&Cell>
/// - Some : valeur + heure de mise à jour
/// - None : placeholder grisé
fn metric_row(target: DisplayTarget, cell: Option<&Cell>) -> Row<'static> {
    let (value, updated, style) = match cell {
        Some(cell) => (
            cell.text.clone(),
            cell.updated_at.format("%H:%M:%S").to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        None => (
            PLACEHOLDER.to_string(),
            String::new(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    Row::new(vec![
        TableCell::from(target.label()),
        TableCell::from(target.id()).style(Style::default().fg(Color::Gray)),
        TableCell::from(value).style(style),
        TableCell::from(updated).style(Style::default().fg(Color::DarkGray)),
    ])
}

fn render_metrics(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 📊 Market metrics ");

    let rows: Vec<Row> = app
        .board
        .snapshot()
        .iter()
        .map(|(target, cell)| metric_row(*target, cell.as_ref()))
        .collect();

    let header = Row::new(vec!["Metric", "Target", "Value", "Updated"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let widths = [
        Constraint::Length(20),
        Constraint::Length(18),
        Constraint::Min(14),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2);

    frame.render_widget(table, area);
}

// ============================================================================
// Footer : raccourcis clavier
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("[q]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit  "),
            Span::styled("[r]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Refresh"),
        ])
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
// TestBackend : terminal en mémoire, on inspecte le buffer dessiné.
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Board, RenderSink};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_board_values() {
        let board = Board::new();
        board.set_text(DisplayTarget::BtcPrice, "65,000".to_string());
        board.set_text(DisplayTarget::BtcVol1w, "5.23%".to_string());
        let app = App::new(board);

        let screen = draw(&app);

        assert!(screen.contains("LazyMetrics"));
        assert!(screen.contains("btc-price"));
        assert!(screen.contains("65,000"));
        assert!(screen.contains("5.23%"));
        assert!(screen.contains("long-short-ratio"));
    }

    #[test]
    fn test_footer_shows_quit_confirmation() {
        let mut app = App::default();
        app.request_quit();

        let screen = draw(&app);

        assert!(screen.contains("pour quitter"));
    }
}
