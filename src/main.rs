// ============================================================================
// LazyMetrics - Tableau de bord des métriques crypto
// ============================================================================
// Au lancement, interroge les fournisseurs publics (CoinGecko, alternative.me,
// blockchaincenter, Coinglass, Glassnode) et affiche chaque métrique dans
// le terminal.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Async dans sync : worker thread avec son propre runtime tokio
// 4. Configuration : clap (arguments + variables d'environnement)
// ============================================================================

use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazymetrics::api::HttpSource;
use lazymetrics::app::App;
use lazymetrics::config::{
    ApiConfig, DEFAULT_ALT_SEASON_URL, DEFAULT_COINGECKO_BASE, DEFAULT_COINGLASS_BASE,
    DEFAULT_FEAR_GREED_URL, DEFAULT_GLASSNODE_BASE,
};
use lazymetrics::models::Board;
use lazymetrics::ui::{events, render, EventHandler};
use lazymetrics::updater::{MetricsUpdater, UpdateReport};

// ============================================================================
// Ligne de commande
// ============================================================================
// Chaque option peut aussi venir de l'environnement : les clés d'API n'ont
// pas à apparaître dans l'historique du shell.
// ============================================================================

/// Crypto market metrics dashboard in the terminal.
#[derive(Parser, Debug)]
#[command(name = "lazymetrics", version, about, long_about = None)]
struct Cli {
    /// CoinGecko API base URL
    #[arg(long, env = "COINGECKO_BASE", default_value = DEFAULT_COINGECKO_BASE)]
    coingecko_base: String,

    /// Fear & Greed Index endpoint
    #[arg(long, env = "FEAR_GREED_URL", default_value = DEFAULT_FEAR_GREED_URL)]
    fear_greed_url: String,

    /// Altcoin Season Index JSON endpoint
    #[arg(long, env = "ALT_SEASON_URL", default_value = DEFAULT_ALT_SEASON_URL)]
    alt_season_url: String,

    /// Coinglass API base URL
    #[arg(long, env = "COINGLASS_BASE", default_value = DEFAULT_COINGLASS_BASE)]
    coinglass_base: String,

    /// Glassnode API base URL
    #[arg(long, env = "GLASSNODE_BASE", default_value = DEFAULT_GLASSNODE_BASE)]
    glassnode_base: String,

    /// Glassnode API key (volatility disabled when empty)
    #[arg(long, env = "GLASSNODE_API_KEY", default_value = "", hide_env_values = true)]
    glassnode_key: String,

    /// Coinglass API key (ETF flows and long/short ratio disabled when empty)
    #[arg(long, env = "COINGLASS_API_KEY", default_value = "", hide_env_values = true)]
    coinglass_key: String,

    /// CryptoQuant API key
    #[arg(long, env = "CRYPTOQUANT_API_KEY", default_value = "", hide_env_values = true)]
    cryptoquant_key: String,

    /// Print the metrics once as plain text instead of starting the TUI
    #[arg(long)]
    plain: bool,

    /// Log directory (defaults to the platform data directory)
    #[arg(long, env = "LAZYMETRICS_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// Convertit les options en configuration des fournisseurs
    fn api_config(&self) -> ApiConfig {
        ApiConfig {
            coingecko_base: self.coingecko_base.clone(),
            fear_greed_url: self.fear_greed_url.clone(),
            alt_season_url: self.alt_season_url.clone(),
            coinglass_base: self.coinglass_base.clone(),
            glassnode_base: self.glassnode_base.clone(),
            glassnode_key: self.glassnode_key.clone(),
            coinglass_key: self.coinglass_key.clone(),
            cryptoquant_key: self.cryptoquant_key.clone(),
        }
    }
}

// ============================================================================
// Commandes du worker thread
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Relancer toutes les mises à jour
    Refresh,
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    /// Toutes les routines sont terminées
    RefreshDone(UpdateReport),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier, avec rotation quotidienne.
// ============================================================================

/// Répertoire des logs par défaut
///
/// - Linux : ~/.local/share/lazymetrics/logs
/// - macOS : ~/Library/Application Support/lazymetrics/logs
/// - Sinon : ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazymetrics").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// ```bash
/// RUST_LOG=debug lazymetrics
/// RUST_LOG=lazymetrics=trace lazymetrics --plain
/// ```
fn init_logging(log_dir: PathBuf) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "lazymetrics.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Utile pour suivre les tâches du worker
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazymetrics=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Le logging passe avant tout le reste, mais son échec n'est pas fatal
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    init_logging(log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(plain = cli.plain, "LazyMetrics starting up");

    let config = Arc::new(cli.api_config());
    let board = Board::new();
    let source = Arc::new(HttpSource::new()?);
    let updater = MetricsUpdater::new(config, source, Arc::new(board.clone()));

    // CONCEPT RUST : Exécuter du code async dans du code sync
    // - le TUI est synchrone, les appels API sont async
    // - le runtime est créé ici puis déplacé dans le worker si besoin
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;

    if cli.plain {
        let report = runtime.block_on(updater.update_all());
        print_board(&board);
        info!(rendered = report.rendered_targets(), failures = report.failures(), "Plain output done");
        return Ok(());
    }

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    // CONCEPT RUST : Arc<Mutex<>> pour partage entre threads
    // - l'UI lit App à chaque frame
    // - le worker bascule l'indicateur de chargement
    let app = Arc::new(Mutex::new(App::new(board)));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(runtime, updater, command_rx, result_tx, app.clone());

    // Premier chargement dès l'ouverture du tableau de bord
    if command_tx.send(AppCommand::Refresh).is_err() {
        error!("Worker thread unavailable, metrics will stay empty");
    }

    info!("Starting event loop");
    let events = EventHandler::new();
    let result = run(&mut terminal, app, &events, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Affiche chaque cible sous la forme `id: valeur`
fn print_board(board: &Board) {
    for (target, cell) in board.snapshot() {
        let text = cell.map(|c| c.text).unwrap_or_else(|| "—".to_string());
        println!("{:<18} {}", format!("{}:", target.id()), text);
    }
}

/// Verrouille l'état partagé, même après un panic du worker
fn lock(app: &Mutex<App>) -> MutexGuard<'_, App> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Background Worker Thread
// ============================================================================
// Thread séparé qui exécute les mises à jour sans bloquer l'UI. Les valeurs
// arrivent directement dans le Board partagé, au fil des réponses ; le
// bilan final est renvoyé par channel.
// ============================================================================

fn spawn_background_worker(
    runtime: tokio::runtime::Runtime,
    updater: MetricsUpdater,
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
    app: Arc<Mutex<App>>,
) {
    std::thread::spawn(move || {
        // recv() échoue quand l'UI a fermé le channel : on quitte
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::Refresh => {
                    lock(&app).start_loading(Some("Chargement des métriques...".to_string()));

                    // block_on() bloque le worker, pas l'UI
                    let report = runtime.block_on(updater.update_all());

                    if result_tx.send(AppResult::RefreshDone(report)).is_err() {
                        break;
                    }
                }
            }
        }
        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération : résultats du worker, rendu, événements, tick.
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    while lock(&app).is_running() {
        // 0. RÉSULTATS : bilan des mises à jour terminées
        match result_rx.try_recv() {
            Ok(AppResult::RefreshDone(report)) => {
                info!(
                    rendered = report.rendered_targets(),
                    failures = report.failures(),
                    "Refresh finished"
                );
                lock(&app).finish_refresh(report);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                error!("Worker thread disconnected!");
            }
        }

        // 1. RENDER
        terminal.draw(|frame| {
            let app_lock = lock(&app);
            render(frame, &app_lock);
        })?;

        // 2. INPUT
        if let Ok(event) = events.next() {
            handle_event(&mut lock(&app), &event, &command_tx);
        }

        // 3. UPDATE
        lock(&app).tick();
    }

    Ok(())
}

/// Traite un événement et met à jour l'état de l'application
fn handle_event(app: &mut App, event: &events::Event, command_tx: &mpsc::Sender<AppCommand>) {
    use lazymetrics::ui::events::{is_quit_event, is_refresh_event, Event};

    match event {
        Event::Key(_) if is_quit_event(event) => {
            if app.request_quit() {
                info!("User confirmed quit");
            }
        }
        Event::Key(_) if app.is_awaiting_quit_confirmation() => {
            // N'importe quelle autre touche annule le quit
            app.cancel_quit();
        }
        Event::Key(_) if is_refresh_event(event) => {
            if app.is_loading {
                debug!("Refresh already in progress, ignoring");
            } else if command_tx.send(AppCommand::Refresh).is_err() {
                error!("Failed to send refresh command to worker");
            }
        }
        Event::Key(_) | Event::Tick => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
