mod commands;
mod render;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use commands::MenuSourceKind;
use tracing::{error, info};

use console_core::services::SessionStore;
use console_infrastructure::{ApiClient, FilePreferenceStore, HttpMenuSource};
use console_shared::config::AppConfig;
use console_shared::telemetry::init_telemetry;

#[derive(Parser)]
#[command(name = "console-session")]
#[command(about = "Menu, tab and preference session for the admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Extra configuration file layered over config/default and config/{APP_ENV}
    #[arg(short, long, global = true, env = "CONSOLE_CONFIG")]
    config: Option<String>,

    /// User whose menus are loaded by `--source user|permissions`
    #[arg(short, long, global = true)]
    user: Option<u64>,

    /// Menu endpoint to load from; defaults to `permissions` with `--user`, else `all`
    #[arg(long, global = true, value_enum)]
    source: Option<MenuSourceKind>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the menu tree
    Tree {
        #[arg(short, long)]
        search: Option<String>,
        /// all | favorites | recents
        #[arg(long, default_value = "all")]
        view: String,
    },
    /// Open a menu as a tab and record it as recently visited
    Open { id: u64 },
    /// Add or remove a favorite menu
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// List recently visited menu ids
    Recents,
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Show or reset the watermark settings
    Watermark {
        #[command(subcommand)]
        action: Option<WatermarkAction>,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    Add { id: u64 },
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ThemeAction {
    Show,
    Set { name: String },
    Toggle,
}

#[derive(Subcommand)]
enum WatermarkAction {
    Show,
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;
    let _guard = init_telemetry(&config.log)?;

    info!("console-session starting (api: {})", config.api.base_url);

    let store = Arc::new(FilePreferenceStore::open(&config.storage.path)?);
    let mut session = SessionStore::new(store);
    let source = HttpMenuSource::new(ApiClient::new(&config.api)?);

    let scope = commands::menu_scope(cli.source, cli.user);

    let result = match cli.command {
        Commands::Tree { search, view } => match scope {
            Ok(scope) => commands::tree(&mut session, &source, scope, search, &view).await,
            Err(e) => Err(e),
        },
        Commands::Open { id } => match scope {
            Ok(scope) => commands::open(&mut session, &source, scope, id).await,
            Err(e) => Err(e),
        },
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { id } => commands::favorite(&mut session, id, true),
            FavoriteAction::Remove { id } => commands::favorite(&mut session, id, false),
        },
        Commands::Recents => commands::recents(&session),
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::show_theme(&session),
            ThemeAction::Set { name } => commands::set_theme(&mut session, &name),
            ThemeAction::Toggle => commands::toggle_theme(&mut session),
        },
        Commands::Watermark { action } => match action.unwrap_or(WatermarkAction::Show) {
            WatermarkAction::Show => commands::show_watermark(&session),
            WatermarkAction::Reset => commands::reset_watermark(&mut session),
        },
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
