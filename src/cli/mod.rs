mod commands;
pub mod error;
pub mod utils;

#[cfg(test)]
mod utils_test;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::error::{CliError, CliResult};
use crate::db::{SqliteStore, Workspace};

#[derive(Parser)]
#[command(name = "wd")]
#[command(author, version, about = "Workspace boards, cards and pages", long_about = None)]
pub struct Cli {
    /// Database file (default: $XDG_DATA_HOME/workdesk/workdesk.db)
    #[arg(long, global = true, env = "WORKDESK_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default workspace if there are no boards
    Seed,
    /// Replace everything with the default workspace
    Reset {
        /// Confirm the reset
        #[arg(long)]
        force: bool,
    },
    /// List boards
    Boards {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Board commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
    /// Column commands
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },
    /// Card commands
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },
    /// Label commands
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },
    /// List every record of a collection
    List {
        /// boards, columns, cards, projects, notes, docs or labels
        collection: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum BoardCommands {
    /// Create a board
    Add {
        /// Board name (blank for "Board N")
        #[arg(default_value = "")]
        name: String,
    },
    /// Delete a board, its columns and cards
    Delete {
        id: String,
        /// Confirm the delete
        #[arg(long)]
        force: bool,
    },
    /// Show a board with its columns and cards
    Show {
        id: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
enum ColumnCommands {
    /// Append a column to a board
    Add { board_id: String, name: String },
    /// Delete a column and its cards
    Delete { id: String },
}

#[derive(Subcommand)]
enum CardCommands {
    /// Add a card to a column
    Add {
        column_id: String,
        /// Card title (blank for "New task")
        #[arg(default_value = "")]
        title: String,
    },
    /// Move a card to the end of another column
    Move { id: String, column_id: String },
    /// Attach a label, or detach it if already attached
    Label { id: String, label_id: String },
    /// Delete a card
    Delete { id: String },
}

#[derive(Subcommand)]
enum LabelCommands {
    /// Create a label
    Add {
        name: String,
        /// cyan, purple, blue, green, rose, amber, teal, pink or slate
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a label and strip it everywhere
    Delete { id: String },
}

/// Initialize tracing subscriber with env filter, logging to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_db_path(db: Option<PathBuf>) -> CliResult<PathBuf> {
    db.or_else(crate::paths::get_db_path)
        .ok_or(CliError::NoDataDir)
}

fn open_workspace(db: Option<PathBuf>) -> CliResult<Workspace<SqliteStore>> {
    let path = resolve_db_path(db)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| crate::db::DbError::Connection {
            message: format!("{}: {}", parent.display(), e),
        })?;
    }

    debug!(path = %path.display(), "opening workspace");
    Ok(Workspace::new(SqliteStore::open(path)))
}

async fn dispatch(workspace: &Workspace<SqliteStore>, command: Commands) -> CliResult<String> {
    // First boot of an empty store gets the default workspace, as the dashboard does.
    if !matches!(command, Commands::Seed | Commands::Reset { .. }) {
        workspace.seed_if_needed().await?;
    }

    match command {
        Commands::Seed => commands::workspace::seed(workspace).await,
        Commands::Reset { force } => commands::workspace::reset(workspace, force).await,
        Commands::Boards { format } => commands::board::list_boards(workspace, &format).await,
        Commands::Board { command } => match command {
            BoardCommands::Add { name } => commands::board::add_board(workspace, &name).await,
            BoardCommands::Delete { id, force } => {
                commands::board::delete_board(workspace, &id, force).await
            }
            BoardCommands::Show { id, format } => {
                commands::board::show_board(workspace, &id, &format).await
            }
        },
        Commands::Column { command } => match command {
            ColumnCommands::Add { board_id, name } => {
                commands::column::add_column(workspace, &board_id, &name).await
            }
            ColumnCommands::Delete { id } => commands::column::delete_column(workspace, &id).await,
        },
        Commands::Card { command } => match command {
            CardCommands::Add { column_id, title } => {
                commands::card::add_card(workspace, &column_id, &title).await
            }
            CardCommands::Move { id, column_id } => {
                commands::card::move_card(workspace, &id, &column_id).await
            }
            CardCommands::Label { id, label_id } => {
                commands::card::toggle_label(workspace, &id, &label_id).await
            }
            CardCommands::Delete { id } => commands::card::delete_card(workspace, &id).await,
        },
        Commands::Label { command } => match command {
            LabelCommands::Add { name, color } => {
                commands::label::add_label(workspace, &name, color.as_deref()).await
            }
            LabelCommands::Delete { id } => commands::label::delete_label(workspace, &id).await,
        },
        Commands::List { collection, format } => {
            commands::list::list_collection(workspace, &collection, &format).await
        }
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["wd", "--help"]);
        return Ok(());
    };

    init_tracing();

    let workspace = open_workspace(cli.db)?;
    let result = dispatch(&workspace, command).await;
    workspace.store().close().await;

    println!("{}", result?);
    Ok(())
}
