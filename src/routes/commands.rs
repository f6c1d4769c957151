//! Defines the command surface and routes each command to its handler.
//!
//! ## Structure
//! - **One-shot commands**
//!   - `list [--inactive] [--page N]`: print one page of the active or inactive set
//!   - `create <URL>`: submit a URL for analysis
//!   - `activate <ID> [--yes]`: move a record to the active set
//!   - `deactivate <ID> [--yes]`: move a record to the inactive set
//!   - `edit <ID> [fields...] [--yes]`: change fields of a record
//!
//! - **Interactive**
//!   - `browse`: page through the list and act on it line by line

use crate::{
    controllers::metadata_list::MetadataListController,
    errors::AppError,
    handlers::{
        browse_handlers::browse,
        command_handlers::{self, EditArgs},
        terminal::Terminal,
    },
    services::metadata_gateway::MetadataApi,
};
use clap::Subcommand;
use tokio::io::AsyncBufRead;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of metadata
    List {
        /// Show the inactive set instead of the active one
        #[arg(long)]
        inactive: bool,

        /// Page to print (1-based)
        #[arg(long)]
        page: Option<usize>,
    },

    /// Submit a URL to the analyzer
    Create {
        url: String,
    },

    /// Activate a record
    Activate {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Deactivate a record
    Deactivate {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Edit fields of a record
    Edit(EditArgs),

    /// Interactive list session
    Browse,
}

/// Run `command` against `controller`, prompting through `terminal`.
pub async fn dispatch<G, R>(
    command: Command,
    controller: &mut MetadataListController<G>,
    terminal: &mut Terminal<R>,
) -> Result<(), AppError>
where
    G: MetadataApi,
    R: AsyncBufRead + Unpin,
{
    match command {
        Command::List { inactive, page } => {
            command_handlers::list(controller, inactive, page).await
        }
        Command::Create { url } => command_handlers::create(controller, &url).await,
        Command::Activate { id, yes } => {
            terminal.set_assume_yes(yes);
            command_handlers::activate(controller, terminal, id).await
        }
        Command::Deactivate { id, yes } => {
            terminal.set_assume_yes(yes);
            command_handlers::deactivate(controller, terminal, id).await
        }
        Command::Edit(args) => {
            terminal.set_assume_yes(args.yes);
            command_handlers::edit(controller, terminal, args).await
        }
        Command::Browse => browse(controller, terminal).await,
    }
}
