mod admin;
mod api;
mod completions;
mod config;
mod login;
mod menu_utils;
mod password;
mod ui;
mod version;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use admin::context::AdminContext;
use ui::{Level, OutputFormat, emit};

/// kbctl main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit machine-readable JSON events instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in to the backend and store the session token
    Login {
        /// Backend base URL (overrides the configured one)
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Manage guest users
    Users,

    /// Manage auth groups
    Groups {
        /// Knowledge base id to manage groups for
        #[arg(short, long)]
        kb: Option<String>,
    },

    /// Show the client version, optionally checking for updates
    Version {
        /// Compare against the latest released version
        #[arg(long)]
        check: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    ui::init(format, true);
    ui::set_debug_mode(cli.debug);

    let result = match cli.command {
        Commands::Login { server } => login::handle_login(server).await,
        Commands::Users => match AdminContext::new() {
            Ok(mut ctx) => admin::users::manage_users(&mut ctx).await,
            Err(err) => Err(err),
        },
        Commands::Groups { kb } => match AdminContext::new() {
            Ok(mut ctx) => admin::groups::manage_groups(&mut ctx, kb).await,
            Err(err) => Err(err),
        },
        Commands::Version { check } => version::handle_version(check).await,
        Commands::Completions { shell } => completions::handle_completions::<Cli>(shell),
    };

    if let Err(err) = result {
        emit(Level::Error, "kbctl.error", &format!("Error: {err:#}"), None);
        std::process::exit(1);
    }
}
