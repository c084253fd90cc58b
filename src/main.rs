//! gira - merge Gitee pull requests and drive the Jira release train

mod cli;

use clap::{Parser, Subcommand};
use cli::show::ShowTarget;
use gira::types::Permission;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gira")]
#[command(about = "Merge Gitee pull requests and drive the Jira release train")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the git working copy
    #[arg(short, long, global = true, default_value = ".")]
    path: PathBuf,

    /// Configuration file, instead of the default search paths
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log what is happening to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a PR, resolve its issue and cherry-pick onto release branches
    Merge {
        /// PR number
        pr: u64,

        /// Merge a project-fix-only issue into its project branch
        #[arg(long)]
        force: bool,

        /// Print the cherry-pick commands instead of running them
        #[arg(long)]
        no_autocp: bool,
    },

    /// Show whether a PR can be merged and where it would be cherry-picked
    Review {
        /// PR number
        pr: u64,

        /// Evaluate as a forced merge
        #[arg(long)]
        force: bool,
    },

    /// Put an issue in progress and check out its branch
    Start {
        /// Issue id, e.g. PROJ-123
        issue: String,
    },

    /// Move an issue's fix version to another release
    Pushoff {
        /// Fix version to replace
        from: String,

        /// Fix version to use instead
        to: String,

        /// Issue id
        issue: String,
    },

    /// Protect a branch
    Lockbr {
        /// Branch name
        branch: String,
    },

    /// Add a collaborator
    Adduser {
        /// Gitee username
        user: String,

        /// Permission: pull, push or admin
        #[arg(default_value = "push")]
        permission: Permission,
    },

    /// Remove a collaborator
    Deluser {
        /// Gitee username
        user: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Inspect branches, collaborators and PRs
    Show {
        #[command(subcommand)]
        target: ShowCommand,

        /// Print the raw API response
        #[arg(long, global = true)]
        full: bool,
    },

    /// Open the repository in a browser
    Web,
}

#[derive(Subcommand)]
enum ShowCommand {
    /// A branch
    Branch {
        /// Branch name
        name: String,
    },
    /// Repository collaborators
    Team,
    /// A pull request
    Pr {
        /// PR number
        number: u64,
    },
}

impl From<ShowCommand> for ShowTarget {
    fn from(command: ShowCommand) -> Self {
        match command {
            ShowCommand::Branch { name } => Self::Branch(name),
            ShowCommand::Team => Self::Team,
            ShowCommand::Pr { number } => Self::Pr(number),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "gira=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli.path.as_path();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Merge {
            pr,
            force,
            no_autocp,
        } => cli::merge::run_merge(path, config, pr, force, no_autocp).await,
        Commands::Review { pr, force } => cli::review::run_review(path, config, pr, force).await,
        Commands::Start { issue } => cli::start::run_start(path, config, &issue).await,
        Commands::Pushoff { from, to, issue } => {
            cli::pushoff::run_pushoff(config, &from, &to, &issue).await
        }
        Commands::Lockbr { branch } => cli::admin::run_lock_branch(path, config, &branch).await,
        Commands::Adduser { user, permission } => {
            cli::admin::run_add_user(path, config, &user, permission).await
        }
        Commands::Deluser { user, yes } => {
            cli::admin::run_delete_user(path, config, &user, yes).await
        }
        Commands::Show { target, full } => {
            cli::show::run_show(path, config, target.into(), full).await
        }
        Commands::Web => cli::web::run_web(path, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}
