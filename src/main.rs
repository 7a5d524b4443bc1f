use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use p4cli::artifacts::core::{Output, render};
use p4cli::{
    ChangeStatus, ChangesQuery, ClientConfig, ClientFilter, P4Client, StreamFilter, SyncOptions,
};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "p4c",
    version,
    about = "A typed front-end for the Perforce command line client",
    long_about = "Runs Perforce commands through the p4 executable and prints their results \
    in a compact form. Connection settings come from the options below or the usual \
    P4PORT, P4USER and P4CLIENT environment variables.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short = 'p', long, env = "P4PORT", default_value = "", help = "Server address")]
    port: String,
    #[arg(short = 'u', long, env = "P4USER", default_value = "", help = "User name")]
    user: String,
    #[arg(short = 'c', long, env = "P4CLIENT", default_value = "", help = "Workspace name")]
    client: String,
    #[arg(long, default_value = "p4", help = "The p4 executable to run")]
    executable: PathBuf,
    #[arg(short = 'd', long, help = "Directory to run the executable in")]
    directory: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count, help = "Log more (-v debug, -vv trace)")]
    verbose: u8,
    #[arg(long, help = "Never page long output")]
    no_pager: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Shelved,
    Submitted,
}

impl From<StatusArg> for ChangeStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => ChangeStatus::Pending,
            StatusArg::Shelved => ChangeStatus::Shelved,
            StatusArg::Submitted => ChangeStatus::Submitted,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "info", about = "Show connection and server details")]
    Info,
    #[command(
        name = "login",
        about = "Log in to the server",
        long_about = "Obtains a ticket. The password is read from the P4PASSWD environment variable \
        or the --password option. With --status only the ticket state is checked."
    )]
    Login {
        #[arg(long, env = "P4PASSWD", hide_env_values = true, help = "The password")]
        password: Option<String>,
        #[arg(short, long, help = "Only check whether a valid ticket exists")]
        status: bool,
    },
    #[command(name = "logout", about = "Discard the current ticket")]
    Logout,
    #[command(name = "clients", about = "List workspaces")]
    Clients {
        #[arg(short, long, help = "Only workspaces owned by this user")]
        owner: Option<String>,
        #[arg(short = 'e', long, help = "Name pattern")]
        pattern: Option<String>,
        #[arg(short = 'S', long, help = "Only workspaces bound to this stream")]
        stream: Option<String>,
        #[arg(short, long, help = "Maximum number of workspaces")]
        max: Option<u32>,
    },
    #[command(name = "fstat", about = "Show file metadata")]
    Fstat {
        #[arg(long, help = "Skip missing files instead of failing")]
        existing: bool,
        #[arg(required = true)]
        paths: Vec<String>,
    },
    #[command(name = "sync", about = "Update the workspace")]
    Sync {
        #[arg(short, long, help = "Resend files that are already up to date")]
        force: bool,
        #[arg(short = 'n', long, help = "Only show what would be synced")]
        preview: bool,
        #[arg(short, long, help = "Update the have list without writing files")]
        keep_local: bool,
        paths: Vec<String>,
    },
    #[command(name = "describe", about = "Show change details")]
    Describe {
        #[arg(required = true)]
        changes: Vec<i64>,
    },
    #[command(name = "where", about = "Show where files map to")]
    Where {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    #[command(name = "changes", about = "List changes with their descriptions")]
    Changes {
        #[arg(short, long, help = "Maximum number of changes")]
        max: Option<u32>,
        #[arg(short, long, value_enum, help = "Only changes with this status")]
        status: Option<StatusArg>,
        #[arg(long = "by-user", help = "Only changes by this user")]
        by_user: Option<String>,
        #[arg(long = "by-client", help = "Only changes from this workspace")]
        by_client: Option<String>,
        path: Option<String>,
    },
    #[command(name = "filelog", about = "Show the revision history of a file")]
    Filelog {
        #[arg(short, long, help = "Maximum number of revisions")]
        max: Option<u32>,
        path: String,
    },
    #[command(name = "streams", about = "List streams")]
    Streams {
        #[arg(short = 'F', long, help = "Filter expression, e.g. Type=release")]
        filter: Option<String>,
        #[arg(short, long, help = "Maximum number of streams")]
        max: Option<u32>,
        paths: Vec<String>,
    },
    #[command(name = "print", about = "Print file contents")]
    Print {
        #[arg(short, long, help = "Write to this file instead of stdout")]
        output: Option<PathBuf>,
        depot_path: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let working_dir = match &cli.directory {
        Some(directory) => directory.clone(),
        None => std::env::current_dir()?,
    };
    let config = ClientConfig::new(&cli.port, &cli.user, &cli.client)
        .with_executable(&cli.executable)
        .with_working_dir(working_dir);
    let client = P4Client::new(config)?;

    let paged = !cli.no_pager
        && matches!(
            cli.command,
            Commands::Describe { .. } | Commands::Changes { .. } | Commands::Filelog { .. }
        );
    let mut output = Output::open(paged);
    let writer = output.writer();

    match cli.command {
        Commands::Info => render::info(writer, &client.info().await?)?,
        Commands::Login { password, status } => {
            if status {
                let logged_in = client.logged_in_state().await?;
                writeln!(writer, "{}", if logged_in { "logged in" } else { "not logged in" })?;
            } else {
                render::login(writer, client.login(password.as_deref()).await?)?;
            }
        }
        Commands::Logout => client.logout().await?,
        Commands::Clients {
            owner,
            pattern,
            stream,
            max,
        } => {
            let filter = ClientFilter {
                user: owner,
                name_pattern: pattern,
                stream,
                max,
            };
            render::clients(writer, &client.clients(&filter).await?)?
        }
        Commands::Fstat { existing, paths } => {
            let files = if existing {
                client.existing_files(&paths).await?
            } else {
                client.fstat(&paths).await?
            };
            render::files(writer, &files)?
        }
        Commands::Sync {
            force,
            preview,
            keep_local,
            paths,
        } => {
            let options = SyncOptions {
                force,
                preview,
                keep_local,
            };
            render::sync(writer, &client.sync(&paths, options).await?)?
        }
        Commands::Describe { changes } => render::describe(writer, &client.describe(&changes).await?)?,
        Commands::Where { paths } => render::where_files(writer, &client.where_files(&paths).await?)?,
        Commands::Changes {
            max,
            status,
            by_user,
            by_client,
            path,
        } => {
            let query = ChangesQuery {
                path,
                max,
                status: status.map(ChangeStatus::from),
                user: by_user,
                client: by_client,
            };
            render::changes(writer, &client.changes(&query).await?)?
        }
        Commands::Filelog { max, path } => render::filelog(writer, &client.filelog(&path, max).await?)?,
        Commands::Streams { filter, max, paths } => {
            let filter = StreamFilter {
                paths,
                expression: filter,
                max,
            };
            render::streams(writer, &client.streams(&filter).await?)?
        }
        Commands::Print {
            output: Some(destination),
            depot_path,
        } => client.print_to(&depot_path, &destination).await?,
        Commands::Print {
            output: None,
            depot_path,
        } => writer.write_all(&client.print(&depot_path).await?)?,
    }

    output.finish()
}
