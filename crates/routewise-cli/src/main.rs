use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routewise_cli::output::OutputFormat;
use routewise_lib::SearchStrategy;

mod commands;

use commands::network::AddLinkArgs;
use commands::route::RouteArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-criteria travel route planner")]
struct Cli {
    /// Database file or directory (defaults to the platform data directory).
    #[arg(long, global = true, env = "ROUTEWISE_DB")]
    db: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty database at the resolved path.
    Init,
    /// List known locations ordered by name.
    Cities,
    /// Add a location.
    AddCity {
        /// Location name (case-sensitive).
        name: String,
    },
    /// List stored links, newest first.
    Links,
    /// Store a new link between two known locations.
    AddLink(AddLinkCli),
    /// Compute the shortest route by distance.
    Route(EndpointsCli),
    /// Compare the fastest, cheapest, and lowest-emission routes.
    Compare(EndpointsCli),
}

#[derive(Args, Debug)]
struct AddLinkCli {
    /// Origin location name.
    #[arg(long = "from")]
    from: String,
    /// Destination location name.
    #[arg(long = "to")]
    to: String,
    /// Distance in kilometres.
    #[arg(long)]
    distance: f64,
    /// Transport mode: CAR, BUS, METRO or WALK.
    #[arg(long)]
    mode: String,
}

#[derive(Args, Debug)]
struct EndpointsCli {
    /// Origin location name.
    #[arg(long = "from")]
    from: String,
    /// Destination location name.
    #[arg(long = "to")]
    to: String,
    /// Search strategy used by the resolver: scan or heap.
    #[arg(long, default_value_t = SearchStrategy::Scan)]
    strategy: SearchStrategy,
}

impl From<EndpointsCli> for RouteArgs {
    fn from(value: EndpointsCli) -> Self {
        RouteArgs {
            from: value.from,
            to: value.to,
            strategy: value.strategy,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let db = cli.db.as_deref();
    let format = cli.format;

    match cli.command {
        Command::Init => commands::network::handle_init(db, format),
        Command::Cities => commands::network::handle_cities(db, format),
        Command::AddCity { name } => commands::network::handle_add_city(db, format, &name),
        Command::Links => commands::network::handle_links(db, format),
        Command::AddLink(args) => commands::network::handle_add_link(
            db,
            format,
            &AddLinkArgs {
                from: args.from,
                to: args.to,
                distance: args.distance,
                mode: args.mode,
            },
        ),
        Command::Route(args) => commands::route::handle_route(db, format, &args.into()),
        Command::Compare(args) => commands::route::handle_compare(db, format, &args.into()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
