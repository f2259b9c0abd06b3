mod cli_args;
mod commands;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error};
use std::path::PathBuf;
use typetree_error::TypeTreeError;
use typetree_metadata::EngineVersion;
use util::OutputHandler;

/// Reconstruct serialized type trees of game types from offline metadata
#[derive(Parser)]
#[command(name = "typetree", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode: suppress explanatory output, show only raw results
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum OutputFormat {
    /// One line per node, indented by level
    Flat,
    /// Hierarchical tree structure
    Tree,
    /// JSON node array, as written by `generate`
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate type tree documents for every loaded assembly
    Generate {
        #[command(flatten)]
        input: cli_args::InputArgs,
        #[command(flatten)]
        layout: cli_args::LayoutArgs,
        /// Output directory for the per-assembly JSON documents
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Abort on the first type that fails instead of skipping it
        #[arg(long)]
        fail_fast: bool,
    },
    /// Show the type tree of a single type
    Show {
        /// Full type name, e.g. Game.Player
        #[arg(index = 1)]
        type_name: String,
        /// Directory of assembly metadata dumps
        #[arg(long, short = 'a', required_unless_present = "from")]
        assemblies: Option<PathBuf>,
        /// Class catalog package file
        #[arg(long, short = 'c', required_unless_present = "from")]
        catalog: Option<PathBuf>,
        /// Target engine version, e.g. 2021.3.21f1
        #[arg(
            long = "engine-version",
            short = 'e',
            value_parser = cli_args::parse_engine_version,
            required_unless_present = "from"
        )]
        engine_version: Option<EngineVersion>,
        /// Read the type from a previously generated document instead
        #[arg(long, conflicts_with_all = ["assemblies", "catalog", "engine_version"])]
        from: Option<PathBuf>,
        /// Assembly declaring the type; first match otherwise
        #[arg(long)]
        assembly: Option<String>,
        #[command(flatten)]
        layout: cli_args::LayoutArgs,
        #[command(flatten)]
        format_args: cli_args::OutputFormatArgs,
    },
    /// Display loaded assemblies and class databases
    Info {
        /// Directory of assembly metadata dumps
        #[arg(long, short = 'a')]
        assemblies: PathBuf,
        /// Class catalog package file
        #[arg(long, short = 'c')]
        catalog: PathBuf,
        /// Show which class database this engine version selects
        #[arg(long = "engine-version", short = 'e', value_parser = cli_args::parse_engine_version)]
        engine_version: Option<EngineVersion>,
    },
}

fn main() {
    if let Err(e) = run_main() {
        error!("{}", e.user_message());
        debug!("{}", e.debug_message());
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,  // Default: only warnings and errors
        1 => log::LevelFilter::Info,  // -v: info level
        2 => log::LevelFilter::Debug, // -vv: debug level
        _ => log::LevelFilter::Trace, // -vvv+: trace level (everything)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .format(|buf, record| {
            use std::io::Write;
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31mERROR\x1b[0m",
                log::Level::Warn => "\x1b[33mWARN\x1b[0m",
                log::Level::Info => "\x1b[32mINFO\x1b[0m",
                log::Level::Debug => "\x1b[36mDEBUG\x1b[0m",
                log::Level::Trace => "\x1b[35mTRACE\x1b[0m",
            };

            writeln!(buf, "[{}] {}", level_style, record.args())
        })
        .init();
}

fn run_main() -> Result<(), TypeTreeError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = OutputHandler::new(cli.quiet);

    match cli.command {
        Commands::Generate {
            input,
            layout,
            output: out_dir,
            fail_fast,
        } => commands::cmd_generate(&input, &layout, &out_dir, fail_fast, &output)
            .map_err(|e| e.with_command("generate")),
        Commands::Show {
            type_name,
            assemblies,
            catalog,
            engine_version,
            from,
            assembly,
            layout,
            format_args,
        } => {
            let source = match (from, assemblies, catalog, engine_version) {
                (Some(document), ..) => commands::show::TypeSource::Document(document),
                (None, Some(assemblies), Some(catalog), Some(engine_version)) => {
                    commands::show::TypeSource::Metadata {
                        input: cli_args::InputArgs {
                            assemblies,
                            catalog,
                            engine_version,
                        },
                        layout,
                    }
                }
                _ => {
                    return Err(TypeTreeError::cli(
                        "--assemblies, --catalog and --engine-version are required without --from",
                        typetree_error::CliErrorKind::InvalidArguments,
                    )
                    .with_command("show"));
                }
            };
            commands::cmd_show(
                &type_name,
                source,
                assembly.as_deref(),
                format_args.format,
                format_args.ascii,
                &output,
            )
            .map_err(|e| e.with_command("show"))
        }
        Commands::Info {
            assemblies,
            catalog,
            engine_version,
        } => commands::cmd_info(&assemblies, &catalog, engine_version.as_ref(), &output)
            .map_err(|e| e.with_command("info")),
    }
}
