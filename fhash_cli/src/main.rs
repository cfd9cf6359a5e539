use anyhow::{Context, Result};
use clap::{ArgGroup, Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;

use fhash_cli::commands::{self, ReportFormat};
use fhash_cli::config::{AppConfig, ConfigManager, get_config};
use fhash_cli::output::{OutputFormat, create_formatter};
use fhash_cli::terminal;
use fhash_core::{
    AbortSignal, CaseMetadata, CaseReport, Digester, ExcludedExtensions, HashRequest,
};

#[derive(Parser)]
#[command(name = "fhash")]
#[command(author, version, about = "Forensic hashing of text, files and evidence directories", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format (defaults to output.default_format)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Read size in bytes for files
    #[arg(long, global = true, value_name = "BYTES")]
    chunk_size: Option<usize>,

    /// Compute only this algorithm (repeatable, defaults to the whole catalog)
    #[arg(short = 'a', long = "algorithm", global = true, value_name = "NAME")]
    algorithms: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a piece of text
    Text {
        /// Text to hash
        text: String,
    },

    /// Hash a single file with its metadata
    File {
        /// File to hash
        path: PathBuf,
    },

    /// Hash every file under a directory
    Dir {
        /// Directory to walk
        path: PathBuf,

        /// Skip files with this extension (repeatable, e.g. -x .tmp -x log)
        #[arg(short = 'x', long = "exclude", value_name = "EXT")]
        exclude: Vec<String>,
    },

    /// List supported algorithms
    Algorithms,

    /// Hash evidence and write a case report
    Report(ReportArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("evidence")
        .required(true)
        .multiple(true)
        .args(["text", "file", "dir"])
))]
struct ReportArgs {
    /// Case identifier
    #[arg(long)]
    case_id: String,

    /// Investigator name
    #[arg(long)]
    investigator: String,

    /// Case description
    #[arg(long, default_value = "")]
    description: String,

    /// Organization shown on the report (defaults to report.organization)
    #[arg(long)]
    organization: Option<String>,

    /// Text evidence
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// File evidence
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory evidence
    #[arg(long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Skip files with this extension in the directory evidence
    #[arg(short = 'x', long = "exclude", value_name = "EXT")]
    exclude: Vec<String>,

    /// Report path (defaults to a generated name in report.output_dir)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., hashing.chunk_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., hashing.chunk_size)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

/// Configuration and output choices for a hashing command
struct Session {
    config: AppConfig,
    format: OutputFormat,
    use_color: bool,
    abort: AbortSignal,
}

impl Session {
    fn load(args: &GlobalArgs) -> Result<Self> {
        let mut config = get_config().context("Failed to load configuration")?;
        config.apply_cli_overrides(args.chunk_size, &args.algorithms);

        let format = match args.format {
            Some(format) => format,
            None => OutputFormat::from_string(&config.output.default_format)
                .context("Invalid output.default_format")?,
        };

        let use_color = terminal::should_use_color(args.no_color, config.output.color_enabled);
        if !use_color {
            colored::control::set_override(false);
        }

        let abort = AbortSignal::new();
        commands::abort_on_interrupt(abort.clone());

        Ok(Self {
            config,
            format,
            use_color,
            abort,
        })
    }

    fn digester(&self) -> Result<Digester> {
        let digester =
            Digester::from_config(&self.config.hashing).context("Invalid hashing configuration")?;
        Ok(digester.with_abort_signal(self.abort.clone()))
    }

    /// Command-line exclusions replace the configured defaults
    fn excluded_extensions(&self, exclude: &[String]) -> ExcludedExtensions {
        if exclude.is_empty() {
            self.config.hashing.excluded()
        } else {
            exclude.iter().collect()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let args = &cli.global;

    // Initialize logging based on debug flag
    if args.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("fhash_core", log::LevelFilter::Debug)
            .filter_module("fhash_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Commands::Text { text } => {
            hash_command(&Session::load(args)?, HashRequest::Text(text)).await?;
        }
        Commands::File { path } => {
            hash_command(&Session::load(args)?, HashRequest::File(path)).await?;
        }
        Commands::Dir { path, exclude } => {
            let session = Session::load(args)?;
            let excluded = session.excluded_extensions(&exclude);
            log::debug!("Excluded extensions: {:?}", excluded.iter().collect::<Vec<_>>());
            let request = HashRequest::Directory {
                root: path,
                excluded,
            };
            hash_command(&session, request).await?;
        }
        Commands::Algorithms => {
            let session = Session::load(args)?;
            let listing = commands::algorithm_listing(session.format == OutputFormat::Json)?;
            println!("{}", listing.trim_end());
        }
        Commands::Report(report) => {
            report_command(&Session::load(args)?, report).await?;
        }
        Commands::Config { command } => config_command(command)?,
        Commands::Completions { shell } => generate_completions(shell),
    }

    Ok(())
}

async fn hash_command(session: &Session, request: HashRequest) -> Result<()> {
    let digester = session.digester()?;
    let formatter = create_formatter(session.format, session.use_color, digester.algorithms());

    let outcome = commands::run_request(digester, request).await?;

    println!("{}", formatter.format_outcome(&outcome)?.trim_end());
    Ok(())
}

async fn report_command(session: &Session, args: ReportArgs) -> Result<()> {
    let report_format = match session.format {
        OutputFormat::Text => ReportFormat::Text,
        OutputFormat::Json => ReportFormat::Json,
        OutputFormat::Csv => anyhow::bail!("Reports can be written as text or json"),
    };

    let case = CaseMetadata::new(&args.investigator, &args.case_id, &args.description)
        .context("Invalid case details")?;
    let organization = args
        .organization
        .clone()
        .unwrap_or_else(|| session.config.report.organization.clone());
    let mut report = CaseReport::new(&organization, case);

    let mut requests = Vec::new();
    if let Some(text) = args.text {
        requests.push(HashRequest::Text(text));
    }
    if let Some(path) = args.file {
        requests.push(HashRequest::File(path));
    }
    if let Some(root) = args.dir {
        let excluded = session.excluded_extensions(&args.exclude);
        requests.push(HashRequest::Directory { root, excluded });
    }

    let digester = session.digester()?;
    for request in requests {
        report.record(commands::run_request(digester.clone(), request).await?);
    }

    commands::ensure_not_aborted(&session.abort)?;
    let path = commands::write_report(
        &report,
        report_format,
        args.output.as_deref(),
        &session.config.report.output_dir,
        chrono::Local::now(),
    )?;

    eprintln!("{}", "Report written".green());
    println!("{}", path.display());
    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut sections: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();
            for (key, value) in items {
                let (section, rest) = key.split_once('.').unwrap_or(("general", key.as_str()));
                sections
                    .entry(section.to_string())
                    .or_default()
                    .push((rest.to_string(), value));
            }

            for (section, items) in sections {
                println!("[{}]", section.yellow());
                for (key, value) in items {
                    println!("  {} = {}", key.cyan(), value);
                }
                println!();
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
