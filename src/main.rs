use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use guardian_content::client::GuardianClient;
use guardian_content::config::{
    find_config_file, get_config, load_config, write_default_config, Config, CONFIG_FILE_NAME,
};
use guardian_content::models::{
    EditionQuery, OrderBy, Record, ResultTable, SearchQuery, SectionQuery, TagQuery,
};
use guardian_content::plot::{self, ChartStyle};
use guardian_content::utils::{is_terminal, terminal_width, truncate_with_ellipsis};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Guardian content - search the Guardian content API and tabulate the results
#[derive(Parser, Debug)]
#[command(name = "guardian-content")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the Guardian content API and tabulate the results", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API key (overrides configuration and GUARDIAN_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Result ordering
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    Newest,
    Oldest,
    Relevance,
}

impl From<Order> for OrderBy {
    fn from(order: Order) -> Self {
        match order {
            Order::Newest => OrderBy::Newest,
            Order::Oldest => OrderBy::Oldest,
            Order::Relevance => OrderBy::Relevance,
        }
    }
}

/// Options shared by every content search
#[derive(clap::Args, Debug)]
struct SearchOpts {
    /// Result ordering (default from config: newest)
    #[arg(long, value_enum)]
    order: Option<Order>,

    /// Results per page (default from config: 50)
    #[arg(long)]
    page_size: Option<u32>,

    /// ISO language code (default from config: en)
    #[arg(long)]
    lang: Option<String>,
}

impl SearchOpts {
    fn query(&self, keyword: &str, config: &Config) -> SearchQuery {
        SearchQuery::new(keyword)
            .order_by(self.order.map(OrderBy::from).unwrap_or(config.defaults.order_by))
            .page_size(self.page_size.unwrap_or(config.defaults.page_size))
            .lang(
                self.lang
                    .clone()
                    .unwrap_or_else(|| config.defaults.lang.clone()),
            )
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search content by keyword (one page)
    #[command(alias = "s")]
    Search {
        keyword: String,

        /// Page to fetch
        #[arg(long, short, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        opts: SearchOpts,
    },

    /// Search content across pages 1..PAGES (dates shortened to YYYY-MM)
    SearchPages {
        keyword: String,

        /// Page bound; PAGES - 1 pages are fetched (default from config: 100)
        #[arg(long)]
        pages: Option<u32>,

        #[command(flatten)]
        opts: SearchOpts,
    },

    /// Look up tags whose title contains the text
    Tags {
        text: String,

        #[arg(long, short, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Look up sections matching the text
    Sections {
        text: String,

        #[arg(long, short, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Look up editions matching the text
    Editions { text: String },

    /// Print the API URL of the first search result
    ItemUrl {
        keyword: String,

        #[arg(long, short, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        opts: SearchOpts,
    },

    /// Fetch a single item by API URL
    Item {
        api_url: String,

        /// Print only the title
        #[arg(long)]
        title_only: bool,
    },

    /// Histogram of one column over the latest content (e.g. pillar, type)
    Hist {
        column: String,

        #[command(flatten)]
        opts: SearchOpts,
    },

    /// Scatterplot of two columns over the latest content, coloured by a third
    Scatter {
        x: String,
        y: String,
        hue: String,

        #[command(flatten)]
        opts: SearchOpts,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a configuration file with default values
    Init {
        /// Where to write (default: ./guardian-content.toml)
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show the effective configuration
    Show,
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("guardian_content={}", level)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format.as_deref() == Some("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => get_config().context("loading configuration from environment")?,
    };
    if let Some(key) = &cli.api_key {
        config.api.key = Some(key.clone());
    }

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::debug!("Using config file: {}", path.display());
    }

    let command = match cli.command {
        Commands::Config { command } => return run_config_command(&command, &config),
        other => other,
    };

    let client = GuardianClient::from_config(&config.api)?;

    match command {
        Commands::Search {
            keyword,
            page,
            opts,
        } => {
            let query = opts.query(&keyword, &config).page(page);
            let table = client.search(&query).await?;
            status(cli.quiet, format!("Found {} results for {:?}", table.len(), keyword));
            output_table(&table, cli.output)?;
        }

        Commands::SearchPages {
            keyword,
            pages,
            opts,
        } => {
            let pages = pages.unwrap_or(config.defaults.pages);
            let query = opts.query(&keyword, &config);
            let table = client.search_pages(&query, pages).await?;
            status(
                cli.quiet,
                format!(
                    "Collected {} results from {} pages",
                    table.len(),
                    pages.saturating_sub(1)
                ),
            );
            output_table(&table, cli.output)?;
        }

        Commands::Tags {
            text,
            page,
            page_size,
        } => {
            let query = TagQuery::new(text)
                .page(page)
                .page_size(page_size.unwrap_or(config.defaults.page_size));
            let table = client.tags(&query).await?;
            output_table(&table, cli.output)?;
        }

        Commands::Sections {
            text,
            page,
            page_size,
        } => {
            let query = SectionQuery::new(text)
                .page(page)
                .page_size(page_size.unwrap_or(config.defaults.page_size));
            let table = client.sections(&query).await?;
            output_table(&table, cli.output)?;
        }

        Commands::Editions { text } => {
            let table = client.editions(&EditionQuery::new(text)).await?;
            output_table(&table, cli.output)?;
        }

        Commands::ItemUrl {
            keyword,
            page,
            opts,
        } => {
            let query = opts.query(&keyword, &config).page(page);
            let url = client.item_url(&query).await?;
            println!("{}", url);
        }

        Commands::Item {
            api_url,
            title_only,
        } => {
            if title_only {
                println!("{}", client.item_title(&api_url).await?);
            } else {
                let item = client.item(&api_url).await?;
                match resolve_format(cli.output) {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
                    _ => println!("{}", item),
                }
            }
        }

        Commands::Hist { column, opts } => {
            let query = opts.query("", &config);
            let mut stdout = std::io::stdout().lock();
            let table =
                plot::search_hist(&client, &column, &query, &ChartStyle::terminal(), &mut stdout)
                    .await?;
            drop(stdout);
            status(cli.quiet, format!("Plotted {} results", table.len()));
        }

        Commands::Scatter { x, y, hue, opts } => {
            let query = opts.query("", &config);
            let mut stdout = std::io::stdout().lock();
            let table = plot::search_scatter(
                &client,
                &x,
                &y,
                &hue,
                &query,
                &ChartStyle::terminal(),
                &mut stdout,
            )
            .await?;
            drop(stdout);
            status(cli.quiet, format!("Plotted {} results", table.len()));
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn run_config_command(command: &ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Init { path } => {
            let path = path.clone().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            write_default_config(&path)?;
            println!("Wrote {}", path.display());
        }
        ConfigCommands::Show => {
            let mut shown = config.clone();
            if shown.api.key.is_some() {
                shown.api.key = Some("********".to_string());
            }
            println!("{}", toml::to_string_pretty(&shown)?);
        }
    }
    Ok(())
}

fn status(quiet: bool, message: String) {
    if !quiet {
        eprintln!("{}", message);
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_table<R: Record>(table: &ResultTable<R>, format: OutputFormat) -> Result<()> {
    match resolve_format(format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        OutputFormat::Plain => {
            for row in table {
                println!("{}", row.values().join("\t"));
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            use comfy_table::{Attribute, Cell, ContentArrangement, Table};
            let mut out = Table::new();
            out.load_preset(comfy_table::presets::UTF8_FULL);
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_width(terminal_width() as u16);
            out.set_header(table.columns().to_vec());

            for row in table {
                let mut cells = row.values().into_iter();
                let mut line = Vec::with_capacity(table.columns().len());
                if let Some(first) = cells.next() {
                    line.push(Cell::new(truncate_with_ellipsis(first, 80)).add_attribute(Attribute::Bold));
                }
                line.extend(cells.map(Cell::new));
                out.add_row(line);
            }
            println!("{out}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "guardian-content",
            "search",
            "film",
            "--page",
            "2",
            "--order",
            "relevance",
            "--lang",
            "fr",
        ])
        .unwrap();

        match cli.command {
            Commands::Search { keyword, page, opts } => {
                assert_eq!(keyword, "film");
                assert_eq!(page, 2);
                let query = opts.query(&keyword, &Config::default());
                assert_eq!(query.order_by, OrderBy::Relevance);
                assert_eq!(query.lang, "fr");
                assert_eq!(query.page_size, 50);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parses_scatter() {
        let cli =
            Cli::try_parse_from(["guardian-content", "scatter", "date", "section", "type"]).unwrap();
        assert!(matches!(cli.command, Commands::Scatter { .. }));
    }

    #[test]
    fn test_resolve_format_explicit() {
        assert_eq!(resolve_format(OutputFormat::Json), OutputFormat::Json);
        assert_eq!(resolve_format(OutputFormat::Plain), OutputFormat::Plain);
    }
}
