use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use cinecharts::api::ApiClient;
use cinecharts::chart::{Chart, ChartKind};
use cinecharts::config::Config;
use cinecharts::dataset::{ChartData, ChartDataset, Period};
use cinecharts::export::export_chart;
use cinecharts::{serve, tui};

#[derive(Parser, Debug)]
#[command(name = "cinecharts")]
#[command(author, version, about = "Genre voting analytics for film nights")]
struct Args {
    /// Voting server base URL (overrides config and CINECHARTS_SERVER)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show top films by votes for one genre
    Chart {
        /// Genre to chart
        #[arg(short, long)]
        genre: String,

        /// Time period: all, week, month, or year
        #[arg(short, long)]
        period: Option<String>,

        /// Export the chart to a file (.png, .csv, .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the vote distribution across genres
    Distribution {
        /// Time period: all, week, month, or year
        #[arg(short, long)]
        period: Option<String>,

        /// Export the chart to a file (.png, .csv, .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare several genres side by side
    Compare {
        /// Genres to compare
        #[arg(required = true)]
        genres: Vec<String>,

        /// Time period: all, week, month, or year
        #[arg(short, long)]
        period: Option<String>,

        /// Export the chart to a file (.png, .csv, .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive terminal dashboard
    Tui {
        /// Starting time period: all, week, month, or year
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Serve the browser dashboard
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3210")]
        port: u16,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::load();

    // Completions need no server
    if let Command::Completion { shell } = &args.command {
        let mut cmd = Args::command();
        clap_complete::generate(*shell, &mut cmd, "cinecharts", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let base_url = config.resolve_server(args.server.as_deref());
    let client = match ApiClient::new(&base_url, config.timeout()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Command::Chart {
            genre,
            period,
            output,
        } => run_chart(&client, &config, &genre, period, output),
        Command::Distribution { period, output } => {
            run_distribution(&client, &config, period, output)
        }
        Command::Compare {
            genres,
            period,
            output,
        } => run_compare(&client, &config, &genres, period, output),
        Command::Tui { period } => {
            let period = match resolve_period(period, &config) {
                Ok(p) => p,
                Err(e) => return fail(&e),
            };
            return match tui::run(client, period) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => fail(&e.to_string()),
            };
        }
        Command::Serve { port } => {
            let period = match resolve_period(None, &config) {
                Ok(p) => p,
                Err(e) => return fail(&e),
            };
            return match serve::start_dashboard_server(port, &client, period) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => fail(&e.to_string()),
            };
        }
        Command::Completion { .. } => unreachable!("handled above"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), message);
    ExitCode::FAILURE
}

/// Period priority: CLI flag > config default > "all"
fn resolve_period(flag: Option<String>, config: &Config) -> Result<Period, String> {
    let raw = flag.unwrap_or_else(|| config.charts.default_period.clone());
    raw.parse()
}

// =============================================================================
// Subcommands
// =============================================================================

fn run_chart(
    client: &ApiClient,
    config: &Config,
    genre: &str,
    period: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let period = resolve_period(period, config)?;
    let dataset = client
        .fetch_genre_chart(genre, period)
        .map_err(|e| e.to_string())?;

    if dataset.is_empty() {
        println!("No data available for this genre and time period.");
        return Ok(());
    }

    let title = format!("Top {} Films by Votes", genre);
    print_ranked_table(&title, period, &dataset);

    if let Some(path) = output {
        let chart = Chart::new(
            ChartKind::Bar,
            title,
            ChartData::single("Number of Votes", dataset),
        );
        write_export(&chart, &path)?;
    }
    Ok(())
}

fn run_distribution(
    client: &ApiClient,
    config: &Config,
    period: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let period = resolve_period(period, config)?;
    let dataset = client
        .fetch_distribution(period)
        .map_err(|e| e.to_string())?;

    if dataset.is_empty() {
        println!("No data available for this time period.");
        return Ok(());
    }

    print_distribution_table(period, &dataset);

    if let Some(path) = output {
        let chart = Chart::new(
            ChartKind::Pie,
            "Genre Distribution by Votes",
            ChartData::single("Votes", dataset),
        );
        write_export(&chart, &path)?;
    }
    Ok(())
}

fn run_compare(
    client: &ApiClient,
    config: &Config,
    genres: &[String],
    period: Option<String>,
    output: Option<PathBuf>,
) -> Result<(), String> {
    let period = resolve_period(period, config)?;
    let data = client
        .fetch_comparison(genres, period)
        .map_err(|e| e.to_string())?;

    if data.is_empty() {
        println!("No data available for this selection.");
        return Ok(());
    }

    print_comparison_table(period, &data);

    if let Some(path) = output {
        let chart = Chart::new(ChartKind::GroupedBar, "Genre Comparison by Votes", data);
        write_export(&chart, &path)?;
    }
    Ok(())
}

fn write_export(chart: &Chart, path: &std::path::Path) -> Result<(), String> {
    let format = export_chart(chart, path).map_err(|e| e.to_string())?;
    eprintln!(
        "{} {} ({})",
        "exported".green().bold(),
        path.display(),
        format.extension()
    );
    Ok(())
}

// =============================================================================
// Terminal Tables
// =============================================================================

fn print_ranked_table(title: &str, period: Period, dataset: &ChartDataset) {
    println!("{}  {}", title.bold(), format!("[{}]", period.label()).dimmed());
    println!("{}", "─".repeat(60));
    for (rank, (label, value)) in dataset.pairs().enumerate() {
        println!(
            "{:>4}. {:<44} {:>6}",
            rank + 1,
            label,
            format!("{}", value.round() as i64).cyan()
        );
    }
}

fn print_distribution_table(period: Period, dataset: &ChartDataset) {
    let total = dataset.total();
    println!(
        "{}  {}",
        "Genre Distribution by Votes".bold(),
        format!("[{}]", period.label()).dimmed()
    );
    println!("{}", "─".repeat(60));
    for (label, value) in dataset.pairs() {
        let pct = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        println!(
            "  {:<28} {:>6}  {}",
            label,
            format!("{}", value.round() as i64).cyan(),
            format!("{:>5.1}%", pct).dimmed()
        );
    }
}

fn print_comparison_table(period: Period, data: &ChartData) {
    println!(
        "{}  {}",
        "Genre Comparison by Votes".bold(),
        format!("[{}]", period.label()).dimmed()
    );
    println!("{}", "─".repeat(60));

    let mut header = format!("  {:<30}", "Film");
    for series in &data.datasets {
        header.push_str(&format!(" {:>12}", series.label));
    }
    println!("{}", header.bold());

    for (i, label) in data.labels.iter().enumerate() {
        let mut row = format!("  {:<30}", label);
        for series in &data.datasets {
            let value = series.data.get(i).copied().unwrap_or(0.0);
            row.push_str(&format!(" {:>12}", value.round() as i64));
        }
        println!("{}", row);
    }
}
