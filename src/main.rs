// seating-chart: Generate classroom seating charts

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use seating_chart::assign::{generate, Arrangement, LayoutParameters, SeatingMode, SortOrder, StartSide};
use seating_chart::fonts::FontRegistry;
use seating_chart::labels::{ChartLabels, Language};
use seating_chart::render::pdf::{render_document, write_document, ViewSelection};
use seating_chart::render::screen::render_screen_page;
use seating_chart::roster::load_roster;
use seating_chart::{SeatMatrix, SeatingError};

// ============================================================================
// Constants
// ============================================================================

/// Default number of rows
const DEFAULT_ROWS: &str = "6";

/// Default group counts
const DEFAULT_GROUPS_SINGLE: u8 = 4;
const DEFAULT_GROUPS_PAIRED: u8 = 5;

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Seating(#[from] SeatingError),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error("Failed to write {path}: {source}")]
    OutputError {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to encode seat matrix: {0}")]
    JsonError(#[from] serde_json::Error),
}

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ArrangementKind {
    /// Shuffle the roster
    Random,
    /// Seat by attendance number (exams)
    Ordered,
}

impl ArrangementKind {
    fn slug(self) -> &'static str {
        match self {
            ArrangementKind::Random => "random",
            ArrangementKind::Ordered => "ordered",
        }
    }
}

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Generate classroom seating charts")]
struct Args {
    /// Student roster file (JSON array of {id, name, gender})
    #[arg(short, long)]
    roster: PathBuf,

    /// How students are placed
    #[arg(short, long, value_enum, default_value_t = ArrangementKind::Random)]
    arrangement: ArrangementKind,

    /// One student per desk, or pairs (random arrangement only) [default: single]
    #[arg(short, long, value_enum)]
    seating: Option<SeatingMode>,

    /// Number of rows, front to back
    #[arg(long, default_value = DEFAULT_ROWS, value_parser = clap::value_parser!(u8).range(2..=10))]
    rows: u8,

    /// Number of desk groups across the room (default 4, or 5 when paired)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(2..=10))]
    groups: Option<u8>,

    /// Attendance number order (ordered arrangement only) [default: asc]
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,

    /// Side of the front row where numbering starts (ordered arrangement only) [default: left]
    #[arg(long, value_enum)]
    start: Option<StartSide>,

    /// Which pages to print
    #[arg(long, value_enum, default_value_t = ViewSelection::Both)]
    view: ViewSelection,

    /// Output filename (defaults to seating-{arrangement}-{view}-{date}.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the on-screen chart as an HTML page
    #[arg(long)]
    html: Option<PathBuf>,

    /// Also write the seat matrix as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Seed for the random arrangement (printed when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Page title, followed by the audience on each page
    #[arg(short, long)]
    title: Option<String>,

    /// Label language
    #[arg(long, value_enum, default_value_t = Language::Korean)]
    lang: Language,

    /// TrueType/OpenType font for labels
    #[arg(long, env = "SEATING_CHART_FONT")]
    font: Option<PathBuf>,

    /// Date used in the default filename (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Seating chart configuration
struct ChartConfig {
    roster_path: PathBuf,
    params: LayoutParameters,
    kind: ArrangementKind,
    view: ViewSelection,
    /// Labels for the on-screen chart
    labels: ChartLabels,
    /// Labels for the PDF, English when no Hangul font is available
    print_labels: ChartLabels,
    seed: u64,
    date: NaiveDate,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();
    init_logging(args.verbose);

    let date = parse_date(&args.date)?;

    let arrangement = build_arrangement(&args);
    let groups = args.groups.unwrap_or(match arrangement.seating_mode() {
        SeatingMode::Single => DEFAULT_GROUPS_SINGLE,
        SeatingMode::Paired => DEFAULT_GROUPS_PAIRED,
    });

    let fonts = FontRegistry::install(FontRegistry::discover(args.font.as_deref()));
    let print_language = if args.lang == Language::Korean && !fonts.has_label_font() {
        warn!("no font for Hangul labels; printing English labels (pass --font to keep Korean)");
        Language::English
    } else {
        args.lang
    };

    let chart_labels = |language| {
        let labels = ChartLabels::new(language, &arrangement);
        match &args.title {
            Some(title) => labels.with_title(title),
            None => labels,
        }
    };
    let labels = chart_labels(args.lang);
    let print_labels = chart_labels(print_language);

    let config = ChartConfig {
        roster_path: args.roster,
        params: LayoutParameters::new(args.rows as usize, groups as usize, arrangement),
        kind: args.arrangement,
        view: args.view,
        labels,
        print_labels,
        seed: args.seed.unwrap_or_else(|| rand::rng().random()),
        date,
    };

    let roster = load_roster(&config.roster_path)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let matrix = generate(&roster, &config.params, &mut rng)?;

    // Determine output filename
    let output_file = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "seating-{}-{}-{}.pdf",
            config.kind.slug(),
            config.view.slug(),
            config.date.format("%Y-%m-%d")
        ))
    });

    let pdf = render_document(&matrix, &config.params, &config.print_labels, config.view)?;
    write_document(&output_file, &pdf)?;

    if let Some(path) = &args.html {
        write_html(path, &matrix, &config)?;
    }
    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&matrix)?;
        write_text(path, &json)?;
    }

    println!("✓ Generated: {}", output_file.display());
    println!(
        "  Students: {} / Seats: {}",
        matrix.occupied(),
        config.params.capacity()
    );
    println!(
        "  Layout: {} rows x {} columns",
        matrix.row_count(),
        matrix.column_count()
    );
    if config.kind == ArrangementKind::Random {
        println!("  Seed: {}", config.seed);
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Flags that only apply to the other arrangement are reported and ignored.
fn build_arrangement(args: &Args) -> Arrangement {
    match args.arrangement {
        ArrangementKind::Random => {
            if args.sort.is_some() || args.start.is_some() {
                warn!("--sort and --start have no effect on a random arrangement");
            }
            Arrangement::Random {
                seating: args.seating.unwrap_or(SeatingMode::Single),
            }
        }
        ArrangementKind::Ordered => {
            if args.seating == Some(SeatingMode::Paired) {
                warn!("--seating paired has no effect on an ordered arrangement; seating one per desk");
            }
            Arrangement::Ordered {
                sort: args.sort.unwrap_or(SortOrder::Ascending),
                start: args.start.unwrap_or(StartSide::Left),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "seating_chart=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_date(date_str: &Option<String>) -> Result<NaiveDate, AppError> {
    match date_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::DateError(s.clone())),
        None => Ok(Local::now().date_naive()),
    }
}

fn write_html(path: &Path, matrix: &SeatMatrix, config: &ChartConfig) -> Result<(), AppError> {
    let title = config
        .labels
        .title(seating_chart::Viewpoint::Student)
        .to_string();
    let page = render_screen_page(matrix, config.params.seating_mode(), &config.labels, &title);
    write_text(path, &page)
}

fn write_text(path: &Path, content: &str) -> Result<(), AppError> {
    fs::write(path, content).map_err(|source| AppError::OutputError {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "written");
    Ok(())
}
