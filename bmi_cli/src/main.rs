use bmi_core::chart::{render_text, ChartSeries};
use bmi_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body Mass Index calculator with history tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI and record it in the history (default)
    Calc {
        /// Weight in kilograms (prompted if omitted)
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<String>,

        /// Height in meters (prompted if omitted)
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,

        /// Dry run - show the result without recording it
        #[arg(long)]
        dry_run: bool,
    },

    /// List every recorded reading
    History,

    /// Plot the recorded readings as a text line chart
    Chart {
        /// Chart width in characters
        #[arg(long, value_parser = clap::value_parser!(u16).range(bmi_core::config::MIN_CHART_WIDTH as i64..))]
        width: Option<u16>,

        /// Chart height in rows
        #[arg(long, value_parser = clap::value_parser!(u16).range(bmi_core::config::MIN_CHART_HEIGHT as i64..))]
        height: Option<u16>,
    },

    /// Export the history as CSV
    Export {
        /// Destination CSV file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Keep stdout for results; diagnostics go to stderr
    bmi_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = JsonFileStore::new(config.history_path(&data_dir));

    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            dry_run,
        }) => cmd_calc(store, weight, height, dry_run, &config),
        Some(Commands::History) => cmd_history(&store),
        Some(Commands::Chart { width, height }) => cmd_chart(
            &store,
            width.map(usize::from).unwrap_or(config.chart.width),
            height.map(usize::from).unwrap_or(config.chart.height),
        ),
        Some(Commands::Export { path }) => cmd_export(&store, &path),
        None => {
            // Default to "calc" command
            cmd_calc(store, None, None, false, &config)
        }
    }
}

fn cmd_calc(
    mut store: JsonFileStore,
    weight: Option<String>,
    height: Option<String>,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let weight = match weight {
        Some(w) => w,
        None => prompt("Weight (kg): ")?,
    };
    let height = match height {
        Some(h) => h,
        None => prompt("Height (m): ")?,
    };
    let threshold = config.guidance.loss_threshold;

    if dry_run {
        let assessment = match parse_measurements(&weight, &height)
            .and_then(|m| assess_measurements(&m, threshold))
        {
            Ok(assessment) => assessment,
            Err(e) => input_error(&e),
        };
        display_assessment(&assessment);
        println!("\n[Dry run - not recording reading]");
        return Ok(());
    }

    let now = chrono::Local::now().naive_local();
    match calculate(&weight, &height, threshold, &mut store, now) {
        Ok(assessment) => {
            display_assessment(&assessment);
            println!("\n✓ Reading saved to {}", store.path().display());
            Ok(())
        }
        Err(Error::InvalidInput(e)) => input_error(&e),
        Err(e) => Err(e),
    }
}

fn input_error(e: &InputError) -> ! {
    eprintln!("Input Error: Please enter valid positive numbers.");
    eprintln!("  {}", e);
    std::process::exit(2);
}

fn cmd_history(store: &JsonFileStore) -> Result<()> {
    let Some(readings) = load_history(store)? else {
        println!("No BMI data found.");
        return Ok(());
    };

    println!("{:<19}  {:>6}  {}", "Date", "BMI", "Category");
    println!("{}", "─".repeat(41));
    for reading in &readings {
        println!(
            "{:<19}  {:>6.2}  {}",
            reading.date_label(),
            reading.bmi,
            reading.category()
        );
    }
    println!("\n{} readings", readings.len());
    Ok(())
}

fn cmd_chart(store: &JsonFileStore, width: usize, height: usize) -> Result<()> {
    let Some(readings) = load_history(store)? else {
        println!("No BMI data found.");
        return Ok(());
    };

    let series = ChartSeries::from_readings(&readings);
    match render_text(&series, width, height) {
        Some(chart) => print!("{}", chart),
        None => println!("Unable to plot the recorded readings."),
    }
    Ok(())
}

fn cmd_export(store: &JsonFileStore, path: &Path) -> Result<()> {
    let readings = store.load_all()?;
    let count = bmi_core::export::write_csv(&readings, path)?;

    println!("✓ Exported {} readings", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn display_assessment(assessment: &Assessment) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI RESULT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    for line in assessment.to_string().lines() {
        println!("  {}", line);
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
