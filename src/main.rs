use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use tracing::instrument;

use fundamentals::config::Config;
use fundamentals::env_vars::env_vars_by_category;
use fundamentals::lessons::{age, loops, pricing, temperature, text};
use fundamentals::logging;
use fundamentals::playground::Playground;
use fundamentals::scheduler::StepScheduler;

#[derive(Parser)]
#[command(name = "fundamentals")]
#[command(about = "Countdown scheduler and programming-fundamentals lessons")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count down to zero, one line per tick
    Countdown {
        /// Starting value (default from config: 10)
        #[arg(short, long, allow_negative_numbers = true)]
        from: Option<i64>,

        /// Milliseconds between ticks (default from config: 500)
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,
    },

    /// Greet someone according to their age
    Age {
        #[arg(long, default_value = "")]
        name: String,

        /// Age in years
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        age: String,
    },

    /// Convert Celsius to Fahrenheit
    Temp {
        #[arg(allow_negative_numbers = true)]
        celsius: f64,
    },

    /// Price breakdown with tax
    Tax {
        #[arg(long, allow_negative_numbers = true)]
        price: f64,

        /// Tax rate in percent
        #[arg(long, allow_negative_numbers = true)]
        rate: f64,
    },

    /// Case variants, reversal and counts for a piece of text
    Format {
        #[arg(default_value = "")]
        text: String,
    },

    /// Print a multiplication table
    Table {
        #[arg(allow_negative_numbers = true)]
        number: Option<i64>,
    },

    /// Number and measure a list of fruits
    Fruits {
        /// Fruits to process (defaults to the built-in list)
        fruits: Vec<String>,
    },

    /// Interactive counter, list, toggle and background widgets
    Playground,

    /// List supported environment variables
    Env,

    /// Print the effective configuration as TOML
    Config {
        /// Also write it to ./fundamentals.toml
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;
    let logging_handle = logging::init_logging(&config, cli.debug)?;

    match cli.command {
        Commands::Countdown { from, delay_ms } => {
            cmd_countdown(&config, from, delay_ms).await?;
        }
        Commands::Age { name, age } => cmd_age(&name, &age),
        Commands::Temp { celsius } => cmd_temp(celsius),
        Commands::Tax { price, rate } => cmd_tax(price, rate),
        Commands::Format { text } => cmd_format(&text),
        Commands::Table { number } => cmd_table(&config, number),
        Commands::Fruits { fruits } => cmd_fruits(&fruits),
        Commands::Playground => cmd_playground()?,
        Commands::Env => cmd_env(),
        Commands::Config { save } => cmd_config(&config, save)?,
    }

    if let Some(log_path) = logging_handle.log_file_path {
        tracing::debug!(path = %log_path.display(), "session log written");
    }

    Ok(())
}

#[instrument(skip(config))]
async fn cmd_countdown(config: &Config, from: Option<i64>, delay_ms: Option<i64>) -> Result<()> {
    let start = from.unwrap_or(config.countdown.start);
    let delay_ms = delay_ms.unwrap_or(config.countdown.delay_ms);

    println!("Starting countdown...");

    let scheduler = StepScheduler::new();
    let handle = scheduler
        .start(start, delay_ms, |tick| {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", loops::countdown_line(tick))?;
            stdout.flush()?;
            Ok(())
        })
        .context("Failed to start countdown")?;

    tokio::select! {
        result = scheduler.run_until_idle() => {
            result.context("Countdown failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            scheduler.cancel(&handle);
            println!("Countdown cancelled at {}", handle.snapshot().remaining());
        }
    }

    Ok(())
}

fn cmd_age(name: &str, age: &str) {
    match age::check_age(name, age::parse_age(age)) {
        Ok(greeting) => println!("{greeting}"),
        Err(e) => println!("⚠️ {e}"),
    }
}

fn cmd_temp(celsius: f64) {
    if celsius.is_finite() {
        println!("{}", temperature::convert(celsius));
    } else {
        println!("⚠️ please enter a valid temperature");
    }
}

fn cmd_tax(price: f64, rate: f64) {
    match pricing::total_with_tax(price, rate) {
        Ok(breakdown) => println!("{breakdown}"),
        Err(e) => println!("⚠️ {e}"),
    }
}

fn cmd_format(input: &str) {
    match text::format_text(input) {
        Ok(report) => println!("{report}"),
        Err(e) => println!("⚠️ {e}"),
    }
}

fn cmd_table(config: &Config, number: Option<i64>) {
    let number = number.unwrap_or(config.lessons.multiplication_default);
    print!(
        "{}",
        loops::multiplication_table(number, config.lessons.table_rows)
    );
}

fn cmd_fruits(fruits: &[String]) {
    let report = if fruits.is_empty() {
        loops::fruit_report(loops::FRUITS)
    } else {
        let names: Vec<&str> = fruits.iter().map(String::as_str).collect();
        loops::fruit_report(&names)
    };
    println!("{report}");
}

fn cmd_playground() -> Result<()> {
    let stdin = std::io::stdin();
    Playground::new().run(stdin.lock(), std::io::stdout())
}

fn cmd_env() {
    for (category, vars) in env_vars_by_category() {
        println!("{}", category.display_name());
        println!("{}", "─".repeat(60));
        for var in vars {
            println!("  {var}");
        }
        println!();
    }
}

fn cmd_config(config: &Config, save: bool) -> Result<()> {
    print!("{}", config.to_toml()?);

    if save {
        let path = Config::local_config_path();
        config.save_to(&path)?;
        println!("\nSaved to {}", path.display());
    }

    Ok(())
}
