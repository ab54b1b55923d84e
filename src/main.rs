use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grayquant::models::{ConvertConfig, DEFAULT_INPUT, DEFAULT_MAX_COLORS, DEFAULT_OUTPUT};
use grayquant::rendering::{PngCompression, QuantizeMethod};
use grayquant::{ConvertError, ImageConverter};

#[derive(Parser)]
#[command(name = "grayquant")]
#[command(version)]
#[command(about = "Convert a PNG image to a grayscale, palette-indexed PNG")]
struct Cli {
    /// PNG file to read
    #[arg(default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// PNG file to write (replaced if it exists)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Maximum number of palette entries (2-256)
    #[arg(short, long, default_value_t = DEFAULT_MAX_COLORS,
          value_parser = clap::value_parser!(u16).range(2..=256))]
    colors: u16,

    /// Clustering effort when the image has more colors than allowed
    #[arg(short, long, value_enum, default_value_t = QuantizeMethod::Fast)]
    method: QuantizeMethod,

    /// zlib compression level of the output
    #[arg(long, value_enum, default_value_t = PngCompression::Balanced)]
    compression: PngCompression,

    /// Re-compress the output with oxipng
    #[arg(long)]
    optimize: bool,

    /// Print a JSON report to stdout instead of a summary line
    #[arg(long)]
    json: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    let default_filter = if cli.verbose {
        "grayquant=debug"
    } else {
        "grayquant=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConvertError>() {
                Some(convert) => {
                    tracing::debug!(
                        stage = %convert.stage(),
                        error = ?convert,
                        "Conversion failed"
                    );
                    eprintln!("Error ({}): {convert}", convert.stage());
                }
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = ConvertConfig {
        input: cli.input.clone(),
        output: cli.output.clone(),
        max_colors: cli.colors,
        method: cli.method,
        compression: cli.compression,
        optimize: cli.optimize,
    };

    let converter = ImageConverter::new(config);
    let report = converter.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} -> {} ({}x{}, {} colors, {} bytes)",
            report.input.display(),
            report.output.display(),
            report.width,
            report.height,
            report.palette_len,
            report.bytes_written
        );
    }
    Ok(())
}
