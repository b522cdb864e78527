//! BME280 Exporter Binary
//!
//! Standalone exporter bridging a BME280 sensor to a Prometheus metrics endpoint.

use bme280_exporter::{
    start_web_server, Collector, FailurePolicy, Sample, SampleValue, SensorCollector, SensorPort,
    WebConfig, DEFAULT_I2C_BUS, DEFAULT_READ_TIMEOUT_MS,
};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "bme280_exporter")]
#[command(about = "BME280 environmental metrics exporter for Prometheus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Samples a BME280 sensor on demand and exposes temperature, \
pressure and humidity as Prometheus gauges")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Listen address (overrides BME280_EXPORTER_ADDRESS)
    #[arg(short, long)]
    listen: Option<String>,

    /// Failure policy for a scrape with failed sensor reads:
    /// degrade-and-continue, fail-fast or independent-invalid
    #[arg(long, default_value_t = FailurePolicy::default())]
    policy: FailurePolicy,

    /// I2C bus the sensor is attached to
    #[arg(long, default_value_t = DEFAULT_I2C_BUS)]
    i2c_bus: u8,

    /// Per-read timeout in milliseconds; a timed-out read counts as failed
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT_MS)]
    read_timeout_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the metrics endpoint server (default)
    Serve,

    /// Perform a single collection, print it and exit
    Read(ReadArgs),
}

#[derive(Args)]
struct ReadArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let result = match &cli.command {
        Some(Commands::Read(args)) => read_command(&cli, args).await,
        Some(Commands::Serve) | None => serve_command(&cli).await,
    };

    if let Err(err) = result {
        error!("fatal: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Open the hardware sensor port. Boot-fatal on failure.
#[cfg(feature = "hardware")]
fn open_sensor(cli: &Cli) -> bme280_exporter::Result<Box<dyn SensorPort + Send>> {
    let port = bme280_exporter::Bme280Port::connect(
        cli.i2c_bus,
        std::time::Duration::from_millis(cli.read_timeout_ms),
    )?;
    Ok(Box::new(port))
}

#[cfg(not(feature = "hardware"))]
fn open_sensor(_cli: &Cli) -> bme280_exporter::Result<Box<dyn SensorPort + Send>> {
    Err(bme280_exporter::ExporterError::config_error(
        "built without the 'hardware' feature, no sensor driver available",
    ))
}

async fn serve_command(cli: &Cli) -> anyhow::Result<()> {
    info!("Starting BME280 exporter...");

    let port = open_sensor(cli)?;
    let collector = Arc::new(SensorCollector::new(port, cli.policy));
    info!("Sensor connected, failure policy: {}", cli.policy);

    let config = match &cli.listen {
        Some(listen) => WebConfig::new(listen.clone()),
        None => WebConfig::from_env(),
    };

    start_web_server(config, collector).await?;

    Ok(())
}

async fn read_command(cli: &Cli, args: &ReadArgs) -> anyhow::Result<()> {
    let port = open_sensor(cli)?;
    let collector = SensorCollector::new(port, cli.policy);
    let samples = collector.collect();

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&samples)?;
            println!("{}", json);
        }
        "pretty" => {
            print_pretty_samples(&samples);
        }
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_pretty_samples(samples: &[Sample]) {
    for sample in samples {
        match &sample.value {
            SampleValue::Gauge(value) => {
                println!("{:<28} {}", sample.desc.name, value);
            }
            SampleValue::Invalid(err) => {
                println!("{:<28} invalid: {}", sample.desc.name, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["bme280_exporter", "--listen", "0.0.0.0:9100"]).unwrap();
        assert_eq!(cli.listen.as_deref(), Some("0.0.0.0:9100"));
    }

    #[test]
    fn test_default_values() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["bme280_exporter"]).unwrap();
        assert_eq!(cli.policy, FailurePolicy::IndependentInvalid);
        assert_eq!(cli.i2c_bus, DEFAULT_I2C_BUS);
        assert_eq!(cli.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
        assert!(cli.listen.is_none());
    }

    #[test]
    fn test_policy_parsing() {
        use clap::Parser;

        let cli = Cli::try_parse_from(["bme280_exporter", "--policy", "fail-fast"]).unwrap();
        assert_eq!(cli.policy, FailurePolicy::FailFast);

        assert!(Cli::try_parse_from(["bme280_exporter", "--policy", "bogus"]).is_err());
    }
}
