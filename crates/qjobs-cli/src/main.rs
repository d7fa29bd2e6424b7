//! qjobs Command-Line Interface
//!
//! Builds a CSV training set from quantum jobs that already ran on IBM
//! Quantum hardware.
//!
//! ```text
//!   qjobs export        ran_jobs/*.json ──→ jobs_data.csv
//!   qjobs connections   list the device's two-qubit links and their errors
//!   qjobs version
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use qjobs_dataset::config::{
    DEFAULT_DEVICE, DEFAULT_EXPECTED_OUTPUT, DEFAULT_INPUT_GLOB, DEFAULT_OUTPUT, DEFAULT_SHOTS,
    DEFAULT_TWO_QUBIT_GATE,
};
use qjobs_dataset::CollectorConfig;

mod commands;

use commands::{connections, export, version};

/// qjobs - turn completed quantum jobs into model training data
#[derive(Parser)]
#[command(name = "qjobs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect features of every cached job and write them as CSV
    Export(ExportArgs),

    /// Show the device's two-qubit connections and their current errors
    Connections {
        /// Device to inspect
        #[arg(short, long, env = "QJOBS_DEVICE", default_value = DEFAULT_DEVICE)]
        device: String,

        /// Two-qubit gate type that defines a connection
        #[arg(short, long, default_value = DEFAULT_TWO_QUBIT_GATE)]
        gate: String,

        /// Legacy API endpoint (used with IBM_QUANTUM_TOKEN)
        #[arg(long, env = "IBM_QUANTUM_ENDPOINT")]
        endpoint: Option<String>,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Glob matching cached job mappings
    #[arg(short, long, env = "QJOBS_INPUT", default_value = DEFAULT_INPUT_GLOB)]
    input: String,

    /// Output CSV file (overwritten)
    #[arg(short, long, env = "QJOBS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Device whose coupling graph defines the connection list
    #[arg(short, long, env = "QJOBS_DEVICE", default_value = DEFAULT_DEVICE)]
    device: String,

    /// Two-qubit gate type that defines a connection
    #[arg(short, long, default_value = DEFAULT_TWO_QUBIT_GATE)]
    gate: String,

    /// Bitstring counted as a correct outcome
    #[arg(short, long, default_value = DEFAULT_EXPECTED_OUTPUT)]
    expected: String,

    /// Shots per anchor circuit
    #[arg(short, long, default_value_t = DEFAULT_SHOTS, value_parser = clap::value_parser!(u32).range(1..))]
    shots: u32,

    /// Legacy API endpoint (used with IBM_QUANTUM_TOKEN)
    #[arg(long, env = "IBM_QUANTUM_ENDPOINT")]
    endpoint: Option<String>,
}

impl ExportArgs {
    fn collector_config(&self) -> CollectorConfig {
        let mut config = CollectorConfig::default()
            .with_device(&self.device)
            .with_input_glob(&self.input)
            .with_expected_output(&self.expected)
            .with_shots(self.shots)
            .with_output(&self.output);
        config.two_qubit_gate.clone_from(&self.gate);
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Export(args) => {
            let config = args.collector_config();
            export::execute(config, args.endpoint.as_deref()).await
        }

        Commands::Connections {
            device,
            gate,
            endpoint,
        } => connections::execute(&device, &gate, endpoint.as_deref()).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let cli = Cli::try_parse_from(["qjobs", "export"]).unwrap();
        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.collector_config(), CollectorConfig::default());
        assert!(args.endpoint.is_none());
    }

    #[test]
    fn test_export_overrides() {
        let cli = Cli::try_parse_from([
            "qjobs",
            "-vv",
            "export",
            "--input",
            "jobs/*.json",
            "--output",
            "out.csv",
            "--device",
            "ibm_osaka",
            "--expected",
            "0110",
            "--shots",
            "4096",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let Commands::Export(args) = cli.command else {
            panic!("expected export command");
        };
        let config = args.collector_config();
        assert_eq!(config.input_glob, "jobs/*.json");
        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.device, "ibm_osaka");
        assert_eq!(config.expected_output, "0110");
        assert_eq!(config.shots, 4096);
        assert_eq!(config.two_qubit_gate, "ecr");
    }

    #[test]
    fn test_export_rejects_zero_shots() {
        assert!(Cli::try_parse_from(["qjobs", "export", "--shots", "0"]).is_err());
    }

    #[test]
    fn test_connections_gate_override() {
        let cli = Cli::try_parse_from(["qjobs", "connections", "--gate", "cz"]).unwrap();
        match cli.command {
            Commands::Connections { gate, .. } => assert_eq!(gate, "cz"),
            _ => panic!("expected connections command"),
        }
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Cli::try_parse_from(["qjobs", "train"]).is_err());
    }
}
