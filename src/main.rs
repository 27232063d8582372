//! device-quirks - inspect device classification from the command line
//!
//! - Probes the running platform for its identity (or takes it from flags)
//! - Applies identity overrides from the config file
//! - Reports which known hardware families need special-case handling

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use device_quirks::config::Config;
use device_quirks::device::{Classification, DeviceIdentity, KnownDeviceFamily, KNOWN_FAMILIES};
use device_quirks::probe;

/// Device quirks - detect hardware families with known issues
#[derive(Parser)]
#[command(name = "device-quirks")]
#[command(author = "ForgeMyPC")]
#[command(version)]
#[command(about = "Detect devices that need hardware-specific workarounds")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect this device and show its classification
    Detect {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify the given identification strings
    Classify {
        /// Manufacturer string (e.g., "samsung")
        #[arg(short, long, default_value = "")]
        manufacturer: String,

        /// Model string (e.g., "SD4930UR")
        #[arg(long, default_value = "")]
        model: String,

        /// Device identifier (e.g., "m0")
        #[arg(short, long, default_value = "")]
        device: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List known device families
    Families,

    /// Show details about a specific family
    Family {
        /// Family name or id to look up
        name: String,
    },

    /// Show the config file location, creating a default file if needed
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|err| {
        eprintln!(
            "{} {}",
            "Could not load config, using defaults:".bright_yellow(),
            err
        );
        Config::default()
    });
    init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    match cli.command.unwrap_or(Commands::Detect { json: false }) {
        Commands::Detect { json } => {
            let probed = probe::detect();
            debug!(identity = %probed, "Probed platform identity");
            let identity = config.identity.apply(probed);
            print_classification(&Classification::of(identity), json)?;
        }
        Commands::Classify {
            manufacturer,
            model,
            device,
            json,
        } => {
            let identity = DeviceIdentity::new(manufacturer, model, device);
            print_classification(&Classification::of(identity), json)?;
        }
        Commands::Families => {
            print_families_list();
        }
        Commands::Family { name } => match KnownDeviceFamily::find(&name) {
            Some(family) => print_family_details(family),
            None => {
                println!("{} {}", "Unknown family:".bright_red(), name);
                println!("Run {} to see known families.", "device-quirks families".bright_cyan());
            }
        },
        Commands::Config => {
            Config::init()?;
            println!("{}", Config::config_path()?.display());
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn print_classification(classification: &Classification, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(classification)?);
    } else {
        print!("{}", render_classification(classification));
    }
    Ok(())
}

/// Colored text report of a classification
fn render_classification(classification: &Classification) -> String {
    let identity = &classification.identity;
    let mut output = String::new();

    output.push_str(&format!("{}\n", "DEVICE IDENTITY".bright_yellow().bold()));
    output.push_str(&format!(
        "  Manufacturer: {}\n",
        display_field(&identity.manufacturer)
    ));
    output.push_str(&format!("  Model:        {}\n", display_field(&identity.model)));
    output.push_str(&format!("  Device:       {}\n", display_field(&identity.device)));
    output.push('\n');

    output.push_str(&format!("{}\n", "CLASSIFICATION".bright_yellow().bold()));
    if classification.is_generic() {
        output.push_str(&format!("  {}\n", "No known quirks apply.".bright_green()));
        return output;
    }

    for family in classification.families() {
        output.push_str(&format!(
            "  {} {}\n",
            "●".bright_red(),
            family.name.bright_white()
        ));
    }
    if classification.is_amazon_cello() {
        output.push_str(&format!(
            "  {} {}\n",
            "●".bright_red(),
            "Amazon Fire Phone".bright_white()
        ));
    } else if classification.is_amazon() {
        output.push_str(&format!(
            "  {} {}\n",
            "●".bright_magenta(),
            "Amazon device".bright_white()
        ));
    }

    output
}

fn display_field(value: &str) -> ColoredString {
    if value.is_empty() {
        "(not reported)".dimmed()
    } else {
        value.bright_white()
    }
}

fn print_families_list() {
    println!("{}", "KNOWN DEVICE FAMILIES:\n".bright_yellow().bold());
    for (i, family) in KNOWN_FAMILIES.iter().enumerate() {
        println!(
            "  {:2}. {} {} {}",
            i + 1,
            family.name.bright_white(),
            format!("[{}]", family.id).bright_cyan(),
            format!("{} device ids", family.device_ids.len()).dimmed()
        );
    }
}

fn print_family_details(family: &KnownDeviceFamily) {
    println!("{}", family.name.bright_yellow().bold());
    println!("  Id: {}", family.id.to_string().bright_cyan());
    println!(
        "  Manufacturer contains any of: {}",
        family.manufacturer_substrings.join(", ")
    );
    println!("  Device ids ({}):", family.device_ids.len());
    for chunk in family.device_ids.chunks(6) {
        println!("    {}", chunk.join("  "));
    }
}

#[cfg(test)]
mod tests {
    use super::{render_classification, Cli, Commands};
    use clap::Parser;
    use device_quirks::device::{Classification, DeviceIdentity};

    #[test]
    fn no_subcommand_parses_to_none() {
        let cli = Cli::try_parse_from(["device-quirks"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_level.is_none());
        assert!(matches!(
            cli.command.unwrap_or(Commands::Detect { json: false }),
            Commands::Detect { json: false }
        ));
    }

    #[test]
    fn classify_flags_default_to_empty() {
        let cli = Cli::try_parse_from(["device-quirks", "classify", "-m", "samsung"]).unwrap();
        match cli.command {
            Some(Commands::Classify {
                manufacturer,
                model,
                device,
                json,
            }) => {
                assert_eq!(manufacturer, "samsung");
                assert_eq!(model, "");
                assert_eq!(device, "");
                assert!(!json);
            }
            _ => panic!("Expected classify command"),
        }
    }

    #[test]
    fn classify_keeps_values_verbatim() {
        let cli = Cli::try_parse_from([
            "device-quirks",
            "classify",
            "--manufacturer",
            "Samsung Electronics",
            "--device",
            "t0lteatt",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Classify {
                manufacturer,
                device,
                json,
                ..
            }) => {
                assert_eq!(manufacturer, "Samsung Electronics");
                assert_eq!(device, "t0lteatt");
                assert!(json);
            }
            _ => panic!("Expected classify command"),
        }
    }

    #[test]
    fn log_level_is_global() {
        let cli =
            Cli::try_parse_from(["device-quirks", "families", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Some(Commands::Families)));

        let cli = Cli::try_parse_from(["device-quirks", "--log-level", "trace", "detect", "--json"])
            .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("trace"));
        assert!(matches!(cli.command, Some(Commands::Detect { json: true })));
    }

    #[test]
    fn family_requires_a_name() {
        assert!(Cli::try_parse_from(["device-quirks", "family"]).is_err());
    }

    #[test]
    fn render_marks_missing_fields_and_generic_devices() {
        let output = render_classification(&Classification::of(DeviceIdentity::default()));
        assert_eq!(output.matches("(not reported)").count(), 3);
        assert!(output.contains("No known quirks apply."));
    }

    #[test]
    fn render_lists_matched_family() {
        let output = render_classification(&Classification::of(DeviceIdentity::new(
            "samsung", "", "m0",
        )));
        assert!(output.contains("Samsung Galaxy S3"));
        assert!(!output.contains("No known quirks apply."));
        assert!(!output.contains("Amazon"));
    }

    #[test]
    fn render_distinguishes_amazon_devices() {
        let cello = render_classification(&Classification::of(DeviceIdentity::new(
            "Amazon", "SD4930UR", "",
        )));
        assert!(cello.contains("Amazon Fire Phone"));
        assert!(!cello.contains("Amazon device"));

        let kindle = render_classification(&Classification::of(DeviceIdentity::new(
            "Amazon", "KFTHWI", "",
        )));
        assert!(kindle.contains("Amazon device"));
        assert!(!kindle.contains("Amazon Fire Phone"));
    }
}
