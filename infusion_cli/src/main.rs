use clap::{Parser, Subcommand};
use infusion_core::config::OutputFormat;
use infusion_core::*;
use std::path::PathBuf;
use std::process::ExitCode;

const FOOTER: &str = "For healthcare use only. Always verify clinical decisions independently.";

#[derive(Parser)]
#[command(name = "infucalc")]
#[command(about = "IV dosing calculator for Tepezza, Remicade and Benlysta", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the calculation as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tepezza: 500 mg vials, 47.6 mg/mL
    Tepezza {
        /// Patient weight (kg)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Prescribed dose (mg/kg)
        #[arg(long, allow_negative_numbers = true)]
        dose: Option<f64>,
    },

    /// Remicade: 100 mg vials, 10 mg/mL
    Remicade {
        /// Patient weight (kg)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Prescribed dose (mg/kg)
        #[arg(long, allow_negative_numbers = true)]
        dose: Option<f64>,

        /// Infusion type (induction, standard, enhanced)
        #[arg(long)]
        infusion: Option<String>,
    },

    /// Benlysta: fixed 10 mg/kg, 400 mg and 120 mg vials
    Benlysta {
        /// Patient weight (kg)
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    infusion_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let request = build_request(cli.command, &config)?;
    let calculation = calculate(&request)?;

    for advisory in &calculation.advisories {
        eprintln!("Warning: {}", advisory);
    }

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&calculation)?),
        OutputFormat::Text => display_result(&calculation.result),
    }

    Ok(())
}

fn build_request(command: Commands, config: &Config) -> Result<DoseRequest> {
    let (weight_kg, prescription) = match command {
        Commands::Tepezza { weight, dose } => {
            let dose_mg_per_kg = dose_or_default(
                dose,
                config.defaults.tepezza_dose_mg_per_kg,
                "tepezza_dose_mg_per_kg",
            )?;
            (weight, Prescription::Tepezza { dose_mg_per_kg })
        }
        Commands::Remicade {
            weight,
            dose,
            infusion,
        } => {
            let dose_mg_per_kg = dose_or_default(
                dose,
                config.defaults.remicade_dose_mg_per_kg,
                "remicade_dose_mg_per_kg",
            )?;
            let infusion = match infusion {
                Some(name) => name.parse::<InfusionType>()?,
                None => config.remicade_infusion()?,
            };
            (
                weight,
                Prescription::Remicade {
                    dose_mg_per_kg,
                    infusion,
                },
            )
        }
        Commands::Benlysta { weight } => (weight, Prescription::Benlysta),
    };

    tracing::debug!("Request: {} kg, {:?}", weight_kg, prescription);

    Ok(DoseRequest {
        weight_kg,
        prescription,
    })
}

fn dose_or_default(dose: Option<f64>, default: Option<f64>, key: &str) -> Result<f64> {
    dose.or(default).ok_or_else(|| {
        Error::InvalidInput(format!(
            "no dose given: pass --dose or set defaults.{} in the config file",
            key
        ))
    })
}

fn display_result(result: &DoseResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} DOSING", result.drug.to_string().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();

    println!("  PATIENT INFORMATION");
    println!("  • Weight: {:.1} kg", result.weight_kg);
    println!("  • Prescribed Dose: {:.1} mg/kg", result.dose_mg_per_kg);
    if let Some(infusion) = result.infusion_type {
        println!("  • Infusion Type: {}", infusion);
    }
    println!();

    println!("  DOSAGE CALCULATIONS");
    println!("  • Total Dose: {:.1} mg", result.total_dose_mg);
    match result.drug {
        Drug::Benlysta => {
            println!("  • Vials Needed: {}", result.vials);
            println!("  • Total Volume: {:.2} mL", result.volume_required_ml);
            if let Some(waste) = result.waste_mg {
                println!("  • Waste: {:.1} mg", waste);
            }
            println!("  • NS Bag: {}", result.bag);
        }
        Drug::Tepezza | Drug::Remicade => {
            println!("  • Volume Required: {:.1} mL", result.volume_required_ml);
            println!("  • Vials Needed: {}", result.vials);
            println!("  • IV Bag Size: {}", result.bag);
        }
    }
    println!();

    println!("  PREPARATION STEPS");
    for (i, step) in result.preparation_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    if !result.notes.is_empty() {
        println!();
        println!("  NOTES");
        for note in &result.notes {
            println!("  • {}", note);
        }
    }

    println!();
    println!("─────────────────────────────────────────");
    println!("{}", FOOTER);
}
