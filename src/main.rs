use anyhow::Context;
use clap::Parser;
use msa_diagram::utils::{logger, validation::Validate};
use msa_diagram::{CliConfig, ExportJob, Exporter, LandscapeConfig};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting msa-diagram");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    tracing::info!("📁 Loading landscape from: {}", config.landscape);

    let landscape = match LandscapeConfig::from_file(&config.landscape) {
        Ok(landscape) => landscape,
        Err(e) => {
            eprintln!("❌ Failed to load landscape '{}': {}", config.landscape, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let system = match landscape.validate().and_then(|_| landscape.into_system()) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let job = ExportJob {
        system: &system,
        output_dir: PathBuf::from(&config.output_dir),
        format: config.format.clone(),
        diagram_type: config.diagram_type.clone(),
    };
    let exporter = Exporter::new();

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - printing diagram text only");
        let mut exit_code = 0;
        for (kind, source) in exporter.sources(&job, config.kind) {
            match source {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("❌ {:?}: {}", kind, e);
                    exit_code = exit_code.max(e.exit_code());
                }
            }
        }
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
        return Ok(());
    }

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("cannot create output directory '{}'", config.output_dir))?;

    let mut exit_code = 0;
    for outcome in exporter.export(&job, config.kind) {
        match outcome.result {
            Ok(()) => {
                println!("✅ {:?} diagram saved to: {}", outcome.kind, outcome.target.display());
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                eprintln!("💡 {}", e.recovery_suggestion());
                exit_code = exit_code.max(e.exit_code());
            }
        }
    }

    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
