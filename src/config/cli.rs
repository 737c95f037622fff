use crate::core::export::DiagramKind;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "msa-diagram")]
#[command(about = "Render a microservice landscape as a dependency graph and a UML component diagram")]
pub struct CliConfig {
    /// Landscape description (TOML, or JSON with a .json extension)
    pub landscape: String,

    #[arg(long, value_enum, default_value_t = DiagramKind::Both)]
    pub kind: DiagramKind,

    #[arg(long, default_value = "./output")]
    pub output_dir: String,

    #[arg(long, default_value = "svg")]
    pub format: String,

    #[arg(long, default_value = "component", help = "UML diagram type")]
    pub diagram_type: String,

    #[arg(long, help = "Print the diagram text instead of rendering it")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("landscape", &self.landscape)?;
        validate_path("output_dir", &self.output_dir)?;
        Ok(())
    }
}
