pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::LandscapeConfig;

pub use crate::adapters::{Engine, MemoryRenderer, ProcessRenderer, RenderRequest};
pub use crate::core::export::{Diagram, DiagramKind, ExportJob, ExportOutcome, Exporter};
pub use crate::core::graph::{GraphDiagram, GraphDiagramBuilder, GraphDiagramConfig};
pub use crate::core::uml::{UmlDiagram, UmlDiagramBuilder, UmlDiagramConfig};
pub use crate::domain::model::{
    Contract, Interface, InterfaceId, Microservice, MicroserviceId, Operation, Parameter, System,
};
pub use crate::domain::ports::{OutputFormat, Renderer, UmlDiagramType};
pub use crate::utils::error::{DiagramError, Result};
