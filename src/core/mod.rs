pub mod alias;
pub mod export;
pub mod graph;
pub mod uml;

pub use crate::domain::model::{Contract, Interface, Microservice, Operation, Parameter, System};
pub use crate::domain::ports::{OutputFormat, Renderer, UmlDiagramType};
pub use crate::utils::error::Result;

use crate::utils::error::DiagramError;

pub(crate) fn fmt_err(err: std::fmt::Error) -> DiagramError {
    DiagramError::render(format!("failed to assemble diagram text: {}", err))
}
