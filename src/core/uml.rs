use crate::adapters::process::ProcessRenderer;
use crate::core::alias::{escape_label, normalize};
use crate::core::fmt_err;
use crate::domain::model::{Interface, Operation, Parameter, System};
use crate::domain::ports::{OutputFormat, Renderer, UmlDiagramType};
use crate::utils::error::{DiagramError, Result};
use crate::utils::validation::validate_required_field;
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct UmlDiagramConfig<'a> {
    pub system: Option<&'a System>,
    pub diagram_type: Option<String>,
    pub output_format: Option<String>,
}

impl<'a> UmlDiagramConfig<'a> {
    pub fn resolve(&self) -> Result<(&'a System, UmlDiagramType, OutputFormat)> {
        let diagram_type = validate_required_field("diagram type", &self.diagram_type)?;
        let format = validate_required_field("output format", &self.output_format)?;
        let diagram_type: UmlDiagramType = diagram_type.parse()?;
        let format: OutputFormat = format.parse()?;
        let system = *validate_required_field("system", &self.system)?;
        Ok((system, diagram_type, format))
    }
}

// An untyped parameter keeps its trailing space: `p2 `.
fn render_parameter(parameter: &Parameter) -> String {
    match &parameter.r#type {
        Some(t) => format!("{} : {}", parameter.name, t),
        None => format!("{} ", parameter.name),
    }
}

fn render_operation(operation: &Operation) -> String {
    let parameters = operation
        .parameters
        .iter()
        .map(render_parameter)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {}({})",
        operation.return_type.as_deref().unwrap_or("void"),
        operation.name,
        parameters
    )
}

fn write_interface(out: &mut String, interface: &Interface) -> Result<()> {
    writeln!(out, "interface {} {{", normalize(&interface.name)).map_err(fmt_err)?;

    if let Some(endpoint) = interface.endpoint.as_deref().filter(|e| !e.is_empty()) {
        writeln!(out, "  endpoint = {}", endpoint).map_err(fmt_err)?;
    }
    if let Some(kind) = interface
        .communication_type
        .as_deref()
        .filter(|c| !c.is_empty())
    {
        writeln!(out, "  communicationType = {}", kind).map_err(fmt_err)?;
    }
    for operation in &interface.operations {
        writeln!(out, "  {}", render_operation(operation)).map_err(fmt_err)?;
    }

    writeln!(out, "}}").map_err(fmt_err)?;
    Ok(())
}

/// PlantUML component diagram for `system`.
///
/// Fails with [`DiagramError::ValidationError`] at the first contract whose
/// interface is not declared by a microservice of the system, or whose
/// consumer is not one of the system's microservices.
pub fn to_plantuml(system: &System, diagram_type: UmlDiagramType) -> Result<String> {
    let mut out = String::new();
    writeln!(&mut out, "@startuml").map_err(fmt_err)?;

    match diagram_type {
        UmlDiagramType::Component => {
            for microservice in &system.microservices {
                let alias = normalize(&microservice.name);
                tracing::debug!(
                    "Declaring component {} with {} interface(s)",
                    alias,
                    microservice.interfaces.len()
                );

                writeln!(
                    &mut out,
                    "component \"{}\" as {} <<Microservice>>",
                    escape_label(&microservice.name),
                    alias
                )
                .map_err(fmt_err)?;

                for interface in &microservice.interfaces {
                    write_interface(&mut out, interface)?;
                }
                for interface in &microservice.interfaces {
                    writeln!(&mut out, "{} ..|> {}", alias, normalize(&interface.name))
                        .map_err(fmt_err)?;
                }
            }

            for (position, contract) in system.contracts.iter().enumerate() {
                let owner = system.interface(contract.owner());
                let consumer = system.microservice(contract.consumer());

                let (Some(owner), Some(consumer)) = (owner, consumer) else {
                    tracing::debug!(
                        "Contract #{} ({} -> {}) references an undeclared endpoint",
                        position,
                        contract.consumer(),
                        contract.owner()
                    );
                    return Err(DiagramError::validation(format!(
                        "owner or consumer of a contract were not previously defined (contract #{})",
                        position
                    )));
                };

                writeln!(
                    &mut out,
                    "{} ..> {} : use",
                    normalize(&consumer.name),
                    normalize(&owner.name)
                )
                .map_err(fmt_err)?;
            }
        }
    }

    writeln!(&mut out, "@enduml").map_err(fmt_err)?;
    Ok(out)
}

pub struct UmlDiagramBuilder<'a, R: Renderer = ProcessRenderer> {
    config: UmlDiagramConfig<'a>,
    renderer: R,
}

impl<'a, R: Renderer> UmlDiagramBuilder<'a, R> {
    pub fn system(mut self, system: &'a System) -> Self {
        self.config.system = Some(system);
        self
    }

    pub fn diagram_type(mut self, diagram_type: impl Into<String>) -> Self {
        self.config.diagram_type = Some(diagram_type.into());
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.config.output_format = Some(format.into());
        self
    }

    pub fn renderer<T: Renderer>(self, renderer: T) -> UmlDiagramBuilder<'a, T> {
        UmlDiagramBuilder {
            config: self.config,
            renderer,
        }
    }

    pub fn build(self) -> UmlDiagram<'a, R> {
        UmlDiagram {
            config: self.config,
            renderer: self.renderer,
        }
    }
}

/// UML view of a [`System`], rendered through PlantUML by default.
pub struct UmlDiagram<'a, R: Renderer = ProcessRenderer> {
    config: UmlDiagramConfig<'a>,
    renderer: R,
}

impl<'a> UmlDiagram<'a, ProcessRenderer> {
    pub fn builder() -> UmlDiagramBuilder<'a, ProcessRenderer> {
        UmlDiagramBuilder {
            config: UmlDiagramConfig::default(),
            renderer: ProcessRenderer::plantuml(),
        }
    }
}

impl<'a, R: Renderer> UmlDiagram<'a, R> {
    /// PlantUML text for the configured system, without rendering it.
    pub fn source(&self) -> Result<String> {
        let (system, diagram_type, _) = self.config.resolve()?;
        to_plantuml(system, diagram_type)
    }

    pub fn visualize(&self, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        let (system, diagram_type, format) = self.config.resolve()?;

        tracing::info!(
            "Rendering {} diagram of '{}' to {}",
            diagram_type,
            system.name,
            target.display()
        );

        let source = to_plantuml(system, diagram_type)?;
        tracing::debug!("PlantUML source:\n{}", source);

        self.renderer.render(&source, format, target)?;

        tracing::info!("{} diagram written to {}", diagram_type, target.display());
        Ok(())
    }
}
