use crate::adapters::process::ProcessRenderer;
use crate::core::alias::{escape_label, normalize};
use crate::core::fmt_err;
use crate::domain::model::{Microservice, MicroserviceId, System};
use crate::domain::ports::{OutputFormat, Renderer};
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

/// Settings collected by [`GraphDiagramBuilder`]; checked only when a diagram is produced.
#[derive(Debug, Clone, Default)]
pub struct GraphDiagramConfig<'a> {
    pub system: Option<&'a System>,
    pub output_format: Option<String>,
}

impl<'a> GraphDiagramConfig<'a> {
    pub fn resolve(&self) -> Result<(&'a System, OutputFormat)> {
        let format: OutputFormat = validate_required_field("output format", &self.output_format)?.parse()?;
        let system = *validate_required_field("system", &self.system)?;
        Ok((system, format))
    }
}

/// Microservices as vertices, one consumer -> provider edge per related pair.
///
/// The provider is the microservice declaring the contract's interface at
/// build time. Contracts are not checked against the system: an edge whose
/// consumer or provider cannot be found is skipped. Repeated pairs collapse into one edge.
pub fn build_graph(system: &System) -> DiGraph<&Microservice, ()> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<MicroserviceId, NodeIndex> = HashMap::new();

    for microservice in &system.microservices {
        nodes
            .entry(microservice.id())
            .or_insert_with(|| graph.add_node(microservice));
    }

    for contract in &system.contracts {
        let provider = system
            .provider_of(contract.owner())
            .and_then(|m| nodes.get(&m.id()));

        match (nodes.get(&contract.consumer()), provider) {
            (Some(&consumer), Some(&provider)) => {
                graph.update_edge(consumer, provider, ());
            }
            _ => {
                tracing::warn!(
                    "Skipping contract {} -> {}: endpoint is not part of system '{}'",
                    contract.consumer(),
                    contract.owner(),
                    system.name
                );
            }
        }
    }

    tracing::debug!(
        "Built dependency graph with {} vertices and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

pub fn to_dot(system: &System) -> Result<String> {
    let graph = build_graph(system);
    let mut out = String::new();

    writeln!(&mut out, "digraph \"{}\" {{", escape_label(&normalize(&system.name))).map_err(fmt_err)?;

    for index in graph.node_indices() {
        let microservice = graph[index];
        writeln!(
            &mut out,
            "  \"{}\" [label=\"{}\"];",
            escape_label(&normalize(&microservice.name)),
            escape_label(&microservice.name)
        )
        .map_err(fmt_err)?;
    }

    for edge in graph.edge_references() {
        writeln!(
            &mut out,
            "  \"{}\" -> \"{}\";",
            escape_label(&normalize(&graph[edge.source()].name)),
            escape_label(&normalize(&graph[edge.target()].name))
        )
        .map_err(fmt_err)?;
    }

    writeln!(&mut out, "}}").map_err(fmt_err)?;
    Ok(out)
}

pub struct GraphDiagramBuilder<'a, R: Renderer = ProcessRenderer> {
    config: GraphDiagramConfig<'a>,
    renderer: R,
}

impl<'a, R: Renderer> GraphDiagramBuilder<'a, R> {
    pub fn system(mut self, system: &'a System) -> Self {
        self.config.system = Some(system);
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.config.output_format = Some(format.into());
        self
    }

    pub fn renderer<T: Renderer>(self, renderer: T) -> GraphDiagramBuilder<'a, T> {
        GraphDiagramBuilder {
            config: self.config,
            renderer,
        }
    }

    pub fn build(self) -> GraphDiagram<'a, R> {
        GraphDiagram {
            config: self.config,
            renderer: self.renderer,
        }
    }
}

/// Dependency graph of a [`System`], rendered through Graphviz by default.
pub struct GraphDiagram<'a, R: Renderer = ProcessRenderer> {
    config: GraphDiagramConfig<'a>,
    renderer: R,
}

impl<'a> GraphDiagram<'a, ProcessRenderer> {
    pub fn builder() -> GraphDiagramBuilder<'a, ProcessRenderer> {
        GraphDiagramBuilder {
            config: GraphDiagramConfig::default(),
            renderer: ProcessRenderer::graphviz(),
        }
    }
}

impl<'a, R: Renderer> GraphDiagram<'a, R> {
    /// DOT text for the configured system, without rendering it.
    pub fn source(&self) -> Result<String> {
        let (system, _) = self.config.resolve()?;
        to_dot(system)
    }

    pub fn visualize(&self, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        let (system, format) = self.config.resolve()?;

        tracing::info!(
            "Rendering dependency graph of '{}' to {}",
            system.name,
            target.display()
        );

        let source = to_dot(system)?;
        tracing::debug!("DOT source:\n{}", source);

        self.renderer.render(&source, format, target)?;

        tracing::info!("Dependency graph written to {}", target.display());
        Ok(())
    }
}
