use crate::adapters::process::ProcessRenderer;
use crate::core::alias::normalize;
use crate::core::graph::GraphDiagram;
use crate::core::uml::UmlDiagram;
use crate::domain::model::System;
use crate::domain::ports::Renderer;
use crate::utils::error::Result;
use std::path::PathBuf;

/// A single diagram produced for a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagram {
    Graph,
    Uml,
}

/// Selection of diagrams requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DiagramKind {
    Graph,
    Uml,
    Both,
}

impl DiagramKind {
    pub fn expand(self) -> &'static [Diagram] {
        match self {
            DiagramKind::Graph => &[Diagram::Graph],
            DiagramKind::Uml => &[Diagram::Uml],
            DiagramKind::Both => &[Diagram::Graph, Diagram::Uml],
        }
    }
}

/// What to export and where to put it.
#[derive(Debug, Clone)]
pub struct ExportJob<'a> {
    pub system: &'a System,
    pub output_dir: PathBuf,
    pub format: String,
    pub diagram_type: String,
}

impl ExportJob<'_> {
    pub fn target(&self, diagram: Diagram) -> PathBuf {
        let suffix = match diagram {
            Diagram::Uml => self.diagram_type.trim().to_ascii_lowercase(),
            Diagram::Graph => "graph".to_string(),
        };
        self.output_dir.join(format!(
            "{}-{}.{}",
            normalize(&self.system.name),
            suffix,
            self.format.trim().to_ascii_lowercase()
        ))
    }
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub kind: Diagram,
    pub target: PathBuf,
    pub result: Result<()>,
}

/// Runs several diagrams for one system; a failing diagram does not stop the rest.
pub struct Exporter<G: Renderer = ProcessRenderer, U: Renderer = ProcessRenderer> {
    graph_renderer: G,
    uml_renderer: U,
}

impl Exporter<ProcessRenderer, ProcessRenderer> {
    pub fn new() -> Self {
        Self {
            graph_renderer: ProcessRenderer::graphviz(),
            uml_renderer: ProcessRenderer::plantuml(),
        }
    }
}

impl Default for Exporter<ProcessRenderer, ProcessRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Renderer, U: Renderer> Exporter<G, U> {
    pub fn with_renderers(graph_renderer: G, uml_renderer: U) -> Self {
        Self {
            graph_renderer,
            uml_renderer,
        }
    }

    fn graph<'a>(&self, job: &ExportJob<'a>) -> GraphDiagram<'a, &G> {
        GraphDiagram::builder()
            .system(job.system)
            .output_format(job.format.clone())
            .renderer(&self.graph_renderer)
            .build()
    }

    fn uml<'a>(&self, job: &ExportJob<'a>) -> UmlDiagram<'a, &U> {
        UmlDiagram::builder()
            .system(job.system)
            .diagram_type(job.diagram_type.clone())
            .output_format(job.format.clone())
            .renderer(&self.uml_renderer)
            .build()
    }

    pub fn export(&self, job: &ExportJob<'_>, kind: DiagramKind) -> Vec<ExportOutcome> {
        kind.expand()
            .iter()
            .map(|&kind| {
                let target = job.target(kind);
                let result = match kind {
                    Diagram::Uml => self.uml(job).visualize(&target),
                    Diagram::Graph => self.graph(job).visualize(&target),
                };
                if let Err(e) = &result {
                    tracing::error!("❌ {:?} diagram failed: {} (Category: {:?})", kind, e, e.category());
                }
                ExportOutcome {
                    kind,
                    target,
                    result,
                }
            })
            .collect()
    }

    /// Textual descriptions only, nothing is rendered.
    pub fn sources(&self, job: &ExportJob<'_>, kind: DiagramKind) -> Vec<(Diagram, Result<String>)> {
        kind.expand()
            .iter()
            .map(|&kind| {
                let source = match kind {
                    Diagram::Uml => self.uml(job).source(),
                    Diagram::Graph => self.graph(job).source(),
                };
                (kind, source)
            })
            .collect()
    }
}
