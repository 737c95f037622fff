use msa_diagram::utils::validation::Validate;
use msa_diagram::{Diagram, DiagramError, DiagramKind, ExportJob, Exporter, LandscapeConfig, MemoryRenderer};
use std::fs;
use tempfile::TempDir;

const LANDSCAPE: &str = r#"
[system]
name = "Web Shop"

[[microservices]]
name = "Catalog Service"
technology = "Rust"

[[microservices.interfaces]]
name = "Product API"
endpoint = "/products"
communication_type = "REST"

[[microservices.interfaces.operations]]
name = "findProduct"
return_type = "Product"
parameters = [{ name = "id", type = "ProductId" }]

[[microservices.interfaces.operations]]
name = "refresh"

[[microservices]]
name = "Cart Service"

[[contracts]]
provider = "Catalog Service"
interface = "Product API"
consumer = "Cart Service"
"#;

#[test]
fn test_landscape_file_to_both_diagrams() {
    let dir = TempDir::new().unwrap();
    let landscape_path = dir.path().join("shop.toml");
    fs::write(&landscape_path, LANDSCAPE).unwrap();

    let landscape = LandscapeConfig::from_file(&landscape_path).unwrap();
    landscape.validate().unwrap();
    let system = landscape.into_system().unwrap();

    let graph_renderer = MemoryRenderer::new();
    let uml_renderer = MemoryRenderer::new();
    let exporter = Exporter::with_renderers(graph_renderer.clone(), uml_renderer.clone());
    let job = ExportJob {
        system: &system,
        output_dir: dir.path().join("diagrams"),
        format: "svg".to_string(),
        diagram_type: "component".to_string(),
    };

    let outcomes = exporter.export(&job, DiagramKind::Both);
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));
    assert_eq!(outcomes[0].target, dir.path().join("diagrams").join("WebShop-graph.svg"));
    assert_eq!(
        outcomes[1].target,
        dir.path().join("diagrams").join("WebShop-component.svg")
    );

    let dot = graph_renderer.last_source().unwrap();
    assert!(dot.contains("\"CartService\" -> \"CatalogService\";"));
    assert!(dot.contains("\"CatalogService\" [label=\"Catalog Service\"];"));

    let uml = uml_renderer.last_source().unwrap();
    assert!(uml.contains("endpoint = /products"));
    assert!(uml.contains("communicationType = REST"));
    assert!(uml.contains("Product findProduct(id : ProductId)"));
    assert!(uml.contains("void refresh()"));
    assert!(uml.contains("CartService ..> ProductAPI : use"));
}

#[test]
fn test_sources_do_not_render() {
    let system = LandscapeConfig::from_toml_str(LANDSCAPE)
        .unwrap()
        .into_system()
        .unwrap();
    let graph_renderer = MemoryRenderer::new();
    let uml_renderer = MemoryRenderer::new();
    let exporter = Exporter::with_renderers(graph_renderer.clone(), uml_renderer.clone());
    let job = ExportJob {
        system: &system,
        output_dir: "unused".into(),
        format: "svg".to_string(),
        diagram_type: "component".to_string(),
    };

    let sources = exporter.sources(&job, DiagramKind::Uml);

    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].0, Diagram::Uml);
    assert!(sources[0].1.as_ref().unwrap().starts_with("@startuml"));
    assert!(graph_renderer.requests().is_empty());
    assert!(uml_renderer.requests().is_empty());
}

#[test]
fn test_unsupported_format_fails_every_diagram() {
    let system = LandscapeConfig::from_toml_str(LANDSCAPE)
        .unwrap()
        .into_system()
        .unwrap();
    let exporter = Exporter::with_renderers(MemoryRenderer::new(), MemoryRenderer::new());
    let job = ExportJob {
        system: &system,
        output_dir: "unused".into(),
        format: "pdf".to_string(),
        diagram_type: "component".to_string(),
    };

    let outcomes = exporter.export(&job, DiagramKind::Both);

    assert_eq!(outcomes.len(), 2);
    for outcome in outcomes {
        assert!(matches!(
            outcome.result,
            Err(DiagramError::ConfigurationError { .. })
        ));
    }
}

#[test]
fn test_missing_landscape_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let err = LandscapeConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, DiagramError::IoError(_)));
}
