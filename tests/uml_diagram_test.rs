use msa_diagram::{
    Contract, DiagramError, Interface, MemoryRenderer, Microservice, Operation, OutputFormat,
    Parameter, System, UmlDiagram, UmlDiagramType,
};
use tempfile::TempDir;

/// M provides I, N consumes it.
fn provider_consumer_system() -> System {
    let mut m = Microservice::new("Service M");
    m.add_interface(
        Interface::new("Interface I", &m)
            .with_endpoint("E")
            .with_operation(
                Operation::new("op1")
                    .returning("String")
                    .with_parameter(Parameter::typed("p1", "T"))
                    .with_parameter(Parameter::new("p2")),
            )
            .with_operation(Operation::new("op2")),
    );
    let n = Microservice::new("Service N");
    let contract = Contract::new(&m.interfaces[0], &n);

    System::new("Pair")
        .with_microservice(m)
        .with_microservice(n)
        .with_contract(contract)
}

fn assert_in_order(text: &str, fragments: &[&str]) {
    let mut from = 0;
    for fragment in fragments {
        match text[from..].find(fragment) {
            Some(offset) => from += offset + fragment.len(),
            None => panic!("'{}' not found in order in:\n{}", fragment, text),
        }
    }
}

#[test]
fn test_component_diagram_text() {
    let system = provider_consumer_system();
    let renderer = MemoryRenderer::new();
    let diagram = UmlDiagram::builder()
        .system(&system)
        .diagram_type(UmlDiagramType::Component)
        .output_format(OutputFormat::Svg)
        .renderer(renderer.clone())
        .build();

    diagram.visualize("pair.svg").unwrap();

    let text = renderer.last_source().unwrap();
    assert_in_order(
        &text,
        &[
            "@startuml",
            "component \"Service M\" as ServiceM <<Microservice>>",
            "interface InterfaceI {",
            "endpoint = E",
            "String op1(p1 : T, p2 )",
            "void op2()",
            "ServiceM ..|> InterfaceI",
            "component \"Service N\" as ServiceN <<Microservice>>",
            "ServiceN ..> InterfaceI : use",
            "@enduml",
        ],
    );
    assert!(!text.contains("communicationType"));
}

#[test]
fn test_full_text_layout() {
    let mut orders = Microservice::new("Orders");
    orders.add_interface(
        Interface::new("Order Events", &orders)
            .with_communication_type("AMQP")
            .with_operation(Operation::new("published").with_parameter(Parameter::typed("order", "Order"))),
    );
    let system = System::new("Events").with_microservice(orders);

    let source = UmlDiagram::builder()
        .system(&system)
        .diagram_type("component")
        .output_format("svg")
        .build()
        .source()
        .unwrap();

    assert_eq!(
        source,
        "@startuml\n\
         component \"Orders\" as Orders <<Microservice>>\n\
         interface OrderEvents {\n\
         \x20 communicationType = AMQP\n\
         \x20 void published(order : Order)\n\
         }\n\
         Orders ..|> OrderEvents\n\
         @enduml\n"
    );
}

#[test]
fn test_unregistered_interface_fails_validation_without_output() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("invalid.svg");

    let mut system = provider_consumer_system();
    let ghost_owner = Microservice::new("Ghost");
    let ghost = Interface::new("Ghost API", &ghost_owner);
    let consumer = &system.microservices[1];
    let contract = Contract::new(&ghost, consumer);
    system.add_contract(contract);

    let renderer = MemoryRenderer::new();
    let diagram = UmlDiagram::builder()
        .system(&system)
        .diagram_type(UmlDiagramType::Component)
        .output_format(OutputFormat::Svg)
        .renderer(renderer.clone())
        .build();

    let err = diagram.visualize(&target).unwrap_err();
    assert!(matches!(err, DiagramError::ValidationError { .. }));
    assert!(err
        .to_string()
        .contains("owner or consumer of a contract were not previously defined"));
    assert!(renderer.requests().is_empty());
    assert!(!target.exists());
}

#[test]
fn test_unregistered_consumer_fails_validation() {
    let mut system = provider_consumer_system();
    let stranger = Microservice::new("Stranger");
    let contract = Contract::new(&system.microservices[0].interfaces[0], &stranger);
    system.add_contract(contract);

    let renderer = MemoryRenderer::new();
    let diagram = UmlDiagram::builder()
        .system(&system)
        .diagram_type(UmlDiagramType::Component)
        .output_format(OutputFormat::Svg)
        .renderer(renderer.clone())
        .build();

    let err = diagram.visualize("invalid.svg").unwrap_err();
    assert!(matches!(err, DiagramError::ValidationError { .. }));
    assert!(renderer.requests().is_empty());
}

#[test]
fn test_configuration_errors() {
    let system = provider_consumer_system();
    let cases = [
        (None, Some("svg"), true),
        (Some("component"), None, true),
        (Some("sequence"), Some("svg"), true),
        (Some("component"), Some("png"), true),
        (Some("component"), Some("svg"), false),
    ];

    for (diagram_type, format, with_system) in cases {
        let renderer = MemoryRenderer::new();
        let mut builder = UmlDiagram::builder().renderer(renderer.clone());
        if with_system {
            builder = builder.system(&system);
        }
        if let Some(diagram_type) = diagram_type {
            builder = builder.diagram_type(diagram_type);
        }
        if let Some(format) = format {
            builder = builder.output_format(format);
        }

        let err = builder.build().visualize("out.svg").unwrap_err();
        assert!(
            matches!(err, DiagramError::ConfigurationError { .. }),
            "{:?}/{:?}/{} gave {:?}",
            diagram_type,
            format,
            with_system,
            err
        );
        assert!(renderer.requests().is_empty());
    }
}

#[test]
fn test_repeated_visualize_produces_identical_text() {
    let system = provider_consumer_system();
    let renderer = MemoryRenderer::new();
    let diagram = UmlDiagram::builder()
        .system(&system)
        .diagram_type(UmlDiagramType::Component)
        .output_format(OutputFormat::Svg)
        .renderer(renderer.clone())
        .build();

    diagram.visualize("first.svg").unwrap();
    diagram.visualize("second.svg").unwrap();

    let requests = renderer.requests();
    assert_eq!(requests.len(), 2);
    assert_ne!(requests[0].target, requests[1].target);
    assert_eq!(requests[0].source, requests[1].source);
}

#[test]
fn test_renderer_failure_surfaces_as_render_error() {
    let system = provider_consumer_system();
    let diagram = UmlDiagram::builder()
        .system(&system)
        .diagram_type(UmlDiagramType::Component)
        .output_format(OutputFormat::Svg)
        .renderer(MemoryRenderer::failing("plantuml crashed"))
        .build();

    let err = diagram.visualize("pair.svg").unwrap_err();
    assert!(matches!(err, DiagramError::RenderError { .. }));
}
