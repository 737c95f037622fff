use crate::utils::error::{DiagramError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Image formats a diagram may be rendered to. Only SVG is supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            other => Err(DiagramError::configuration(format!(
                "unsupported output format '{}' (supported: svg)",
                other
            ))),
        }
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.as_str().to_string()
    }
}

/// UML diagram subtypes. Only component diagrams are supported today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UmlDiagramType {
    Component,
}

impl UmlDiagramType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UmlDiagramType::Component => "component",
        }
    }
}

impl fmt::Display for UmlDiagramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UmlDiagramType {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "component" => Ok(UmlDiagramType::Component),
            other => Err(DiagramError::configuration(format!(
                "unsupported UML diagram type '{}' (supported: component)",
                other
            ))),
        }
    }
}

impl From<UmlDiagramType> for String {
    fn from(kind: UmlDiagramType) -> Self {
        kind.as_str().to_string()
    }
}

/// Turns a textual diagram description into an image file at `target`.
pub trait Renderer {
    fn render(&self, source: &str, format: OutputFormat, target: &Path) -> Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, source: &str, format: OutputFormat, target: &Path) -> Result<()> {
        (**self).render(source, format, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("svg".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!(" SVG ".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);

        let err = "png".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, DiagramError::ConfigurationError { .. }));
    }

    #[test]
    fn test_diagram_type_parsing() {
        assert_eq!(
            "component".parse::<UmlDiagramType>().unwrap(),
            UmlDiagramType::Component
        );
        assert!("sequence".parse::<UmlDiagramType>().is_err());
    }

    #[test]
    fn test_enums_convert_into_names() {
        assert_eq!(String::from(OutputFormat::Svg), "svg");
        assert_eq!(String::from(UmlDiagramType::Component), "component");
    }
}
