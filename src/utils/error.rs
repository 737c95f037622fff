use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {message}")]
    ParseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Rendering,
    Input,
}

impl DiagramError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::RenderError { .. } => ErrorCategory::Rendering,
            Self::IoError(_) | Self::ParseError { .. } => ErrorCategory::Input,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the requested output format and diagram type (supported: svg, component)"
            }
            ErrorCategory::Validation => {
                "Make sure every contract references a microservice and interface declared in the system"
            }
            ErrorCategory::Rendering => {
                "Make sure Graphviz (dot) and PlantUML are installed and on PATH"
            }
            ErrorCategory::Input => "Make sure the landscape file exists and is valid TOML or JSON",
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Validation => 3,
            ErrorCategory::Rendering => 4,
            ErrorCategory::Input => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, DiagramError>;
