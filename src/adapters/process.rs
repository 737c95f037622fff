use crate::domain::ports::{OutputFormat, Renderer};
use crate::utils::error::{DiagramError, Result};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use which::which;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// `dot`, consumes DOT text.
    Graphviz,
    /// `plantuml`, consumes PlantUML text.
    PlantUml,
}

impl Engine {
    pub fn default_program(&self) -> &'static str {
        match self {
            Engine::Graphviz => "dot",
            Engine::PlantUml => "plantuml",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Graphviz => f.write_str("Graphviz"),
            Engine::PlantUml => f.write_str("PlantUML"),
        }
    }
}

/// Renders by piping the diagram text into an external engine.
#[derive(Debug, Clone)]
pub struct ProcessRenderer {
    engine: Engine,
    program: String,
}

impl ProcessRenderer {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            program: engine.default_program().to_string(),
        }
    }

    pub fn graphviz() -> Self {
        Self::new(Engine::Graphviz)
    }

    pub fn plantuml() -> Self {
        Self::new(Engine::PlantUml)
    }

    /// Use another executable name or path, e.g. a wrapper script.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    fn command(&self, format: OutputFormat, target: &Path) -> Result<Command> {
        let executable = which(&self.program).map_err(|_| {
            DiagramError::render(format!(
                "{} executable '{}' not found. Please install {} and ensure it is in your PATH.",
                self.engine, self.program, self.engine
            ))
        })?;

        let mut command = Command::new(executable);
        match self.engine {
            Engine::Graphviz => {
                command.arg(format!("-T{}", format)).arg("-o").arg(target);
            }
            Engine::PlantUml => {
                command.arg(format!("-t{}", format)).arg("-pipe");
            }
        }
        Ok(command)
    }
}

impl Renderer for ProcessRenderer {
    fn render(&self, source: &str, format: OutputFormat, target: &Path) -> Result<()> {
        let mut command = self.command(format, target)?;

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DiagramError::render(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        tracing::debug!("Running {:?}", command);

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DiagramError::render(format!("failed to start {}: {}", self.engine, e)))?;

        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| DiagramError::render("failed to open renderer stdin"))?;
        stdin.write_all(source.as_bytes()).map_err(|e| {
            DiagramError::render(format!("failed to send diagram to {}: {}", self.engine, e))
        })?;

        let output = child
            .wait_with_output()
            .map_err(|e| DiagramError::render(format!("{} did not finish: {}", self.engine, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DiagramError::render(format!(
                "{} exited with {}: {}",
                self.engine,
                output.status,
                stderr.trim()
            )));
        }

        if self.engine == Engine::PlantUml {
            fs::write(target, &output.stdout).map_err(|e| {
                DiagramError::render(format!("cannot write {}: {}", target.display(), e))
            })?;
        }

        Ok(())
    }
}
