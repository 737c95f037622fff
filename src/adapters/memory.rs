use crate::domain::ports::{OutputFormat, Renderer};
use crate::utils::error::{DiagramError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub source: String,
    pub format: OutputFormat,
    pub target: PathBuf,
}

/// Records what it is asked to render instead of producing images.
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryRenderer {
    requests: Arc<Mutex<Vec<RenderRequest>>>,
    failure: Option<String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that rejects every request with a render error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            requests: Arc::default(),
            failure: Some(message.into()),
        }
    }

    pub fn requests(&self) -> Vec<RenderRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn last_source(&self) -> Option<String> {
        self.requests().pop().map(|r| r.source)
    }
}

impl Renderer for MemoryRenderer {
    fn render(&self, source: &str, format: OutputFormat, target: &Path) -> Result<()> {
        if let Some(message) = &self.failure {
            return Err(DiagramError::render(message.clone()));
        }

        let mut requests = self
            .requests
            .lock()
            .map_err(|_| DiagramError::render("render log is poisoned"))?;
        requests.push(RenderRequest {
            source: source.to_string(),
            format,
            target: target.to_path_buf(),
        });
        Ok(())
    }
}
