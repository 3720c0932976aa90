//! Backends that turn PlantUML text into an SVG image.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;

use crate::error::GatewayError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/generate";

/// Text in, rendered image bytes out. Any non-empty answer counts as success.
pub trait RenderGateway {
    fn render(&self, source: &str) -> Result<Vec<u8>, GatewayError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    uml: &'a str,
}

fn request_body(source: &str) -> Result<Vec<u8>, GatewayError> {
    serde_json::to_vec(&GenerateRequest { uml: source })
        .map_err(|e| GatewayError::Transport(format!("failed to encode request: {}", e)))
}

/// Renders through a remote `POST generate` endpoint taking `{"uml": ...}`.
pub struct HttpGateway {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpGateway {
    /// `timeout` of `None` waits for the renderer indefinitely.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RenderGateway for HttpGateway {
    fn render(&self, source: &str) -> Result<Vec<u8>, GatewayError> {
        let body = request_body(source)?;
        info!("POST {} ({} bytes)", self.endpoint, body.len());

        let mut response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json")
            .send(&body[..])
            .map_err(|err| match err {
                ureq::Error::StatusCode(code) => GatewayError::Status(code),
                other => GatewayError::Transport(other.to_string()),
            })?;

        let content = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if content.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        debug!("renderer answered with {} bytes", content.len());
        Ok(content)
    }
}

/// Renders with a local `plantuml` executable in pipe mode.
pub struct PlantUmlCommand {
    program: PathBuf,
}

impl Default for PlantUmlCommand {
    fn default() -> Self {
        Self::new("plantuml")
    }
}

impl PlantUmlCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RenderGateway for PlantUmlCommand {
    fn render(&self, source: &str) -> Result<Vec<u8>, GatewayError> {
        info!("running {} -tsvg -pipe", self.program.display());
        let mut child = Command::new(&self.program)
            .args(["-tsvg", "-pipe"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from another thread so a large SVG cannot fill stdout and stall us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = source.to_string();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;
        let written = match writer {
            Some(handle) => handle
                .join()
                .map_err(|_| GatewayError::Process("stdin writer panicked".to_string()))?,
            None => Ok(()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GatewayError::Process(if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            }));
        }
        written?;
        if output.stdout.is_empty() {
            return Err(GatewayError::EmptyResponse);
        }
        Ok(output.stdout)
    }
}
