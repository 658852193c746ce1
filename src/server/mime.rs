//! Content-type resolution for served files.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::Stdio;
use std::sync::Arc;

use log::debug;
use tokio::process::Command;

/// Content type used when nothing better is known.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Type alias for a boxed future yielding a probed content type.
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>>;

/// Classifies a file by its bytes when its extension is not recognized.
pub trait ContentProbe: Send + Sync {
    /// Probe the file at `path`. `None` means the probe could not tell.
    fn probe<'a>(&'a self, path: &'a Path) -> ProbeFuture<'a>;
}

/// Probe backed by the system `file` command.
#[derive(Debug, Clone)]
pub struct FileCommandProbe {
    program: String,
}

impl FileCommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for FileCommandProbe {
    fn default() -> Self {
        Self::new("file")
    }
}

impl ContentProbe for FileCommandProbe {
    fn probe<'a>(&'a self, path: &'a Path) -> ProbeFuture<'a> {
        Box::pin(async move {
            let output = Command::new(&self.program)
                .arg("--mime-type")
                .arg("-b")
                .arg(path)
                .stdin(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .output()
                .await;

            match output {
                Ok(output) if output.status.success() => {
                    first_token(&String::from_utf8_lossy(&output.stdout))
                }
                Ok(output) => {
                    debug!("{} exited with {} for {}", self.program, output.status, path.display());
                    None
                }
                Err(e) => {
                    debug!("Failed to run {}: {e}", self.program);
                    None
                }
            }
        })
    }
}

/// Probe that never recognizes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl ContentProbe for NoProbe {
    fn probe<'a>(&'a self, _path: &'a Path) -> ProbeFuture<'a> {
        Box::pin(async { None })
    }
}

/// Resolves the content type of a file: known extensions first, then the probe.
#[derive(Clone)]
pub struct MimeResolver {
    probe: Arc<dyn ContentProbe>,
}

impl MimeResolver {
    pub fn new(probe: Arc<dyn ContentProbe>) -> Self {
        Self { probe }
    }

    /// The content type for `path`. Always returns a type.
    pub async fn resolve(&self, path: &Path) -> String {
        if let Some(known) = mime_for_extension(extension(path)) {
            return known.to_string();
        }

        match self.probe.probe(path).await {
            Some(probed) => probed,
            None => FALLBACK_MIME_TYPE.to_string(),
        }
    }
}

/// The part of the file name after its last `.`.
///
/// Empty when there is no `.` or the only one starts the file name (dotfiles).
pub fn extension(path: &Path) -> &str {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return "";
    };

    match name.rfind('.') {
        Some(0) | None => "",
        Some(dot) => &name[dot + 1..],
    }
}

/// The fixed extension table.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "html" => Some("text/html"),
        "css" => Some("text/css"),
        "js" => Some("text/javascript"),
        _ => None,
    }
}

// "text/plain; charset=us-ascii" -> "text/plain"
fn first_token(raw: &str) -> Option<String> {
    let token = raw.split_whitespace().next()?.trim_end_matches(';');
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
