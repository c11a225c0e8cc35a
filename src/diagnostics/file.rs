//! Artifact files on the local filesystem.
//!
//! Both files are overwritten on every request. Writes from concurrent
//! requests are serialized so each file always holds one request's bytes,
//! but which request ends up on disk is undefined under load.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::DiagnosticsConfig;
use crate::diagnostics::DiagnosticSink;
use crate::ocsp::UpstreamResponse;

pub struct FileSink {
    request_path: PathBuf,
    response_path: PathBuf,
    capture_upstream_response: bool,
    write_lock: Mutex<()>,
}

impl FileSink {
    pub fn new(config: &DiagnosticsConfig) -> Self {
        let dir = Path::new(&config.directory);
        Self {
            request_path: dir.join(&config.request_file),
            response_path: dir.join(&config.response_file),
            capture_upstream_response: config.capture_upstream_response,
            write_lock: Mutex::new(()),
        }
    }

    async fn write(&self, path: &Path, contents: &[u8]) {
        let _guard = self.write_lock.lock().await;
        if let Err(e) = write_artifact(path, contents).await {
            tracing::trace!(path = %path.display(), error = %e, "Diagnostic write skipped");
        }
    }
}

#[async_trait]
impl DiagnosticSink for FileSink {
    async fn record_request(&self, decoded: &[u8]) {
        self.write(&self.request_path, decoded).await;
    }

    async fn record_exchange(&self, decoded: &[u8], response: Option<&UpstreamResponse>) {
        if !self.capture_upstream_response {
            // Historical layout: the "response" file mirrors the request.
            self.write(&self.response_path, decoded).await;
            return;
        }
        if let Some(response) = response {
            self.write(&self.response_path, &response.body).await;
        }
    }
}

async fn write_artifact(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(path, contents).await?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o777)).await?;
    }
    Ok(())
}
