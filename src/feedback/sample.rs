//! Optional explosion sample loading

use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Loads the explosion sample at most once and caches the outcome for the
/// process lifetime, including a failed load
#[derive(Debug)]
pub struct SampleLoader {
    path: Option<PathBuf>,
    timeout: Duration,
    cached: OnceCell<Option<Arc<[u8]>>>,
}

impl SampleLoader {
    /// Create a loader for the given sample path
    pub fn new(path: Option<PathBuf>, timeout: Duration) -> Self {
        Self {
            path,
            timeout,
            cached: OnceCell::new(),
        }
    }

    /// Loader with no sample configured; always falls back
    pub fn disabled() -> Self {
        Self::new(None, Duration::ZERO)
    }

    /// How long the explosion cue waits for the sample before falling back
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the sample bytes, reading the file on first use
    pub async fn get(&self) -> Option<Arc<[u8]>> {
        self.cached
            .get_or_init(|| async { self.fetch().await })
            .await
            .clone()
    }

    /// Get the sample only if it arrives within the configured timeout
    pub async fn get_within_timeout(&self) -> Option<Arc<[u8]>> {
        match tokio::time::timeout(self.timeout, self.get()).await {
            Ok(sample) => sample,
            Err(_) => {
                debug!("Explosion sample not ready after {:?}", self.timeout);
                None
            }
        }
    }

    async fn fetch(&self) -> Option<Arc<[u8]>> {
        let path = self.path.as_ref()?;

        match tokio::fs::read(path).await {
            Ok(bytes) if bytes.is_empty() => {
                warn!("Explosion sample {} is empty, using synthesized fallback", path.display());
                None
            }
            Ok(bytes) => {
                info!("Loaded explosion sample {} ({} bytes)", path.display(), bytes.len());
                Some(Arc::from(bytes))
            }
            Err(e) => {
                warn!("Failed to load explosion sample {}: {}", path.display(), e);
                None
            }
        }
    }
}
