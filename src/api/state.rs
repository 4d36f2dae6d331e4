use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::DEFAULT_UPLOAD_MAX_BYTES;
use crate::services::Recommender;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    recommender: Arc<RwLock<Option<Arc<Recommender>>>>,
    /// Where uploads are staged before they are loaded
    pub upload_dir: PathBuf,
    /// Body size cap applied to `/upload`
    pub upload_max_bytes: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a state with no library loaded
    pub fn new() -> Self {
        Self {
            recommender: Arc::new(RwLock::new(None)),
            upload_dir: std::env::temp_dir(),
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
        }
    }

    /// Creates a state serving the given recommender
    pub fn with_recommender(recommender: Recommender) -> Self {
        let state = Self::new();
        Self {
            recommender: Arc::new(RwLock::new(Some(Arc::new(recommender)))),
            ..state
        }
    }

    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = upload_dir.into();
        self
    }

    pub fn with_upload_max_bytes(mut self, upload_max_bytes: usize) -> Self {
        self.upload_max_bytes = upload_max_bytes;
        self
    }

    /// Snapshot of the recommender currently being served
    ///
    /// The lock is released before returning, so a concurrent swap never
    /// affects a request that already holds its snapshot.
    pub async fn recommender(&self) -> Option<Arc<Recommender>> {
        self.recommender.read().await.clone()
    }

    /// Replaces the served recommender in one step
    pub async fn replace(&self, recommender: Recommender) {
        let mut current = self.recommender.write().await;
        *current = Some(Arc::new(recommender));
    }
}
