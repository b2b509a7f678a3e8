use std::sync::Arc;

use crate::models::HandicapRange;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    /// Built once at startup and shared by every request.
    pub range: Arc<HandicapRange>,
}

impl AppState {
    pub fn new(storage: StorageConfig, range: HandicapRange) -> Self {
        Self {
            storage: Arc::new(storage),
            range: Arc::new(range),
        }
    }
}
