use std::sync::Arc;

use service::search::SearchService;
use service::storage::FileStore;

#[derive(Clone)]
pub struct ServerState {
    pub file_store: Arc<dyn FileStore>,
    pub search: Arc<SearchService>,
}
