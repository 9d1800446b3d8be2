use std::sync::Arc;

use importer_core::ImportService;

/// Shared application state
pub struct AppState {
    import_service: Arc<ImportService>,
}

impl AppState {
    pub fn new(import_service: Arc<ImportService>) -> Self {
        Self { import_service }
    }

    pub fn import_service(&self) -> &ImportService {
        self.import_service.as_ref()
    }
}
