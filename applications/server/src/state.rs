/// Shared application state
use crate::services::AuthService;
use std::sync::Arc;
use tunebox_library::LibraryService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub library: LibraryService,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(library: LibraryService, auth_service: Arc<AuthService>) -> Self {
        Self {
            library,
            auth_service,
        }
    }
}
