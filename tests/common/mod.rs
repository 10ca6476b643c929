#![allow(dead_code)]

use std::sync::Arc;
use url_shortener::application::services::ShortenService;
use url_shortener::infrastructure::persistence::{MemoryStore, MemoryUrlRepository};
use url_shortener::state::AppState;
use url_shortener::utils::code_generator::RandomCodeGenerator;

pub const TEST_BASE_URL: &str = "http://short.test/api/urls/";

/// Builds state over a fresh in-memory store.
///
/// The store handle is returned so tests can inspect or close it.
pub fn create_test_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::new();

    let service = ShortenService::new(
        Arc::new(store.clone()),
        Arc::new(MemoryUrlRepository::new()),
        Arc::new(RandomCodeGenerator::seeded(42)),
    );

    let state = AppState::new(Arc::new(service), TEST_BASE_URL);

    (state, store)
}

/// Builds state whose store refuses every session.
pub fn create_unavailable_state() -> AppState {
    let (state, store) = create_test_state();
    store.close();
    state
}
