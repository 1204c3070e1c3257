// src/state.rs

use crate::{config::Config, store::DynStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub config: Config,
}

impl FromRef<AppState> for DynStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
