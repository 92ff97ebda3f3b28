//! FILENAME: session/src/prefs.rs
//! Preference persistence.
//!
//! The host environment supplies a string key/value store; two fixed
//! keys hold the text-wrap map and the aggregation map as JSON blobs.
//! Failures in either direction are non-fatal: loads fall back to
//! empty state, saves log and move on.

use std::collections::HashMap;

use grid_engine::{AggregationState, TextWrapState};

/// Storage key for the per-column text wrap map.
pub const WRAP_STATES_KEY: &str = "orders-table-wrap-states";

/// Storage key for the per-column aggregation map.
pub const AGGREGATION_STATES_KEY: &str = "orders-table-aggregation-states";

/// Minimal key/value string store the host provides.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), String>;
}

/// In-memory store for tests and headless use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_wrap_states(store: &dyn PreferenceStore) -> TextWrapState {
    match store.get(WRAP_STATES_KEY) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Failed to load text wrap preferences: {}", err);
                TextWrapState::new()
            }
        },
        None => TextWrapState::new(),
    }
}

pub fn save_wrap_states(store: &mut dyn PreferenceStore, state: &TextWrapState) {
    match serde_json::to_string(state) {
        Ok(raw) => {
            if let Err(err) = store.set(WRAP_STATES_KEY, &raw) {
                log::warn!("Failed to save text wrap preferences: {}", err);
            }
        }
        Err(err) => log::warn!("Failed to save text wrap preferences: {}", err),
    }
}

pub fn load_aggregation_states(store: &dyn PreferenceStore) -> AggregationState {
    match store.get(AGGREGATION_STATES_KEY) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Failed to load aggregation preferences: {}", err);
                AggregationState::new()
            }
        },
        None => AggregationState::new(),
    }
}

pub fn save_aggregation_states(store: &mut dyn PreferenceStore, state: &AggregationState) {
    match serde_json::to_string(state) {
        Ok(raw) => {
            if let Err(err) = store.set(AGGREGATION_STATES_KEY, &raw) {
                log::warn!("Failed to save aggregation preferences: {}", err);
            }
        }
        Err(err) => log::warn!("Failed to save aggregation preferences: {}", err),
    }
}
