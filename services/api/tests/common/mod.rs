//! Shared fakes and helpers for the api integration tests.

#![allow(dead_code)]

use api_lib::config::Config;
use api_lib::web::state::AppState;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trip_planner_core::{CandidateActivity, CandidateSource, Interest, PortError, PortResult};

/// An in-memory candidate source with an optional artificial delay on city lookups.
pub struct FakeSource {
    pub names: Vec<String>,
    pub fail: bool,
    pub completion_delay: Duration,
    pub completion_queries: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            fail: false,
            completion_delay: Duration::ZERO,
            completion_queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::with_names(&[])
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.completion_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateSource for FakeSource {
    async fn get_activities(
        &self,
        destination: &str,
        _interests: &[Interest],
    ) -> PortResult<Vec<CandidateActivity>> {
        if self.fail {
            return Err(PortError::Unexpected("backend unavailable".to_string()));
        }
        Ok(self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| CandidateActivity {
                id: Some(format!("c{}", i)),
                name: name.clone(),
                description: format!("{} in {}", name, destination),
                kind: "landmark".to_string(),
                tags: vec![],
                map_query: name.clone(),
            })
            .collect())
    }

    async fn get_city_completions(&self, partial_input: &str) -> PortResult<Vec<String>> {
        self.completion_queries
            .lock()
            .unwrap()
            .push(partial_input.to_string());
        if !self.completion_delay.is_zero() {
            tokio::time::sleep(self.completion_delay).await;
        }
        if self.fail {
            return Err(PortError::Malformed("not json".to_string()));
        }
        Ok(vec![format!("{} City, Country", partial_input)])
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|name| match name {
        "SUGGESTION_DEBOUNCE_MS" => Some("500".to_string()),
        _ => None,
    })
    .expect("default config is valid")
}

pub fn app_state(source: Arc<FakeSource>) -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(test_config()),
        candidate_source: source,
    })
}
