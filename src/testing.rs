/// Shared fixtures for unit tests
use crate::clients::LaunchGateway;
use crate::domain::{Launch, LaunchOutcome, Rocket};
use crate::errors::{ApiError, ApiResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn sample_launch(
    id: &str,
    name: &str,
    date_utc: &str,
    success: Option<bool>,
    rocket: Option<&str>,
) -> Launch {
    Launch {
        id: id.to_string(),
        name: name.to_string(),
        date_utc: date_utc.parse().expect("fixture date"),
        details: None,
        flight_number: 1,
        success: LaunchOutcome::from(success),
        fairings: None,
        cores: Vec::new(),
        links: Default::default(),
        rocket: rocket.map(str::to_string),
    }
}

pub fn sample_rocket(id: &str) -> Rocket {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": "Falcon 9",
        "type": "rocket",
        "stages": 2,
        "cost_per_launch": 50000000
    }))
    .expect("fixture rocket")
}

fn not_found(what: &str, id: &str) -> ApiError {
    ApiError::UpstreamStatus {
        status: reqwest::StatusCode::NOT_FOUND,
        url: format!("stub://{}/{}", what, id),
    }
}

/// In-memory gateway counting every call
#[derive(Default)]
pub struct StubGateway {
    launches: Vec<Launch>,
    list_delay: Duration,
    launch_delay: Duration,
    fail_list: bool,
    fail_launch: bool,
    fail_rocket: bool,
    list_calls: AtomicUsize,
    launch_calls: AtomicUsize,
    rocket_calls: AtomicUsize,
}

impl StubGateway {
    pub fn with_launches(launches: Vec<Launch>) -> Self {
        Self {
            launches,
            ..Self::default()
        }
    }

    pub fn slow_list(mut self, delay: Duration) -> Self {
        self.list_delay = delay;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.launch_delay = delay;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    pub fn failing_rocket(mut self) -> Self {
        self.fail_rocket = true;
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn launch_calls(&self) -> usize {
        self.launch_calls.load(Ordering::SeqCst)
    }

    pub fn rocket_calls(&self) -> usize {
        self.rocket_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LaunchGateway for StubGateway {
    async fn fetch_launches(&self) -> ApiResult<Vec<Launch>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.list_delay.is_zero() {
            tokio::time::sleep(self.list_delay).await;
        }
        if self.fail_list {
            return Err(ApiError::UpstreamStatus {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                url: "stub://launches".to_string(),
            });
        }
        Ok(self.launches.clone())
    }

    async fn fetch_launch_by_id(&self, id: &str) -> ApiResult<Launch> {
        self.launch_calls.fetch_add(1, Ordering::SeqCst);
        if !self.launch_delay.is_zero() {
            tokio::time::sleep(self.launch_delay).await;
        }
        if self.fail_launch {
            return Err(ApiError::Internal("stub launch failure".to_string()));
        }
        self.launches
            .iter()
            .find(|launch| launch.id == id)
            .cloned()
            .ok_or_else(|| not_found("launches", id))
    }

    async fn fetch_rocket_by_id(&self, rocket_id: &str) -> ApiResult<Rocket> {
        self.rocket_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_rocket {
            return Err(ApiError::Internal("stub rocket failure".to_string()));
        }
        Ok(sample_rocket(rocket_id))
    }
}
