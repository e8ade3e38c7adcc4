/// Domain models for the application
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::{display_date, or_placeholder};

/// Outcome of a launch as reported upstream (`true` / `false` / `null`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum LaunchOutcome {
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl From<Option<bool>> for LaunchOutcome {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => LaunchOutcome::Succeeded,
            Some(false) => LaunchOutcome::Failed,
            None => LaunchOutcome::Unknown,
        }
    }
}

impl From<LaunchOutcome> for Option<bool> {
    fn from(value: LaunchOutcome) -> Self {
        match value {
            LaunchOutcome::Succeeded => Some(true),
            LaunchOutcome::Failed => Some(false),
            LaunchOutcome::Unknown => None,
        }
    }
}

impl LaunchOutcome {
    /// Only an explicit success counts; unknown outcomes read as "No".
    pub fn is_success(self) -> bool {
        self == LaunchOutcome::Succeeded
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fairings {
    pub reused: Option<bool>,
    pub recovery_attempt: Option<bool>,
    pub recovered: Option<bool>,
    #[serde(default)]
    pub ships: Vec<String>,
}

/// Usage of a single booster core on a launch
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoreUsage {
    pub core: Option<String>,
    pub flight: Option<u32>,
    pub gridfins: Option<bool>,
    pub legs: Option<bool>,
    pub reused: Option<bool>,
    pub landing_attempt: Option<bool>,
    pub landing_success: Option<bool>,
    pub landing_type: Option<String>,
    pub landpad: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Patch {
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaunchLinks {
    #[serde(default)]
    pub patch: Patch,
    pub webcast: Option<String>,
    pub article: Option<String>,
    pub wikipedia: Option<String>,
}

/// One launch record from `/launches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub id: String,
    pub name: String,
    pub date_utc: DateTime<Utc>,
    pub details: Option<String>,
    pub flight_number: u32,
    #[serde(default)]
    pub success: LaunchOutcome,
    pub fairings: Option<Fairings>,
    #[serde(default)]
    pub cores: Vec<CoreUsage>,
    #[serde(default)]
    pub links: LaunchLinks,
    pub rocket: Option<String>,
}

impl Launch {
    /// Rocket reference, ignoring blank ids
    pub fn rocket_id(&self) -> Option<&str> {
        self.rocket.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// Row shape of the launch table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchSummary {
    pub id: String,
    pub name: String,
    pub date: String,
    pub details: String,
    pub success: bool,
}

impl From<&Launch> for LaunchSummary {
    fn from(launch: &Launch) -> Self {
        Self {
            id: launch.id.clone(),
            name: launch.name.clone(),
            date: display_date(&launch.date_utc),
            details: or_placeholder(launch.details.as_deref(), "No details available"),
            success: launch.success.is_success(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Length {
    pub meters: Option<f64>,
    pub feet: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mass {
    pub kg: Option<f64>,
    pub lb: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Thrust {
    #[serde(rename = "kN")]
    pub kn: Option<f64>,
    pub lbf: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FirstStage {
    pub thrust_sea_level: Option<Thrust>,
    pub thrust_vacuum: Option<Thrust>,
    pub fuel_amount_tons: Option<f64>,
    pub burn_time_sec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecondStage {
    pub thrust: Option<Thrust>,
    pub fuel_amount_tons: Option<f64>,
    pub burn_time_sec: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayloadWeight {
    pub id: String,
    pub name: String,
    pub kg: Option<f64>,
    pub lb: Option<f64>,
}

/// One rocket record from `/rockets/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub active: Option<bool>,
    pub stages: Option<u32>,
    pub cost_per_launch: Option<u64>,
    pub success_rate_pct: Option<f64>,
    #[serde(default)]
    pub height: Length,
    #[serde(default)]
    pub diameter: Length,
    #[serde(default)]
    pub mass: Mass,
    pub first_flight: Option<NaiveDate>,
    pub country: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub first_stage: FirstStage,
    #[serde(default)]
    pub second_stage: SecondStage,
    #[serde(default)]
    pub payload_weights: Vec<PayloadWeight>,
    #[serde(default)]
    pub flickr_images: Vec<String>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
