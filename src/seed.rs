//! Batch creation of the test locations through a running gateway.
//!
//! Each location is posted on its own; a failure is recorded and the batch
//! carries on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SEED_COMPLETE_MESSAGE: &str = "테스트 데이터 생성 완료";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSeed {
    pub location_id: String,
    pub building: String,
    pub floor: String,
}

impl LocationSeed {
    pub fn new(location_id: &str, building: &str, floor: &str) -> Self {
        Self {
            location_id: location_id.to_string(),
            building: building.to_string(),
            floor: floor.to_string(),
        }
    }
}

/// The fifteen office floors used for manual testing.
pub fn default_locations() -> Vec<LocationSeed> {
    let mut seeds = Vec::with_capacity(15);
    for floor in 2..=4 {
        seeds.push(LocationSeed::new(&format!("loc00{floor}"), "광화문", &floor.to_string()));
    }
    for floor in 1..=8 {
        seeds.push(LocationSeed::new(&format!("loc10{floor}"), "판교", &floor.to_string()));
    }
    for floor in 1..=2 {
        seeds.push(LocationSeed::new(&format!("loc20{floor}"), "송파", &floor.to_string()));
    }
    for floor in 10..=11 {
        seeds.push(LocationSeed::new(&format!("loc3{floor}"), "우면", &floor.to_string()));
    }
    seeds
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedResult {
    pub success: bool,
    pub location_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub message: &'static str,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub results: Vec<SeedResult>,
}

/// POST each seed to `<gateway_url>/api/locations` in order.
pub async fn seed_locations(
    client: &reqwest::Client,
    gateway_url: &str,
    seeds: &[LocationSeed],
) -> SeedReport {
    let endpoint = format!("{}/api/locations", gateway_url.trim_end_matches('/'));
    let mut results = Vec::with_capacity(seeds.len());

    for seed in seeds {
        let result = match create_location(client, &endpoint, seed).await {
            Ok(data) => {
                tracing::info!(location_id = %seed.location_id, "Seeded location");
                SeedResult {
                    success: true,
                    location_id: seed.location_id.clone(),
                    data: Some(data),
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(location_id = %seed.location_id, error = %error, "Failed to seed location");
                SeedResult {
                    success: false,
                    location_id: seed.location_id.clone(),
                    data: None,
                    error: Some(error),
                }
            }
        };
        results.push(result);
    }

    let success = results.iter().filter(|r| r.success).count();
    SeedReport {
        message: SEED_COMPLETE_MESSAGE,
        total: seeds.len(),
        success,
        failed: results.len() - success,
        results,
    }
}

async fn create_location(
    client: &reqwest::Client,
    endpoint: &str,
    seed: &LocationSeed,
) -> Result<Value, String> {
    let response = client
        .post(endpoint)
        .json(seed)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(format!("HTTP {}: {}", status.as_u16(), text));
    }

    response.json::<Value>().await.map_err(|e| e.to_string())
}
