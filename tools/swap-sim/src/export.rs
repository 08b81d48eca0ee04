//! Scenario report export
//!
//! Serializes scenario results to JSON for external consumption.

use chrono::{DateTime, Utc};
use htlc_contracts::config::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::scenarios::ScenarioResult;

/// Combined export of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub engine: EngineConfig,
    pub scenarios: Vec<ScenarioResult>,
    pub all_passed: bool,
}

/// Build a complete simulation export.
pub fn build_export(seed: u64, engine: &EngineConfig, scenarios: Vec<ScenarioResult>) -> SimulationExport {
    SimulationExport {
        version: crate::VERSION.to_string(),
        seed,
        generated_at: Utc::now(),
        engine: engine.clone(),
        all_passed: scenarios.iter().all(|s| s.passed),
        scenarios,
    }
}

/// Export simulation data as pretty JSON.
pub fn export_json(export: &SimulationExport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: &std::path::Path) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}
