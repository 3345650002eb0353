use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};
use crate::render::Renderer;

use super::{RaceChart, RaceSnapshot};

pub const RACE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: RaceSnapshot,
}

impl RaceSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> RaceResult<String> {
        let payload = RaceSnapshotJsonContractV1 {
            schema_version: RACE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            RaceError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> RaceResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<RaceSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: RaceSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            RaceError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != RACE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(RaceError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> RaceChart<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> RaceResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
