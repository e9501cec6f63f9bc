// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Fail,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HealthCheck {
    pub status: HealthStatus,

    /// Diagnostic payload per checked dependency
    pub checks: BTreeMap<String, serde_json::Value>,
}

impl HealthCheck {
    pub fn single(
        status: HealthStatus,
        check_name: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            status,
            checks: BTreeMap::from([(check_name.into(), details)]),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Cluster status as reported by the engine: healthy, degraded, or unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ClusterHealthStatus {
    Green,
    Yellow,
    Red,
}

impl From<ClusterHealthStatus> for HealthStatus {
    fn from(value: ClusterHealthStatus) -> Self {
        match value {
            ClusterHealthStatus::Green | ClusterHealthStatus::Yellow => HealthStatus::Ok,
            ClusterHealthStatus::Red => HealthStatus::Fail,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
