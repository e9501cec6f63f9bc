// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EsSearchResponse {
    pub hits: EsSearchHits,
}

impl EsSearchResponse {
    /// Total number of matching documents, not just the returned page
    pub fn total_hits(&self) -> u64 {
        self.hits
            .total
            .as_ref()
            .map_or(self.hits.hits.len() as u64, |total| total.value)
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EsSearchHits {
    pub total: Option<EsSearchHitsTotal>,
    pub hits: Vec<EsSearchHit>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EsSearchHitsTotal {
    pub value: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct EsSearchHit {
    #[serde(rename = "_index")]
    pub index: String,

    #[serde(rename = "_id")]
    pub id: Option<String>,

    #[serde(rename = "_score")]
    pub score: Option<f64>,

    #[serde(rename = "_source")]
    pub source: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
