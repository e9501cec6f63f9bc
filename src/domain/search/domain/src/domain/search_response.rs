// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use crate::{FieldValue, ResourceType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const SEARCH_RESPONSE_SUCCESS_MESSAGE: &str = "Success";
pub const SEARCH_RESPONSE_SUCCESS_STATUS_CODE: u16 = 200;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
    pub message: String,
    pub page_index: usize,
    pub results_per_page: usize,
    pub status_code: u16,

    /// One entry per requested resource type, even when nothing matched
    pub results: BTreeMap<ResourceType, ResourceSearchResults>,
}

impl SearchResponse {
    /// Successful response where every requested resource type starts out empty
    pub fn empty_success(
        page_index: usize,
        results_per_page: usize,
        resource_types: &[ResourceType],
    ) -> Self {
        Self {
            message: SEARCH_RESPONSE_SUCCESS_MESSAGE.to_string(),
            page_index,
            results_per_page,
            status_code: SEARCH_RESPONSE_SUCCESS_STATUS_CODE,
            results: resource_types
                .iter()
                .map(|resource_type| (*resource_type, ResourceSearchResults::default()))
                .collect(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResourceSearchResults {
    pub results: Vec<NormalizedResult>,
    pub total_results: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Single hit expressed in canonical field names
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedResult {
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,

    /// Relevance score assigned by the engine
    pub search_score: Option<f64>,
}

impl NormalizedResult {
    pub fn get(&self, canonical_field: &str) -> Option<&FieldValue> {
        self.fields.get(canonical_field)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
