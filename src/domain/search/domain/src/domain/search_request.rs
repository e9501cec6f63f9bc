// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{ResourceType, SearchFilter};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
    /// Free-text term, may be empty to rely on filters only
    #[serde(default)]
    pub term: String,

    #[serde(default)]
    pub page_index: usize,

    /// Zero means "use the configured default"
    #[serde(default)]
    pub results_per_page: usize,

    /// Resource types to search (empty means all primary entities)
    #[serde(default)]
    pub resource_types: Vec<ResourceType>,

    #[serde(default)]
    pub filters: Vec<SearchFilter>,
}

impl SearchRequest {
    /// Requested resource types with duplicates removed, in declaration order
    pub fn effective_resource_types(&self) -> Vec<ResourceType> {
        let mut resource_types = if self.resource_types.is_empty() {
            ResourceType::PRIMARY_ENTITIES.to_vec()
        } else {
            self.resource_types.clone()
        };
        resource_types.sort_unstable();
        resource_types.dedup();
        resource_types
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
