// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::EsSearchResponse;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Minimal transport surface of the search engine used by the proxy
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait EsClient: Send + Sync {
    /// Liveness probe, `false` when the cluster does not answer
    async fn ping(&self) -> Result<bool, InternalError>;

    /// Raw `_cluster/health` payload
    async fn cluster_health(&self) -> Result<serde_json::Value, InternalError>;

    /// Executes all searches in a single round-trip. Items of the result are
    /// positionally aligned with the requests.
    async fn multi_search(
        &self,
        searches: Vec<EsSearchRequest>,
    ) -> Result<Vec<EsMultiSearchItem>, InternalError>;

    /// Partial update of a single document
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        body: serde_json::Value,
    ) -> Result<(), InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct EsSearchRequest {
    pub index: String,
    pub query: serde_json::Value,
    pub from: usize,
    pub size: usize,
}

impl EsSearchRequest {
    pub fn header(&self) -> serde_json::Value {
        serde_json::json!({
            "index": self.index,
        })
    }

    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "query": self.query,
            "from": self.from,
            "size": self.size,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone)]
pub enum EsMultiSearchItem {
    Success(EsSearchResponse),

    /// Engine rejected this particular search
    Failure(serde_json::Value),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
