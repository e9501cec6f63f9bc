// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::VecDeque;
use std::sync::Mutex;

use internal_error::InternalError;

use crate::{EsClient, EsMultiSearchItem, EsSearchRequest, EsSearchResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Recording [`EsClient`] fake serving canned batched search replies.
///
/// Batches without a queued reply get an empty successful response per search.
pub struct InMemoryEsClient {
    state: Mutex<State>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub index: String,
    pub id: String,
    pub body: serde_json::Value,
}

struct State {
    ping: Result<bool, String>,
    cluster_health: Result<serde_json::Value, String>,
    multi_search_replies: VecDeque<Result<Vec<EsMultiSearchItem>, String>>,
    update_failure: Option<String>,
    searches: Vec<Vec<EsSearchRequest>>,
    updates: Vec<RecordedUpdate>,
}

impl InMemoryEsClient {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                ping: Ok(true),
                cluster_health: Ok(serde_json::json!({
                    "cluster_name": "in-memory",
                    "status": "green",
                })),
                multi_search_replies: VecDeque::new(),
                update_failure: None,
                searches: Vec::new(),
                updates: Vec::new(),
            }),
        }
    }

    pub fn set_ping(&self, reachable: bool) {
        self.state.lock().unwrap().ping = Ok(reachable);
    }

    pub fn set_ping_error(&self, reason: impl Into<String>) {
        self.state.lock().unwrap().ping = Err(reason.into());
    }

    pub fn set_cluster_health(&self, cluster_health: serde_json::Value) {
        self.state.lock().unwrap().cluster_health = Ok(cluster_health);
    }

    pub fn set_cluster_health_error(&self, reason: impl Into<String>) {
        self.state.lock().unwrap().cluster_health = Err(reason.into());
    }

    /// Reply for the next batch, items aligned with its searches
    pub fn enqueue_multi_search(&self, items: Vec<EsMultiSearchItem>) {
        self.state
            .lock()
            .unwrap()
            .multi_search_replies
            .push_back(Ok(items));
    }

    /// Makes the next batch fail as a whole
    pub fn enqueue_transport_failure(&self, reason: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .multi_search_replies
            .push_back(Err(reason.into()));
    }

    pub fn fail_updates(&self, reason: impl Into<String>) {
        self.state.lock().unwrap().update_failure = Some(reason.into());
    }

    pub fn recorded_searches(&self) -> Vec<Vec<EsSearchRequest>> {
        self.state.lock().unwrap().searches.clone()
    }

    pub fn recorded_updates(&self) -> Vec<RecordedUpdate> {
        self.state.lock().unwrap().updates.clone()
    }
}

#[async_trait::async_trait]
impl EsClient for InMemoryEsClient {
    async fn ping(&self) -> Result<bool, InternalError> {
        match &self.state.lock().unwrap().ping {
            Ok(reachable) => Ok(*reachable),
            Err(reason) => InternalError::bail(reason.clone()),
        }
    }

    async fn cluster_health(&self) -> Result<serde_json::Value, InternalError> {
        match &self.state.lock().unwrap().cluster_health {
            Ok(cluster_health) => Ok(cluster_health.clone()),
            Err(reason) => InternalError::bail(reason.clone()),
        }
    }

    async fn multi_search(
        &self,
        searches: Vec<EsSearchRequest>,
    ) -> Result<Vec<EsMultiSearchItem>, InternalError> {
        let mut state = self.state.lock().unwrap();

        let num_searches = searches.len();
        state.searches.push(searches);

        match state.multi_search_replies.pop_front() {
            Some(Ok(items)) => Ok(items),
            Some(Err(reason)) => InternalError::bail(reason),
            None => Ok((0..num_searches).map(|_| es_success(0, vec![])).collect()),
        }
    }

    async fn update_document(
        &self,
        index: &str,
        id: &str,
        body: serde_json::Value,
    ) -> Result<(), InternalError> {
        let mut state = self.state.lock().unwrap();

        if let Some(reason) = &state.update_failure {
            return InternalError::bail(reason.clone());
        }

        state.updates.push(RecordedUpdate {
            index: index.to_string(),
            id: id.to_string(),
            body,
        });
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub fn es_hit(id: &str, score: f64, source: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "_index": "in_memory",
        "_id": id,
        "_score": score,
        "_source": source,
    })
}

pub fn es_success(total: u64, hits: Vec<serde_json::Value>) -> EsMultiSearchItem {
    let response: EsSearchResponse = serde_json::from_value(serde_json::json!({
        "took": 1,
        "timed_out": false,
        "hits": {
            "total": {"value": total, "relation": "eq"},
            "hits": hits,
        }
    }))
    .unwrap();

    EsMultiSearchItem::Success(response)
}

pub fn es_failure(reason: &str) -> EsMultiSearchItem {
    EsMultiSearchItem::Failure(serde_json::json!({
        "type": "search_phase_execution_exception",
        "reason": reason,
    }))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
