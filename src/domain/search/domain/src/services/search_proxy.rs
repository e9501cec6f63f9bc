// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Resource-aware facade over a document search engine.
///
/// Callers speak in resource types and canonical field names only; how those
/// translate into engine queries and documents is up to the implementation.
#[async_trait::async_trait]
pub trait SearchProxy: Send + Sync {
    /// Never fails: an unreachable engine is reported as [`HealthStatus::Fail`]
    async fn health(&self) -> HealthCheck;

    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, SearchError>;

    async fn get_document_by_key(
        &self,
        resource_type: ResourceType,
        key: &str,
    ) -> Result<ResourceDocument, GetDocumentError>;

    /// Read-then-write without any concurrency guard: the last writer wins.
    /// Returns a human-readable outcome message either way.
    async fn update_document_by_key(
        &self,
        req: UpdateDocumentRequest,
    ) -> Result<String, MutationFailure>;

    async fn delete_document_by_key(
        &self,
        req: DeleteDocumentRequest,
    ) -> Result<String, MutationFailure>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidFilterOperation(#[from] InvalidFilterOperationError),

    #[error(transparent)]
    EngineQueryFailure(#[from] EngineQueryFailureError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl SearchError {
    /// Whether the request itself was malformed, as opposed to a server-side
    /// defect
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFilterOperation(_))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
#[error("Request to search engine failed for {resource_type}: {failures}")]
pub struct EngineQueryFailureError {
    pub resource_type: ResourceType,
    pub failures: serde_json::Value,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum GetDocumentError {
    #[error(transparent)]
    NotFound(#[from] DocumentNotFoundError),

    #[error(transparent)]
    NonUniqueKey(#[from] NonUniqueKeyError),

    #[error(transparent)]
    EngineQueryFailure(#[from] EngineQueryFailureError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug, thiserror::Error)]
#[error("Requested key {key} returned no {resource_type} documents")]
pub struct DocumentNotFoundError {
    pub resource_type: ResourceType,
    pub key: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Key {key} is not unique to a single {resource_type} document, found {count}")]
pub struct NonUniqueKeyError {
    pub resource_type: ResourceType,
    pub key: String,
    pub count: u64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Catch-all failure of a document mutation, carrying only a description
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MutationFailure {
    message: String,
}

impl MutationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
