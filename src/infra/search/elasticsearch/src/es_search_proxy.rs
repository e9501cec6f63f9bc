// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

use internal_error::InternalError;
use metadata_search::*;

use crate::es_helpers::{
    EsDocumentMutation,
    EsResponseNormalizer,
    EsSearchQuery,
    EsSearchQueryBuilder,
    FieldMappingRegistry,
};
use crate::{EsClient, EsMultiSearchItem, EsSearchRequest, SearchProxyConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const HEALTH_CHECK_NAME: &str = "ElasticsearchSearchProxy:connection";

const HEALTH_CHECK_UNREACHABLE_STATUS: &str = "Unable to connect";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchSearchProxy {
    client: Arc<dyn EsClient>,
    config: Arc<SearchProxyConfig>,
}

#[dill::component(pub)]
#[dill::interface(dyn SearchProxy)]
impl ElasticsearchSearchProxy {
    pub fn new(client: Arc<dyn EsClient>, config: Arc<SearchProxyConfig>) -> Self {
        Self { client, config }
    }

    pub fn index_for_resource(&self, resource_type: ResourceType) -> String {
        format!("{}{}", resource_type.as_str(), self.config.index_suffix)
    }

    pub fn build_queries(
        resource_types: &[ResourceType],
        term: &str,
        filters: &[SearchFilter],
    ) -> Result<BTreeMap<ResourceType, EsSearchQuery>, InvalidFilterOperationError> {
        resource_types
            .iter()
            .map(|resource_type| {
                EsSearchQueryBuilder::build_query(*resource_type, term, filters)
                    .map(|query| (*resource_type, query))
            })
            .collect()
    }

    /// Runs all queries in one batch, each against its resource's index and
    /// sliced to the requested page.
    ///
    /// A failure of the whole batch yields no responses at all, so callers see
    /// it as an empty result.
    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchSearchProxy::execute_queries",
        skip_all,
        fields(num_queries = queries.len(), page_index = page_index, page_size = page_size)
    )]
    pub async fn execute_queries(
        &self,
        queries: BTreeMap<ResourceType, EsSearchQuery>,
        page_index: usize,
        page_size: usize,
    ) -> Vec<(ResourceType, EsMultiSearchItem)> {
        if queries.is_empty() {
            return Vec::new();
        }

        let from = page_index.saturating_mul(page_size);

        let (resource_types, searches): (Vec<_>, Vec<_>) = queries
            .into_iter()
            .map(|(resource_type, query)| {
                let search = EsSearchRequest {
                    index: self.index_for_resource(resource_type),
                    query: query.to_json(),
                    from,
                    size: page_size,
                };
                (resource_type, search)
            })
            .unzip();

        tracing::debug!(
            searches = ?searches.iter().map(EsSearchRequest::body).collect::<Vec<_>>(),
            "Executing batched search",
        );

        match self.client.multi_search(searches).await {
            Ok(items) => resource_types.into_iter().zip(items).collect(),
            Err(e) => {
                tracing::error!(
                    error = ?e,
                    error_msg = %e.reason(),
                    "Batched search failed, returning no results",
                );
                Vec::new()
            }
        }
    }

    fn effective_page_size(&self, results_per_page: usize) -> usize {
        if results_per_page == 0 {
            self.config.default_page_size
        } else {
            results_per_page
        }
    }

    async fn check_connection(&self) -> Result<Option<serde_json::Value>, InternalError> {
        if !self.client.ping().await? {
            return Ok(None);
        }
        self.client.cluster_health().await.map(Some)
    }

    async fn fetch_field(
        &self,
        resource_type: ResourceType,
        key: &str,
        source_field: &str,
    ) -> Result<(String, FieldValue), FetchFieldError> {
        let mut document = self.get_document_by_key(resource_type, key).await?;

        match document.fields.remove(source_field) {
            Some(value) => Ok((document.id, value)),
            None => Err(FetchFieldError::FieldMissing {
                id: document.id,
                field: source_field.to_string(),
            }),
        }
    }

    async fn persist_field(
        &self,
        resource_type: ResourceType,
        id: &str,
        source_field: &str,
        value: FieldValue,
    ) -> Result<(), InternalError> {
        let body = serde_json::json!({
            "doc": {
                source_field: serde_json::Value::from(value)
            }
        });

        self.client
            .update_document(&self.index_for_resource(resource_type), id, body)
            .await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchProxy for ElasticsearchSearchProxy {
    #[tracing::instrument(level = "debug", name = "ElasticsearchSearchProxy::health", skip_all)]
    async fn health(&self) -> HealthCheck {
        let cluster_health = match self.check_connection().await {
            Ok(Some(cluster_health)) => cluster_health,
            Ok(None) => {
                tracing::warn!("Search engine did not answer the ping");
                return unreachable_health_check();
            }
            Err(e) => {
                tracing::warn!(
                    error = ?e,
                    error_msg = %e.reason(),
                    "Search engine health check failed"
                );
                return unreachable_health_check();
            }
        };

        let status = cluster_health
            .get("status")
            .and_then(serde_json::Value::as_str)
            .and_then(|status| ClusterHealthStatus::from_str(status).ok())
            .map_or(HealthStatus::Fail, HealthStatus::from);

        HealthCheck::single(status, HEALTH_CHECK_NAME, cluster_health)
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchSearchProxy::search",
        skip_all,
        fields(term = %req.term, page_index = req.page_index)
    )]
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, SearchError> {
        let resource_types = req.effective_resource_types();
        let page_size = self.effective_page_size(req.results_per_page);

        let queries = Self::build_queries(&resource_types, &req.term, &req.filters)?;

        let responses = self.execute_queries(queries, req.page_index, page_size).await;

        let response =
            EsResponseNormalizer::normalize(req.page_index, page_size, responses, &resource_types)?;

        Ok(response)
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchSearchProxy::get_document_by_key",
        skip_all,
        fields(resource_type = %resource_type, key = %key)
    )]
    async fn get_document_by_key(
        &self,
        resource_type: ResourceType,
        key: &str,
    ) -> Result<ResourceDocument, GetDocumentError> {
        let queries = BTreeMap::from([(
            resource_type,
            EsSearchQueryBuilder::build_key_query(key),
        )]);

        let Some((_, item)) = self.execute_queries(queries, 0, 1).await.pop() else {
            return InternalError::bail(format!(
                "No response from search engine for {resource_type} key {key}"
            ))
            .map_err(Into::into);
        };

        let es_response = match item {
            EsMultiSearchItem::Success(es_response) => es_response,
            EsMultiSearchItem::Failure(failures) => {
                return Err(EngineQueryFailureError {
                    resource_type,
                    failures,
                }
                .into());
            }
        };

        match es_response.total_hits() {
            0 => {
                return Err(DocumentNotFoundError {
                    resource_type,
                    key: key.to_string(),
                }
                .into());
            }
            1 => {}
            count => {
                return Err(NonUniqueKeyError {
                    resource_type,
                    key: key.to_string(),
                    count,
                }
                .into());
            }
        }

        let Some(hit) = es_response.hits.hits.first() else {
            return InternalError::bail(format!(
                "Search engine counted a {resource_type} document for key {key} but returned none"
            ))
            .map_err(Into::into);
        };
        let Some(id) = hit.id.clone() else {
            return InternalError::bail(format!(
                "Search engine returned {resource_type} document for key {key} without an id"
            ))
            .map_err(Into::into);
        };

        Ok(ResourceDocument {
            id,
            fields: EsResponseNormalizer::source_fields(hit),
        })
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchSearchProxy::update_document_by_key",
        skip_all,
        fields(resource_type = %req.resource_type, key = %req.key, field = %req.field)
    )]
    async fn update_document_by_key(
        &self,
        req: UpdateDocumentRequest,
    ) -> Result<String, MutationFailure> {
        let mapping = FieldMappingRegistry::mapping_for(req.resource_type);
        let source_field = mapping.source_field(&req.field);

        let (id, current_value) = self
            .fetch_field(req.resource_type, &req.key, source_field)
            .await
            .map_err(|e| fetch_failure(&req.field, &req.key, &e))?;

        let new_value =
            EsDocumentMutation::updated_value(&current_value, &req.value, req.operation);

        self.persist_field(req.resource_type, &id, source_field, new_value)
            .await
            .map_err(|e| persist_failure(&req.field, &req.key, &e))?;

        Ok(format!(
            "Document field {} for {} with value {} was updated successfully",
            req.field, req.key, req.value
        ))
    }

    #[tracing::instrument(
        level = "debug",
        name = "ElasticsearchSearchProxy::delete_document_by_key",
        skip_all,
        fields(resource_type = %req.resource_type, key = %req.key, field = %req.field)
    )]
    async fn delete_document_by_key(
        &self,
        req: DeleteDocumentRequest,
    ) -> Result<String, MutationFailure> {
        let mapping = FieldMappingRegistry::mapping_for(req.resource_type);
        let source_field = mapping.source_field(&req.field);

        let (id, current_value) = self
            .fetch_field(req.resource_type, &req.key, source_field)
            .await
            .map_err(|e| fetch_failure(&req.field, &req.key, &e))?;

        let new_value =
            EsDocumentMutation::value_after_removal(&current_value, req.value.as_deref()).map_err(
                |e| {
                    tracing::error!(error = ?e, "Cannot remove value from field");
                    MutationFailure::new(format!(
                        "Failed to delete value from field {} for {}: {e}",
                        req.field, req.key
                    ))
                },
            )?;

        self.persist_field(req.resource_type, &id, source_field, new_value)
            .await
            .map_err(|e| persist_failure(&req.field, &req.key, &e))?;

        Ok(format!(
            "Document field {} for {} with value {} was deleted successfully",
            req.field,
            req.key,
            req.value.as_deref().unwrap_or_default()
        ))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn unreachable_health_check() -> HealthCheck {
    HealthCheck::single(
        HealthStatus::Fail,
        HEALTH_CHECK_NAME,
        serde_json::json!({ "status": HEALTH_CHECK_UNREACHABLE_STATUS }),
    )
}

fn fetch_failure(field: &str, key: &str, e: &FetchFieldError) -> MutationFailure {
    tracing::error!(error = ?e, error_msg = %e, "Fetching document field failed");
    MutationFailure::new(format!("Failed to get field {field} for {key}: {e}"))
}

fn persist_failure(field: &str, key: &str, e: &InternalError) -> MutationFailure {
    tracing::error!(error = ?e, error_msg = %e.reason(), "Persisting document field failed");
    MutationFailure::new(format!(
        "Failed to update field {field} for {key}: {}",
        e.reason()
    ))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
enum FetchFieldError {
    #[error("{}", describe_get_document_error(.0))]
    Document(#[from] GetDocumentError),

    #[error("Document {id} has no field {field}")]
    FieldMissing { id: String, field: String },
}

fn describe_get_document_error(e: &GetDocumentError) -> String {
    match e {
        GetDocumentError::Internal(e) => e.reason(),
        _ => e.to_string(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
