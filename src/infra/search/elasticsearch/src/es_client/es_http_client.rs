// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use internal_error::{InternalError, ResultIntoInternal};
use url::Url;

use crate::{
    ElasticsearchClientConfig,
    EsClient,
    EsMultiSearchItem,
    EsMultiSearchResponse,
    EsSearchRequest,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// [`EsClient`] speaking the Elasticsearch REST protocol
pub struct ElasticsearchHttpClient {
    config: Arc<ElasticsearchClientConfig>,
    client: tokio::sync::OnceCell<reqwest::Client>,
}

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn EsClient)]
impl ElasticsearchHttpClient {
    pub fn new(config: Arc<ElasticsearchClientConfig>) -> Self {
        Self {
            config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    async fn http_client(&self) -> Result<&reqwest::Client, InternalError> {
        self.client
            .get_or_try_init(|| async {
                reqwest::Client::builder()
                    .timeout(Duration::from_secs(self.config.timeout_secs))
                    .build()
                    .int_err()
            })
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, InternalError> {
        let mut url = self.config.url.clone();
        {
            let Ok(mut path) = url.path_segments_mut() else {
                return InternalError::bail(format!(
                    "Elasticsearch url {} cannot be used as a base",
                    self.config.url
                ));
            };
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn with_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.user {
            Some(user) => builder.basic_auth(user, self.config.password.as_deref()),
            None => builder,
        }
    }

    fn multi_search_body(searches: &[EsSearchRequest]) -> Result<String, InternalError> {
        let mut body = String::new();
        for search in searches {
            body.push_str(&serde_json::to_string(&search.header()).int_err()?);
            body.push('\n');
            body.push_str(&serde_json::to_string(&search.body()).int_err()?);
            body.push('\n');
        }
        Ok(body)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl EsClient for ElasticsearchHttpClient {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn ping(&self) -> Result<bool, InternalError> {
        let client = self.http_client().await?;
        let url = self.endpoint(&[])?;

        match self.with_auth(client.head(url)).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(err) => {
                tracing::warn!(error = %err, "Elasticsearch ping failed");
                Ok(false)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn cluster_health(&self) -> Result<serde_json::Value, InternalError> {
        let client = self.http_client().await?;
        let url = self.endpoint(&["_cluster", "health"])?;

        self.with_auth(client.get(url))
            .send()
            .await
            .int_err()?
            .error_for_status()
            .int_err()?
            .json()
            .await
            .int_err()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(num_searches = searches.len()))]
    async fn multi_search(
        &self,
        searches: Vec<EsSearchRequest>,
    ) -> Result<Vec<EsMultiSearchItem>, InternalError> {
        let client = self.http_client().await?;
        let url = self.endpoint(&["_msearch"])?;
        let body = Self::multi_search_body(&searches)?;

        let response: EsMultiSearchResponse = self
            .with_auth(client.post(url))
            .header(reqwest::header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .int_err()?
            .error_for_status()
            .int_err()?
            .json()
            .await
            .int_err()?;

        let items = response.into_items().int_err()?;
        if items.len() != searches.len() {
            return InternalError::bail(format!(
                "Elasticsearch returned {} responses for {} searches",
                items.len(),
                searches.len()
            ));
        }

        Ok(items)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(index = %index, id = %id))]
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        body: serde_json::Value,
    ) -> Result<(), InternalError> {
        let client = self.http_client().await?;
        let url = self.endpoint(&[index, "_update", id])?;

        self.with_auth(client.post(url))
            .json(&body)
            .send()
            .await
            .int_err()?
            .error_for_status()
            .int_err()?;

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
