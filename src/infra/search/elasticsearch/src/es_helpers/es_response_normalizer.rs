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

use metadata_search::{
    EngineQueryFailureError,
    FieldValue,
    NormalizedResult,
    ResourceSearchResults,
    ResourceType,
    SearchResponse,
};

use crate::es_helpers::{FieldMapping, FieldMappingRegistry, SOURCE_FIELD_RESOURCE_TYPE};
use crate::{EsMultiSearchItem, EsSearchHit};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EsResponseNormalizer {}

impl EsResponseNormalizer {
    /// Converts per-resource engine replies into the engine-agnostic response.
    ///
    /// Every requested resource type is present in the result. A failed search
    /// of any resource type fails the whole response.
    pub fn normalize(
        page_index: usize,
        results_per_page: usize,
        responses: Vec<(ResourceType, EsMultiSearchItem)>,
        requested_resource_types: &[ResourceType],
    ) -> Result<SearchResponse, EngineQueryFailureError> {
        let mut response =
            SearchResponse::empty_success(page_index, results_per_page, requested_resource_types);

        for (queried_resource_type, item) in responses {
            let es_response = match item {
                EsMultiSearchItem::Success(es_response) => es_response,
                EsMultiSearchItem::Failure(failures) => {
                    return Err(EngineQueryFailureError {
                        resource_type: queried_resource_type,
                        failures,
                    });
                }
            };

            let Some(first_hit) = es_response.hits.hits.first() else {
                continue;
            };

            let resource_type = Self::declared_resource_type(first_hit, queried_resource_type);
            let mapping = FieldMappingRegistry::mapping_for(resource_type);

            let total_results = es_response.total_hits();
            let results = es_response
                .hits
                .hits
                .iter()
                .map(|hit| Self::normalize_hit(mapping, hit))
                .collect();

            response.results.insert(
                resource_type,
                ResourceSearchResults {
                    results,
                    total_results,
                },
            );
        }

        Ok(response)
    }

    /// Reads every mapped field of the hit under its canonical name
    pub fn normalize_hit(mapping: &FieldMapping, hit: &EsSearchHit) -> NormalizedResult {
        let source = hit.source.as_ref().and_then(serde_json::Value::as_object);

        let mut fields = BTreeMap::new();
        for entry in mapping.iter() {
            let source_field = entry.source_field();
            match source.and_then(|source| source.get(source_field)) {
                Some(value) => {
                    fields.insert(entry.canonical.to_string(), FieldValue::from(value.clone()));
                }
                None => {
                    tracing::debug!(
                        id = ?hit.id,
                        field = entry.canonical,
                        source_field,
                        "Field missing from document, skipping"
                    );
                }
            }
        }

        NormalizedResult {
            fields,
            search_score: hit.score,
        }
    }

    /// All stored fields of the hit, keyed by document field name
    pub fn source_fields(hit: &EsSearchHit) -> BTreeMap<String, FieldValue> {
        match &hit.source {
            Some(serde_json::Value::Object(source)) => source
                .iter()
                .map(|(field, value)| (field.clone(), FieldValue::from(value.clone())))
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    fn declared_resource_type(hit: &EsSearchHit, queried: ResourceType) -> ResourceType {
        let declared = hit
            .source
            .as_ref()
            .and_then(|source| source.get(SOURCE_FIELD_RESOURCE_TYPE))
            .and_then(serde_json::Value::as_str);

        match declared.map(ResourceType::from_str) {
            Some(Ok(resource_type)) => resource_type,
            _ => {
                tracing::warn!(
                    id = ?hit.id,
                    index = %hit.index,
                    ?declared,
                    %queried,
                    "Document does not declare a known resource type, assuming the queried one"
                );
                queried
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
