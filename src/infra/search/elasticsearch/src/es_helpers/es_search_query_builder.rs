// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use metadata_search::{InvalidFilterOperationError, ResourceType, SearchFilter};

use crate::es_helpers::{
    EsFilterTranslator,
    MatchFieldSpec,
    MatchFuzziness,
    ResourceSearchProfile,
    SOURCE_FIELD_KEY,
    UsageMetricSpec,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_FUZZINESS: &str = "AUTO";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Composite boolean query of a single resource type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EsSearchQuery {
    /// Mandatory relevance clauses
    pub must: Vec<serde_json::Value>,

    /// Optional clauses that only contribute to scoring
    pub should: Vec<serde_json::Value>,

    /// Mandatory non-scoring constraints
    pub filter: Vec<serde_json::Value>,
}

impl EsSearchQuery {
    pub fn to_json(&self) -> serde_json::Value {
        if self.must.is_empty() && self.should.is_empty() && self.filter.is_empty() {
            return serde_json::json!({ "match_all": {} });
        }

        let mut bool_query = serde_json::Map::new();
        for (occurrence, clauses) in [
            ("must", &self.must),
            ("should", &self.should),
            ("filter", &self.filter),
        ] {
            if !clauses.is_empty() {
                bool_query.insert(occurrence.to_string(), serde_json::json!(clauses));
            }
        }

        serde_json::json!({ "bool": bool_query })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EsSearchQueryBuilder {}

impl EsSearchQueryBuilder {
    pub fn build_query(
        resource_type: ResourceType,
        term: &str,
        filters: &[SearchFilter],
    ) -> Result<EsSearchQuery, InvalidFilterOperationError> {
        let profile = ResourceSearchProfile::for_resource(resource_type);
        let term = term.trim();

        Ok(EsSearchQuery {
            must: Self::must_clauses(profile, term),
            should: Self::usage_boost_clauses(profile, term),
            filter: EsFilterTranslator::translate(resource_type, filters)?,
        })
    }

    /// Exact lookup of a document by its unique key
    pub fn build_key_query(key: &str) -> EsSearchQuery {
        EsSearchQuery {
            filter: vec![serde_json::json!({
                "term": {
                    SOURCE_FIELD_KEY: key
                }
            })],
            ..Default::default()
        }
    }

    fn must_clauses(profile: &ResourceSearchProfile, term: &str) -> Vec<serde_json::Value> {
        // A match clause over an empty term would leave nothing to match,
        // filters alone decide then
        if term.is_empty() {
            return Vec::new();
        }

        let field_matches = profile
            .match_fields
            .iter()
            .map(|spec| Self::match_clause(spec, term))
            .collect::<Vec<_>>();

        vec![serde_json::json!({
            "bool": {
                "should": field_matches
            }
        })]
    }

    fn match_clause(spec: &MatchFieldSpec, term: &str) -> serde_json::Value {
        let mut params = serde_json::json!({ "query": term });

        if let MatchFuzziness::Auto { max_expansions } = spec.fuzziness {
            params["fuzziness"] = serde_json::json!(DEFAULT_FUZZINESS);
            params["max_expansions"] = serde_json::json!(max_expansions);
        }
        if let Some(boost) = spec.boost {
            params["boost"] = serde_json::json!(boost);
        }

        serde_json::json!({
            "match": {
                spec.field: params
            }
        })
    }

    fn usage_boost_clauses(profile: &ResourceSearchProfile, term: &str) -> Vec<serde_json::Value> {
        // Without a text query there is no relevance to adjust
        if term.is_empty() {
            return Vec::new();
        }

        profile
            .usage_metrics
            .iter()
            .map(Self::rank_feature_clause)
            .collect()
    }

    fn rank_feature_clause(metric: &UsageMetricSpec) -> serde_json::Value {
        serde_json::json!({
            "rank_feature": {
                "field": metric.field_path(),
                "boost": metric.boost,
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
