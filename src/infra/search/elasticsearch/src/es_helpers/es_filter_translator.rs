// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use metadata_search::{FilterOperation, InvalidFilterOperationError, ResourceType, SearchFilter};

use crate::es_helpers::FieldMappingRegistry;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct EsFilterTranslator {}

impl EsFilterTranslator {
    /// Turns caller filters into non-scoring engine clauses.
    ///
    /// `OR` filters collapse into a single disjunction, `AND` filters
    /// contribute one mandatory clause per value.
    pub fn translate(
        resource_type: ResourceType,
        filters: &[SearchFilter],
    ) -> Result<Vec<serde_json::Value>, InvalidFilterOperationError> {
        let mapping = FieldMappingRegistry::mapping_for(resource_type);

        let mut clauses = Vec::new();
        for filter in filters {
            let operation = filter.parse_operation()?;
            let engine_field = mapping.engine_field(&filter.name);

            let value_clauses = filter
                .values
                .iter()
                .map(|value| Self::wildcard_clause(engine_field, value));

            match operation {
                FilterOperation::Or => clauses.push(serde_json::json!({
                    "bool": {
                        "should": value_clauses.collect::<Vec<_>>(),
                        "minimum_should_match": 1,
                    }
                })),
                FilterOperation::And => clauses.extend(value_clauses),
            }
        }

        Ok(clauses)
    }

    fn wildcard_clause(engine_field: &str, value: &str) -> serde_json::Value {
        serde_json::json!({
            "wildcard": {
                engine_field: value
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
