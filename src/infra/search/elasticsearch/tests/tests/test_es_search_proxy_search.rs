// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use metadata_search::*;
use metadata_search_elasticsearch::testing::*;
use metadata_search_elasticsearch::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn table_hit(id: &str, name: &str) -> serde_json::Value {
    es_hit(
        id,
        2.5,
        serde_json::json!({
            "key": format!("hive://gold.core/{name}"),
            "resource_type": "table",
            "name": name,
            "description": format!("{name} table"),
            "tags": ["finance"],
            "total_usage": 120,
        }),
    )
}

fn searched_indices(searches: &[EsSearchRequest]) -> Vec<&str> {
    searches.iter().map(|s| s.index.as_str()).collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_dispatches_single_paged_batch() {
    let harness = SearchProxyHarness::new();

    let response = harness
        .proxy()
        .search(SearchRequest {
            term: "orders".to_string(),
            page_index: 1,
            results_per_page: 10,
            resource_types: vec![
                ResourceType::Dashboard,
                ResourceType::Table,
                ResourceType::Table,
            ],
            filters: vec![],
        })
        .await
        .unwrap();

    let batches = harness.es_client().recorded_searches();
    assert_eq!(batches.len(), 1);

    let searches = &batches[0];
    assert_eq!(
        searches_indices_and_pages(searches),
        vec![
            ("table_search_index", 10, 10),
            ("dashboard_search_index", 10, 10),
        ]
    );

    assert_eq!(response.page_index, 1);
    assert_eq!(response.results_per_page, 10);
    assert_eq!(response.status_code, 200);
    assert_eq!(response.message, "Success");
    assert_eq!(
        response.results.keys().copied().collect::<Vec<_>>(),
        vec![ResourceType::Table, ResourceType::Dashboard]
    );
}

fn searches_indices_and_pages(searches: &[EsSearchRequest]) -> Vec<(&str, usize, usize)> {
    searches
        .iter()
        .map(|s| (s.index.as_str(), s.from, s.size))
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_defaults_to_primary_entities() {
    let harness = SearchProxyHarness::new();

    let response = harness
        .proxy()
        .search(SearchRequest {
            term: "revenue".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let batches = harness.es_client().recorded_searches();
    assert_eq!(
        searched_indices(&batches[0]),
        vec![
            "table_search_index",
            "dashboard_search_index",
            "feature_search_index",
            "user_search_index",
        ]
    );
    assert!(batches[0].iter().all(|s| s.from == 0 && s.size == 10));

    assert_eq!(response.results_per_page, 10);
    assert_eq!(
        response,
        SearchResponse::empty_success(0, 10, &ResourceType::PRIMARY_ENTITIES)
    );
}

#[test_log::test(tokio::test)]
async fn test_search_uses_configured_index_suffix() {
    let harness = SearchProxyHarness::with_config(SearchProxyConfig {
        index_suffix: "_v2".to_string(),
        default_page_size: 25,
    });

    harness
        .proxy()
        .search(SearchRequest {
            resource_types: vec![ResourceType::User],
            ..Default::default()
        })
        .await
        .unwrap();

    let batches = harness.es_client().recorded_searches();
    assert_eq!(
        searches_indices_and_pages(&batches[0]),
        vec![("user_v2", 0, 25)]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_filter_only_search_has_no_relevance_clauses() {
    let harness = SearchProxyHarness::new();

    harness
        .proxy()
        .search(SearchRequest {
            term: String::new(),
            page_index: 0,
            results_per_page: 10,
            resource_types: vec![ResourceType::Table],
            filters: vec![SearchFilter::any_of("tag", ["pii", "finance"])],
        })
        .await
        .unwrap();

    let batches = harness.es_client().recorded_searches();
    assert_eq!(
        batches[0][0].query,
        serde_json::json!({
            "bool": {
                "filter": [{
                    "bool": {
                        "should": [
                            {"wildcard": {"tags.keyword": "pii"}},
                            {"wildcard": {"tags.keyword": "finance"}},
                        ],
                        "minimum_should_match": 1,
                    }
                }]
            }
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_term_search_boosts_by_usage() {
    let harness = SearchProxyHarness::new();

    harness
        .proxy()
        .search(SearchRequest {
            term: "orders".to_string(),
            resource_types: vec![ResourceType::Table],
            ..Default::default()
        })
        .await
        .unwrap();

    let query = &harness.es_client().recorded_searches()[0][0].query;
    assert_eq!(query["bool"]["must"].as_array().unwrap().len(), 1);
    assert_eq!(
        query["bool"]["should"],
        serde_json::json!([
            {"rank_feature": {"field": "usage.total_usage", "boost": 10.0}},
            {"rank_feature": {"field": "usage.unique_usage", "boost": 10.0}},
        ])
    );
    assert!(query["bool"].get("filter").is_none());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_search_normalizes_hits() {
    let harness = SearchProxyHarness::new();
    harness.es_client().enqueue_multi_search(vec![
        es_success(57, vec![table_hit("t1", "orders"), table_hit("t2", "orders_v2")]),
        es_success(0, vec![]),
    ]);

    let response = harness
        .proxy()
        .search(SearchRequest {
            term: "orders".to_string(),
            resource_types: vec![ResourceType::Table, ResourceType::Dashboard],
            ..Default::default()
        })
        .await
        .unwrap();

    let tables = &response.results[&ResourceType::Table];
    assert_eq!(tables.total_results, 57);
    assert_eq!(tables.results.len(), 2);
    assert_eq!(
        tables.results[1].get("table"),
        Some(&FieldValue::text("orders_v2"))
    );
    assert_eq!(tables.results[1].search_score, Some(2.5));
    // Usage counters are not part of the canonical table fields
    assert_eq!(tables.results[1].get("total_usage"), None);

    assert_eq!(
        response.results[&ResourceType::Dashboard],
        ResourceSearchResults::default()
    );
}

#[test_log::test(tokio::test)]
async fn test_engine_query_failure_fails_request() {
    let harness = SearchProxyHarness::new();
    harness.es_client().enqueue_multi_search(vec![
        es_success(1, vec![table_hit("t1", "orders")]),
        es_failure("No mapping found for [usage.total_usage]"),
    ]);

    let err = harness
        .proxy()
        .search(SearchRequest {
            term: "orders".to_string(),
            resource_types: vec![ResourceType::Table, ResourceType::Dashboard],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(!err.is_client_error());
    match err {
        SearchError::EngineQueryFailure(e) => {
            assert_eq!(e.resource_type, ResourceType::Dashboard);
            assert_eq!(
                e.failures["reason"],
                serde_json::json!("No mapping found for [usage.total_usage]")
            );
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_transport_failure_degrades_to_empty_results() {
    let harness = SearchProxyHarness::new();
    harness
        .es_client()
        .enqueue_transport_failure("connection refused");

    let response = harness
        .proxy()
        .search(SearchRequest {
            term: "orders".to_string(),
            page_index: 3,
            results_per_page: 5,
            resource_types: vec![ResourceType::Table, ResourceType::Feature],
            filters: vec![],
        })
        .await
        .unwrap();

    assert_eq!(
        response,
        SearchResponse::empty_success(3, 5, &[ResourceType::Table, ResourceType::Feature])
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_invalid_filter_operation_rejected_before_dispatch() {
    let mut es_client = MockEsClient::new();
    es_client.expect_multi_search().never();

    let proxy = ElasticsearchSearchProxy::new(
        Arc::new(es_client),
        Arc::new(SearchProxyConfig::default()),
    );

    let err = proxy
        .search(SearchRequest {
            term: "orders".to_string(),
            filters: vec![SearchFilter::new("tag", "NOT", ["pii"])],
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(
        err.to_string(),
        r#"Invalid operation NOT for filter tag with values ["pii"]"#
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
