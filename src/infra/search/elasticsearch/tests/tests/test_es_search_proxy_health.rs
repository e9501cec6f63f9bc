// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use metadata_search::*;
use metadata_search_elasticsearch::testing::*;
use metadata_search_elasticsearch::HEALTH_CHECK_NAME;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn unreachable() -> HealthCheck {
    HealthCheck::single(
        HealthStatus::Fail,
        HEALTH_CHECK_NAME,
        serde_json::json!({"status": "Unable to connect"}),
    )
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_health_reports_cluster_status() {
    for (cluster_status, expected_status) in [
        ("green", HealthStatus::Ok),
        ("yellow", HealthStatus::Ok),
        ("red", HealthStatus::Fail),
        ("purple", HealthStatus::Fail),
    ] {
        let harness = SearchProxyHarness::new();
        let cluster_health = serde_json::json!({
            "cluster_name": "metadata",
            "status": cluster_status,
            "number_of_nodes": 3,
        });
        harness
            .es_client()
            .set_cluster_health(cluster_health.clone());

        let health = harness.proxy().health().await;

        assert_eq!(
            health,
            HealthCheck::single(expected_status, HEALTH_CHECK_NAME, cluster_health),
            "{cluster_status}"
        );
    }
}

#[test_log::test(tokio::test)]
async fn test_health_check_name() {
    let harness = SearchProxyHarness::new();

    let health = harness.proxy().health().await;

    assert_eq!(health.status, HealthStatus::Ok);
    assert_eq!(
        health.checks.keys().collect::<Vec<_>>(),
        vec!["ElasticsearchSearchProxy:connection"]
    );
}

#[test_log::test(tokio::test)]
async fn test_health_fails_when_ping_unanswered() {
    let harness = SearchProxyHarness::new();
    harness.es_client().set_ping(false);

    assert_eq!(harness.proxy().health().await, unreachable());
}

#[test_log::test(tokio::test)]
async fn test_health_fails_on_ping_error() {
    let harness = SearchProxyHarness::new();
    harness.es_client().set_ping_error("connection refused");

    assert_eq!(harness.proxy().health().await, unreachable());
}

#[test_log::test(tokio::test)]
async fn test_health_fails_on_cluster_health_error() {
    let harness = SearchProxyHarness::new();
    harness
        .es_client()
        .set_cluster_health_error("security_exception");

    assert_eq!(harness.proxy().health().await, unreachable());
}

#[test_log::test(tokio::test)]
async fn test_health_serializes_lowercase_status() {
    let harness = SearchProxyHarness::new();
    harness.es_client().set_ping(false);

    assert_eq!(
        serde_json::to_value(harness.proxy().health().await).unwrap(),
        serde_json::json!({
            "status": "fail",
            "checks": {
                "ElasticsearchSearchProxy:connection": {"status": "Unable to connect"}
            }
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
