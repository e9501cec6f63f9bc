// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use url::Url;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, serde::Deserialize)]
pub struct ElasticsearchClientConfig {
    pub url: Url,

    /// Enables basic authentication when set
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "ElasticsearchClientConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ElasticsearchClientConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(url: Url) -> Self {
        Self {
            url,
            user: None,
            password: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    fn default_timeout_secs() -> u64 {
        Self::DEFAULT_TIMEOUT_SECS
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct SearchProxyConfig {
    /// Appended to the lower-cased resource type name to form the index name
    pub index_suffix: String,

    /// Page size used when a request does not specify one
    pub default_page_size: usize,
}

impl SearchProxyConfig {
    pub const DEFAULT_INDEX_SUFFIX: &str = "_search_index";
    pub const DEFAULT_PAGE_SIZE: usize = 10;
}

impl Default for SearchProxyConfig {
    fn default() -> Self {
        Self {
            index_suffix: Self::DEFAULT_INDEX_SUFFIX.to_string(),
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
