// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use metadata_search::SearchProxy;

use crate::testing::InMemoryEsClient;
use crate::{ElasticsearchSearchProxy, EsClient, SearchProxyConfig};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SearchProxyHarness {
    es_client: Arc<InMemoryEsClient>,
    catalog: dill::Catalog,
}

impl SearchProxyHarness {
    pub fn new() -> Self {
        Self::with_config(SearchProxyConfig::default())
    }

    pub fn with_config(config: SearchProxyConfig) -> Self {
        let mut b = dill::CatalogBuilder::new();
        b.add_value(config)
            .add_value(InMemoryEsClient::new())
            .bind::<dyn EsClient, InMemoryEsClient>()
            .add::<ElasticsearchSearchProxy>();

        let catalog = b.build();
        let es_client = catalog.get_one::<InMemoryEsClient>().unwrap();

        Self { es_client, catalog }
    }

    #[inline]
    pub fn es_client(&self) -> &InMemoryEsClient {
        self.es_client.as_ref()
    }

    pub fn proxy(&self) -> Arc<dyn SearchProxy> {
        self.catalog.get_one::<dyn SearchProxy>().unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
