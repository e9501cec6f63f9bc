// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{EsMultiSearchItem, EsSearchResponse};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body of a `_msearch` reply, where each item is either a regular search
/// response or an `{"error": ..., "status": ...}` object
#[derive(Debug, serde::Deserialize)]
pub struct EsMultiSearchResponse {
    pub responses: Vec<serde_json::Value>,
}

impl EsMultiSearchResponse {
    pub fn into_items(self) -> Result<Vec<EsMultiSearchItem>, serde_json::Error> {
        self.responses
            .into_iter()
            .map(|mut response| {
                if let Some(error) = response.get_mut("error") {
                    Ok(EsMultiSearchItem::Failure(error.take()))
                } else {
                    serde_json::from_value::<EsSearchResponse>(response)
                        .map(EsMultiSearchItem::Success)
                }
            })
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
