// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod es_client;
mod es_helpers;
mod es_search_config;
mod es_search_proxy;

pub use es_client::*;
pub use es_helpers::*;
pub use es_search_config::*;
pub use es_search_proxy::*;

#[cfg(any(feature = "testing", test))]
pub mod testing;
