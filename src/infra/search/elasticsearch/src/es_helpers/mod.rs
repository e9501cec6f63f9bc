// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod es_document_mutation;
mod es_field_mappings;
mod es_filter_translator;
mod es_resource_search_profile;
mod es_response_normalizer;
mod es_search_query_builder;

pub use es_document_mutation::*;
pub use es_field_mappings::*;
pub use es_filter_translator::*;
pub use es_resource_search_profile::*;
pub use es_response_normalizer::*;
pub use es_search_query_builder::*;
