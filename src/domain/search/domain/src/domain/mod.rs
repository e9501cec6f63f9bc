// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod field_value;
mod health_check;
mod resource_document;
mod resource_type;
mod search_filter;
mod search_request;
mod search_response;

pub use field_value::*;
pub use health_check::*;
pub use resource_document::*;
pub use resource_type::*;
pub use search_filter::*;
pub use search_request::*;
pub use search_response::*;
