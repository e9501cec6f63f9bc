// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use crate::{FieldValue, ResourceType};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Document located by its unique key
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDocument {
    /// Engine-assigned identifier, used to address partial updates
    pub id: String,

    /// Current document fields, keyed by source field name
    pub fields: BTreeMap<String, FieldValue>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFieldOperation {
    /// Append to a sequence, or promote a scalar into a sequence
    #[default]
    Add,

    /// Replace the current value entirely
    Overwrite,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateDocumentRequest {
    pub resource_type: ResourceType,
    pub key: String,

    /// Canonical field name
    pub field: String,

    pub value: String,

    #[serde(default)]
    pub operation: UpdateFieldOperation,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteDocumentRequest {
    pub resource_type: ResourceType,
    pub key: String,

    /// Canonical field name
    pub field: String,

    /// Element to remove from a sequence field. When absent, a sequence field
    /// is cleared entirely.
    #[serde(default)]
    pub value: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
