// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Structured filter as it arrives from API callers.
///
/// The operation stays a raw string until the filter is translated, so that an
/// unsupported operation is reported with the exact text the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchFilter {
    /// Canonical field name
    pub name: String,

    /// Either `AND` or `OR`
    pub operation: String,

    pub values: Vec<String>,
}

impl SearchFilter {
    pub fn new<S>(
        name: impl Into<String>,
        operation: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            operation: operation.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn any_of<S: Into<String>>(name: &str, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(name, FilterOperation::Or.as_str(), values)
    }

    pub fn all_of<S: Into<String>>(name: &str, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(name, FilterOperation::And.as_str(), values)
    }

    pub fn parse_operation(&self) -> Result<FilterOperation, InvalidFilterOperationError> {
        FilterOperation::from_str(&self.operation).map_err(|_| InvalidFilterOperationError {
            filter_name: self.name.clone(),
            operation: self.operation.clone(),
            values: self.values.clone(),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::IntoStaticStr)]
pub enum FilterOperation {
    /// Every value must match
    #[strum(serialize = "AND")]
    And,

    /// At least one value must match
    #[strum(serialize = "OR")]
    Or,
}

impl FilterOperation {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid operation {operation} for filter {filter_name} with values {values:?}")]
pub struct InvalidFilterOperationError {
    pub filter_name: String,
    pub operation: String,
    pub values: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
