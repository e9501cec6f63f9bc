// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use metadata_search::{FieldValue, UpdateFieldOperation};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Pure value transitions behind field updates and deletions
pub struct EsDocumentMutation {}

impl EsDocumentMutation {
    pub fn updated_value(
        current: &FieldValue,
        value: &str,
        operation: UpdateFieldOperation,
    ) -> FieldValue {
        let new_value = FieldValue::text(value);

        match (operation, current) {
            (UpdateFieldOperation::Overwrite, FieldValue::List(_)) => {
                FieldValue::List(vec![new_value])
            }
            (UpdateFieldOperation::Overwrite, _) => new_value,
            (UpdateFieldOperation::Add, FieldValue::List(items)) => {
                let mut items = items.clone();
                items.push(new_value);
                FieldValue::List(items)
            }
            // Null means the field holds no value yet, so there is no scalar to
            // keep next to the new one
            (UpdateFieldOperation::Add, FieldValue::Null) => FieldValue::List(vec![new_value]),
            (UpdateFieldOperation::Add, scalar) => FieldValue::List(vec![scalar.clone(), new_value]),
        }
    }

    /// Sequences lose the matching element, or every element when no value is
    /// given. Scalars are cleared regardless of the value.
    pub fn value_after_removal(
        current: &FieldValue,
        value: Option<&str>,
    ) -> Result<FieldValue, ValueNotPresentError> {
        let FieldValue::List(items) = current else {
            return Ok(FieldValue::text(""));
        };

        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return Ok(FieldValue::List(Vec::new()));
        };

        let Some(position) = items.iter().position(|item| Self::matches(item, value)) else {
            return Err(ValueNotPresentError {
                value: value.to_string(),
            });
        };

        let mut items = items.clone();
        items.remove(position);
        Ok(FieldValue::List(items))
    }

    fn matches(item: &FieldValue, value: &str) -> bool {
        match item {
            FieldValue::Text(text) => text == value,
            other => other.to_string() == value,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Value {value} is not present in the field")]
pub struct ValueNotPresentError {
    pub value: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
