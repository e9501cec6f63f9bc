// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Closed set of searchable entity kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Table,
    Dashboard,
    Feature,
    User,
}

impl ResourceType {
    /// Resource types searched when a request does not name any
    pub const PRIMARY_ENTITIES: [ResourceType; 4] = [
        ResourceType::Table,
        ResourceType::Dashboard,
        ResourceType::Feature,
        ResourceType::User,
    ];

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
