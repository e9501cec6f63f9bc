// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::LazyLock;

use metadata_search::ResourceType;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Document field carrying the self-declared resource type
pub const SOURCE_FIELD_RESOURCE_TYPE: &str = "resource_type";

/// Document field holding the unique resource key
pub const SOURCE_FIELD_KEY: &str = "key";

// Engine names ending with this suffix address the exact-match (keyword)
// representation of a text field
pub const FIELD_SUFFIX_KEYWORD: &str = "keyword";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

type MappingLayer = &'static [(&'static str, &'static str)];

const COMMON_FIELDS: MappingLayer = &[
    ("key", "key"),
    ("description", "description"),
    ("resource_type", "resource_type"),
];

const TABLE_FIELDS: MappingLayer = &[
    ("badges", "badges.keyword"),
    ("tag", "tags.keyword"),
    ("schema", "schema.keyword"),
    ("table", "name.keyword"),
    ("column", "columns.keyword"),
    ("database", "database.keyword"),
    ("cluster", "cluster.keyword"),
];

const DASHBOARD_FIELDS: MappingLayer = &[
    ("url", "url"),
    ("uri", "uri"),
    (
        "last_successful_run_timestamp",
        "last_successful_run_timestamp",
    ),
    ("group_name", "group_name.keyword"),
    ("chart_names", "chart_names.keyword"),
    ("query_names", "query_names.keyword"),
    ("name", "name.keyword"),
    ("tag", "tags.keyword"),
];

const FEATURE_FIELDS: MappingLayer = &[
    ("version", "version"),
    ("availability", "availability"),
    ("feature_group", "feature_group.keyword"),
    ("feature_name", "name.keyword"),
    ("entity", "entity.keyword"),
    ("status", "status.keyword"),
    ("tags", "tags.keyword"),
    ("badges", "badges.keyword"),
];

// Users do not share the common layer
const USER_FIELDS: MappingLayer = &[
    ("full_name", "name.keyword"),
    ("email", "key"),
    ("first_name", "first_name"),
    ("last_name", "last_name"),
    ("resource_type", "resource_type"),
];

static TABLE_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::from_layers(&[COMMON_FIELDS, TABLE_FIELDS]));

static DASHBOARD_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::from_layers(&[COMMON_FIELDS, DASHBOARD_FIELDS]));

static FEATURE_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::from_layers(&[COMMON_FIELDS, FEATURE_FIELDS]));

static USER_MAPPING: LazyLock<FieldMapping> =
    LazyLock::new(|| FieldMapping::from_layers(&[USER_FIELDS]));

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct FieldMappingRegistry {}

impl FieldMappingRegistry {
    pub fn mapping_for(resource_type: ResourceType) -> &'static FieldMapping {
        match resource_type {
            ResourceType::Table => &TABLE_MAPPING,
            ResourceType::Dashboard => &DASHBOARD_MAPPING,
            ResourceType::Feature => &FEATURE_MAPPING,
            ResourceType::User => &USER_MAPPING,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Ordered canonical -> engine field name table of one resource type
#[derive(Debug, Clone, Default)]
pub struct FieldMapping {
    entries: Vec<FieldMappingEntry>,
}

impl FieldMapping {
    fn from_layers(layers: &[MappingLayer]) -> Self {
        let mut entries: Vec<FieldMappingEntry> = Vec::new();
        for &(canonical, engine) in layers.iter().flat_map(|layer| layer.iter()) {
            match entries.iter_mut().find(|e| e.canonical == canonical) {
                Some(existing) => existing.engine = engine,
                None => entries.push(FieldMappingEntry { canonical, engine }),
            }
        }
        Self { entries }
    }

    pub fn resolve(&self, canonical: &str) -> Option<&FieldMappingEntry> {
        self.entries.iter().find(|e| e.canonical == canonical)
    }

    /// Engine field name for filtering, or the literal name when unmapped
    pub fn engine_field<'a>(&self, canonical: &'a str) -> &'a str {
        self.resolve(canonical).map_or(canonical, |e| e.engine)
    }

    /// Document field name holding the value, or the literal name when unmapped
    pub fn source_field<'a>(&self, canonical: &'a str) -> &'a str {
        self.resolve(canonical).map_or(canonical, |e| e.source_field())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldMappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMappingEntry {
    pub canonical: &'static str,
    pub engine: &'static str,
}

impl FieldMappingEntry {
    /// Strips multi-field suffixes such as `.keyword`: the document stores the
    /// value once, under the root field
    pub fn source_field(&self) -> &'static str {
        match self.engine.split_once('.') {
            Some((root, _)) => root,
            None => self.engine,
        }
    }

    pub fn is_exact_match(&self) -> bool {
        self.engine
            .rsplit_once('.')
            .is_some_and(|(_, suffix)| suffix == FIELD_SUFFIX_KEYWORD)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
