// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use metadata_search::ResourceType;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_MAX_EXPANSIONS: u32 = 10;
pub const DEFAULT_USAGE_BOOST: f32 = 10.0;

const NAME: MatchFieldSpec = MatchFieldSpec::fuzzy("name").boosted(5.0);
const DESCRIPTION: MatchFieldSpec = MatchFieldSpec::fuzzy("description").boosted(1.5);
const BADGES: MatchFieldSpec = MatchFieldSpec::fuzzy("badges");
const TAGS: MatchFieldSpec = MatchFieldSpec::fuzzy("tags");

const TOTAL_USAGE: UsageMetricSpec = UsageMetricSpec::new("total_usage");

static TABLE_PROFILE: ResourceSearchProfile = ResourceSearchProfile {
    match_fields: &[
        NAME,
        DESCRIPTION,
        BADGES,
        TAGS,
        MatchFieldSpec::fuzzy("schema").boosted(3.0),
        MatchFieldSpec::fuzzy("columns")
            .boosted(2.0)
            .max_expansions(5),
    ],
    usage_metrics: &[TOTAL_USAGE, UsageMetricSpec::new("unique_usage")],
};

static DASHBOARD_PROFILE: ResourceSearchProfile = ResourceSearchProfile {
    match_fields: &[
        NAME,
        DESCRIPTION,
        BADGES,
        TAGS,
        MatchFieldSpec::fuzzy("group_name").boosted(3.0),
        MatchFieldSpec::fuzzy("query_names").boosted(2.0),
        MatchFieldSpec::fuzzy("chart_names").boosted(2.0),
        MatchFieldSpec::fuzzy("uri").boosted(4.0),
    ],
    usage_metrics: &[TOTAL_USAGE],
};

static FEATURE_PROFILE: ResourceSearchProfile = ResourceSearchProfile {
    match_fields: &[
        NAME,
        DESCRIPTION,
        BADGES,
        TAGS,
        MatchFieldSpec::fuzzy("feature_group").boosted(3.0),
        MatchFieldSpec::exact("version"),
        MatchFieldSpec::fuzzy("entity").boosted(2.0),
        MatchFieldSpec::exact("status"),
    ],
    usage_metrics: &[TOTAL_USAGE],
};

static USER_PROFILE: ResourceSearchProfile = ResourceSearchProfile {
    match_fields: &[
        NAME,
        MatchFieldSpec::fuzzy("first_name").boosted(3.0),
        MatchFieldSpec::fuzzy("last_name").boosted(3.0),
        MatchFieldSpec::fuzzy("team_name"),
        MatchFieldSpec::fuzzy("key").boosted(4.0),
    ],
    usage_metrics: &[
        UsageMetricSpec::new("total_read"),
        UsageMetricSpec::new("total_own"),
        UsageMetricSpec::new("total_follow"),
    ],
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Relevance tuning of one resource type: which document fields the search
/// term is matched against, and which usage signals lift the score
#[derive(Debug)]
pub struct ResourceSearchProfile {
    pub match_fields: &'static [MatchFieldSpec],
    pub usage_metrics: &'static [UsageMetricSpec],
}

impl ResourceSearchProfile {
    pub fn for_resource(resource_type: ResourceType) -> &'static ResourceSearchProfile {
        match resource_type {
            ResourceType::Table => &TABLE_PROFILE,
            ResourceType::Dashboard => &DASHBOARD_PROFILE,
            ResourceType::Feature => &FEATURE_PROFILE,
            ResourceType::User => &USER_PROFILE,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchFieldSpec {
    pub field: &'static str,
    pub boost: Option<f32>,
    pub fuzziness: MatchFuzziness,
}

impl MatchFieldSpec {
    pub const fn fuzzy(field: &'static str) -> Self {
        Self {
            field,
            boost: None,
            fuzziness: MatchFuzziness::Auto {
                max_expansions: DEFAULT_MAX_EXPANSIONS,
            },
        }
    }

    pub const fn exact(field: &'static str) -> Self {
        Self {
            field,
            boost: None,
            fuzziness: MatchFuzziness::Exact,
        }
    }

    pub const fn boosted(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub const fn max_expansions(mut self, max_expansions: u32) -> Self {
        self.fuzziness = MatchFuzziness::Auto { max_expansions };
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFuzziness {
    /// Edit distance picked by the engine from the term length, with the number
    /// of expanded terms capped
    Auto { max_expansions: u32 },

    Exact,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageMetricSpec {
    /// Name under the `usage` object of the document
    pub metric: &'static str,
    pub boost: f32,
}

impl UsageMetricSpec {
    pub const fn new(metric: &'static str) -> Self {
        Self {
            metric,
            boost: DEFAULT_USAGE_BOOST,
        }
    }

    pub fn field_path(&self) -> String {
        format!("usage.{}", self.metric)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
