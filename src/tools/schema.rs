// ABOUTME: JSON schema definitions for the wellness tools advertised by tools/list
// ABOUTME: Type-safe tool, input schema and property structures serialized for MCP clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tool schema definitions
//!
//! Schemas are built from typed structures rather than hand-written JSON so
//! renaming a tool or argument only happens in [`crate::constants`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wellness_core::constants::trend;

use crate::constants::tools::{
    ANALYZE_ACTIVITY_PATTERNS, ANALYZE_HEALTH_TRENDS, ANALYZE_SLEEP_PATTERNS,
    ANALYZE_STRESS_INDICATORS, GET_HEALTH_SUMMARY,
};

/// Pattern every date argument must match
pub const ISO_DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Argument schema
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object`
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required argument names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Single argument schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type
    #[serde(rename = "type")]
    pub property_type: String,
    /// Description shown to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Regex a string must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Allowed values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    /// Inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u32>,
    /// Inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u32>,
}

/// Every tool this server exposes, in listing order
#[must_use]
pub fn get_tools() -> Vec<ToolSchema> {
    vec![
        create_window_tool(
            GET_HEALTH_SUMMARY,
            "Get a comprehensive health summary for therapy sessions including recovery trends, sleep analysis, stress indicators, and actionable insights",
        ),
        create_window_tool(
            ANALYZE_STRESS_INDICATORS,
            "Analyze physiological stress markers from HRV, resting heart rate, and recovery patterns to identify mental health concerns",
        ),
        create_window_tool(
            ANALYZE_SLEEP_PATTERNS,
            "Analyze sleep quality, patterns, and their impact on mental health for therapeutic conversations",
        ),
        create_window_tool(
            ANALYZE_ACTIVITY_PATTERNS,
            "Analyze workout patterns, exercise habits, and their relationship to mental health and behavioral insights",
        ),
        create_health_trends_tool(),
    ]
}

fn user_id_property() -> PropertySchema {
    PropertySchema {
        property_type: "integer".into(),
        description: Some("WHOOP user ID (optional, uses authenticated user if not provided)".into()),
        ..PropertySchema::default()
    }
}

fn date_property(description: &str) -> PropertySchema {
    PropertySchema {
        property_type: "string".into(),
        description: Some(description.into()),
        pattern: Some(ISO_DATE_PATTERN.into()),
        ..PropertySchema::default()
    }
}

fn create_window_tool(name: &str, description: &str) -> ToolSchema {
    let mut properties = HashMap::new();

    properties.insert(
        "start_date".to_owned(),
        date_property("Start date for analysis (YYYY-MM-DD format)"),
    );
    properties.insert(
        "end_date".to_owned(),
        date_property("End date for analysis (YYYY-MM-DD format)"),
    );
    properties.insert("user_id".to_owned(), user_id_property());

    ToolSchema {
        name: name.to_owned(),
        description: description.into(),
        input_schema: JsonSchema {
            schema_type: "object".into(),
            properties: Some(properties),
            required: Some(vec!["start_date".to_owned(), "end_date".to_owned()]),
        },
    }
}

fn create_health_trends_tool() -> ToolSchema {
    let mut properties = HashMap::new();

    properties.insert(
        "metric".to_owned(),
        PropertySchema {
            property_type: "string".into(),
            description: Some("Metric to analyze for trends".into()),
            allowed: Some(vec!["recovery".into(), "sleep".into(), "strain".into()]),
            ..PropertySchema::default()
        },
    );
    properties.insert(
        "days".to_owned(),
        PropertySchema {
            property_type: "integer".into(),
            description: Some(format!(
                "Number of days to analyze (default: {})",
                trend::DEFAULT_DAYS
            )),
            minimum: Some(trend::MIN_DAYS),
            maximum: Some(trend::MAX_DAYS),
            ..PropertySchema::default()
        },
    );
    properties.insert("user_id".to_owned(), user_id_property());

    ToolSchema {
        name: ANALYZE_HEALTH_TRENDS.to_owned(),
        description: "Analyze week-over-week trends in recovery, sleep, or strain metrics to identify patterns relevant for therapy".into(),
        input_schema: JsonSchema {
            schema_type: "object".into(),
            properties: Some(properties),
            required: Some(vec!["metric".to_owned()]),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_tool_listing_order() {
        let names: Vec<String> = get_tools().into_iter().map(|tool| tool.name).collect();
        assert_eq!(
            names,
            [
                "get_health_summary",
                "analyze_stress_indicators",
                "analyze_sleep_patterns",
                "analyze_activity_patterns",
                "analyze_health_trends",
            ]
        );
    }

    #[test]
    fn test_trend_schema_wire_format() {
        let tool = create_health_trends_tool();
        let wire = serde_json::to_value(&tool).unwrap();

        assert_eq!(wire["inputSchema"]["type"], "object");
        assert_eq!(wire["inputSchema"]["required"], json!(["metric"]));
        let days = &wire["inputSchema"]["properties"]["days"];
        assert_eq!(days["minimum"], 7);
        assert_eq!(days["maximum"], 90);
        assert!(days.get("pattern").is_none());
        assert_eq!(
            wire["inputSchema"]["properties"]["metric"]["enum"],
            json!(["recovery", "sleep", "strain"])
        );
    }

    #[test]
    fn test_date_properties_carry_pattern() {
        let tool = create_window_tool(GET_HEALTH_SUMMARY, "summary");
        let properties = tool.input_schema.properties.unwrap();
        assert_eq!(
            properties["start_date"].pattern.as_deref(),
            Some(ISO_DATE_PATTERN)
        );
        assert_eq!(properties["user_id"].property_type, "integer");
    }
}
