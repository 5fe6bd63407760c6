use serde::{Deserialize, Serialize};

/// One tenant row read from the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    pub name: String,
    /// 1-based line in the source file.
    pub line: u64,
}

impl TenantRecord {
    /// The trimmed name, or `None` when the row should be skipped.
    pub fn tenant_name(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Body of `PUT /v1/groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
    pub dimension: Dimension,
    pub name: String,
    pub request: CostQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Tenants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostQuery {
    pub cost_type: CostType,
    pub filter_groups: Vec<FilterGroup>,
    pub global_filters: Vec<Filter>,
    pub group_bys: Vec<GroupBy>,
    pub time_range: TimeRange,
    pub timeseries_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostType {
    Amortized,
}

/// Filters inside a group are AND-ed; groups are OR-ed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
    pub add_used_by_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub operator: FilterOperator,
    pub property: Property,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOperator {
    Equals,
}

/// Resource property a filter or grouping applies to.
///
/// Serialized externally tagged: `Tag("tenant")` becomes `{"Tag":"tenant"}` and the
/// unit-payload variants become `{"K8sNamespace":null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Property {
    Tag(String),
    K8sNamespace(()),
    SnowflakeDatabase(()),
    MainEntity(()),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupBy {
    pub by_network_target: bool,
    pub property: Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    Relative { days_back: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tenant_name_trims_and_rejects_blank() {
        let record = TenantRecord {
            name: "  acme \t".to_string(),
            line: 2,
        };
        assert_eq!(record.tenant_name(), Some("acme"));

        let blank = TenantRecord {
            name: " \t ".to_string(),
            line: 3,
        };
        assert_eq!(blank.tenant_name(), None);
    }

    #[test]
    fn test_property_wire_shapes() {
        assert_eq!(
            serde_json::to_value(Property::Tag("tenant".to_string())).unwrap(),
            json!({"Tag": "tenant"})
        );
        assert_eq!(
            serde_json::to_value(Property::K8sNamespace(())).unwrap(),
            json!({"K8sNamespace": null})
        );
        assert_eq!(
            serde_json::to_value(Property::MainEntity(())).unwrap(),
            json!({"MainEntity": null})
        );
    }

    #[test]
    fn test_property_parses_null_payload() {
        let parsed: Property = serde_json::from_value(json!({"SnowflakeDatabase": null})).unwrap();
        assert_eq!(parsed, Property::SnowflakeDatabase(()));
    }

    #[test]
    fn test_time_range_wire_shape() {
        assert_eq!(
            serde_json::to_value(TimeRange::Relative { days_back: 90 }).unwrap(),
            json!({"Relative": {"days_back": 90}})
        );
    }
}
