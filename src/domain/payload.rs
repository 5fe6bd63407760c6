use crate::domain::model::{
    CostQuery, CostType, Dimension, Filter, FilterGroup, FilterOperator, GroupBy, GroupRequest,
    Property, TimeRange,
};

pub const TENANT_TAG_KEY: &str = "tenant";
pub const DAYS_BACK: u32 = 90;
pub const TIMESERIES_LIMIT: u32 = 90;

/// Builds the tenant group for `name`.
///
/// The tag and namespace filters match the lowercased name, the warehouse
/// database filter matches the uppercased name. `name` is expected to be
/// trimmed and non-empty.
pub fn build_payload(name: &str) -> GroupRequest {
    let lower = name.to_lowercase();
    let upper = name.to_uppercase();

    GroupRequest {
        dimension: Dimension::Tenants,
        name: capitalize(name),
        request: CostQuery {
            cost_type: CostType::Amortized,
            filter_groups: vec![
                equals_group(Property::Tag(TENANT_TAG_KEY.to_string()), lower.clone()),
                equals_group(Property::K8sNamespace(()), lower),
                equals_group(Property::SnowflakeDatabase(()), upper),
            ],
            global_filters: Vec::new(),
            group_bys: vec![GroupBy {
                by_network_target: false,
                property: Property::MainEntity(()),
            }],
            time_range: TimeRange::Relative {
                days_back: DAYS_BACK,
            },
            timeseries_limit: TIMESERIES_LIMIT,
        },
    }
}

fn equals_group(property: Property, value: String) -> FilterGroup {
    FilterGroup {
        filters: vec![Filter {
            operator: FilterOperator::Equals,
            property,
            values: vec![value],
        }],
        add_used_by_filter: false,
    }
}

/// First character uppercased, the rest lowercased: `"aCME corp"` -> `"Acme corp"`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
