//! Containment validation
//!
//! Static policy for which resource types may be nested inside which
//! container types. The editing surface calls these lookups on every
//! drag/drop or reparent attempt; scanning does not consult them.
//!
//! All lookups are total: unknown types degrade to "no constraint"
//! rather than failing.

use crate::graph::kind;

/// Legal parent types per child type. A child type absent from this
/// table has no containment constraint and can exist at top level.
///
/// Parent order is the declaration order used for default selection.
const CONTAINMENT_RULES: &[(&str, &[&str])] = &[
    (kind::SUBNET, &[kind::VPC]),
    (kind::INSTANCE, &[kind::SUBNET, kind::VPC]),
    (kind::DATABASE, &[kind::SUBNET, kind::VPC]),
    (kind::FUNCTION, &[kind::SUBNET, kind::VPC]),
    (kind::SECURITY_GROUP, &[kind::VPC]),
    (kind::LOAD_BALANCER, &[kind::VPC]),
    (kind::INTERNET_GATEWAY, &[kind::VPC]),
    (kind::NAT_GATEWAY, &[kind::SUBNET]),
];

/// Resource types that can contain other resources.
const CONTAINER_TYPES: &[&str] = &[kind::VPC, kind::SUBNET];

/// Whether this resource type can contain other resources.
pub fn is_container_type(resource_type: &str) -> bool {
    CONTAINER_TYPES.contains(&resource_type)
}

/// Legal parent types for a child type. Unknown child types yield an
/// empty slice (no constraint).
pub fn valid_parent_types(child_type: &str) -> &'static [&'static str] {
    CONTAINMENT_RULES
        .iter()
        .find(|(child, _)| *child == child_type)
        .map(|(_, parents)| *parents)
        .unwrap_or(&[])
}

/// Whether `child_type` may be placed directly inside `parent_type`.
pub fn can_place_in_container(child_type: &str, parent_type: &str) -> bool {
    valid_parent_types(child_type).contains(&parent_type)
}

/// Preferred container for a child type: the most specific container
/// first (`subnet`, then `vpc`), else the first declared valid parent.
pub fn default_parent_type(child_type: &str) -> Option<&'static str> {
    let parents = valid_parent_types(child_type);
    if parents.contains(&kind::SUBNET) {
        Some(kind::SUBNET)
    } else if parents.contains(&kind::VPC) {
        Some(kind::VPC)
    } else {
        parents.first().copied()
    }
}

/// Inverse lookup: all child types whose valid-parent set contains
/// `parent_type`, in table declaration order.
pub fn valid_child_types(parent_type: &str) -> Vec<&'static str> {
    CONTAINMENT_RULES
        .iter()
        .filter(|(_, parents)| parents.contains(&parent_type))
        .map(|(child, _)| *child)
        .collect()
}
