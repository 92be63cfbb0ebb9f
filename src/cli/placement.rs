//! `stacklint placement` handler

use crate::containment;
use anyhow::Result;
use console::style;

pub fn run(child_type: &str, parent_type: Option<&str>) -> Result<()> {
    match parent_type {
        Some(parent) => {
            if containment::can_place_in_container(child_type, parent) {
                println!(
                    "{} '{}' may be placed inside '{}'",
                    style("allowed").green().bold(),
                    child_type,
                    parent
                );
            } else {
                println!(
                    "{} '{}' may not be placed inside '{}'",
                    style("not allowed").red().bold(),
                    child_type,
                    parent
                );
                let parents = containment::valid_parent_types(child_type);
                if parents.is_empty() {
                    println!("  '{}' has no containment constraint (top level)", child_type);
                } else {
                    println!("  valid parents: {}", parents.join(", "));
                }
            }
        }
        None => {
            let parents = containment::valid_parent_types(child_type);
            if parents.is_empty() {
                println!(
                    "'{}' has no containment constraint; it lives at top level",
                    child_type
                );
            } else {
                println!("valid parents for '{}': {}", child_type, parents.join(", "));
                if let Some(default) = containment::default_parent_type(child_type) {
                    println!("default parent: {}", default);
                }
            }
            if containment::is_container_type(child_type) {
                let children = containment::valid_child_types(child_type);
                println!(
                    "'{}' is a container; it accepts: {}",
                    child_type,
                    children.join(", ")
                );
            }
        }
    }
    Ok(())
}
