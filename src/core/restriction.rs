//! Restriction classifier
//!
//! Decides whether a content module is visible to only some students. The
//! decision walks from the module to its section and, for sections locked
//! solely behind another activity, on to that activity:
//!
//! 1. hidden module: restricted
//! 2. module's own conditions exclude someone: restricted
//! 3. section open to everyone: not restricted
//! 4. section locked by exactly one other-activity condition: same answer as
//!    for that activity
//! 5. anything else: restricted
//!
//! Step 4 lets sub-pages that reuse another activity as their unlock switch
//! inherit that activity's status. A module seen twice on one walk means the
//! locks form a loop; the walk stops and reports restricted.

use crate::adapters::traits::CourseCatalog;
use crate::domain::ids::ModuleId;
use crate::domain::CatalogError;
use std::collections::HashSet;

/// Classify one module
///
/// # Errors
///
/// Catalog lookups that fail (missing module or section) are returned to the
/// caller unchanged.
pub async fn is_restricted(
    catalog: &dyn CourseCatalog,
    module_id: ModuleId,
) -> Result<bool, CatalogError> {
    let mut visited = HashSet::new();
    let mut current = module_id;

    loop {
        if !visited.insert(current) {
            tracing::warn!(
                module_id = %module_id,
                repeated = %current,
                "Availability conditions reference each other in a loop; treating as restricted"
            );
            return Ok(true);
        }

        let module = catalog.module(current).await?;
        if !module.visible || !module.available_for_all {
            return Ok(true);
        }

        let section = catalog.section(module.section_id).await?;
        if section.available_for_all {
            return Ok(false);
        }

        match section
            .availability
            .as_ref()
            .and_then(|tree| tree.sole_other_activity())
        {
            Some(next) => current = next,
            None => return Ok(true),
        }
    }
}
