//! Role/permission set logic.
//!
//! Users hold role ids, roles hold permission slugs, modules group slugs for
//! presentation. Authorization is plain set membership over those lists.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A named group of permission slugs inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubModule {
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Normalise a slug to lowercase and check its character set.
///
/// Slugs are `[a-z0-9]` plus `_`, `-`, `.` and `:`, e.g. `cohort:create`.
pub fn normalize_slug(raw: &str) -> Result<String, CoreError> {
    let slug = raw.trim().to_lowercase();
    if slug.is_empty() {
        return Err(CoreError::InvalidInput("slug must not be empty".to_string()));
    }
    if let Some(bad) = slug
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')))
    {
        return Err(CoreError::InvalidInput(format!(
            "slug '{slug}' contains invalid character '{bad}'"
        )));
    }
    Ok(slug)
}

/// Normalise and de-duplicate a list of slugs, keeping first-seen order.
pub fn normalize_slugs(raw: &[String]) -> Result<Vec<String>, CoreError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());
    for item in raw {
        let slug = normalize_slug(item)?;
        if seen.insert(slug.clone()) {
            out.push(slug);
        }
    }
    Ok(out)
}

/// Union of the permission slugs granted by a set of roles.
pub fn effective_permissions<'a, I>(role_permissions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    role_permissions
        .into_iter()
        .flatten()
        .cloned()
        .collect()
}

pub fn has_permission(granted: &BTreeSet<String>, slug: &str) -> bool {
    granted.contains(slug)
}

/// Slugs in `requested` that are not in `known`.
pub fn unknown_permissions(requested: &[String], known: &HashSet<String>) -> Vec<String> {
    requested
        .iter()
        .filter(|slug| !known.contains(*slug))
        .cloned()
        .collect()
}

/// Sub-module names must be non-empty and unique; their slugs are normalised.
pub fn normalize_sub_modules(sub_modules: &[SubModule]) -> Result<Vec<SubModule>, CoreError> {
    let mut names = HashSet::new();
    sub_modules
        .iter()
        .map(|sm| {
            let name = sm.name.trim().to_string();
            if name.is_empty() {
                return Err(CoreError::InvalidInput(
                    "sub-module name must not be empty".to_string(),
                ));
            }
            if !names.insert(name.to_lowercase()) {
                return Err(CoreError::InvalidInput(format!(
                    "sub-module '{name}' is duplicated"
                )));
            }
            Ok(SubModule {
                name,
                permissions: normalize_slugs(&sm.permissions)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn slugs_are_lowercased_and_checked() {
        assert_eq!(normalize_slug(" Cohort:Create ").unwrap(), "cohort:create");
        assert!(normalize_slug("").is_err());
        assert!(normalize_slug("cohort create").is_err());
    }

    #[test]
    fn slug_lists_are_deduplicated_in_order() {
        let slugs = normalize_slugs(&owned(&["b", "A", "a", "b"])).unwrap();
        assert_eq!(slugs, owned(&["b", "a"]));
    }

    #[test]
    fn effective_permissions_union_roles() {
        let admin = owned(&["cohort:create", "cohort:delete"]);
        let viewer = owned(&["cohort:read", "cohort:create"]);
        let granted = effective_permissions([admin.as_slice(), viewer.as_slice()]);
        assert_eq!(granted.len(), 3);
        assert!(has_permission(&granted, "cohort:read"));
        assert!(!has_permission(&granted, "users:delete"));
    }

    #[test]
    fn no_roles_grant_nothing() {
        let granted = effective_permissions(std::iter::empty::<&[String]>());
        assert!(granted.is_empty());
    }

    #[test]
    fn unknown_permissions_are_listed() {
        let known: HashSet<String> = owned(&["a", "b"]).into_iter().collect();
        assert_eq!(unknown_permissions(&owned(&["a", "c"]), &known), owned(&["c"]));
    }

    #[test]
    fn sub_modules_are_validated() {
        let ok = normalize_sub_modules(&[SubModule {
            name: " Cohorts ".into(),
            permissions: owned(&["Cohort:Read"]),
        }])
        .unwrap();
        assert_eq!(ok[0].name, "Cohorts");
        assert_eq!(ok[0].permissions, owned(&["cohort:read"]));

        let dup = [
            SubModule { name: "A".into(), permissions: vec![] },
            SubModule { name: "a".into(), permissions: vec![] },
        ];
        assert!(normalize_sub_modules(&dup).is_err());
    }
}
