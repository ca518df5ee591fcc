//! Pure rules of the status lifecycle.
//!
//! Nothing in here touches the database: the functions take the current
//! statuses of one organization and decide whether a requested change is
//! admissible. `db.rs` calls them before issuing any statement.

use std::collections::HashSet;

use crate::errors::{StatusError, StatusResult};

use super::models::Status;

/// Trim a display name and reject it if nothing is left.
pub fn normalize_name(name: &str) -> StatusResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StatusError::Validation(
            "Status name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Derive the machine key for a status name.
///
/// Lower-cases alphanumerics and collapses every other run of characters into
/// a single `_`: `"In Progress!"` becomes `in_progress`.
pub fn derive_key(name: &str) -> StatusResult<String> {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    if key.is_empty() {
        return Err(StatusError::Validation(format!(
            "Status name '{}' contains no letters or digits",
            name.trim()
        )));
    }
    Ok(key)
}

/// Check that `ordered_ids` is a permutation of the ids in `current`.
pub fn validate_reorder(current: &[Status], ordered_ids: &[i64]) -> StatusResult<()> {
    let known: HashSet<i64> = current.iter().map(|s| s.id).collect();
    let mut seen = HashSet::with_capacity(ordered_ids.len());

    for id in ordered_ids {
        if !known.contains(id) {
            return Err(StatusError::InvalidOrder(format!(
                "status {} does not belong to this organization",
                id
            )));
        }
        if !seen.insert(*id) {
            return Err(StatusError::InvalidOrder(format!(
                "status {} appears more than once",
                id
            )));
        }
    }

    if let Some(missing) = current.iter().find(|s| !seen.contains(&s.id)) {
        return Err(StatusError::InvalidOrder(format!(
            "status {} ('{}') is missing from the new order",
            missing.id, missing.key
        )));
    }
    Ok(())
}

/// Statuses a user may move posts onto when `deleting` goes away.
pub fn reassignment_candidates<'a>(statuses: &'a [Status], deleting: &Status) -> Vec<&'a Status> {
    statuses.iter().filter(|s| s.id != deleting.id).collect()
}

/// Validate the confirm-phase target and return the matching status.
pub fn resolve_target<'a>(
    statuses: &'a [Status],
    deleting: &Status,
    reassign_to: &str,
) -> StatusResult<&'a Status> {
    let target = reassign_to.trim();
    if target.is_empty() {
        return Err(StatusError::InvalidTarget(
            "a replacement status key is required".to_string(),
        ));
    }
    if target == deleting.key {
        return Err(StatusError::InvalidTarget(format!(
            "cannot reassign posts of '{}' onto itself",
            deleting.key
        )));
    }
    statuses
        .iter()
        .find(|s| s.key == target && s.org_id == deleting.org_id)
        .ok_or_else(|| {
            StatusError::InvalidTarget(format!(
                "'{}' is not a status of organization {}",
                target, deleting.org_id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::models::StatusColor;

    fn status(id: i64, key: &str, order: i32) -> Status {
        Status {
            id,
            org_id: 1,
            key: key.to_string(),
            name: key.to_string(),
            color: StatusColor::Gray,
            order,
            is_system: false,
            show_on_roadmap: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_derive_key_slugifies() {
        assert_eq!(derive_key("Open").unwrap(), "open");
        assert_eq!(derive_key("In Progress").unwrap(), "in_progress");
        assert_eq!(derive_key("  Needs   Review!! ").unwrap(), "needs_review");
        assert_eq!(derive_key("v2 -- launch").unwrap(), "v2_launch");
    }

    #[test]
    fn test_derive_key_rejects_symbol_only_names() {
        let err = derive_key("!!!").unwrap_err();
        assert!(matches!(err, StatusError::Validation(_)));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Planned ").unwrap(), "Planned");
        assert!(matches!(
            normalize_name("   ").unwrap_err(),
            StatusError::Validation(_)
        ));
    }

    #[test]
    fn test_validate_reorder_accepts_permutation() {
        let current = vec![status(1, "a", 0), status(2, "b", 1), status(3, "c", 2)];
        assert!(validate_reorder(&current, &[3, 1, 2]).is_ok());
    }

    #[test]
    fn test_validate_reorder_rejects_missing_duplicate_and_foreign() {
        let current = vec![status(1, "a", 0), status(2, "b", 1), status(3, "c", 2)];

        let missing = validate_reorder(&current, &[1, 2]).unwrap_err();
        assert!(matches!(missing, StatusError::InvalidOrder(_)));
        assert!(missing.to_string().contains("missing"));

        let duplicated = validate_reorder(&current, &[1, 2, 2, 3]).unwrap_err();
        assert!(duplicated.to_string().contains("more than once"));

        let foreign = validate_reorder(&current, &[1, 2, 99]).unwrap_err();
        assert!(foreign.to_string().contains("does not belong"));
    }

    #[test]
    fn test_reassignment_candidates_exclude_deleted() {
        let current = vec![status(1, "open", 0), status(2, "planned", 1), status(3, "done", 2)];
        let candidates = reassignment_candidates(&current, &current[1]);
        let keys: Vec<&str> = candidates.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["open", "done"]);
    }

    #[test]
    fn test_resolve_target() {
        let current = vec![status(1, "open", 0), status(2, "planned", 1)];
        let deleting = &current[1];

        assert_eq!(resolve_target(&current, deleting, "open").unwrap().id, 1);
        assert!(matches!(
            resolve_target(&current, deleting, "planned").unwrap_err(),
            StatusError::InvalidTarget(_)
        ));
        assert!(matches!(
            resolve_target(&current, deleting, "shipped").unwrap_err(),
            StatusError::InvalidTarget(_)
        ));
        assert!(matches!(
            resolve_target(&current, deleting, " ").unwrap_err(),
            StatusError::InvalidTarget(_)
        ));
    }
}
