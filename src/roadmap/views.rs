//! Grouping of posts into status columns for the Kanban and Roadmap views.

use std::collections::HashMap;

use super::models::{Post, Status, StatusColumn};

/// Every status in order, each with its posts. Posts whose status key no
/// longer resolves land in a trailing "Unknown" column instead of vanishing.
pub fn kanban_columns(statuses: &[Status], posts: Vec<Post>) -> Vec<StatusColumn> {
    let (mut by_key, orphans) = group_by_status(statuses, posts);
    let mut columns: Vec<StatusColumn> = statuses
        .iter()
        .map(|s| StatusColumn::for_status(s, by_key.remove(&s.key).unwrap_or_default()))
        .collect();
    if !orphans.is_empty() {
        columns.push(StatusColumn::unknown(orphans));
    }
    columns
}

/// Public view: only statuses flagged `show_on_roadmap`. Posts in hidden or
/// unresolvable statuses are omitted.
pub fn roadmap_columns(statuses: &[Status], posts: Vec<Post>) -> Vec<StatusColumn> {
    let (mut by_key, _) = group_by_status(statuses, posts);
    statuses
        .iter()
        .filter(|s| s.show_on_roadmap)
        .map(|s| StatusColumn::for_status(s, by_key.remove(&s.key).unwrap_or_default()))
        .collect()
}

fn group_by_status(statuses: &[Status], posts: Vec<Post>) -> (HashMap<String, Vec<Post>>, Vec<Post>) {
    let mut by_key: HashMap<String, Vec<Post>> = statuses
        .iter()
        .map(|s| (s.key.clone(), Vec::new()))
        .collect();
    let mut orphans = Vec::new();
    for post in posts {
        match by_key.get_mut(&post.status) {
            Some(bucket) => bucket.push(post),
            None => orphans.push(post),
        }
    }
    (by_key, orphans)
}
