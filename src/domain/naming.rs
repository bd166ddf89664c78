//! List naming rules: automatic `"List N"` names and case-insensitive
//! uniqueness for user-chosen names.

use crate::domain::{sanitize::MAX_LIST_NAME_LENGTH, todo_list::TodoList};
use std::collections::HashSet;

const AUTO_NAME_PREFIX: &str = "List ";

fn taken_names<'a>(lists: impl IntoIterator<Item = &'a TodoList>) -> HashSet<String> {
    lists.into_iter().map(|l| l.name.to_lowercase()).collect()
}

/// Parses the `N` of an exact `"List N"` name.
///
/// A suffix too large for `u64` is ignored like a non-numeric one.
fn auto_name_number(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(AUTO_NAME_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Checks whether `name` collides case-insensitively with any list in `lists`
pub fn is_name_taken<'a>(name: &str, lists: impl IntoIterator<Item = &'a TodoList>) -> bool {
    let lowered = name.to_lowercase();
    lists.into_iter().any(|l| l.name.to_lowercase() == lowered)
}

/// Generates the next automatic name.
///
/// Starts one past the highest `"List N"` already present, then counts upward
/// until the candidate does not collide with any existing name. When the
/// numbers above run out, the search restarts from 1.
pub fn next_auto_name(lists: &[TodoList]) -> String {
    let highest = lists
        .iter()
        .filter_map(|l| auto_name_number(&l.name))
        .max()
        .unwrap_or(0);

    let taken = taken_names(lists);
    let is_free = |n: &u64| !taken.contains(&format!("list {n}"));

    // Each taken name blocks at most one number, so both searches end
    // within `lists.len() + 1` steps
    let number = highest
        .checked_add(1)
        .and_then(|start| (start..=u64::MAX).find(is_free))
        .or_else(|| (1..=u64::MAX).find(is_free))
        .unwrap_or(1);

    format!("{AUTO_NAME_PREFIX}{number}")
}

/// Makes an already-sanitized name unique by appending `" (k)"`, k = 2, 3, ...
///
/// On a collision the suffix goes after the existing list's spelling, so
/// `"work"` next to `"Work"` becomes `"Work (2)"`. The base is shortened when
/// needed so the suffixed name still fits the list name limit.
pub fn unique_name(name: &str, lists: &[TodoList]) -> String {
    let lowered = name.to_lowercase();
    let Some(existing) = lists.iter().find(|l| l.name.to_lowercase() == lowered) else {
        return name.to_string();
    };

    let base = existing.name.as_str();
    let taken = taken_names(lists);
    let mut counter: u64 = 2;
    loop {
        let candidate = with_suffix(base, counter);
        if !taken.contains(&candidate.to_lowercase()) {
            return candidate;
        }
        counter += 1;
    }
}

fn with_suffix(base: &str, counter: u64) -> String {
    let suffix = format!(" ({counter})");
    let room = MAX_LIST_NAME_LENGTH.saturating_sub(suffix.chars().count());
    if base.chars().count() <= room {
        return format!("{base}{suffix}");
    }
    let shortened: String = base.chars().take(room).collect();
    format!("{}{suffix}", shortened.trim_end())
}
