//! Title search over grouped expenses

use super::grouping::GroupedExpenses;

/// Keep only expenses whose title contains `query`, ignoring case
///
/// Works on an unfiltered grouping; groups with no match are dropped and
/// every surviving group and expense keeps its position. An empty query
/// returns the input unchanged.
pub fn filter_groups(groups: &[GroupedExpenses], query: &str) -> Vec<GroupedExpenses> {
    if query.is_empty() {
        return groups.to_vec();
    }

    let needle = query.to_lowercase();
    groups
        .iter()
        .filter_map(|group| {
            let expenses: Vec<_> = group
                .expenses
                .iter()
                .filter(|e| e.title_contains(&needle))
                .cloned()
                .collect();

            if expenses.is_empty() {
                None
            } else {
                Some(GroupedExpenses::new(group.date, expenses))
            }
        })
        .collect()
}
