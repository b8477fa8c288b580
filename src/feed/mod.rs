//! Expense feed
//!
//! The consumer-side view of the expense list: the groups currently shown,
//! the unfiltered grouping that search works from, and the active query.
//! Grouping and filtering run on the [`RecomputeWorker`]; results are applied
//! when the consumer calls [`ExpenseFeed::poll`], and only if they answer the
//! latest request of their kind.
//!
//! A new grouping request also supersedes any filter in flight, since that
//! filter was computed from the old snapshot. When the fresh grouping lands
//! while a query is active, the filter is issued again against it.
//!
//! Expenses removed while a result is outstanding are remembered and
//! stripped from that result when it lands, since it was computed from a
//! list that still held them.

pub mod worker;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::models::{Expense, ExpenseId};
use crate::services::grouping::{expense_count, remove_from_groups, GroupedExpenses, GroupingCalendar};

pub use worker::{ComputeKind, Completed, RecomputeWorker, Ticket};

pub struct ExpenseFeed {
    groups: Vec<GroupedExpenses>,
    original: Vec<GroupedExpenses>,
    query: String,
    last_count: usize,
    worker: RecomputeWorker,
    pending_grouping: Option<u64>,
    pending_filter: Option<u64>,
    removed_while_busy: HashSet<ExpenseId>,
}

impl ExpenseFeed {
    pub fn new(calendar: GroupingCalendar) -> Self {
        Self {
            groups: Vec::new(),
            original: Vec::new(),
            query: String::new(),
            last_count: 0,
            worker: RecomputeWorker::new(calendar),
            pending_grouping: None,
            pending_filter: None,
            removed_while_busy: HashSet::new(),
        }
    }

    /// Groups to display (filtered when a query is active)
    pub fn groups(&self) -> &[GroupedExpenses] {
        &self.groups
    }

    /// Last complete, unfiltered grouping
    pub fn original(&self) -> &[GroupedExpenses] {
        &self.original
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn calendar(&self) -> GroupingCalendar {
        self.worker.calendar()
    }

    /// Number of expenses currently displayed
    pub fn visible_count(&self) -> usize {
        expense_count(&self.groups)
    }

    /// Whether a grouping or filter result is still outstanding
    pub fn is_busy(&self) -> bool {
        self.pending_grouping.is_some() || self.pending_filter.is_some()
    }

    /// React to a new expense list from the store
    ///
    /// Regroups when the list grew, when nothing is displayed, or when
    /// `force` is set. A shrinking list is left to [`remove_expense`], which
    /// updates the groups in place. Returns whether a regroup was issued.
    ///
    /// [`remove_expense`]: ExpenseFeed::remove_expense
    pub fn on_expenses_changed(&mut self, expenses: Vec<Expense>, force: bool) -> bool {
        let count = expenses.len();
        let grew = count > self.last_count;
        self.last_count = count;

        if !(grew || self.groups.is_empty() || force) {
            return false;
        }

        let ticket = self.worker.request_grouping(expenses);
        self.pending_grouping = Some(ticket.generation);

        // Any filter in flight was computed from the old snapshot
        if self.pending_filter.take().is_some() {
            self.worker.supersede(ComputeKind::Filtering);
        }

        tracing::debug!(count, generation = ticket.generation, force, "regroup requested");
        true
    }

    /// Change the search query
    ///
    /// An empty query restores the unfiltered grouping immediately; anything
    /// else is filtered in the background.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();

        if self.query.is_empty() {
            if self.pending_filter.take().is_some() {
                self.worker.supersede(ComputeKind::Filtering);
            }
            self.groups = self.original.clone();
            return;
        }

        self.issue_filter();
    }

    fn issue_filter(&mut self) {
        let ticket = self
            .worker
            .request_filter(self.original.clone(), self.query.clone());
        self.pending_filter = Some(ticket.generation);
    }

    /// Drop one expense from both the displayed and the unfiltered groups
    ///
    /// While a grouping or filter is outstanding the id is also kept, so the
    /// expense cannot come back with that result.
    pub fn remove_expense(&mut self, id: ExpenseId) -> bool {
        if self.is_busy() {
            self.removed_while_busy.insert(id);
        }
        let shown = remove_from_groups(&mut self.groups, id);
        let original = remove_from_groups(&mut self.original, id);
        shown || original
    }

    fn strip_removed(&self, groups: &mut Vec<GroupedExpenses>) {
        for id in &self.removed_while_busy {
            remove_from_groups(groups, *id);
        }
    }

    /// Apply every finished computation that is still current
    ///
    /// Returns whether the displayed groups changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(done) = self.worker.try_recv() {
            changed |= self.apply(done);
        }
        changed
    }

    /// Block until no computation is outstanding or `timeout` passes
    ///
    /// Returns false on timeout.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.worker.recv_timeout(remaining) {
                Some(done) => {
                    self.apply(done);
                }
                None => return false,
            }
        }
        true
    }

    fn apply(&mut self, done: Completed) -> bool {
        let Completed { ticket, mut groups } = done;

        let changed = match ticket.kind {
            ComputeKind::Grouping if self.pending_grouping == Some(ticket.generation) => {
                self.pending_grouping = None;
                self.strip_removed(&mut groups);
                self.original = groups;
                if self.query.is_empty() {
                    self.groups = self.original.clone();
                    true
                } else {
                    self.issue_filter();
                    false
                }
            }
            ComputeKind::Filtering if self.pending_filter == Some(ticket.generation) => {
                self.pending_filter = None;
                self.strip_removed(&mut groups);
                self.groups = groups;
                true
            }
            kind => {
                tracing::trace!(%kind, generation = ticket.generation, "discarding stale result");
                false
            }
        };

        if !self.is_busy() {
            self.removed_while_busy.clear();
        }
        changed
    }
}

impl Default for ExpenseFeed {
    fn default() -> Self {
        Self::new(GroupingCalendar::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{FixedOffset, TimeZone, Utc};

    const WAIT: Duration = Duration::from_secs(5);

    fn feed() -> ExpenseFeed {
        ExpenseFeed::new(GroupingCalendar::Fixed(FixedOffset::east_opt(0).unwrap()))
    }

    fn expense(title: &str, day: u32) -> Expense {
        Expense::new(
            title,
            "desc",
            Money::from_cents(100),
            Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        )
    }

    fn titles(groups: &[GroupedExpenses]) -> Vec<String> {
        groups
            .iter()
            .flat_map(|g| g.expenses.iter().map(|e| e.title.clone()))
            .collect()
    }

    #[test]
    fn test_first_list_is_grouped() {
        let mut feed = feed();
        assert!(feed.on_expenses_changed(vec![expense("a", 1), expense("b", 2)], false));
        assert!(feed.wait_idle(WAIT));

        assert_eq!(feed.groups().len(), 2);
        assert_eq!(feed.original(), feed.groups());
        assert!(!feed.is_busy());
    }

    #[test]
    fn test_regroup_triggers() {
        let mut feed = feed();
        let list = vec![expense("a", 1), expense("b", 2)];
        feed.on_expenses_changed(list.clone(), false);
        feed.wait_idle(WAIT);

        // Same size, groups present, not forced
        assert!(!feed.on_expenses_changed(list.clone(), false));
        // Shrunk
        assert!(!feed.on_expenses_changed(list[..1].to_vec(), false));
        // Grew
        assert!(feed.on_expenses_changed(list.clone(), false));
        feed.wait_idle(WAIT);
        // Forced
        assert!(feed.on_expenses_changed(list, true));
        assert!(feed.wait_idle(WAIT));
    }

    #[test]
    fn test_latest_grouping_wins() {
        let mut feed = feed();
        feed.on_expenses_changed(vec![expense("old", 1)], false);
        feed.on_expenses_changed(vec![expense("new", 2), expense("newer", 3)], false);
        assert!(feed.wait_idle(WAIT));

        // Anything still in the channel is stale
        feed.poll();
        assert_eq!(titles(feed.groups()), vec!["newer", "new"]);
    }

    #[test]
    fn test_latest_filter_wins() {
        let mut feed = feed();
        feed.on_expenses_changed(
            vec![expense("Coffee", 1), expense("Groceries", 2), expense("Coffee Maker", 3)],
            false,
        );
        feed.wait_idle(WAIT);

        feed.set_query("gro");
        feed.set_query("coffee");
        assert!(feed.wait_idle(WAIT));
        feed.poll();

        assert_eq!(feed.query(), "coffee");
        assert_eq!(titles(feed.groups()), vec!["Coffee Maker", "Coffee"]);
        assert_eq!(feed.original().len(), 3);
    }

    #[test]
    fn test_empty_query_restores_synchronously() {
        let mut feed = feed();
        feed.on_expenses_changed(vec![expense("Coffee", 1), expense("Taxi", 2)], false);
        feed.wait_idle(WAIT);

        feed.set_query("taxi");
        feed.wait_idle(WAIT);
        assert_eq!(feed.visible_count(), 1);

        feed.set_query("");
        assert!(!feed.is_busy());
        assert_eq!(feed.groups(), feed.original());
        assert_eq!(feed.visible_count(), 2);
    }

    #[test]
    fn test_regroup_reapplies_active_query() {
        let mut feed = feed();
        feed.on_expenses_changed(vec![expense("Coffee", 1), expense("Taxi", 2)], false);
        feed.wait_idle(WAIT);

        feed.set_query("coffee");
        // Lands before the filter result: the filter must be recomputed
        feed.on_expenses_changed(
            vec![expense("Coffee", 1), expense("Taxi", 2), expense("Iced coffee", 3)],
            false,
        );
        assert!(feed.wait_idle(WAIT));
        feed.poll();

        assert_eq!(titles(feed.groups()), vec!["Iced coffee", "Coffee"]);
        assert_eq!(expense_count(feed.original()), 3);
    }

    #[test]
    fn test_remove_expense_updates_both_snapshots() {
        let mut feed = feed();
        let coffee = expense("Coffee", 1);
        let coffee_id = coffee.id;
        feed.on_expenses_changed(vec![coffee, expense("Coffee Maker", 1), expense("Taxi", 2)], false);
        feed.wait_idle(WAIT);

        feed.set_query("coffee");
        feed.wait_idle(WAIT);

        assert!(feed.remove_expense(coffee_id));
        assert_eq!(titles(feed.groups()), vec!["Coffee Maker"]);

        feed.set_query("");
        assert_eq!(feed.visible_count(), 2);
        assert!(!feed.remove_expense(coffee_id));
    }

    #[test]
    fn test_delete_during_regroup_stays_deleted() {
        let mut feed = feed();
        let a = expense("a", 1);
        let b = expense("b", 2);
        let b_id = b.id;

        feed.on_expenses_changed(vec![a.clone()], false);
        feed.wait_idle(WAIT);

        // Regroup still running when the delete arrives
        feed.on_expenses_changed(vec![b, a.clone()], false);
        feed.remove_expense(b_id);
        assert!(!feed.on_expenses_changed(vec![a], false));
        assert!(feed.wait_idle(WAIT));

        assert_eq!(titles(feed.groups()), vec!["a"]);
        assert_eq!(titles(feed.original()), vec!["a"]);
    }

    #[test]
    fn test_delete_during_filter_stays_deleted() {
        let mut feed = feed();
        let coffee = expense("Coffee", 1);
        let coffee_id = coffee.id;
        feed.on_expenses_changed(vec![coffee, expense("Iced coffee", 2)], false);
        feed.wait_idle(WAIT);

        feed.set_query("coffee");
        feed.remove_expense(coffee_id);
        assert!(feed.wait_idle(WAIT));

        assert_eq!(titles(feed.groups()), vec!["Iced coffee"]);

        feed.set_query("");
        assert_eq!(titles(feed.groups()), vec!["Iced coffee"]);
    }
}
