//! Single-flight background recompute
//!
//! Each computation kind has one slot holding the generation of the latest
//! request. A job runs on its own short-lived thread and reports back over a
//! channel; before computing and again before sending, it checks that its
//! generation is still the slot's current one and gives up otherwise.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::models::Expense;
use crate::services::grouping::{group_expenses_in, GroupedExpenses, GroupingCalendar};
use crate::services::search::filter_groups;

/// The two recomputations the feed runs off the consumer thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeKind {
    Grouping,
    Filtering,
}

impl fmt::Display for ComputeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeKind::Grouping => write!(f, "grouping"),
            ComputeKind::Filtering => write!(f, "filtering"),
        }
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: ComputeKind,
    pub generation: u64,
}

/// A finished computation
#[derive(Debug)]
pub struct Completed {
    pub ticket: Ticket,
    pub groups: Vec<GroupedExpenses>,
}

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Dispatches grouping and filtering jobs and collects their results
pub struct RecomputeWorker {
    calendar: GroupingCalendar,
    grouping: Arc<AtomicU64>,
    filtering: Arc<AtomicU64>,
    sender: mpsc::Sender<Completed>,
    receiver: mpsc::Receiver<Completed>,
}

impl RecomputeWorker {
    pub fn new(calendar: GroupingCalendar) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            calendar,
            grouping: Arc::new(AtomicU64::new(0)),
            filtering: Arc::new(AtomicU64::new(0)),
            sender,
            receiver,
        }
    }

    pub fn calendar(&self) -> GroupingCalendar {
        self.calendar
    }

    fn slot(&self, kind: ComputeKind) -> &Arc<AtomicU64> {
        match kind {
            ComputeKind::Grouping => &self.grouping,
            ComputeKind::Filtering => &self.filtering,
        }
    }

    /// Invalidate whatever is in flight for `kind` without issuing new work
    pub fn supersede(&self, kind: ComputeKind) -> u64 {
        self.slot(kind).fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `ticket` is still the latest request of its kind
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.slot(ticket.kind).load(Ordering::SeqCst) == ticket.generation
    }

    /// Group `expenses` by day in the background
    pub fn request_grouping(&self, expenses: Vec<Expense>) -> Ticket {
        let calendar = self.calendar;
        self.dispatch(ComputeKind::Grouping, move || {
            group_expenses_in(&expenses, calendar)
        })
    }

    /// Filter `groups` by title in the background
    pub fn request_filter(&self, groups: Vec<GroupedExpenses>, query: String) -> Ticket {
        self.dispatch(ComputeKind::Filtering, move || filter_groups(&groups, &query))
    }

    fn dispatch<F>(&self, kind: ComputeKind, compute: F) -> Ticket
    where
        F: FnOnce() -> Vec<GroupedExpenses> + Send + 'static,
    {
        let generation = self.supersede(kind);
        let ticket = Ticket { kind, generation };
        let slot = Arc::clone(self.slot(kind));
        let sender = self.sender.clone();

        let job: Job = Box::new(move || {
            if slot.load(Ordering::SeqCst) != generation {
                tracing::trace!(%kind, generation, "skipping superseded job");
                return;
            }
            let groups = compute();
            if slot.load(Ordering::SeqCst) != generation {
                tracing::trace!(%kind, generation, "dropping superseded result");
                return;
            }
            // The receiver lives as long as the worker; a send error only
            // means the worker is gone
            let _ = sender.send(Completed { ticket, groups });
        });

        // Shared so the job can still run inline if the thread cannot start
        let task = Arc::new(Mutex::new(Some(job)));
        let handle = Arc::clone(&task);
        let spawned = thread::Builder::new()
            .name(format!("tripspent-{}", kind))
            .spawn(move || {
                if let Some(job) = take_job(&handle) {
                    job();
                }
            });

        if let Err(e) = spawned {
            tracing::warn!(%kind, error = %e, "could not spawn recompute thread, running inline");
            if let Some(job) = take_job(&task) {
                job();
            }
        }

        ticket
    }

    /// Next finished computation, if one is waiting
    pub fn try_recv(&self) -> Option<Completed> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished computation
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completed> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

fn take_job(task: &Mutex<Option<Job>>) -> Option<Job> {
    task.lock().ok().and_then(|mut slot| slot.take())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn worker() -> RecomputeWorker {
        RecomputeWorker::new(GroupingCalendar::Fixed(FixedOffset::east_opt(0).unwrap()))
    }

    fn expenses(n: u32) -> Vec<Expense> {
        (1..=n)
            .map(|d| {
                Expense::new(
                    format!("e{}", d),
                    "desc",
                    Money::from_cents(100),
                    Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_generations_increase_per_kind() {
        let worker = worker();
        let a = worker.request_grouping(expenses(1));
        let b = worker.request_grouping(expenses(2));
        let f = worker.request_filter(Vec::new(), "x".into());

        assert_eq!(a.generation + 1, b.generation);
        assert_eq!(f.generation, 1);
        assert!(!worker.is_current(a));
        assert!(worker.is_current(b));
    }

    #[test]
    fn test_result_is_delivered() {
        let worker = worker();
        let ticket = worker.request_grouping(expenses(3));

        let done = worker.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(done.ticket, ticket);
        assert_eq!(done.groups.len(), 3);
    }

    #[test]
    fn test_supersede_invalidates_ticket() {
        let worker = worker();
        let ticket = worker.request_filter(Vec::new(), "coffee".into());
        worker.supersede(ComputeKind::Filtering);
        assert!(!worker.is_current(ticket));
    }
}
