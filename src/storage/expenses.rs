//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, keeps an index of
//! expenses by category, and pushes the refreshed expense list to any
//! subscriber whenever the set changes.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TrackerError;
use crate::models::{CategoryId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Direction of a sorted query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Field an expense query can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseSortField {
    Date,
    Title,
    Amount,
}

/// Sort key for `ExpenseRepository::query`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseSort {
    pub field: ExpenseSortField,
    pub order: SortOrder,
}

impl ExpenseSort {
    /// Most recent expense first; the order every list view starts from
    pub const NEWEST_FIRST: Self = Self {
        field: ExpenseSortField::Date,
        order: SortOrder::Descending,
    };

    pub fn new(field: ExpenseSortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Compare two expenses; equal keys fall back to creation order so the
    /// result does not depend on hash map iteration order
    pub fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        let primary = match self.field {
            ExpenseSortField::Date => a.date.cmp(&b.date),
            ExpenseSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            ExpenseSortField::Amount => a.amount.cmp(&b.amount),
        };
        let ordering = primary
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.as_uuid().cmp(b.id.as_uuid()));

        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Repository for expense persistence with a category index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: category_id -> expense_ids
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
    subscribers: Mutex<Vec<mpsc::Sender<Vec<Expense>>>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn read_data(&self) -> Result<RwLockReadGuard<'_, HashMap<ExpenseId, Expense>>, TrackerError> {
        self.data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_data(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<ExpenseId, Expense>>, TrackerError> {
        self.data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn write_index(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<CategoryId, Vec<ExpenseId>>>, TrackerError> {
        self.by_category
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load expenses from disk and rebuild the category index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        {
            let mut data = self.write_data()?;
            let mut by_category = self.write_index()?;

            data.clear();
            by_category.clear();

            for expense in file_data.expenses {
                if let Some(cat_id) = expense.category_id {
                    by_category.entry(cat_id).or_default().push(expense.id);
                }
                data.insert(expense.id, expense);
            }

            tracing::debug!(count = data.len(), "loaded expenses");
        }

        self.notify()
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), TrackerError> {
        let expenses = self.query(Some(ExpenseSort::NEWEST_FIRST))?;
        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        Ok(self.read_data()?.get(&id).cloned())
    }

    /// Find an expense by its full or short display ID
    pub fn find(&self, identifier: &str) -> Result<Option<Expense>, TrackerError> {
        Ok(self
            .read_data()?
            .values()
            .find(|e| e.id.matches(identifier))
            .cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, TrackerError> {
        self.query(Some(ExpenseSort::NEWEST_FIRST))
    }

    /// Get all expenses, optionally sorted
    ///
    /// Without a sort key the order is oldest date first.
    pub fn query(&self, sort: Option<ExpenseSort>) -> Result<Vec<Expense>, TrackerError> {
        let data = self.read_data()?;
        let mut expenses: Vec<_> = data.values().cloned().collect();
        let sort = sort.unwrap_or(ExpenseSort::new(
            ExpenseSortField::Date,
            SortOrder::Ascending,
        ));
        expenses.sort_by(|a, b| sort.compare(a, b));
        Ok(expenses)
    }

    /// Get the expenses filed under a category, newest first
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Expense>, TrackerError> {
        let data = self.read_data()?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category
            .get(&category_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut expenses: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        expenses.sort_by(|a, b| ExpenseSort::NEWEST_FIRST.compare(a, b));
        Ok(expenses)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), TrackerError> {
        {
            let mut data = self.write_data()?;
            let mut by_category = self.write_index()?;

            if let Some(old_cat) = data.get(&expense.id).and_then(|old| old.category_id) {
                if let Some(ids) = by_category.get_mut(&old_cat) {
                    ids.retain(|&id| id != expense.id);
                }
            }

            if let Some(cat_id) = expense.category_id {
                by_category.entry(cat_id).or_default().push(expense.id);
            }

            data.insert(expense.id, expense);
        }

        self.notify()
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, TrackerError> {
        let removed = {
            let mut data = self.write_data()?;
            let mut by_category = self.write_index()?;

            let removed = data.remove(&id);
            if let Some(cat_id) = removed.as_ref().and_then(|e| e.category_id) {
                if let Some(ids) = by_category.get_mut(&cat_id) {
                    ids.retain(|&eid| eid != id);
                }
            }
            removed
        };

        if removed.is_some() {
            self.notify()?;
        }
        Ok(removed)
    }

    /// Delete every expense filed under a category, returning the removed ones
    pub fn delete_by_category(&self, category_id: CategoryId) -> Result<Vec<Expense>, TrackerError> {
        let removed: Vec<Expense> = {
            let mut data = self.write_data()?;
            let mut by_category = self.write_index()?;

            by_category
                .remove(&category_id)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|id| data.remove(&id))
                .collect()
        };

        if !removed.is_empty() {
            self.notify()?;
        }
        Ok(removed)
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, TrackerError> {
        Ok(self.read_data()?.len())
    }

    /// Subscribe to change notifications
    ///
    /// The receiver gets the full expense list, newest first, after every
    /// load, insert, update or delete. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Result<mpsc::Receiver<Vec<Expense>>, TrackerError> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers
            .lock()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire subscriber lock: {}", e)))?
            .push(sender);
        Ok(receiver)
    }

    fn notify(&self) -> Result<(), TrackerError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire subscriber lock: {}", e)))?;

        if subscribers.is_empty() {
            return Ok(());
        }

        let snapshot = self.get_all()?;
        subscribers.retain(|sender| sender.send(snapshot.clone()).is_ok());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(title: &str, day: u32, cents: i64) -> Expense {
        Expense::new(
            title,
            "desc",
            Money::from_cents(cents),
            Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Coffee", 1, 450);
        let id = e.id;

        repo.upsert(e).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.title, "Coffee");
        assert_eq!(repo.find(&id.to_string()).unwrap().unwrap().id, id);
    }

    #[test]
    fn test_get_all_is_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(expense("Old", 1, 100)).unwrap();
        repo.upsert(expense("New", 20, 100)).unwrap();
        repo.upsert(expense("Mid", 10, 100)).unwrap();

        let titles: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_query_by_amount_and_title() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(expense("banana", 1, 300)).unwrap();
        repo.upsert(expense("Apple", 2, 100)).unwrap();
        repo.upsert(expense("cherry", 3, 200)).unwrap();

        let by_amount = repo
            .query(Some(ExpenseSort::new(ExpenseSortField::Amount, SortOrder::Descending)))
            .unwrap();
        let amounts: Vec<_> = by_amount.iter().map(|e| e.amount.cents()).collect();
        assert_eq!(amounts, vec![300, 200, 100]);

        let by_title = repo
            .query(Some(ExpenseSort::new(ExpenseSortField::Title, SortOrder::Ascending)))
            .unwrap();
        let titles: Vec<_> = by_title.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_unsorted_query_is_oldest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(expense("Mid", 10, 100)).unwrap();
        repo.upsert(expense("New", 20, 100)).unwrap();
        repo.upsert(expense("Old", 1, 100)).unwrap();

        let titles: Vec<_> = repo.query(None).unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Old", "Mid", "New"]);
    }

    #[test]
    fn test_category_index() {
        let (_temp_dir, repo) = create_test_repo();
        let travel = CategoryId::new();
        let food = CategoryId::new();

        repo.upsert(expense("Flight", 1, 30000).with_category(Some(travel))).unwrap();
        repo.upsert(expense("Hotel", 2, 20000).with_category(Some(travel))).unwrap();
        let mut lunch = expense("Lunch", 3, 1200).with_category(Some(travel));
        repo.upsert(lunch.clone()).unwrap();

        // Recategorize: index must follow
        lunch.category_id = Some(food);
        repo.upsert(lunch).unwrap();

        assert_eq!(repo.get_by_category(travel).unwrap().len(), 2);
        assert_eq!(repo.get_by_category(food).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_category() {
        let (_temp_dir, repo) = create_test_repo();
        let travel = CategoryId::new();

        repo.upsert(expense("Flight", 1, 30000).with_category(Some(travel))).unwrap();
        repo.upsert(expense("Hotel", 2, 20000).with_category(Some(travel))).unwrap();
        repo.upsert(expense("Coffee", 3, 400)).unwrap();

        let removed = repo.delete_by_category(travel).unwrap();
        assert_eq!(removed.len(), 2);
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get_by_category(travel).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let category = CategoryId::new();
        let e = expense("Coffee", 1, 450).with_category(Some(category));
        let id = e.id;

        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 450);
        assert_eq!(repo2.get_by_category(category).unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Coffee", 1, 450);
        let id = e.id;

        repo.upsert(e).unwrap();
        assert!(repo.delete(id).unwrap().is_some());
        assert!(repo.delete(id).unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_subscribers_receive_refreshed_list() {
        let (_temp_dir, repo) = create_test_repo();
        let receiver = repo.subscribe().unwrap();

        let first = expense("Coffee", 1, 450);
        let first_id = first.id;
        repo.upsert(first).unwrap();
        repo.upsert(expense("Tea", 2, 300)).unwrap();
        repo.delete(first_id).unwrap();

        let snapshots: Vec<Vec<Expense>> = receiver.try_iter().collect();
        let sizes: Vec<_> = snapshots.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![1, 2, 1]);
        assert_eq!(snapshots[2][0].title, "Tea");
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let (_temp_dir, repo) = create_test_repo();
        drop(repo.subscribe().unwrap());

        repo.upsert(expense("Coffee", 1, 450)).unwrap();
        assert!(repo.subscribers.lock().unwrap().is_empty());
    }
}
