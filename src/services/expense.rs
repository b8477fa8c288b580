//! Expense service
//!
//! Validation, persistence and audit logging for expense records, plus the
//! grouped listing used by the CLI.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Expense, ExpenseDraft, ExpenseId};
use crate::storage::{ExpenseSort, Storage};

use super::grouping::{group_expenses, GroupedExpenses};
use super::search::filter_groups;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create an expense from a draft
    pub fn create(&self, draft: ExpenseDraft) -> TrackerResult<Expense> {
        if let Some(cat_id) = draft.category_id {
            self.storage
                .categories
                .get(cat_id)?
                .ok_or_else(|| TrackerError::category_not_found(cat_id.to_string()))?;
        }

        let mut expense = draft.into_expense();
        expense.title = expense.title.trim().to_string();
        expense.subtitle = expense.subtitle.trim().to_string();

        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.title.clone()),
            &expense,
        )?;

        tracing::info!(id = %expense.id, amount = expense.amount.cents(), "expense created");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> TrackerResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full or short ID
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }
        self.storage.expenses.find(identifier)
    }

    /// All expenses, newest first
    pub fn list(&self) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// All expenses in the given order
    pub fn list_sorted(&self, sort: ExpenseSort) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.query(Some(sort))
    }

    /// Expenses grouped by local day, optionally narrowed by a title query
    pub fn list_grouped(&self, query: Option<&str>) -> TrackerResult<Vec<GroupedExpenses>> {
        let groups = group_expenses(&self.storage.expenses.get_all()?);
        Ok(match query {
            Some(q) => filter_groups(&groups, q),
            None => groups,
        })
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> TrackerResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| TrackerError::expense_not_found(id.to_string()))?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            id.to_string(),
            Some(expense.title.clone()),
            &expense,
        )?;

        tracing::info!(id = %id, "expense deleted");
        Ok(expense)
    }

    pub fn count(&self) -> TrackerResult<usize> {
        self.storage.expenses.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::TrackerPaths;
    use crate::models::{Category, CategoryId, Money};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn draft(title: &str, subtitle: &str, cents: i64) -> ExpenseDraft {
        ExpenseDraft {
            title: title.into(),
            subtitle: subtitle.into(),
            amount: Money::from_cents(cents),
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            category_id: None,
        }
    }

    #[test]
    fn test_create_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.create(draft(" Coffee ", "Flat white", 450)).unwrap();

        assert_eq!(expense.title, "Coffee");
        assert_eq!(service.count().unwrap(), 1);
        assert!(storage.paths().expenses_file().exists());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        for bad in [
            draft("", "desc", 100),
            draft("Title", "  ", 100),
            draft("Title", "desc", 0),
            draft("Title", "desc", -5),
        ] {
            let err = service.create(bad).unwrap_err();
            assert!(err.is_validation(), "unexpected error: {}", err);
        }
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_create_rejects_unknown_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let mut input = draft("Taxi", "Airport", 3000);
        input.category_id = Some(CategoryId::new());

        assert!(service.create(input).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_with_category() {
        let (_temp_dir, storage) = create_test_storage();
        let category = Category::new("Travel");
        storage.categories.upsert(category.clone()).unwrap();
        let service = ExpenseService::new(&storage);

        let mut input = draft("Taxi", "Airport", 3000);
        input.category_id = Some(category.id);
        service.create(input).unwrap();

        assert_eq!(storage.expenses.get_by_category(category.id).unwrap().len(), 1);
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(draft("Coffee", "x", 450)).unwrap();

        let found = service.find(&expense.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, expense.id);
        assert!(service.find("exp-nothere").unwrap().is_none());
    }

    #[test]
    fn test_list_grouped_with_query() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.create(draft("Coffee", "x", 450)).unwrap();
        service.create(draft("Groceries", "x", 4500)).unwrap();
        service.create(draft("Coffee Maker", "x", 9900)).unwrap();

        let all = service.list_grouped(None).unwrap();
        assert_eq!(all.iter().map(|g| g.len()).sum::<usize>(), 3);

        let coffee = service.list_grouped(Some("COFFEE")).unwrap();
        assert_eq!(coffee.iter().map(|g| g.len()).sum::<usize>(), 2);
    }

    #[test]
    fn test_delete_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.create(draft("Coffee", "x", 450)).unwrap();

        let deleted = service.delete(expense.id).unwrap();
        assert_eq!(deleted.id, expense.id);
        assert_eq!(service.count().unwrap(), 0);
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
