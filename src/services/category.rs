//! Category service
//!
//! Category creation, lookup, usage ordering and the confirmed cascade
//! delete. A category's expenses are always answered by the expense
//! repository's category index.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, CategoryId, CategoryUsage, Expense};
use crate::storage::Storage;

/// Warning shown before a category is deleted
pub const CATEGORY_DELETE_WARNING: &str =
    "Deleting this category will remove all related expenses. This cannot be undone.";

/// Order categories by how many expenses use them, most-used first
///
/// The sort is stable: categories with the same count keep their input
/// order, which is creation order when fed from the repository.
pub fn order_by_usage(mut usages: Vec<CategoryUsage>) -> Vec<CategoryUsage> {
    usages.sort_by(|a, b| b.expense_count().cmp(&a.expense_count()));
    usages
}

/// What a confirmed category delete removed
#[derive(Debug, Clone)]
pub struct CategoryDeletion {
    pub category: Category,
    pub removed_expenses: Vec<Expense>,
}

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str) -> TrackerResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name);
        category
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> TrackerResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name (case-insensitive) or by ID string
    pub fn find(&self, identifier: &str) -> TrackerResult<Option<Category>> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(category) = self.storage.categories.get(id)? {
                return Ok(Some(category));
            }
        }
        self.storage.categories.find(identifier)
    }

    /// All categories in creation order
    pub fn list(&self) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Expenses filed under a category, newest first
    pub fn expenses_for(&self, id: CategoryId) -> TrackerResult<Vec<Expense>> {
        self.storage.expenses.get_by_category(id)
    }

    /// Every category with its expenses, most-used first
    pub fn list_by_usage(&self) -> TrackerResult<Vec<CategoryUsage>> {
        let usages = self
            .list()?
            .into_iter()
            .map(|category| {
                let expenses = self.storage.expenses.get_by_category(category.id)?;
                Ok(CategoryUsage::new(category, expenses))
            })
            .collect::<TrackerResult<Vec<_>>>()?;

        Ok(order_by_usage(usages))
    }

    /// Delete a category together with every expense filed under it
    ///
    /// Nothing is touched unless `confirmed` is true; an unconfirmed call
    /// returns `TrackerError::ConfirmationRequired` carrying the warning text.
    pub fn delete(&self, id: CategoryId, confirmed: bool) -> TrackerResult<CategoryDeletion> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        if !confirmed {
            return Err(TrackerError::ConfirmationRequired(
                CATEGORY_DELETE_WARNING.to_string(),
            ));
        }

        let removed_expenses = self.storage.expenses.delete_by_category(id)?;
        self.storage.expenses.save()?;

        for expense in &removed_expenses {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.to_string(),
                Some(expense.title.clone()),
                expense,
            )?;
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        tracing::info!(
            id = %id,
            removed = removed_expenses.len(),
            "category deleted with its expenses"
        );

        Ok(CategoryDeletion {
            category,
            removed_expenses,
        })
    }

    pub fn count(&self) -> TrackerResult<usize> {
        self.storage.categories.count()
    }
}
