//! Form state for the filter panel.
//!
//! The scalar fields and the committed descriptor list are separate
//! entry points: `apply` rebuilds the list from the fields, while
//! `remove` edits the list directly and leaves the fields alone.

use std::fmt;

use thiserror::Error;

use super::descriptor::{FilterDescriptor, FilterOperator, SEARCH_FIELD};

/// Values offered by the category and location pickers
#[derive(Clone, Debug, PartialEq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            categories: ["water", "health", "climate", "environment"]
                .into_iter()
                .map(String::from)
                .collect(),
            locations: ["Nairobi", "Mombasa", "Kisumu", "Nakuru", "Eldoret"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Which picker a value was checked against
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Category,
    Location,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Category => write!(f, "category"),
            OptionKind::Location => write!(f, "location"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unknown {kind}: {value}")]
    UnknownOption { kind: OptionKind, value: String },
}

pub type FilterListener = Box<dyn FnMut(&[FilterDescriptor]) + Send>;

pub struct FilterBuilder {
    options: FilterOptions,
    search: Option<String>,
    category: Option<String>,
    location: Option<String>,
    date_from: Option<String>,
    date_to: Option<String>,
    committed: Vec<FilterDescriptor>,
    listener: Option<FilterListener>,
}

fn populated(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl FilterBuilder {
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            search: None,
            category: None,
            location: None,
            date_from: None,
            date_to: None,
            committed: Vec::new(),
            listener: None,
        }
    }

    /// Called with the committed list every time it changes
    pub fn on_change(mut self, listener: impl FnMut(&[FilterDescriptor]) + Send + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn committed(&self) -> &[FilterDescriptor] {
        &self.committed
    }

    pub fn set_search(&mut self, value: &str) {
        self.search = populated(value);
    }

    pub fn set_category(&mut self, value: &str) -> Result<(), FilterError> {
        self.category = self.pick(OptionKind::Category, value)?;
        Ok(())
    }

    pub fn set_location(&mut self, value: &str) -> Result<(), FilterError> {
        self.location = self.pick(OptionKind::Location, value)?;
        Ok(())
    }

    pub fn set_date_from(&mut self, value: &str) {
        self.date_from = populated(value);
    }

    pub fn set_date_to(&mut self, value: &str) {
        self.date_to = populated(value);
    }

    fn pick(&self, kind: OptionKind, value: &str) -> Result<Option<String>, FilterError> {
        let Some(value) = populated(value) else {
            return Ok(None);
        };
        let allowed = match kind {
            OptionKind::Category => &self.options.categories,
            OptionKind::Location => &self.options.locations,
        };
        allowed
            .iter()
            .find(|o| o.eq_ignore_ascii_case(&value))
            .map(|o| Some(o.clone()))
            .ok_or(FilterError::UnknownOption { kind, value })
    }

    /// Replaces the committed list with descriptors for every populated
    /// field, in the order search, category, location, from, to. Both
    /// date bounds include the day they name.
    pub fn apply(&mut self) -> &[FilterDescriptor] {
        let mut descriptors = Vec::new();
        if let Some(search) = &self.search {
            descriptors.push(FilterDescriptor::new(
                SEARCH_FIELD,
                FilterOperator::Contains,
                search,
            ));
        }
        if let Some(category) = &self.category {
            descriptors.push(FilterDescriptor::new(
                "category",
                FilterOperator::Equals,
                category,
            ));
        }
        if let Some(location) = &self.location {
            descriptors.push(FilterDescriptor::new(
                "location",
                FilterOperator::Equals,
                location,
            ));
        }
        if let Some(from) = &self.date_from {
            descriptors.push(FilterDescriptor::new(
                "created_at",
                FilterOperator::Greater,
                from,
            ));
        }
        if let Some(to) = &self.date_to {
            descriptors.push(FilterDescriptor::new("created_at", FilterOperator::Less, to));
        }

        tracing::debug!(count = descriptors.len(), "Applying filters");
        self.committed = descriptors;
        self.notify();
        &self.committed
    }

    /// Empties every field and the committed list
    pub fn clear_all(&mut self) {
        self.search = None;
        self.category = None;
        self.location = None;
        self.date_from = None;
        self.date_to = None;
        self.committed.clear();
        self.notify();
    }

    /// Drops one committed descriptor by position
    pub fn remove(&mut self, index: usize) -> Option<FilterDescriptor> {
        if index >= self.committed.len() {
            return None;
        }
        let removed = self.committed.remove(index);
        self.notify();
        Some(removed)
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.committed);
        }
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}
