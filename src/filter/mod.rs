//! Filter descriptors: building them from form fields and applying
//! them to field data records.

mod builder;
mod descriptor;

pub use builder::{FilterBuilder, FilterError, FilterListener, FilterOptions, OptionKind};
pub use descriptor::{
    FilterDescriptor, FilterOperator, SEARCH_COLUMNS, SEARCH_FIELD, apply_filters, matches_all,
};
