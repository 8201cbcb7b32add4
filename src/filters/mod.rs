//! Filter state for the player listing.
//!
//! [`FilterCriteria`] is the immutable description of what to fetch,
//! [`FilterEdit`] is a single typed change to it, and [`FilterStateManager`]
//! owns the editable state and decides when an edit is committed.

mod criteria;
pub mod debounce;
mod manager;

pub use criteria::{
    BoundIssue, DEFAULT_PAGE_SIZE, FilterCriteria, FilterEdit, FilterField, FilterInputError,
};
pub use debounce::QuiescenceTimer;
pub use manager::{CommitCallback, DEFAULT_DEBOUNCE, FilterStateManager};
