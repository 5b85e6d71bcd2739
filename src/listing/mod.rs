//! Entity list pages
//!
//! - [`ListQuery`]: pagination, sort, search and filters, as carried in the URL
//! - [`ListPage`]: fetches through a [`RecordSource`] and keeps the result
//! - [`RequestSequencer`]: drops responses that a newer fetch overtook
//! - [`Debouncer`]: delays search until typing pauses

mod debounce;
mod page;
mod query;
mod sequencer;

pub use debounce::Debouncer;
pub use page::{ListPage, ListSnapshot, LoadOutcome, RecordSource};
pub use query::{ListQuery, SortDir, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY};
pub use sequencer::{RequestSequencer, Ticket};
