pub mod cache;
pub mod cursor;
pub mod pager;
pub mod query_key;

pub use cache::{DiscardReason, MergeOutcome, PageRequest, PaginatedSearchCache};
pub use cursor::{PageCursor, cursor_after, next_cursor};
pub use pager::{PageSource, SearchPager};
pub use query_key::{SearchQueryKey, compute_key};
