//! Offset pagination primitives shared by list endpoints.
//!
//! The crate keeps two concerns apart:
//!
//! - [`PageRequest`] normalises client supplied `page`/`limit` query values.
//!   Parsing never fails: missing or non-numeric input falls back to the
//!   defaults, and out-of-range values are clamped.
//! - [`Page`] is the response envelope `{ items, page, totalPages, total }`
//!   returned to clients.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::from_raw(Some("3"), Some("20"));
//! assert_eq!(request.skip(), 40);
//!
//! let page = Page::new(vec!["a", "b"], request, 42);
//! assert_eq!(page.total_pages, 3);
//! ```

mod envelope;
mod request;

pub use envelope::{Page, total_pages};
pub use request::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, PageRequest};
