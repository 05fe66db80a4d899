//! Paginated API fetching
//!
//! Blocking HTTP client that follows `next` links of REST listings.

pub mod config;
pub mod paginated;

pub use config::FetchConfig;
pub use paginated::{
    collect_pages, fetch_all, merge_headers, FetchError, FetchResult, HttpPageSource, Page,
    PageSource, Paginator,
};
