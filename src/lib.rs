//! Aggregation core for the EV population dashboard.
//!
//! Loads the Washington EV registration CSV into typed records and derives
//! the grouped counts, top-N rankings, and per-year range summaries the
//! dashboard renders. The engine itself ([`aggregate`]) is pure and
//! synchronous; [`loader`] is the crate's only asynchronous boundary.

pub mod aggregate;
pub mod fetch;
pub mod loader;
pub mod output;
pub mod parser;
pub mod record;
pub mod report;
