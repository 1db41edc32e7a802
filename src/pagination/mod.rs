//! Pagination module
//!
//! Cursor-based pagination over Relay-style connections
//! (`nodes`, `pageInfo { hasNextPage, endCursor }`, `totalCount`).
//!
//! # Overview
//!
//! A [`PageFetcher`] knows how to fetch one page; the [`Pager`] decides the
//! page size, advances the cursor, and turns the pages into a lazy record
//! stream that honours a limit and a [`StopSignal`].

mod pager;
mod types;

pub use pager::{PageFetcher, PageStream, Pager, RecordStream};
pub use types::{
    effective_page_size, Connection, NextPage, PageInfo, PageRequest, PaginationState,
    StopSignal,
};
