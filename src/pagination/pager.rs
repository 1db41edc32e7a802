//! Cursor pager
//!
//! Drives a [`PageFetcher`] until the server reports no further page, the
//! caller's limit is reached, or the caller raises the stop signal. Records
//! are yielded in server order and at most one page is held in memory.

use super::types::{
    effective_page_size, Connection, NextPage, PageRequest, PaginationState, StopSignal,
};
use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::debug;

/// Stream of decoded records
pub type RecordStream<T> = Pin<Box<dyn Stream<Item = Result<T>> + Send>>;

/// Stream of whole page envelopes
pub type PageStream<T> = Pin<Box<dyn Stream<Item = Result<Connection<T>>> + Send>>;

/// Fetches one page of records
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Decoded record type
    type Record: Send + 'static;

    /// Fetch the page described by `request`
    async fn fetch_page(&self, request: &PageRequest) -> Result<Connection<Self::Record>>;
}

/// Builder and driver for one pagination run
pub struct Pager<F: PageFetcher> {
    fetcher: F,
    max_page_size: u32,
    limit: Option<u64>,
    cursor: Option<String>,
    stop: StopSignal,
}

impl<F: PageFetcher> Pager<F> {
    /// Create a pager for a resource with the given page-size ceiling
    pub fn new(fetcher: F, max_page_size: u32) -> Self {
        Self {
            fetcher,
            max_page_size,
            limit: None,
            cursor: None,
            stop: StopSignal::new(),
        }
    }

    /// Stop after this many records; `None` or zero means no limit
    #[must_use]
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit.filter(|l| *l > 0);
        self
    }

    /// Resume after a previously returned `endCursor`
    #[must_use]
    pub fn starting_after(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor.filter(|c| !c.is_empty());
        self
    }

    /// Share a stop signal with the consumer
    #[must_use]
    pub fn stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// Page size sent with every request
    pub fn page_size(&self) -> u32 {
        effective_page_size(self.max_page_size, self.limit)
    }

    /// Stream individual records
    ///
    /// The stop signal and the limit are checked before every record, so a
    /// consumer that stops mid-page causes no further requests.
    pub fn records(self) -> RecordStream<F::Record> {
        let run = Run::new(self);
        Box::pin(futures::stream::unfold(run, |mut run| async move {
            loop {
                if run.should_stop() {
                    return None;
                }
                if let Some(record) = run.buffer.pop_front() {
                    run.state.records_yielded += 1;
                    return Some((Ok(record), run));
                }
                if run.state.done {
                    return None;
                }
                match run.fetch().await {
                    Ok(page) => run.buffer.extend(page.nodes),
                    Err(e) => {
                        run.state.mark_done();
                        return Some((Err(e), run));
                    }
                }
            }
        }))
    }

    /// Stream whole pages, for callers that persist `endCursor` themselves
    ///
    /// With a limit set, the last page is cut short so the pages together
    /// never carry more records than the limit.
    pub fn pages(self) -> PageStream<F::Record> {
        let run = Run::new(self);
        Box::pin(futures::stream::unfold(run, |mut run| async move {
            if run.state.done || run.should_stop() {
                return None;
            }
            match run.fetch().await {
                Ok(mut page) => {
                    if let Some(remaining) = run.remaining() {
                        page.nodes.truncate(usize::try_from(remaining).unwrap_or(usize::MAX));
                    }
                    run.state.records_yielded += page.nodes.len() as u64;
                    Some((Ok(page), run))
                }
                Err(e) => {
                    run.state.mark_done();
                    Some((Err(e), run))
                }
            }
        }))
    }
}

/// State carried across polls of a pager stream
struct Run<F: PageFetcher> {
    fetcher: F,
    page_size: u32,
    limit: Option<u64>,
    stop: StopSignal,
    state: PaginationState,
    buffer: VecDeque<F::Record>,
}

impl<F: PageFetcher> Run<F> {
    fn new(pager: Pager<F>) -> Self {
        let page_size = pager.page_size();
        Self {
            fetcher: pager.fetcher,
            page_size,
            limit: pager.limit,
            stop: pager.stop,
            state: PaginationState::with_cursor(pager.cursor),
            buffer: VecDeque::new(),
        }
    }

    fn should_stop(&self) -> bool {
        if self.stop.is_stopped() {
            debug!(
                records = self.state.records_yielded,
                "Pagination stopped by caller"
            );
            return true;
        }
        if let Some(limit) = self.limit {
            if self.state.records_yielded >= limit {
                debug!(limit, "Pagination reached record limit");
                return true;
            }
        }
        false
    }

    /// Records still allowed under the limit
    fn remaining(&self) -> Option<u64> {
        self.limit
            .map(|limit| limit.saturating_sub(self.state.records_yielded))
    }

    async fn fetch(&mut self) -> Result<Connection<F::Record>> {
        let first = match self.remaining() {
            Some(remaining) => self.page_size.min(u32::try_from(remaining).unwrap_or(u32::MAX)),
            None => self.page_size,
        };
        let request = PageRequest {
            first,
            after: self.state.cursor.clone(),
        };
        let page = self.fetcher.fetch_page(&request).await?;
        self.state.advance(NextPage::from_page_info(&page.page_info));
        debug!(
            page = self.state.pages_fetched,
            records = page.nodes.len(),
            total_count = ?page.total_count,
            has_next_page = !self.state.done,
            "Fetched page"
        );
        Ok(page)
    }
}
