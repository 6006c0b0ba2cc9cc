use log::debug;
use std::future::Future;

/// Number of records requested per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// The remote side of a paginated list
pub trait PageSource<T> {
    type Error;

    /// Fetches up to `limit` records starting at `offset`
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<T>, Self::Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// The first page, which replaces the list
    First,
    /// A following page, appended to the list
    Next,
}

/// A page request that has been issued but not yet applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: PageKind,
    pub offset: usize,
    pub limit: usize,
    generation: u64,
}

/// What applying a fetched page did to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The list was replaced by a first page of this many records
    Replaced(usize),
    /// This many records were appended
    Appended(usize),
    /// An empty page arrived; no further pages will be requested
    Exhausted,
    /// The response belonged to an outdated request and was dropped
    Stale,
    /// Nothing was requested because the list is exhausted or still loading
    Skipped,
}

/// Offset-based incremental loading of a remote list.
///
/// Requests are issued with [`Paginator::begin_first`] or
/// [`Paginator::begin_next`] and their responses handed to
/// [`Paginator::apply`], which drops responses that no longer fit the list:
/// any page issued before the latest first-page load, and any following page
/// whose offset has already been filled. Exhaustion is permanent until the
/// next first-page load.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    has_more: bool,
    offset: usize,
    page_size: usize,
    generation: u64,
    awaiting_first: bool,
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Paginator<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
            offset: 0,
            page_size: page_size.max(1),
            generation: 0,
            awaiting_first: false,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Issues a request for the first page, invalidating every request issued before it
    pub fn begin_first(&mut self) -> PageRequest {
        self.generation += 1;
        self.awaiting_first = true;

        PageRequest {
            kind: PageKind::First,
            offset: 0,
            limit: self.page_size,
            generation: self.generation,
        }
    }

    /// Issues a request for the page at the current offset
    ///
    /// # Returns
    /// `None` when the list is exhausted or its first page has not arrived yet
    pub fn begin_next(&self) -> Option<PageRequest> {
        (self.has_more && !self.awaiting_first).then_some(PageRequest {
            kind: PageKind::Next,
            offset: self.offset,
            limit: self.page_size,
            generation: self.generation,
        })
    }

    /// Applies the response to a previously issued request
    pub fn apply(&mut self, request: PageRequest, batch: Vec<T>) -> PageOutcome {
        if request.generation != self.generation {
            debug!(
                "dropping page at offset {} from an outdated load",
                request.offset
            );
            return PageOutcome::Stale;
        }

        match request.kind {
            PageKind::First => {
                if !self.awaiting_first {
                    debug!("dropping duplicate first page");
                    return PageOutcome::Stale;
                }

                let count = batch.len();
                self.items = batch;
                self.has_more = true;
                self.offset = self.page_size;
                self.awaiting_first = false;

                PageOutcome::Replaced(count)
            }
            PageKind::Next => {
                if self.awaiting_first || request.offset != self.offset {
                    debug!(
                        "dropping page at offset {}, cursor is at {}",
                        request.offset, self.offset
                    );
                    return PageOutcome::Stale;
                }

                if batch.is_empty() {
                    self.has_more = false;
                    return PageOutcome::Exhausted;
                }

                let count = batch.len();
                self.items.extend(batch);
                self.offset += self.page_size;

                PageOutcome::Appended(count)
            }
        }
    }

    /// Withdraws a request whose fetch failed
    ///
    /// A failed first page no longer blocks following pages; the list keeps
    /// its items and cursor.
    pub fn cancel(&mut self, request: PageRequest) {
        if request.kind == PageKind::First && request.generation == self.generation {
            debug!("first page failed, resuming from offset {}", self.offset);
            self.awaiting_first = false;
        }
    }

    /// Fetches the first page and replaces the list with it
    pub async fn load_first<S>(&mut self, source: &S) -> Result<PageOutcome, S::Error>
    where
        S: PageSource<T>,
    {
        let request = self.begin_first();

        match source.fetch_page(request.offset, request.limit).await {
            Ok(batch) => Ok(self.apply(request, batch)),
            Err(err) => {
                self.cancel(request);
                Err(err)
            }
        }
    }

    /// Fetches the page at the current offset and appends it
    pub async fn fetch_more<S>(&mut self, source: &S) -> Result<PageOutcome, S::Error>
    where
        S: PageSource<T>,
    {
        let Some(request) = self.begin_next() else {
            return Ok(PageOutcome::Skipped);
        };

        let batch = source.fetch_page(request.offset, request.limit).await?;

        Ok(self.apply(request, batch))
    }
}

/// The remote side of a search box
pub trait SearchSource<T> {
    type Error;

    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<T>, Self::Error>>;
}

/// An issued search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    sequence: u64,
}

/// Search results that always reflect the most recently issued query.
///
/// Responses to superseded queries are discarded even if they arrive last.
#[derive(Debug, Clone)]
pub struct Search<T> {
    issued: u64,
    query: String,
    results: Vec<T>,
}

impl<T> Default for Search<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            query: String::new(),
            results: Vec::new(),
        }
    }
}

impl<T> Search<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[T] {
        &self.results
    }

    pub fn begin(&mut self, query: &str) -> SearchRequest {
        self.issued += 1;
        SearchRequest {
            query: query.to_string(),
            sequence: self.issued,
        }
    }

    /// Stores `results` if `request` is the latest issued one
    ///
    /// # Returns
    /// `true` if the results were applied
    pub fn apply(&mut self, request: SearchRequest, results: Vec<T>) -> bool {
        if request.sequence != self.issued {
            debug!("dropping results for superseded query {:?}", request.query);
            return false;
        }

        self.query = request.query;
        self.results = results;
        true
    }

    /// Runs a query to completion and stores its results
    pub async fn run<S>(&mut self, source: &S, query: &str) -> Result<bool, S::Error>
    where
        S: SearchSource<T>,
    {
        let request = self.begin(query);
        let results = source.search(&request.query).await?;

        Ok(self.apply(request, results))
    }
}
