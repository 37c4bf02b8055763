use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{SearchError, SearchFailure, SearchMode, SearchSession, DEFAULT_MIN_QUERY_LEN};
use crate::catalog::{is_catalog_id, CatalogError, SearchPage};

/// A dispatched search waiting for its catalog response.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    /// Sequence number; only the latest issued ticket may complete.
    pub seq: u64,
    /// Trimmed query.
    pub term: String,
    /// Requested page (1-based).
    pub page: u32,
    pub mode: SearchMode,
    /// Cancelled when the ticket is superseded or the session cleared.
    pub token: CancellationToken,
}

/// What happened to a response handed to [`SearchMachine::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response updated the session.
    Applied,
    /// A newer search or a clear superseded the ticket; nothing changed.
    Stale,
}

#[derive(Debug)]
struct InFlight {
    seq: u64,
    token: CancellationToken,
}

/// Synchronous search state transitions.
#[derive(Debug)]
pub struct SearchMachine {
    session: SearchSession,
    min_query_len: usize,
    last_seq: u64,
    in_flight: Option<InFlight>,
}

impl Default for SearchMachine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUERY_LEN)
    }
}

impl SearchMachine {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            session: SearchSession::default(),
            min_query_len,
            last_seq: 0,
            in_flight: None,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Start a search for `term` at `page`.
    ///
    /// Returns `Ok(None)` for a blank term and rejects terms shorter than the
    /// minimum; neither touches the session. Otherwise any in-flight search
    /// is cancelled and the session enters `Searching`.
    pub fn begin(&mut self, term: &str, page: u32) -> Result<Option<SearchTicket>, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(None);
        }

        let actual = term.chars().count();
        if actual < self.min_query_len {
            return Err(SearchError::QueryTooShort {
                min: self.min_query_len,
                actual,
            });
        }

        let mode = if is_catalog_id(term) {
            SearchMode::Identifier
        } else {
            SearchMode::Title
        };
        let page = match mode {
            SearchMode::Identifier => 1,
            SearchMode::Title => page.max(1),
        };

        if let Some(previous) = self.in_flight.take() {
            debug!("Search #{} superseded", previous.seq);
            previous.token.cancel();
        }

        self.last_seq += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            seq: self.last_seq,
            token: token.clone(),
        });
        self.session.start(term, mode, page);

        Ok(Some(SearchTicket {
            seq: self.last_seq,
            term: term.to_string(),
            page,
            mode,
            token,
        }))
    }

    /// Start fetching the page after the current one.
    ///
    /// Returns `None` when there is no active query, a search is already in
    /// flight, every reported page is loaded, or the last page added nothing.
    pub fn begin_load_more(&mut self) -> Option<SearchTicket> {
        if self.session.query().is_empty() || self.session.is_loading() || !self.session.has_more()
        {
            return None;
        }
        let next_page = self.session.page().checked_add(1)?;
        let query = self.session.query().to_string();
        self.begin(&query, next_page).ok().flatten()
    }

    /// Apply the catalog response for `ticket`.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchPage, CatalogError>,
    ) -> Completion {
        match &self.in_flight {
            Some(current) if current.seq == ticket.seq => {}
            _ => {
                debug!("Discarding response for stale search #{}", ticket.seq);
                return Completion::Stale;
            }
        }
        self.in_flight = None;

        match result {
            Ok(page) => self.session.apply_page(ticket.page, page),
            Err(e) => self
                .session
                .fail(SearchFailure::from_catalog(&e, &ticket.term)),
        }
        Completion::Applied
    }

    /// Return to `Idle`, invalidating any in-flight search.
    pub fn clear(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.token.cancel();
        }
        self.session = SearchSession::default();
    }
}
