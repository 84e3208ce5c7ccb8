//! Paginated list of catalog entries.
//!
//! Every load hands out a [`LoadTicket`]. Only the ticket from the most recent
//! load may install its result, so a slow response for a page the user already
//! left cannot overwrite the page they are looking at.

use chrono::NaiveDate;
use shared::protocol::{self, PageRequest, PagedResult, VideoGame, DEFAULT_PAGE_NUMBER};
use tracing::{debug, error, info};

use crate::{CatalogApi, CatalogError};

pub const LIST_LOAD_ERROR: &str = "Failed to load video games. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub request: PageRequest,
}

#[derive(Debug)]
pub struct ListView {
    state: ListState,
    page_number: u32,
    page_size: u32,
    items: Vec<VideoGame>,
    total_count: u64,
    total_pages: u32,
    generation: u64,
}

impl ListView {
    pub fn new(page_size: u32) -> Self {
        Self {
            state: ListState::Loading,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size,
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            generation: 0,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = ListState::Loading;
        LoadTicket {
            generation: self.generation,
            request: PageRequest::new(self.page_number, self.page_size),
        }
    }

    /// Range checks belong to the pagination control, not here.
    pub fn begin_page_change(&mut self, page_number: u32) -> LoadTicket {
        self.page_number = page_number;
        self.begin_load()
    }

    /// Returns `false` when the ticket was superseded and the result dropped.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<PagedResult<VideoGame>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                page_number = ticket.request.page_number,
                current_page = self.page_number,
                "list: dropping stale page response"
            );
            return false;
        }

        match result {
            Ok(page) => {
                info!(
                    page_number = ticket.request.page_number,
                    items = page.items.len(),
                    total_count = page.total_count,
                    "list: page loaded"
                );
                self.items = page.items;
                self.total_count = page.total_count;
                self.total_pages = page.total_pages;
                self.state = ListState::Loaded;
            }
            Err(err) => {
                error!(
                    page_number = ticket.request.page_number,
                    error = %err,
                    "list: failed to load video games"
                );
                self.items.clear();
                self.total_count = 0;
                self.total_pages = 0;
                self.state = ListState::Error(LIST_LOAD_ERROR.to_string());
            }
        }
        true
    }

    pub async fn load(&mut self, api: &dyn CatalogApi) {
        let ticket = self.begin_load();
        let result = api.list(ticket.request).await;
        self.apply(ticket, result);
    }

    pub async fn change_page(&mut self, api: &dyn CatalogApi, page_number: u32) {
        let ticket = self.begin_page_change(page_number);
        let result = api.list(ticket.request).await;
        self.apply(ticket, result);
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn items(&self) -> &[VideoGame] {
        &self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn showing_range(&self) -> (u64, u64) {
        protocol::showing_range(self.page_number, self.page_size, self.total_count)
    }
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
