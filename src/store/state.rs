//! StateStore - plain get/set holder
//!
//! No validation and no change notification: whoever mutates the store
//! is responsible for re-rendering.

use crate::config::PAGE_SIZE;
use crate::model::DetailRecord;

/// Which page of summaries to request next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    pub offset: u32,
    pub limit: u32,
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: PAGE_SIZE,
        }
    }
}

/// Application state: current page, current selection, cursor
#[derive(Debug, Default)]
pub struct StateStore {
    list: Vec<DetailRecord>,
    selected: Option<DetailRecord>,
    cursor: PaginationCursor,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[DetailRecord] {
        &self.list
    }

    pub fn set_list(&mut self, list: Vec<DetailRecord>) {
        self.list = list;
    }

    pub fn selected(&self) -> Option<&DetailRecord> {
        self.selected.as_ref()
    }

    pub fn set_selected(&mut self, record: Option<DetailRecord>) {
        self.selected = record;
    }

    pub fn offset(&self) -> u32 {
        self.cursor.offset
    }

    pub fn set_offset(&mut self, offset: u32) {
        self.cursor.offset = offset;
    }

    pub fn limit(&self) -> u32 {
        self.cursor.limit
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }
}
