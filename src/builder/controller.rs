//! The page builder: single source of truth for the page being edited.
//!
//! Remote work is split into a `begin_*` step that snapshots what to send,
//! the request itself, and a `finish_*` step that applies the outcome. The
//! async wrappers run all three; the UI runs them separately so no borrow of
//! the controller is held across an await. Completions carry the generation
//! they were started in and are dropped if the builder was re-initialized
//! since.

use std::rc::Rc;

use crate::api::{PageStore, QuotaService};
use crate::common::{ApiError, BuilderError};
use crate::log_err;
use crate::models::{Block, BlockKind, Page, NEW_PAGE_ID};

use super::blocks::BlockEvent;
use super::reorder::move_item;
use super::reorder::renumber;

#[derive(Debug, Clone, PartialEq)]
pub enum BuilderState {
    Loading,
    Error(BuilderError),
    Ready(Page),
}

/// Read-only view of the builder for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderView {
    pub loading: bool,
    pub error: Option<BuilderError>,
    pub page: Option<Page>,
    pub saving: bool,
    pub save_error: Option<BuilderError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update(String),
}

/// A save in flight: the draft as it was when the save started.
#[derive(Debug, Clone)]
pub struct SaveTicket {
    generation: u64,
    mode: SaveMode,
    page: Page,
}

impl SaveTicket {
    pub fn mode(&self) -> &SaveMode {
        &self.mode
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn send(&self, store: &dyn PageStore) -> Result<Page, ApiError> {
        match &self.mode {
            SaveMode::Create => store.create(&self.page).await,
            SaveMode::Update(id) => store.update(id, &self.page).await,
        }
    }
}

/// Loads the page `page_id` of `owner_id`, or drafts a new one when the
/// quota allows it.
pub async fn load_page(
    store: &dyn PageStore,
    quota: &dyn QuotaService,
    owner_id: &str,
    page_id: &str,
) -> Result<Page, BuilderError> {
    if page_id == NEW_PAGE_ID {
        let limit = quota.check_page_limit(owner_id).await.map_err(|e| {
            log_err!(e, "page limit check failed for {}", owner_id);
            BuilderError::fetch()
        })?;

        if !limit.can_create {
            tracing::info!(owner_id, "page limit reached");
            return Err(BuilderError::page_limit(limit.message));
        }

        return Ok(Page::draft(owner_id));
    }

    let pages = store.list(owner_id).await.map_err(|e| {
        log_err!(e, "failed to fetch pages for {}", owner_id);
        BuilderError::fetch()
    })?;

    pages
        .into_iter()
        .find(|p| p.id == page_id)
        .ok_or_else(BuilderError::page_not_found)
}

pub struct PageBuilder {
    store: Rc<dyn PageStore>,
    quota: Rc<dyn QuotaService>,
    owner_id: String,
    state: BuilderState,
    saves_in_flight: usize,
    save_error: Option<BuilderError>,
    generation: u64,
}

impl PageBuilder {
    pub fn new(store: Rc<dyn PageStore>, quota: Rc<dyn QuotaService>) -> Self {
        Self {
            store,
            quota,
            owner_id: String::new(),
            state: BuilderState::Loading,
            saves_in_flight: 0,
            save_error: None,
            generation: 0,
        }
    }

    pub fn store(&self) -> Rc<dyn PageStore> {
        Rc::clone(&self.store)
    }

    pub fn quota(&self) -> Rc<dyn QuotaService> {
        Rc::clone(&self.quota)
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    pub fn page(&self) -> Option<&Page> {
        match &self.state {
            BuilderState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }

    pub fn view(&self) -> BuilderView {
        BuilderView {
            loading: matches!(self.state, BuilderState::Loading),
            error: match &self.state {
                BuilderState::Error(err) => Some(err.clone()),
                _ => None,
            },
            page: self.page().cloned(),
            saving: self.is_saving(),
            save_error: self.save_error.clone(),
        }
    }

    /// Resets to loading for `owner_id`. Returns the generation the load
    /// result must be finished with.
    pub fn begin_initialize(&mut self, owner_id: &str) -> u64 {
        self.generation += 1;
        self.owner_id = owner_id.to_string();
        self.state = BuilderState::Loading;
        self.saves_in_flight = 0;
        self.save_error = None;
        self.generation
    }

    pub fn finish_initialize(&mut self, generation: u64, result: Result<Page, BuilderError>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale page load");
            return;
        }

        self.state = match result {
            Ok(page) => BuilderState::Ready(page),
            Err(err) => BuilderState::Error(err),
        };
    }

    pub async fn initialize(&mut self, owner_id: &str, page_id: &str) {
        let generation = self.begin_initialize(owner_id);
        let result = load_page(self.store.as_ref(), self.quota.as_ref(), owner_id, page_id).await;
        self.finish_initialize(generation, result);
    }

    fn page_mut(&mut self) -> Option<&mut Page> {
        match &mut self.state {
            BuilderState::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(page) = self.page_mut() {
            page.title = title.to_string();
        }
    }

    /// Appends an empty block and returns its id.
    pub fn add_block(&mut self, kind: BlockKind) -> Option<String> {
        let page = self.page_mut()?;
        let block = Block::new(kind, page.blocks.len());
        let id = block.id.clone();
        page.blocks.push(block);
        Some(id)
    }

    /// Overwrites the content of `block_id`. Unknown ids are ignored.
    pub fn update_block_content(&mut self, block_id: &str, content: &str) {
        if let Some(block) = self
            .page_mut()
            .and_then(|p| p.blocks.iter_mut().find(|b| b.id == block_id))
        {
            block.content = content.to_string();
        }
    }

    /// Removes `block_id` and closes the gap in `order`.
    pub fn delete_block(&mut self, block_id: &str) {
        if let Some(page) = self.page_mut() {
            let before = page.blocks.len();
            page.blocks.retain(|b| b.id != block_id);
            if page.blocks.len() != before {
                renumber(&mut page.blocks);
            }
        }
    }

    /// Moves the block at `from` to `to`. Returns whether anything changed.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        self.page_mut()
            .is_some_and(|page| move_item(&mut page.blocks, from, to))
    }

    pub fn apply(&mut self, event: BlockEvent) {
        match event {
            BlockEvent::Changed { block_id, content } => {
                self.update_block_content(&block_id, &content)
            }
            BlockEvent::Deleted { block_id } => self.delete_block(&block_id),
        }
    }

    /// Snapshots the draft for saving. `None` unless ready.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        let generation = self.generation;
        let owner_id = self.owner_id.clone();
        let page = self.page_mut()?;
        if page.owner_id.is_empty() {
            page.owner_id = owner_id;
        }

        let mode = if page.is_new() {
            SaveMode::Create
        } else {
            SaveMode::Update(page.id.clone())
        };
        let ticket = SaveTicket {
            generation,
            mode,
            page: page.clone(),
        };

        self.saves_in_flight += 1;
        Some(ticket)
    }

    /// Applies a save outcome. A created page adopts the server's id; a
    /// failure, or a create answered without an id, keeps the draft and
    /// records a save error.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<Page, ApiError>,
    ) -> Result<(), BuilderError> {
        if ticket.generation != self.generation {
            tracing::debug!(generation = ticket.generation, "dropping stale save result");
            return Ok(());
        }

        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);

        let result = result.and_then(|saved| match ticket.mode {
            SaveMode::Create if saved.id.is_empty() || saved.is_new() => {
                Err(ApiError::Decode("created page carries no id".into()))
            }
            _ => Ok(saved),
        });

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                log_err!(e, "failed to save page {}", ticket.page.id);
                let err = BuilderError::save();
                self.save_error = Some(err.clone());
                return Err(err);
            }
        };

        self.save_error = None;
        if let Some(page) = self.page_mut() {
            if ticket.mode == SaveMode::Create && page.is_new() {
                page.id = saved.id;
            }
            page.created_at = saved.created_at.or(page.created_at);
            page.updated_at = saved.updated_at.or(page.updated_at);
        }

        tracing::info!(mode = ?ticket.mode, "page saved");
        Ok(())
    }

    pub async fn save(&mut self) -> Result<(), BuilderError> {
        let Some(ticket) = self.begin_save() else {
            return Ok(());
        };
        let result = ticket.send(self.store.as_ref()).await;
        self.finish_save(ticket, result)
    }
}
