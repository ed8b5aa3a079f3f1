// src/form.rs

//! The form manager: one entry per catalog descriptor, pairing a board pip
//! with an optional placed form field. Placement flows through two column
//! sets with opposite lifecycles. The board set is rebuilt wholesale from
//! the sorted, filtered page slice, so it is always packed. The form set
//! mutates incrementally as fields come and go, so removals leave gaps that
//! a debounced rebalance closes later.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chrono::NaiveDate;

use crate::catalog::FieldDescriptor;
use crate::columns::{ColumnId, ColumnSet};
use crate::config::FieldboardConfig;
use crate::favorites::FavoritesStore;
use crate::search::SearchFilter;
use crate::util::debounce::Debouncer;
use crate::{log_debug, log_warn};

/// Toggle-chip state for one descriptor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipState {
    pub active: bool,
    pub favourite: bool,
}

/// Placement state for one descriptor's form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldState {
    pub placed: bool,
    pub column: Option<ColumnId>,
}

/// Current input value of a placed field. The variant is fixed by the
/// descriptor's kind and survives remove/re-add cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    DateSingle(Option<NaiveDate>),
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

impl FieldValue {
    pub fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        if descriptor.is_date_range() {
            FieldValue::DateRange {
                from: None,
                to: None,
            }
        } else if descriptor.is_date_single() {
            FieldValue::DateSingle(None)
        } else {
            FieldValue::Text(String::new())
        }
    }

    /// Sets the range start (or the single date). A start past the current
    /// end is clamped back to the end, so the bounds can never cross.
    pub fn set_from(&mut self, date: NaiveDate) {
        match self {
            FieldValue::DateRange { from, to } => {
                *from = Some(match to {
                    Some(to) => date.min(*to),
                    None => date,
                });
            }
            FieldValue::DateSingle(single) => *single = Some(date),
            FieldValue::Text(_) => {}
        }
    }

    /// Sets the range end (or the single date), clamped up to the start.
    pub fn set_to(&mut self, date: NaiveDate) {
        match self {
            FieldValue::DateRange { from, to } => {
                *to = Some(match from {
                    Some(from) => date.max(*from),
                    None => date,
                });
            }
            FieldValue::DateSingle(single) => *single = Some(date),
            FieldValue::Text(_) => {}
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::DateSingle(single) => single.is_none(),
            FieldValue::DateRange { from, to } => from.is_none() && to.is_none(),
        }
    }

    /// One-line rendering for the form widget.
    pub fn summary(&self) -> String {
        fn fmt(date: &Option<NaiveDate>) -> String {
            match date {
                Some(date) => date.format("%Y-%m-%d").to_string(),
                None => "____-__-__".to_string(),
            }
        }
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::DateSingle(single) => fmt(single),
            FieldValue::DateRange { from, to } => format!("{} .. {}", fmt(from), fmt(to)),
        }
    }
}

/// One catalog descriptor with its paired pip and field state.
#[derive(Debug, Clone)]
pub struct FieldEntry {
    pub descriptor: FieldDescriptor,
    pub pip: PipState,
    pub field: FieldState,
    pub value: FieldValue,
}

impl FieldEntry {
    fn new(descriptor: FieldDescriptor, favourite: bool) -> Self {
        let value = FieldValue::for_descriptor(&descriptor);
        Self {
            descriptor,
            pip: PipState {
                active: false,
                favourite,
            },
            field: FieldState::default(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Favourites first, then name ascending.
    #[default]
    Favourites,
    /// Name ascending only.
    Alphabetical,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Favourites => "faves",
            SortMode::Alphabetical => "a-z",
        }
    }
}

pub struct FormManager {
    entries: Vec<FieldEntry>,
    index: HashMap<String, usize>,
    pending: VecDeque<FieldDescriptor>,
    build_batch: usize,
    favorites: FavoritesStore,
    pip_columns: ColumnSet<String>,
    field_columns: ColumnSet<String>,
    pip_cols_per_page: usize,
    sort_mode: SortMode,
    page: usize,
    filter: SearchFilter,
    rebalance: Debouncer,
    align_sync: Debouncer,
    single_column_centered: bool,
}

impl FormManager {
    /// Builds a manager over `catalog`. Only the first batch of descriptors
    /// is materialized here; the rest stream in through [`on_tick`] so a
    /// large catalog never stalls startup.
    ///
    /// [`on_tick`]: FormManager::on_tick
    pub fn new(
        catalog: Vec<FieldDescriptor>,
        favorites: FavoritesStore,
        config: &FieldboardConfig,
    ) -> Self {
        let window = Duration::from_millis(config.debounce_ms);
        let mut manager = Self {
            entries: Vec::with_capacity(catalog.len()),
            index: HashMap::with_capacity(catalog.len()),
            pending: catalog.into(),
            build_batch: config.build_batch.max(1),
            favorites,
            pip_columns: ColumnSet::new(config.pip_capacity),
            field_columns: ColumnSet::new(config.field_capacity),
            pip_cols_per_page: config.pip_cols_per_page.max(1),
            sort_mode: SortMode::default(),
            page: 1,
            filter: SearchFilter::default(),
            rebalance: Debouncer::new(window),
            align_sync: Debouncer::new(window),
            single_column_centered: false,
        };
        manager.load_batch();
        manager.redistribute_pips();
        manager.sync_alignment();
        manager
    }

    /// Materializes the next slice of pending descriptors. Remembered
    /// favourites start out active and placed in the form.
    fn load_batch(&mut self) {
        let started = std::time::Instant::now();
        let take = self.build_batch.min(self.pending.len());
        for _ in 0..take {
            let Some(descriptor) = self.pending.pop_front() else {
                break;
            };
            if self.index.contains_key(&descriptor.id) {
                log_warn!("Dropping duplicate field id {}", descriptor.id);
                continue;
            }
            let favourite = self.favorites.is_favourite(&descriptor.id);
            let mut entry = FieldEntry::new(descriptor, favourite);
            if favourite {
                let column = self.field_columns.insert(entry.descriptor.id.clone());
                entry.pip.active = true;
                entry.field = FieldState {
                    placed: true,
                    column: Some(column),
                };
            }
            self.index
                .insert(entry.descriptor.id.clone(), self.entries.len());
            self.entries.push(entry);
        }
        if take > 0 {
            log_debug!(
                "Materialized {} entries in {:?} ({} still pending)",
                take,
                started.elapsed(),
                self.pending.len()
            );
        }
    }

    /// Drives deferred work from the main loop's tick: the next catalog
    /// batch, then any elapsed debounce window. Returns `true` when
    /// something changed and the view should redraw.
    pub fn on_tick(&mut self) -> bool {
        let mut changed = false;
        if !self.pending.is_empty() {
            self.load_batch();
            self.redistribute_pips();
            changed = true;
        }
        if self.rebalance.fire() {
            self.field_columns.rebalance();
            self.sync_column_refs();
            self.sync_alignment();
            changed = true;
        }
        if self.align_sync.fire() {
            self.sync_alignment();
            changed = true;
        }
        changed
    }

    pub fn entry(&self, id: &str) -> Option<&FieldEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[FieldEntry] {
        &self.entries
    }

    pub fn pip_columns(&self) -> &ColumnSet<String> {
        &self.pip_columns
    }

    pub fn field_columns(&self) -> &ColumnSet<String> {
        &self.field_columns
    }

    /// True while the form holds exactly one column; the view centers it.
    pub fn single_column_centered(&self) -> bool {
        self.single_column_centered
    }

    pub fn loaded_len(&self) -> usize {
        self.entries.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn rebalance_pending(&self) -> bool {
        self.rebalance.is_armed()
    }

    /// Toggles the pip at `id` if it is on the rendered page. A pip that is
    /// filtered out or paginated away is ignored, same as a click landing
    /// on a control that is not in the view.
    pub fn toggle_pip(&mut self, id: &str) -> bool {
        if !self.pip_columns.iter().any(|x| x.as_str() == id) {
            log_debug!("Ignoring toggle for off-board pip {}", id);
            return false;
        }
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        if self.entries[i].pip.active {
            self.deactivate_field(id)
        } else {
            self.activate_field(id)
        }
    }

    /// Flips the favourite flag for `id`, persisting through the store. The
    /// pip stays where it is; ordering catches up on the next board render.
    /// Returns the new favourite state.
    pub fn toggle_favourite(&mut self, id: &str) -> Option<bool> {
        let &i = self.index.get(id)?;
        let favourite = self.favorites.toggle(id);
        self.entries[i].pip.favourite = favourite;
        Some(favourite)
    }

    /// Places `id`'s field into the first form column with room. Idempotent;
    /// this is the entry point the preset layer drives.
    pub fn activate_field(&mut self, id: &str) -> bool {
        let Some(&i) = self.index.get(id) else {
            log_warn!("activate_field: unknown id {}", id);
            return false;
        };
        if self.entries[i].field.placed {
            return false;
        }
        let column = self.field_columns.insert(id.to_string());
        let entry = &mut self.entries[i];
        entry.field.placed = true;
        entry.field.column = Some(column);
        entry.pip.active = true;
        self.align_sync.arm();
        true
    }

    /// Detaches `id`'s field, leaving a gap that the debounced rebalance
    /// closes. Idempotent.
    pub fn deactivate_field(&mut self, id: &str) -> bool {
        let Some(&i) = self.index.get(id) else {
            log_warn!("deactivate_field: unknown id {}", id);
            return false;
        };
        if !self.entries[i].field.placed {
            return false;
        }
        if !self.field_columns.remove(&id.to_string()) {
            log_warn!("Field {} marked placed but absent from its column", id);
        }
        let entry = &mut self.entries[i];
        entry.field.placed = false;
        entry.field.column = None;
        entry.pip.active = false;
        self.rebalance.arm();
        true
    }

    /// Ids of placed fields in column order, left to right.
    pub fn active_field_ids(&self) -> Vec<String> {
        self.field_columns.iter().cloned().collect()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.page = 1;
        self.redistribute_pips();
    }

    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: SearchFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.redistribute_pips();
        }
    }

    /// Re-renders the board from current sort, filter, and favourites.
    pub fn refresh_board(&mut self) {
        self.redistribute_pips();
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Board page size in pips.
    pub fn page_size(&self) -> usize {
        self.pip_cols_per_page * self.pip_columns.capacity()
    }

    pub fn visible_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| self.filter.matches(&e.descriptor))
            .count()
    }

    pub fn total_pages(&self) -> usize {
        self.visible_count().div_ceil(self.page_size()).max(1)
    }

    /// Jumps to `page`, clamped into `[1, total_pages]`. Signed so callers
    /// can pass raw arithmetic without underflow checks.
    pub fn set_page(&mut self, page: i64) {
        let clamped = page.clamp(1, self.total_pages() as i64) as usize;
        if clamped != self.page {
            self.page = clamped;
            self.redistribute_pips();
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page as i64 + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page as i64 - 1);
    }

    pub fn value_mut(&mut self, id: &str) -> Option<&mut FieldValue> {
        let &i = self.index.get(id)?;
        Some(&mut self.entries[i].value)
    }

    pub fn set_date_from(&mut self, id: &str, date: NaiveDate) -> bool {
        match self.value_mut(id) {
            Some(value) => {
                value.set_from(date);
                true
            }
            None => false,
        }
    }

    pub fn set_date_to(&mut self, id: &str, date: NaiveDate) -> bool {
        match self.value_mut(id) {
            Some(value) => {
                value.set_to(date);
                true
            }
            None => false,
        }
    }

    /// Rebuilds the board columns from the current page of the sorted,
    /// filtered catalog. Always produces packed columns; the page is
    /// clamped first so upstream shrinkage never strands the view.
    fn redistribute_pips(&mut self) {
        let ids = self.visible_sorted_ids();
        let total = ids.len().div_ceil(self.page_size()).max(1);
        if self.page > total {
            self.page = total;
        }
        let start = (self.page - 1) * self.page_size();
        self.pip_columns.clear();
        for id in ids.into_iter().skip(start).take(self.page_size()) {
            self.pip_columns.insert(id);
        }
    }

    fn visible_sorted_ids(&self) -> Vec<String> {
        let mut visible: Vec<&FieldEntry> = self
            .entries
            .iter()
            .filter(|e| self.filter.matches(&e.descriptor))
            .collect();
        // stable sort keeps catalog order within ties
        visible.sort_by(|a, b| compare_entries(self.sort_mode, a, b));
        visible
            .into_iter()
            .map(|e| e.descriptor.id.clone())
            .collect()
    }

    /// Re-reads each placed entry's column id after a rebalance moved items
    /// across columns.
    fn sync_column_refs(&mut self) {
        for entry in &mut self.entries {
            if !entry.field.placed {
                continue;
            }
            match self.field_columns.column_of(&entry.descriptor.id) {
                Some(column) => entry.field.column = Some(column),
                None => {
                    log_warn!("Field {} lost its column during rebalance", entry.descriptor.id);
                    entry.field.placed = false;
                    entry.field.column = None;
                    entry.pip.active = false;
                }
            }
        }
    }

    fn sync_alignment(&mut self) {
        self.single_column_centered = self.field_columns.column_count() == 1;
    }
}

fn compare_entries(mode: SortMode, a: &FieldEntry, b: &FieldEntry) -> Ordering {
    if mode == SortMode::Favourites {
        match b.pip.favourite.cmp(&a.pip.favourite) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    a.descriptor
        .name
        .to_lowercase()
        .cmp(&b.descriptor.name.to_lowercase())
}
