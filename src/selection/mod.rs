//! Selection and filter state for one page's worth of discovered videos.
//!
//! Everything here is synchronous and owned by a single writer (the UI loop or
//! a headless command). Async results are fed in as plain transitions and are
//! checked for staleness before they touch anything.

pub mod filter;

pub use filter::{extension_filter_available, ExtensionFilter, FilterCriteria};

use crate::model::{ScanResult, SizeStatus, VideoDescriptor, VideoId};
use std::collections::HashSet;
use tracing::debug;

pub const NO_VIDEOS_FOUND: &str = "No downloadable video files found on this page.";
pub const NO_FILTER_MATCHES: &str = "No videos match your filter criteria.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning {
        generation: u64,
    },
    Ready,
    Failed(String),
}

/// Presentation of the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Disabled,
    Unchecked,
    Partial,
    Checked,
}

impl SelectAllState {
    pub fn is_checked(self) -> bool {
        self == SelectAllState::Checked
    }
}

/// Everything a view needs besides the rows themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub select_all: SelectAllState,
    pub download_enabled: bool,
    pub empty_state: Option<&'static str>,
    pub displayed_count: usize,
    pub selected_displayed: usize,
    pub extension_filter_available: bool,
}

#[derive(Debug, Default)]
pub struct SelectionState {
    generation: u64,
    phase: ScanPhase,
    page_url: Option<String>,
    all: Vec<VideoDescriptor>,
    displayed: Vec<VideoId>,
    selected: HashSet<VideoId>,
    criteria: FilterCriteria,
    extensions: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, ScanPhase::Scanning { .. })
    }

    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn all(&self) -> &[VideoDescriptor] {
        &self.all
    }

    pub fn get(&self, id: VideoId) -> Option<&VideoDescriptor> {
        if id.generation != self.generation {
            return None;
        }
        self.all.get(id.index).filter(|v| v.id == id)
    }

    pub fn displayed(&self) -> Vec<&VideoDescriptor> {
        self.displayed.iter().filter_map(|id| self.get(*id)).collect()
    }

    pub fn displayed_ids(&self) -> &[VideoId] {
        &self.displayed
    }

    pub fn is_selected(&self, id: VideoId) -> bool {
        self.selected.contains(&id)
    }

    /// Starts a new scan. Anything still in flight for older generations is
    /// ignored from here on.
    pub fn begin_scan(&mut self) -> u64 {
        self.generation += 1;
        self.phase = ScanPhase::Scanning {
            generation: self.generation,
        };
        self.page_url = None;
        self.all.clear();
        self.displayed.clear();
        self.selected.clear();
        self.criteria = FilterCriteria::default();
        self.extensions.clear();
        self.generation
    }

    /// Installs a finished scan. Returns false when the result belongs to a
    /// scan that has since been superseded.
    pub fn on_scan_complete(&mut self, result: ScanResult) -> bool {
        if result.generation != self.generation {
            debug!(
                stale = result.generation,
                current = self.generation,
                "dropping stale scan result"
            );
            return false;
        }

        self.phase = ScanPhase::Ready;
        self.page_url = Some(result.page_url.clone());
        self.extensions = result.extensions();
        self.all = result.videos;
        self.displayed = self.all.iter().map(|v| v.id).collect();
        self.selected.clear();
        self.criteria = FilterCriteria::default();
        true
    }

    pub fn on_scan_failed(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = ScanPhase::Failed(message.into());
        true
    }

    /// Clears results without starting a scan.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.phase = ScanPhase::Idle;
        self.page_url = None;
        self.all.clear();
        self.displayed.clear();
        self.selected.clear();
        self.criteria = FilterCriteria::default();
        self.extensions.clear();
    }

    /// Re-derives the displayed subset. Selections on hidden items are kept so
    /// they come back checked when the item is shown again.
    pub fn on_filter_change(&mut self, criteria: FilterCriteria) {
        self.displayed = filter::apply(&self.all, &criteria)
            .into_iter()
            .map(|v| v.id)
            .collect();
        self.criteria = criteria;
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        let criteria = FilterCriteria::new(query, self.criteria.extension.clone());
        self.on_filter_change(criteria);
    }

    pub fn set_extension_filter(&mut self, extension: ExtensionFilter) {
        let criteria = FilterCriteria::new(self.criteria.name_query.clone(), extension);
        self.on_filter_change(criteria);
    }

    pub fn cycle_extension_filter(&mut self) {
        let next = self.criteria.extension.cycle(&self.extensions);
        self.set_extension_filter(next);
    }

    /// Sets one item's checkbox. Ids outside the current scan are ignored.
    pub fn on_toggle_item(&mut self, id: VideoId, checked: bool) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
        true
    }

    pub fn toggle_item(&mut self, id: VideoId) -> bool {
        let checked = !self.is_selected(id);
        self.on_toggle_item(id, checked)
    }

    /// Applies to displayed items only; hidden selections stay as they are.
    pub fn on_toggle_select_all(&mut self, checked: bool) {
        for id in &self.displayed {
            if checked {
                self.selected.insert(*id);
            } else {
                self.selected.remove(id);
            }
        }
    }

    pub fn toggle_select_all(&mut self) {
        let checked = !self.select_all_state().is_checked();
        self.on_toggle_select_all(checked);
    }

    /// Writes a resolved size. Late answers for videos that are no longer
    /// part of the current scan are dropped.
    pub fn apply_size(&mut self, id: VideoId, size: SizeStatus) -> bool {
        if id.generation != self.generation {
            return false;
        }
        match self.all.get_mut(id.index) {
            Some(video) if video.id == id => {
                video.size = size;
                true
            }
            _ => false,
        }
    }

    pub fn select_all_state(&self) -> SelectAllState {
        if self.displayed.is_empty() {
            return SelectAllState::Disabled;
        }
        let selected = self.selected_displayed_count();
        if selected == self.displayed.len() {
            SelectAllState::Checked
        } else if selected == 0 {
            SelectAllState::Unchecked
        } else {
            SelectAllState::Partial
        }
    }

    fn selected_displayed_count(&self) -> usize {
        self.displayed
            .iter()
            .filter(|id| self.selected.contains(*id))
            .count()
    }

    /// Enabled only by items that are both selected and visible.
    pub fn download_enabled(&self) -> bool {
        self.selected_displayed_count() > 0
    }

    /// Selected and visible items, in display order. This is what gets
    /// downloaded.
    pub fn selected_descriptors(&self) -> Vec<VideoDescriptor> {
        self.displayed
            .iter()
            .filter(|id| self.selected.contains(*id))
            .filter_map(|id| self.get(*id).cloned())
            .collect()
    }

    pub fn empty_state(&self) -> Option<&'static str> {
        match self.phase {
            ScanPhase::Ready if self.all.is_empty() => Some(NO_VIDEOS_FOUND),
            ScanPhase::Ready if self.displayed.is_empty() => Some(NO_FILTER_MATCHES),
            _ => None,
        }
    }

    pub fn view(&self) -> DerivedView {
        DerivedView {
            select_all: self.select_all_state(),
            download_enabled: self.download_enabled(),
            empty_state: self.empty_state(),
            displayed_count: self.displayed.len(),
            selected_displayed: self.selected_displayed_count(),
            extension_filter_available: extension_filter_available(&self.extensions),
        }
    }
}
