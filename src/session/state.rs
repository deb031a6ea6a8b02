use crate::error::{Result, ViewerError};
use crate::models::{
    AgeRange, DisplayOptions, DisplayOptionsPatch, FileEntry, FileSummary, FilterCriteria, Record,
};
use crate::processors::field_resolver::{has_coordinate_columns, resolve_age, resolve_genetic_id};
use crate::processors::{AgeRangeCalculator, FilterEngine, IndividualInfo};
use crate::render::{MapSurface, MarkerLayer, MarkerRenderer, RenderSummary};
use tracing::{debug, info, warn};

/// Generation tag handed out when a load starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was committed and is now the active one
    Loaded { index: usize, rendered: RenderSummary },
    /// A newer load was started before this one finished; nothing changed
    Discarded { generation: u64 },
}

/// Single owner of everything that is loaded and shown
pub struct Session<M: MapSurface = MarkerLayer> {
    files: Vec<FileEntry>,
    active: Option<usize>,
    criteria: FilterCriteria,
    filtered: Vec<usize>,
    options: DisplayOptions,
    map: M,
    renderer: MarkerRenderer,
    calculator: AgeRangeCalculator,
    latest_generation: u64,
    last_render: RenderSummary,
}

impl Session<MarkerLayer> {
    pub fn new() -> Self {
        Self::with_map(MarkerLayer::new())
    }
}

impl Default for Session<MarkerLayer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MapSurface> Session<M> {
    pub fn with_map(map: M) -> Self {
        Self {
            files: Vec::new(),
            active: None,
            criteria: FilterCriteria::new("", 0.0, 0.0),
            filtered: Vec::new(),
            options: DisplayOptions::default(),
            map,
            renderer: MarkerRenderer::new(),
            calculator: AgeRangeCalculator::new(),
            latest_generation: 0,
            last_render: RenderSummary::default(),
        }
    }

    pub fn with_renderer(mut self, renderer: MarkerRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_calculator(mut self, calculator: AgeRangeCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// Start a load. Only the most recently issued ticket can commit.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_generation += 1;
        LoadTicket {
            generation: self.latest_generation,
        }
    }

    /// Commit parsed records for a ticket.
    ///
    /// Stale tickets are discarded. Validation failures leave the session
    /// untouched, so the previously active file stays active.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        name: impl Into<String>,
        records: Vec<Record>,
    ) -> Result<LoadOutcome> {
        let name = name.into();

        if ticket.generation != self.latest_generation {
            warn!(
                "Discarding stale load of '{}' (generation {}, latest {})",
                name, ticket.generation, self.latest_generation
            );
            return Ok(LoadOutcome::Discarded {
                generation: ticket.generation,
            });
        }

        let Some(first) = records.first() else {
            warn!("Rejected '{}': no data rows", name);
            return Err(ViewerError::EmptyFile { name });
        };

        if !has_coordinate_columns(first) {
            warn!("Rejected '{}': missing latitude/longitude columns", name);
            return Err(ViewerError::MissingCoordinateColumns { name });
        }

        let age_range = self.calculator.compute_range(&records);
        info!(
            "Loaded '{}' with {} records, age range {}-{} BP",
            name,
            records.len(),
            age_range.min,
            age_range.max
        );

        self.files.push(FileEntry::new(name, records, age_range));
        let index = self.files.len() - 1;
        self.activate(index);

        Ok(LoadOutcome::Loaded {
            index,
            rendered: self.last_render,
        })
    }

    /// Validate and commit a file in one step
    pub fn load_file(&mut self, name: impl Into<String>, records: Vec<Record>) -> Result<LoadOutcome> {
        let ticket = self.begin_load();
        self.finish_load(ticket, name, records)
    }

    /// Make another loaded file active. Returns false for the active index or
    /// an out-of-range one, in which case nothing changes.
    pub fn switch_file(&mut self, index: usize) -> bool {
        if index >= self.files.len() || Some(index) == self.active {
            debug!("Ignoring switch to file {}", index);
            return false;
        }

        info!("Switching to '{}'", self.files[index].name);
        self.activate(index);
        true
    }

    fn activate(&mut self, index: usize) {
        self.active = Some(index);
        self.criteria = unfiltered_criteria(&self.files[index]);
        self.refilter();
        self.rerender();
    }

    /// Apply new criteria to the full active record set and redraw
    pub fn set_filter_criteria(&mut self, criteria: FilterCriteria) -> Result<usize> {
        if self.active.is_none() {
            return Err(ViewerError::NoActiveFile);
        }

        self.criteria = criteria;
        self.refilter();
        self.rerender();
        Ok(self.filtered.len())
    }

    /// Change only the search text
    pub fn set_search_term(&mut self, search_term: impl Into<String>) -> Result<usize> {
        let criteria = self.criteria.clone().with_search(search_term);
        self.set_filter_criteria(criteria)
    }

    /// Change only the age bounds
    pub fn set_age_bounds(&mut self, min_age: f64, max_age: f64) -> Result<usize> {
        let criteria = FilterCriteria::new(self.criteria.search_term.clone(), min_age, max_age);
        self.set_filter_criteria(criteria)
    }

    /// Merge display options and redraw; filtering is left alone
    pub fn set_display_options(&mut self, patch: DisplayOptionsPatch) -> RenderSummary {
        self.options.merge(patch);
        self.rerender();
        self.last_render
    }

    fn refilter(&mut self) {
        self.filtered = match self.active_file() {
            Some(entry) => FilterEngine::new(&self.criteria).filter_indices(&entry.records),
            None => Vec::new(),
        };
    }

    fn rerender(&mut self) {
        let Some(index) = self.active else {
            return;
        };
        let entry = &self.files[index];
        self.last_render = self.renderer.render(
            &mut self.map,
            &entry.records,
            &self.filtered,
            entry.age_range,
            &self.options,
        );
    }

    /// Full field set of a record of the active file, for a selected marker
    pub fn select(&self, record_index: usize) -> Result<IndividualInfo> {
        let entry = self.active_file().ok_or(ViewerError::NoActiveFile)?;
        let record = entry
            .records
            .get(record_index)
            .ok_or_else(|| ViewerError::RecordNotFound(format!("row {}", record_index)))?;

        Ok(IndividualInfo::from_record(record, self.options.language))
    }

    /// Index of the first active record whose resolved genetic id matches
    pub fn find_by_genetic_id(&self, genetic_id: &str) -> Option<usize> {
        self.active_file()?
            .records
            .iter()
            .position(|record| resolve_genetic_id(record) == genetic_id)
    }

    pub fn active_file(&self) -> Option<&FileEntry> {
        self.active.map(|index| &self.files[index])
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file_summaries(&self) -> Vec<FileSummary> {
        self.files
            .iter()
            .enumerate()
            .map(|(index, entry)| FileSummary::from_entry(index, entry, Some(index) == self.active))
            .collect()
    }

    pub fn filtered_indices(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_records(&self) -> Vec<&Record> {
        match self.active_file() {
            Some(entry) => self.filtered.iter().map(|&i| &entry.records[i]).collect(),
            None => Vec::new(),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn last_render(&self) -> RenderSummary {
        self.last_render
    }
}

/// Criteria that keep every record of a file, in order
fn unfiltered_criteria(entry: &FileEntry) -> FilterCriteria {
    let lowest = entry.records.iter().map(resolve_age).fold(0.0, f64::min);
    FilterCriteria::for_range(AgeRange::new(lowest, entry.age_range.max))
}
