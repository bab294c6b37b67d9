//! Delay-time distribution table
//!
//! One [`PopulationHistogram`] of specific event rate per
//! (metallicity, event type). The table is a dense 2-D array so that the
//! convolution can resolve its column once, outside the hot loop.

use tracing::debug;

use kea_core::{Error, Result};
use kea_histogram::PopulationHistogram;

use crate::event::EventType;
use crate::metallicity::MetallicityGrid;
use crate::variant::{normalize_counts, ModelVariant};

/// Complete (metallicity x event type) table of DTDs
#[derive(Debug, Clone)]
pub struct DtdTable {
    grid: MetallicityGrid,
    events: Vec<EventType>,
    // Row-major: metallicity index, then position in `events`
    entries: Vec<PopulationHistogram>,
}

impl DtdTable {
    pub fn builder(grid: MetallicityGrid, events: &[EventType]) -> DtdTableBuilder {
        DtdTableBuilder::new(grid, events)
    }

    pub fn grid(&self) -> &MetallicityGrid {
        &self.grid
    }

    /// Event types present, in column order
    pub fn events(&self) -> &[EventType] {
        &self.events
    }

    pub fn contains(&self, event: EventType) -> bool {
        self.events.contains(&event)
    }

    /// DTD for a metallicity index and event type
    pub fn get(&self, z_idx: usize, event: EventType) -> Result<&PopulationHistogram> {
        let col = self.column_index(event)?;
        if z_idx >= self.grid.len() {
            return Err(Error::out_of_range(z_idx as f64, 0.0, (self.grid.len() - 1) as f64));
        }
        Ok(&self.entries[z_idx * self.events.len() + col])
    }

    /// DTDs of one event type ordered by metallicity index
    pub fn column(&self, event: EventType) -> Result<Vec<&PopulationHistogram>> {
        let col = self.column_index(event)?;
        Ok(self
            .entries
            .iter()
            .skip(col)
            .step_by(self.events.len())
            .collect())
    }

    fn column_index(&self, event: EventType) -> Result<usize> {
        self.events
            .iter()
            .position(|&e| e == event)
            .ok_or_else(|| Error::InvalidInput(format!("no {event} column in DTD table")))
    }
}

/// Incremental construction of a [`DtdTable`]
///
/// # Examples
///
/// ```rust
/// use kea_histogram::{PopulationHistogram, POPULATION_BINS};
/// use kea_rates::{DtdTable, EventType, MetallicityGrid, ModelVariant};
///
/// let grid = MetallicityGrid::new(vec![0.001, 0.02], vec![0.01]).unwrap();
/// let mut builder = DtdTable::builder(grid, &[EventType::Ia, EventType::BHBH]);
/// for z in 0..2 {
///     builder.insert(z, EventType::Ia, PopulationHistogram::new(vec![1e-12; POPULATION_BINS]).unwrap()).unwrap();
///     builder.insert_raw(z, ModelVariant::GwV22Hobbs, EventType::BHBH, &[10.0; POPULATION_BINS]).unwrap();
/// }
/// let table = builder.build().unwrap();
/// assert_eq!(table.get(1, EventType::Ia).unwrap()[0], 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DtdTableBuilder {
    grid: MetallicityGrid,
    events: Vec<EventType>,
    entries: Vec<Option<PopulationHistogram>>,
}

impl DtdTableBuilder {
    /// Start an empty table with the given event columns
    pub fn new(grid: MetallicityGrid, events: &[EventType]) -> Self {
        let mut columns: Vec<EventType> = Vec::with_capacity(events.len());
        for &e in events {
            if !columns.contains(&e) {
                columns.push(e);
            }
        }
        let entries = vec![None; grid.len() * columns.len()];
        Self {
            grid,
            events: columns,
            entries,
        }
    }

    /// Insert an already normalised DTD, replacing any previous entry
    pub fn insert(
        &mut self,
        z_idx: usize,
        event: EventType,
        dtd: PopulationHistogram,
    ) -> Result<&mut Self> {
        let slot = self.slot(z_idx, event)?;
        self.entries[slot] = Some(dtd);
        Ok(self)
    }

    /// Normalise a raw count column from `variant` and insert it
    pub fn insert_raw(
        &mut self,
        z_idx: usize,
        variant: ModelVariant,
        event: EventType,
        raw: &[f64],
    ) -> Result<&mut Self> {
        if !variant.provides(event) {
            return Err(Error::InvalidInput(format!(
                "{variant:?} files have no {event} column"
            )));
        }
        let dtd = normalize_counts(variant, raw)?;
        self.insert(z_idx, event, dtd)
    }

    /// Fill the CCSN column by summing its components where all are present
    pub fn with_ccsn(&mut self) -> Result<&mut Self> {
        for z_idx in 0..self.grid.len() {
            let mut total = PopulationHistogram::zeros();
            for event in EventType::CORE_COLLAPSE {
                let slot = self.slot(z_idx, event)?;
                match &self.entries[slot] {
                    Some(dtd) => total += dtd,
                    None => {
                        return Err(Error::InvalidInput(format!(
                            "cannot derive CCSN: missing {event} at metallicity index {z_idx}"
                        )))
                    }
                }
            }
            self.insert(z_idx, EventType::CCSN, total)?;
        }
        Ok(self)
    }

    /// Finish the table; every (metallicity, event) entry must be filled
    pub fn build(self) -> Result<DtdTable> {
        let n_events = self.events.len();
        let mut entries = Vec::with_capacity(self.entries.len());
        for (i, entry) in self.entries.into_iter().enumerate() {
            match entry {
                Some(dtd) => entries.push(dtd),
                None => {
                    return Err(Error::InvalidInput(format!(
                        "missing {} DTD at metallicity index {}",
                        self.events[i % n_events],
                        i / n_events
                    )))
                }
            }
        }
        debug!(
            "Built DTD table: {} metallicities x {} event types",
            self.grid.len(),
            n_events
        );
        Ok(DtdTable {
            grid: self.grid,
            events: self.events,
            entries,
        })
    }

    fn slot(&self, z_idx: usize, event: EventType) -> Result<usize> {
        let col = self
            .events
            .iter()
            .position(|&e| e == event)
            .ok_or_else(|| Error::InvalidInput(format!("{event} is not a column of this table")))?;
        if z_idx >= self.grid.len() {
            return Err(Error::out_of_range(z_idx as f64, 0.0, (self.grid.len() - 1) as f64));
        }
        Ok(z_idx * self.events.len() + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kea_histogram::POPULATION_BINS;

    fn flat(v: f64) -> PopulationHistogram {
        PopulationHistogram::new(vec![v; POPULATION_BINS]).unwrap()
    }

    fn two_point_grid() -> MetallicityGrid {
        MetallicityGrid::new(vec![0.001, 0.02], vec![0.01]).unwrap()
    }

    #[test]
    fn test_missing_entry_fails() {
        let mut b = DtdTable::builder(two_point_grid(), &[EventType::Ia]);
        b.insert(0, EventType::Ia, flat(1.0)).unwrap();
        let err = b.build().unwrap_err();
        assert!(err.to_string().contains("metallicity index 1"));
    }

    #[test]
    fn test_insert_validation() {
        let mut b = DtdTable::builder(two_point_grid(), &[EventType::Ia]);
        assert!(b.insert(2, EventType::Ia, flat(1.0)).is_err());
        assert!(b.insert(0, EventType::BHBH, flat(1.0)).is_err());
        assert!(b
            .insert_raw(0, ModelVariant::GwV22Bray, EventType::Ia, &[1.0; POPULATION_BINS])
            .is_err());
    }

    #[test]
    fn test_ccsn_is_sum_of_components() {
        let mut events = EventType::CORE_COLLAPSE.to_vec();
        events.push(EventType::CCSN);
        let mut b = DtdTable::builder(two_point_grid(), &events);
        for z in 0..2 {
            for (k, e) in EventType::CORE_COLLAPSE.iter().enumerate() {
                b.insert(z, *e, flat((k + 1) as f64 * (z + 1) as f64)).unwrap();
            }
        }
        b.with_ccsn().unwrap();
        let table = b.build().unwrap();

        assert_eq!(table.get(0, EventType::CCSN).unwrap()[7], 10.0);
        assert_eq!(table.get(1, EventType::CCSN).unwrap()[50], 20.0);
    }

    #[test]
    fn test_ccsn_needs_components() {
        let mut b = DtdTable::builder(two_point_grid(), &[EventType::IIP, EventType::CCSN]);
        assert!(b.with_ccsn().is_err());
    }

    #[test]
    fn test_column_ordered_by_metallicity() {
        let mut b = DtdTable::builder(two_point_grid(), &[EventType::Ia, EventType::LGRB]);
        for z in 0..2 {
            b.insert(z, EventType::Ia, flat(z as f64)).unwrap();
            b.insert(z, EventType::LGRB, flat(10.0 + z as f64)).unwrap();
        }
        let table = b.build().unwrap();
        let col = table.column(EventType::LGRB).unwrap();
        assert_eq!(col.len(), 2);
        assert_eq!(col[0][0], 10.0);
        assert_eq!(col[1][0], 11.0);
        assert!(table.column(EventType::NSNS).is_err());
        assert!(table.get(5, EventType::Ia).is_err());
    }
}
