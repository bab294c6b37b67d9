//! Event rates for every metallicity bin and event type

use tracing::{debug, instrument};

use kea_core::{Error, FitInterpolant, LinearSpline, Result};
use kea_cosmology::TimeRelation;
use kea_histogram::Histogram;

use crate::convolution;
use crate::dtd::DtdTable;
use crate::event::EventType;
use crate::mass::calculate_mass_per_bin;
use crate::metallicity::MetallicityGrid;
use crate::sfrd::SfrdGrid;

/// Event-rate histograms indexed by (metallicity index, event type)
#[derive(Debug, Clone, PartialEq)]
pub struct EventRateTable {
    grid: MetallicityGrid,
    events: Vec<EventType>,
    edges: Vec<f64>,
    // Row-major: metallicity index, then position in `events`
    rates: Vec<Histogram>,
}

impl EventRateTable {
    /// Convolve every metallicity column of `sfrd` with the matching DTDs
    ///
    /// Each column is interpolated over lookback time with a
    /// [`LinearSpline`]; see [`build_with`](Self::build_with) for other
    /// interpolants.
    pub fn build(sfrd: &SfrdGrid, relation: &TimeRelation, dtds: &DtdTable, edges: &[f64]) -> Result<Self> {
        Self::build_with::<LinearSpline>(sfrd, relation, dtds, edges)
    }

    /// Like [`build`](Self::build) with a chosen interpolant type
    #[instrument(skip_all, fields(n_metallicities = sfrd.grid().len(), n_events = dtds.events().len(), n_bins = edges.len().saturating_sub(1)))]
    pub fn build_with<I: FitInterpolant>(
        sfrd: &SfrdGrid,
        relation: &TimeRelation,
        dtds: &DtdTable,
        edges: &[f64],
    ) -> Result<Self> {
        if sfrd.grid() != dtds.grid() {
            return Err(Error::InvalidInput(
                "SFRD and DTD table use different metallicity grids".to_string(),
            ));
        }

        let mut rates = Vec::with_capacity(sfrd.grid().len() * dtds.events().len());
        for z_idx in 0..sfrd.grid().len() {
            let history: I = relation.interpolant(sfrd.column(z_idx)?)?;
            let mass = calculate_mass_per_bin(edges, &history)?;
            for &event in dtds.events() {
                let dtd = dtds.get(z_idx, event)?;
                #[cfg(feature = "parallel")]
                let h = convolution::par_calculate_event_rates(edges, &mass, dtd)?;
                #[cfg(not(feature = "parallel"))]
                let h = convolution::calculate_event_rates(edges, &mass, dtd)?;
                rates.push(h);
            }
            debug!("Metallicity bin {} done", z_idx);
        }

        Ok(Self {
            grid: sfrd.grid().clone(),
            events: dtds.events().to_vec(),
            edges: edges.to_vec(),
            rates,
        })
    }

    pub fn grid(&self) -> &MetallicityGrid {
        &self.grid
    }

    pub fn events(&self) -> &[EventType] {
        &self.events
    }

    /// Output lookback-time edges in Gyr
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Rate histogram of one event type at one metallicity index
    pub fn get(&self, z_idx: usize, event: EventType) -> Result<&Histogram> {
        let col = self.column_index(event)?;
        if z_idx >= self.grid.len() {
            return Err(Error::out_of_range(z_idx as f64, 0.0, (self.grid.len() - 1) as f64));
        }
        Ok(&self.rates[z_idx * self.events.len() + col])
    }

    /// Rate of one event type summed over all metallicities
    pub fn total(&self, event: EventType) -> Result<Histogram> {
        let col = self.column_index(event)?;
        let mut values = vec![0.0; self.edges.len() - 1];
        for h in self.rates.iter().skip(col).step_by(self.events.len()) {
            kea_core::utils::add_assign(&mut values, h.values());
        }
        Histogram::new(self.edges.clone(), values)
    }

    /// Every histogram rescaled from per Mpc^3 to per Gpc^3
    pub fn to_per_gpc3(&self) -> Self {
        Self {
            grid: self.grid.clone(),
            events: self.events.clone(),
            edges: self.edges.clone(),
            rates: self.rates.iter().map(convolution::to_per_gpc3).collect(),
        }
    }

    fn column_index(&self, event: EventType) -> Result<usize> {
        self.events
            .iter()
            .position(|&e| e == event)
            .ok_or_else(|| Error::InvalidInput(format!("no {event} rates in table")))
    }
}
