//! End-to-end run: galaxy catalogue and DTD columns to event rates

use anyhow::Result;
use approx::assert_relative_eq;
use kea::kea_cosmology::lookback_time;
use kea::kea_rates::{formation_metallicity_index, BPASS_METALLICITIES};
use kea::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const N_SNAPSHOTS: usize = 64;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Snapshot redshifts falling from 20 to 0
fn time_relation(cosmology: &Cosmology) -> Result<TimeRelation> {
    let snapshots: Vec<usize> = (0..N_SNAPSHOTS).collect();
    let redshift: Vec<f64> = snapshots
        .iter()
        .map(|&s| {
            let f = 1.0 - s as f64 / (N_SNAPSHOTS - 1) as f64;
            20.0 * f * f
        })
        .collect();
    let lookback = redshift
        .iter()
        .map(|&z| lookback_time(cosmology, z))
        .collect::<kea::Result<Vec<_>>>()?;
    Ok(TimeRelation::new(snapshots, lookback, redshift)?)
}

/// Three galaxies per snapshot spread over the metallicity grid
fn galaxy_sample() -> Result<GalaxySample> {
    let mut snapshot = Vec::new();
    let mut stellar_mass = Vec::new();
    let mut metal_mass = Vec::new();
    let mut sfr = Vec::new();
    for s in 0..N_SNAPSHOTS {
        for (k, &z) in [0.0003, 0.004, 0.02].iter().enumerate() {
            let mass = 1.0 + k as f64;
            snapshot.push(s);
            stellar_mass.push(mass);
            metal_mass.push(z * mass);
            sfr.push(10.0 * (1.0 + s as f64 / 10.0) / (1.0 + k as f64));
        }
    }
    // A galaxy without stars contributes no metallicity
    snapshot.push(10);
    stellar_mass.push(0.0);
    metal_mass.push(0.0);
    sfr.push(1e6);
    Ok(GalaxySample::new(snapshot, stellar_mass, metal_mass, sfr)?)
}

fn supernova_table(grid: &MetallicityGrid) -> Result<DtdTable> {
    let mut events = EventType::SUPERNOVA.to_vec();
    events.push(EventType::CCSN);
    let mut builder = DtdTable::builder(grid.clone(), &events);
    for z_idx in 0..grid.len() {
        for (k, &event) in EventType::SUPERNOVA.iter().enumerate() {
            let raw: Vec<f64> = (0..POPULATION_BINS)
                .map(|i| 1e3 * (1.0 + k as f64) * (1.0 + z_idx as f64) / (1.0 + i as f64))
                .collect();
            builder.insert_raw(z_idx, ModelVariant::BpassSupernova, event, &raw)?;
        }
    }
    builder.with_ccsn()?;
    Ok(builder.build()?)
}

#[test]
fn test_metallicity_resolved_event_rates() -> Result<()> {
    init_tracing();
    let config = RateConfig::from_json(r#"{ "nr_bins": 40 }"#)?;
    let edges = config.output_edges();
    let relation = time_relation(&config.cosmology)?;
    let grid = MetallicityGrid::bpass();

    let sfrd = sfrd_by_metallicity(&galaxy_sample()?, N_SNAPSHOTS, &grid, &config.volume)?;
    // Only the three populated metallicity bins carry star formation
    let populated: Vec<usize> = (0..grid.len())
        .filter(|&i| sfrd.column(i).map_or(false, |c| c.iter().any(|&v| v > 0.0)))
        .collect();
    assert_eq!(populated, vec![grid.index_of(0.0003), grid.index_of(0.004), grid.index_of(0.02)]);

    let dtds = supernova_table(&grid)?;
    let table = EventRateTable::build(&sfrd, &relation, &dtds, &edges)?.to_per_gpc3();
    info!("Built event-rate table over {} bins", table.edges().len() - 1);

    let ia = table.total(EventType::Ia)?;
    assert_eq!(ia.len(), config.nr_bins);
    assert!(ia.values().iter().all(|&r| r >= 0.0));
    assert!(ia.values().iter().any(|&r| r > 0.0));

    // The composite equals the sum of its parts
    let ccsn = table.total(EventType::CCSN)?;
    let mut parts = vec![0.0; config.nr_bins];
    for event in EventType::CORE_COLLAPSE {
        kea::kea_core::utils::add_assign(&mut parts, table.total(event)?.values());
    }
    for (c, p) in ccsn.values().iter().zip(&parts) {
        assert_relative_eq!(*c, *p, max_relative = 1e-9);
    }

    // Unpopulated metallicities produce nothing
    let empty = (0..grid.len()).find(|i| !populated.contains(i)).unwrap_or(0);
    assert!(table.get(empty, EventType::Ia)?.values().iter().all(|&r| r == 0.0));
    Ok(())
}

#[test]
fn test_metallicity_history_path() -> Result<()> {
    init_tracing();
    let config = RateConfig::default();
    let edges = config.output_edges();
    let relation = time_relation(&config.cosmology)?;
    let sample = galaxy_sample()?;

    let sfr: LinearSpline =
        relation.interpolant(&total_sfrd(&sample, N_SNAPSHOTS, &config.volume)?)?;
    let z: LinearSpline = relation.interpolant(&metallicity_history(&sample, N_SNAPSHOTS)?)?;
    let mass = calculate_mass_per_bin(&edges, &sfr)?;

    let grid = MetallicityGrid::bpass();
    let dtds = supernova_table(&grid)?;
    let ia = dtds.column(EventType::Ia)?;

    let rates = calculate_event_rates_with_metallicity(&edges, &mass, &ia, &grid, &z)?;
    assert_eq!(rates.len(), config.nr_bins);

    // Constant mean metallicity gives a zero representative: the lowest row
    for b in 0..config.nr_bins {
        assert_eq!(formation_metallicity_index(&edges, b, &grid, &z), 0);
    }
    let lowest = calculate_event_rates(&edges, &mass, ia[0])?;
    for (a, b) in rates.values().iter().zip(lowest.values()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
    assert_eq!(grid.representatives()[0], BPASS_METALLICITIES[0]);
    Ok(())
}

#[test]
fn test_redshift_axis_for_output_edges() -> Result<()> {
    init_tracing();
    let config = RateConfig::default();
    let edges = config.output_edges();
    // Stay below the age of the universe in this cosmology
    let z = redshift_edges(&config.cosmology, &config.redshift, &edges[..90])?;

    assert_eq!(z[0], 0.0);
    assert!(z.windows(2).all(|w| w[0] < w[1]));
    for (zi, t) in z.iter().zip(&edges).skip(1).step_by(17) {
        assert_relative_eq!(lookback_time(&config.cosmology, *zi)?, *t, epsilon = 1e-6);
        assert_relative_eq!(approximate_redshift(&config.cosmology, *t)?, *zi, epsilon = 1e-9);
    }
    Ok(())
}

#[test]
fn test_invalid_config_rejected() {
    assert!(RateConfig::from_json(r#"{ "nr_bins": 0 }"#).is_err());
    assert!(RateConfig::from_json(r#"{ "redshift": { "z_min": 5.0, "z_max": 1.0 } }"#).is_err());
    assert!(RateConfig::from_json("not json").is_err());
}
