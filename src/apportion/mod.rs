//! Apportions statistics reported for one region type onto overlapping
//! regions of another type, weighted by population overlap.

mod stats;

use std::collections::HashMap;
use std::hash::BuildHasher;

use rayon::prelude::*;

use crate::error::{CcidError, Result};
use crate::region::{Ccid, Region, RegionType};

pub use stats::{AsthmaData, JobsCounts, JobsData, JobsStat, Statistic};

/// Builds a statistic for `target` from the statistics of its overlapping
/// regions of type `source_type`.
///
/// Each source contributes `value * perc_of_whole` to every field not named
/// in `omit`. Sources must hold directly reported data; an extrapolated
/// source fails the whole call with `ChainedExtrapolation`. The result is
/// marked extrapolated.
pub fn extrapolate<'a, S, F>(target: &Region, source_type: RegionType, stats: F, omit: &[&str]) -> Result<S>
where
    S: Statistic + 'a,
    F: Fn(&Ccid) -> Option<&'a S>,
{
    for name in omit.iter().filter(|name| !S::fields().contains(*name)) {
        tracing::warn!("[apportion] omitted field '{name}' is not a field of this statistic");
    }
    let fields: Vec<&str> = S::fields().iter().copied().filter(|f| !omit.contains(f)).collect();

    let mut acc = S::default();
    for fragment in target.fragments_of(source_type) {
        fragment.validate()?;
        let source = stats(&fragment.region).ok_or_else(|| CcidError::MissingSourceStatistic {
            target: target.ccid.clone(),
            source_region: fragment.region.clone(),
        })?;
        if source.is_extrapolated() {
            return Err(CcidError::ChainedExtrapolation {
                target: target.ccid.clone(),
                source_region: fragment.region.clone(),
            });
        }

        for &name in &fields {
            let (Some(value), Some(slot)) = (source.field(name), acc.field_mut(name)) else {
                continue;
            };
            *slot += value * fragment.perc_of_whole;
        }
    }

    acc.set_extrapolated(true);
    Ok(acc)
}

/// Fills in every region that has overlaps with `source_type` but no directly
/// reported statistic, returning how many were written.
///
/// All targets are computed against the statistics as given before any is
/// written, so an error leaves `stats` untouched.
pub fn backfill<S, H>(
    regions: &[Region],
    stats: &mut HashMap<Ccid, S, H>,
    source_type: RegionType,
    omit: &[&str],
) -> Result<usize>
where
    S: Statistic,
    H: BuildHasher + Sync,
{
    let lookup = &*stats;
    let targets: Vec<&Region> = regions.iter()
        .filter(|r| r.ty() != source_type)
        .filter(|r| r.fragments_of(source_type).next().is_some())
        .filter(|r| lookup.get(&r.ccid).is_none_or(Statistic::is_extrapolated))
        .collect();

    let filled = targets.par_iter()
        .map(|region| extrapolate(region, source_type, |ccid| lookup.get(ccid), omit).map(|s| (region.ccid.clone(), s)))
        .collect::<Result<Vec<_>>>()?;

    let count = filled.len();
    stats.extend(filled);
    tracing::info!("[apportion] extrapolated {count} regions from {source_type} data");
    Ok(count)
}
