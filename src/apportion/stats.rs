use serde::{Deserialize, Serialize};

/// A per-region record of numeric fields that can be apportioned across
/// overlapping regions. `Default` is the zeroed record.
pub trait Statistic: Default + Clone + Send + Sync {
    /// Every numeric field, in a fixed order.
    fn fields() -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<f64>;

    fn field_mut(&mut self, name: &str) -> Option<&mut f64>;

    /// True when the values were apportioned from overlapping regions
    /// rather than reported directly.
    fn is_extrapolated(&self) -> bool;

    fn set_extrapolated(&mut self, extrapolated: bool);
}

/// Asthma case counts for one region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsthmaData {
    pub population: f64,
    pub adult: f64,
    pub child: f64,
    pub non_white: f64,
    pub poverty: f64,
    pub extrapolated: bool,
}

impl Statistic for AsthmaData {
    fn fields() -> &'static [&'static str] {
        &["population", "adult", "child", "non_white", "poverty"]
    }

    fn field(&self, name: &str) -> Option<f64> {
        let value = match name {
            "population" => self.population,
            "adult" => self.adult,
            "child" => self.child,
            "non_white" => self.non_white,
            "poverty" => self.poverty,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        match name {
            "population" => Some(&mut self.population),
            "adult" => Some(&mut self.adult),
            "child" => Some(&mut self.child),
            "non_white" => Some(&mut self.non_white),
            "poverty" => Some(&mut self.poverty),
            _ => None,
        }
    }

    fn is_extrapolated(&self) -> bool { self.extrapolated }

    fn set_extrapolated(&mut self, extrapolated: bool) { self.extrapolated = extrapolated; }
}

/// Job counts by sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsCounts {
    pub solar: f64,
    pub wind: f64,
    pub energy: f64,
    pub total: f64,
}

/// One clean-energy measure split by installation class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsStat {
    pub residential: f64,
    pub commercial: f64,
    pub utility: f64,
    pub total: f64,
}

impl JobsStat {
    fn get(&self, part: &str) -> Option<f64> {
        let value = match part {
            "residential" => self.residential,
            "commercial" => self.commercial,
            "utility" => self.utility,
            "total" => self.total,
            _ => return None,
        };
        Some(value)
    }

    fn get_mut(&mut self, part: &str) -> Option<&mut f64> {
        match part {
            "residential" => Some(&mut self.residential),
            "commercial" => Some(&mut self.commercial),
            "utility" => Some(&mut self.utility),
            "total" => Some(&mut self.total),
            _ => None,
        }
    }
}

impl JobsCounts {
    fn get(&self, part: &str) -> Option<f64> {
        let value = match part {
            "solar" => self.solar,
            "wind" => self.wind,
            "energy" => self.energy,
            "total" => self.total,
            _ => return None,
        };
        Some(value)
    }

    fn get_mut(&mut self, part: &str) -> Option<&mut f64> {
        match part {
            "solar" => Some(&mut self.solar),
            "wind" => Some(&mut self.wind),
            "energy" => Some(&mut self.energy),
            "total" => Some(&mut self.total),
            _ => None,
        }
    }
}

/// Clean-energy jobs and investment for one region. Nested groups are
/// addressed as `group.part`, e.g. `"mw_capacity.utility"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsData {
    pub counts: JobsCounts,
    pub perc_of_state_jobs: f64,
    pub mwh_invested: JobsStat,
    pub dollars_invested: JobsStat,
    pub installations_count: JobsStat,
    pub mw_capacity: JobsStat,
    pub extrapolated: bool,
}

impl Statistic for JobsData {
    fn fields() -> &'static [&'static str] {
        &[
            "counts.solar", "counts.wind", "counts.energy", "counts.total",
            "perc_of_state_jobs",
            "mwh_invested.residential", "mwh_invested.commercial", "mwh_invested.utility", "mwh_invested.total",
            "dollars_invested.residential", "dollars_invested.commercial", "dollars_invested.utility", "dollars_invested.total",
            "installations_count.residential", "installations_count.commercial", "installations_count.utility", "installations_count.total",
            "mw_capacity.residential", "mw_capacity.commercial", "mw_capacity.utility", "mw_capacity.total",
        ]
    }

    fn field(&self, name: &str) -> Option<f64> {
        if name == "perc_of_state_jobs" {
            return Some(self.perc_of_state_jobs);
        }
        let (group, part) = name.split_once('.')?;
        match group {
            "counts" => self.counts.get(part),
            "mwh_invested" => self.mwh_invested.get(part),
            "dollars_invested" => self.dollars_invested.get(part),
            "installations_count" => self.installations_count.get(part),
            "mw_capacity" => self.mw_capacity.get(part),
            _ => None,
        }
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut f64> {
        if name == "perc_of_state_jobs" {
            return Some(&mut self.perc_of_state_jobs);
        }
        let (group, part) = name.split_once('.')?;
        match group {
            "counts" => self.counts.get_mut(part),
            "mwh_invested" => self.mwh_invested.get_mut(part),
            "dollars_invested" => self.dollars_invested.get_mut(part),
            "installations_count" => self.installations_count.get_mut(part),
            "mw_capacity" => self.mw_capacity.get_mut(part),
            _ => None,
        }
    }

    fn is_extrapolated(&self) -> bool { self.extrapolated }

    fn set_extrapolated(&mut self, extrapolated: bool) { self.extrapolated = extrapolated; }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_fields<S: Statistic>() {
        let mut stat = S::default();
        for (i, name) in S::fields().iter().enumerate() {
            *stat.field_mut(name).unwrap() = i as f64 + 1.0;
        }
        for (i, name) in S::fields().iter().enumerate() {
            assert_eq!(stat.field(name), Some(i as f64 + 1.0), "{name}");
        }
        assert_eq!(stat.field("extrapolated"), None);
        assert_eq!(stat.field_mut("nope"), None);
    }

    #[test]
    fn every_listed_field_is_addressable() {
        check_fields::<AsthmaData>();
        check_fields::<JobsData>();
    }

    #[test]
    fn jobs_fields_address_nested_groups() {
        let mut jobs = JobsData::default();
        *jobs.field_mut("mw_capacity.utility").unwrap() = 12.5;
        assert_eq!(jobs.mw_capacity.utility, 12.5);
        assert_eq!(jobs.field("counts.bogus"), None);
        assert_eq!(jobs.field("mw_capacity"), None);
    }

    #[test]
    fn jobs_reads_match_writes_per_group() {
        let mut jobs = JobsData::default();
        jobs.counts.wind = 3.0;
        jobs.dollars_invested.commercial = 4.5;
        jobs.installations_count.total = 7.0;
        jobs.perc_of_state_jobs = 0.25;
        assert_eq!(jobs.field("counts.wind"), Some(3.0));
        assert_eq!(jobs.field("dollars_invested.commercial"), Some(4.5));
        assert_eq!(jobs.field("installations_count.total"), Some(7.0));
        assert_eq!(jobs.field("perc_of_state_jobs"), Some(0.25));
        assert_eq!(jobs.field("counts.residential"), None);
        assert_eq!(jobs.field("mwh_invested.solar"), None);
    }

    #[test]
    fn zeroed_default_is_not_extrapolated() {
        let asthma = AsthmaData::default();
        assert!(!asthma.is_extrapolated());
        assert!(AsthmaData::fields().iter().all(|f| asthma.field(f) == Some(0.0)));
    }
}
