//! Client side filtering and counting behind the admin dashboard
pub mod dashboard_schema;

use self::dashboard_schema::{
    ChartSlice, DashboardSnapshot, Facet, FacetFilter, FilterSet, Summary,
};
use crate::export::{self, ExportError};
use crate::remote::{ApiError, RunnerApi};
use crate::schema::{self, flag_text, Runner};
use crate::RunnerStore;

/**
 * Keep the records every set filter agrees on.
 *
 * Filters combine with AND and compare by plain equality, booleans by
 * identity. The result keeps the input order, and no filters set means the
 * input comes back as it was.
 */
pub fn apply_filters(runners: &[Runner], filters: &FilterSet) -> Vec<Runner> {
    let mut filtered: Vec<Runner> = runners.to_vec();
    if let Some(gender) = &filters.gender {
        filtered.retain(|r| &r.gender == gender);
    }
    if let Some(distance) = &filters.distance {
        filtered.retain(|r| &r.distance == distance);
    }
    if let Some(shirt_size) = &filters.shirt_size {
        filtered.retain(|r| &r.shirt_size == shirt_size);
    }
    if let Some(vip) = filters.vip {
        filtered.retain(|r| r.vip == vip);
    }
    if let Some(shirt_status) = filters.shirt_status {
        filtered.retain(|r| r.shirt_status == shirt_status);
    }
    return filtered;
}

fn facet_text(runner: &Runner, facet: Facet) -> &str {
    return match facet {
        Facet::Gender => &runner.gender,
        Facet::Distance => &runner.distance,
        Facet::ShirtSize => &runner.shirt_size,
        Facet::Vip => flag_text(runner.vip),
        Facet::ShirtStatus => flag_text(runner.shirt_status),
    };
}

/**
 * Count records per bucket, in the caller's bucket order.
 *
 * Every bucket shows up in the result, zero counts included. Values outside
 * the bucket list are counted nowhere, so the bucket total can be smaller
 * than the record count; the raw table still shows such rows.
 */
pub fn aggregate(runners: &[Runner], facet: Facet, buckets: &[&str]) -> Vec<ChartSlice> {
    return buckets
        .iter()
        .map(|bucket| ChartSlice {
            name: bucket.to_string(),
            value: runners
                .iter()
                .filter(|r| facet_text(r, facet) == *bucket)
                .count() as i64,
        })
        .collect();
}

pub fn gender_chart(runners: &[Runner]) -> Vec<ChartSlice> {
    return aggregate(runners, Facet::Gender, &schema::GENDER_BUCKETS);
}

/// distance slices carry the display unit, the filter value stays the bare number
pub fn distance_chart(runners: &[Runner]) -> Vec<ChartSlice> {
    return aggregate(runners, Facet::Distance, &schema::DISTANCE_BUCKETS)
        .into_iter()
        .map(|slice| ChartSlice {
            name: format!("{} กม.", slice.name),
            value: slice.value,
        })
        .collect();
}

pub fn shirt_size_chart(runners: &[Runner]) -> Vec<ChartSlice> {
    return aggregate(runners, Facet::ShirtSize, &schema::SHIRT_SIZE_BUCKETS);
}

pub fn summarize(runners: &[Runner]) -> Summary {
    return Summary {
        total: runners.len() as i64,
        vip: runners.iter().filter(|r| r.vip).count() as i64,
        shirt_received: runners.iter().filter(|r| r.shirt_status).count() as i64,
        shirt_missing: runners.iter().filter(|r| !r.shirt_status).count() as i64,
    };
}

/**
 * One dashboard visit: the store it fetched plus its filter state.
 *
 * The view keeps exactly one of these, mutates it only through [`toggle`]
 * and [`reset_filters`], and renders from [`snapshot`] so nothing
 * downstream holds on to shared state.
 *
 * [`toggle`]: DashboardSession::toggle
 * [`reset_filters`]: DashboardSession::reset_filters
 * [`snapshot`]: DashboardSession::snapshot
 */
pub struct DashboardSession {
    store: RunnerStore,
    pub filters: FilterSet,
}

impl DashboardSession {
    pub fn new() -> DashboardSession {
        return DashboardSession {
            store: RunnerStore::new(),
            filters: FilterSet::default(),
        };
    }

    pub fn from_store(store: RunnerStore) -> DashboardSession {
        return DashboardSession {
            store,
            filters: FilterSet::default(),
        };
    }

    /// the one bulk read on view mount
    pub async fn mount(&mut self, api: &RunnerApi) -> Result<(), ApiError> {
        return self.store.refresh(api).await;
    }

    pub fn store(&self) -> &RunnerStore {
        return &self.store;
    }

    pub fn toggle(&mut self, filter: FacetFilter) {
        self.filters.toggle(filter);
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
    }

    pub fn filtered(&self) -> Vec<Runner> {
        return apply_filters(self.store.runners(), &self.filters);
    }

    /// charts count the whole store, the table follows the filters
    pub fn snapshot(&self) -> DashboardSnapshot {
        let runners = self.store.runners();
        return DashboardSnapshot {
            summary: summarize(runners),
            gender: gender_chart(runners),
            distance: distance_chart(runners),
            shirt_size: shirt_size_chart(runners),
            filters: self.filters.clone(),
            rows: self.filtered(),
        };
    }

    /// spreadsheet of the rows currently on screen, never the raw store
    pub fn export_xlsx(&self) -> Result<Vec<u8>, ExportError> {
        return export::to_xlsx(&self.filtered());
    }
}
