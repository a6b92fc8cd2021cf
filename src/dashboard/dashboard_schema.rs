use crate::schema::Runner;
use serde::Serialize;

/// One chart row, in the shape the charts bind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: i64,
}

/// Headline counters over the whole store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: i64,
    pub vip: i64,
    pub shirt_received: i64,
    pub shirt_missing: i64,
}

/// The five fields charts and filters work on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Gender,
    Distance,
    ShirtSize,
    Vip,
    ShirtStatus,
}

/// A toggle request carrying its value, typed per field
#[derive(Debug, Clone, PartialEq)]
pub enum FacetFilter {
    Gender(String),
    Distance(String),
    ShirtSize(String),
    Vip(bool),
    ShirtStatus(bool),
}

/// Per field equality constraints. `None` means no constraint; a set `false`
/// on the boolean fields is a real constraint, not an unset one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSet {
    pub gender: Option<String>,
    pub distance: Option<String>,
    pub shirt_size: Option<String>,
    pub vip: Option<bool>,
    pub shirt_status: Option<bool>,
}

impl FilterSet {
    /// Toggle semantics: the same value clears the field, a new value replaces it
    pub fn toggle(&mut self, filter: FacetFilter) {
        match filter {
            FacetFilter::Gender(v) => toggle_slot(&mut self.gender, v),
            FacetFilter::Distance(v) => toggle_slot(&mut self.distance, v),
            FacetFilter::ShirtSize(v) => toggle_slot(&mut self.shirt_size, v),
            FacetFilter::Vip(v) => toggle_slot(&mut self.vip, v),
            FacetFilter::ShirtStatus(v) => toggle_slot(&mut self.shirt_status, v),
        }
    }

    pub fn clear(&mut self) {
        *self = FilterSet::default();
    }

    pub fn is_empty(&self) -> bool {
        return *self == FilterSet::default();
    }
}

fn toggle_slot<T: PartialEq>(slot: &mut Option<T>, value: T) {
    if slot.as_ref() == Some(&value) {
        *slot = None;
    } else {
        *slot = Some(value);
    }
}

/// Everything the dashboard view renders from, taken in one go
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub summary: Summary,
    pub gender: Vec<ChartSlice>,
    pub distance: Vec<ChartSlice>,
    pub shirt_size: Vec<ChartSlice>,
    pub filters: FilterSet,
    pub rows: Vec<Runner>,
}
