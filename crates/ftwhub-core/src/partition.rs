//! Partitioning normalized events for output.
//!
//! Two views are built from the sorted event list:
//! - [`MonthSummary`]: one month's events split into regular events and
//!   workshops, plus a preview of everything later
//! - [`MonthGroup`]s: upcoming events grouped by the month they start in,
//!   for website listings

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::event::Event;
use crate::ical::ical_data_url;
use crate::time::MonthWindow;

/// Where an event goes in a month summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Regular events of the month, social workshops included.
    Events,
    /// Workshops of the month that are not social events.
    Workshops,
    /// Events after the month. Sub-events never go here.
    Preview,
}

impl Bucket {
    /// Picks the bucket for `event`, or `None` if it is left out.
    pub fn classify(event: &Event, month: &MonthWindow) -> Option<Self> {
        if event.sort_date < month.start() {
            None
        } else if event.sort_date >= month.end() {
            (!event.sub_event).then_some(Self::Preview)
        } else if event.is_workshop() {
            Some(Self::Workshops)
        } else {
            Some(Self::Events)
        }
    }
}

/// The events of one month, as used for the monthly newsletter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub events: Vec<Event>,
    pub preview: Vec<Event>,
    pub workshops: Vec<Event>,
}

impl MonthSummary {
    /// Splits sorted `events` into the buckets for `month`.
    pub fn build(events: &[Event], month: &MonthWindow) -> Self {
        let mut summary = Self::default();
        for event in events {
            let bucket = match Bucket::classify(event, month) {
                Some(bucket) => bucket,
                None => continue,
            };
            let target = match bucket {
                Bucket::Events => &mut summary.events,
                Bucket::Workshops => &mut summary.workshops,
                Bucket::Preview => &mut summary.preview,
            };
            target.push(event.clone());
        }
        debug!(
            %month,
            events = summary.events.len(),
            workshops = summary.workshops.len(),
            preview = summary.preview.len(),
            "Built month summary"
        );
        summary
    }

    /// Attaches an iCalendar data URL to every event.
    pub fn with_ical_urls(mut self) -> Self {
        for event in self
            .events
            .iter_mut()
            .chain(self.preview.iter_mut())
            .chain(self.workshops.iter_mut())
        {
            event.ical_url = Some(ical_data_url(event));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.preview.is_empty() && self.workshops.is_empty()
    }
}

/// Upcoming events of one month for website listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    /// `yy-mm` key of the month.
    pub key: String,
    /// German display name, e.g. `Mai 2024`.
    pub name: String,
    pub events: Vec<Event>,
}

/// Groups top-level events starting in `from` or later by start month.
///
/// Sub-events are left out. Groups follow the order of `events`.
pub fn group_by_month(events: &[Event], from: &MonthWindow) -> Vec<MonthGroup> {
    let mut groups: IndexMap<String, MonthGroup> = IndexMap::new();

    for event in events {
        if event.sort_date < from.start() || event.sub_event {
            continue;
        }
        let month = event.month();
        groups
            .entry(month.key())
            .or_insert_with(|| MonthGroup {
                key: month.key(),
                name: month.display_name_de(),
                events: Vec::new(),
            })
            .events
            .push(event.clone());
    }

    groups.into_values().collect()
}
