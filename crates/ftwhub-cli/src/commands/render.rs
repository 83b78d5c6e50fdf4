//! Rendering commands.
//!
//! Each command writes one JSON document to the given writer, followed by
//! a newline.

use std::io::Write;

use chrono::NaiveDate;
use ftwhub_core::{Event, MonthSummary, MonthWindow, group_by_month};
use serde::Serialize;
use tracing::debug;

use crate::error::ClientResult;

/// Month summary for the HTML newsletter. Every event carries an `ical_url`.
pub fn monatsuebersicht_html(
    events: &[Event],
    month: &str,
    out: &mut impl Write,
    pretty: bool,
) -> ClientResult<()> {
    let month: MonthWindow = month.parse()?;
    let summary = MonthSummary::build(events, &month).with_ical_urls();
    write_json(out, &summary, pretty)
}

/// Month summary for the plain-text newsletter.
pub fn monatsuebersicht_txt(
    events: &[Event],
    month: &str,
    out: &mut impl Write,
    pretty: bool,
) -> ClientResult<()> {
    let month: MonthWindow = month.parse()?;
    let summary = MonthSummary::build(events, &month);
    write_json(out, &summary, pretty)
}

/// Website listing starting with the month of `today`.
pub fn folktanz_at(
    events: &[Event],
    today: NaiveDate,
    out: &mut impl Write,
    pretty: bool,
) -> ClientResult<()> {
    let from = MonthWindow::containing(today);
    let groups = group_by_month(events, &from);
    debug!(%from, months = groups.len(), "Built website listing");
    write_json(out, &groups, pretty)
}

/// Every normalized event.
pub fn events(events: &[Event], out: &mut impl Write, pretty: bool) -> ClientResult<()> {
    write_json(out, &events, pretty)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> ClientResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
