//! Command implementations.

pub mod config;
pub mod render;

use std::path::Path;

use ftwhub_core::{Event, Map, normalize_events};
use tracing::warn;

use crate::error::ClientResult;
use crate::loader::load_data_dir;

/// Loads the dataset from `data_dir` and normalizes its events.
///
/// Without a data directory the dataset is empty.
pub fn load_events(data_dir: Option<&Path>) -> ClientResult<Vec<Event>> {
    let dataset = match data_dir {
        Some(dir) => load_data_dir(dir)?,
        None => {
            warn!("No data directory given, rendering an empty dataset");
            Map::new()
        }
    };
    Ok(normalize_events(&dataset)?)
}
