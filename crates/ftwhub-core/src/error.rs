//! Normalization error types.

use std::fmt;

use thiserror::Error;

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Points at the raw event a normalization error belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRef {
    /// Position in the dataset's `events` sequence.
    pub index: usize,
    /// The event's title, when it has one.
    pub title: Option<String>,
    /// Whether the error is in the event's `workshop_event` record.
    pub workshop_event: bool,
}

impl EventRef {
    pub fn event(index: usize, title: Option<String>) -> Self {
        Self {
            index,
            title,
            workshop_event: false,
        }
    }

    pub fn workshop_event(index: usize, title: Option<String>) -> Self {
        Self {
            index,
            title,
            workshop_event: true,
        }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "events[{}]", self.index)?;
        if self.workshop_event {
            write!(f, ".workshop_event")?;
        }
        if let Some(ref title) = self.title {
            write!(f, " ({:?})", title)?;
        }
        Ok(())
    }
}

/// Errors that make a dataset impossible to normalize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// A top-level dataset key has the wrong shape.
    #[error("dataset key `{key}` must be a {expected}, found {found}")]
    InvalidDataset {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// An entry of `events` (or its `workshop_event`) is not a mapping.
    #[error("{event}: expected a mapping, found {found}")]
    NotAMapping { event: EventRef, found: &'static str },

    /// A required field is absent.
    #[error("{event}: missing required field `{field}`")]
    MissingField { event: EventRef, field: &'static str },

    /// A field holds a value of the wrong type.
    #[error("{event}: field `{field}` must be a {expected}, found {found}")]
    InvalidField {
        event: EventRef,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}
