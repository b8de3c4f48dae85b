use std::path::PathBuf;
use thiserror::Error;

use crate::models::SeatLabel;
use crate::models::booking::OrderId;

/// Fatal problems while reading a layout or the user database.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("layout is empty")]
    EmptyLayout,

    #[error("malformed layout: row {row} has {found} seats, expected {expected}")]
    MalformedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layout has {found} columns, at most {max} are addressable")]
    TooManyColumns { found: usize, max: usize },

    #[error("malformed user record on line {line}")]
    MalformedRecord { line: usize },
}

/// Rejections from the booking flows. Every check runs before any seat is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("auditorium {0} does not exist")]
    UnknownAuditorium(u32),

    #[error("customer {0} does not exist")]
    UnknownCustomer(String),

    #[error("order {0} not found")]
    UnknownOrder(OrderId),

    #[error("no tickets requested")]
    NoTicketsRequested,

    #[error("the seats are not available")]
    SeatsUnavailable,

    #[error("seat {0} is not part of this order")]
    SeatNotInOrder(SeatLabel),

    #[error("this operation requires an administrator")]
    Forbidden,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("username {0} not found")]
    UnknownUser(String),

    #[error("invalid password")]
    InvalidPassword,
}
