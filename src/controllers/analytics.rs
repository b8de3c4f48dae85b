//! analytics.rs
//!
//! Operator report over every auditorium: open and reserved seats, tickets per
//! category and sales at the configured prices.

use tracing::{info, warn};

use crate::error::BookingError;
use crate::middleware::AuthUser;
use crate::services::report::{aggregate, TheaterReport};
use crate::Theater;

/// Report for all auditoriums plus totals. Administrators only.
pub fn report(theater: &Theater, user: &AuthUser) -> Result<TheaterReport, BookingError> {
    if !user.is_admin() {
        warn!("{} requested the sales report without admin rights", user.username);
        return Err(BookingError::Forbidden);
    }

    let report = aggregate(
        theater
            .auditoriums()
            .iter()
            .map(|auditorium| (auditorium.number(), auditorium.grid())),
        &theater.config().pricing,
    );

    info!(
        "Report for {} auditoriums: {} reserved, {} open, sales {:.2}",
        report.auditoriums.len(),
        report.total.reserved,
        report.total.open,
        report.total.revenue
    );
    Ok(report)
}
