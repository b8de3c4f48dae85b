//! report.rs
//!
//! Read-only seat and revenue rollups for operators.
//!
//! Figures are recomputed from the grids on every call. Revenue is what the
//! currently reserved seats are worth at the configured prices.

use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;

use crate::config::PricingConfig;
use crate::grid::SeatGrid;
use crate::models::{Category, TicketCounts};

/// Seat figures for one grid, or the sum over several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeatReport {
    pub open: usize,
    pub reserved: usize,
    pub adult: usize,
    pub child: usize,
    pub senior: usize,
    pub revenue: f64,
}

impl SeatReport {
    pub fn for_grid(grid: &SeatGrid, pricing: &PricingConfig) -> Self {
        let adult = grid.count_by_category(Category::Adult);
        let child = grid.count_by_category(Category::Child);
        let senior = grid.count_by_category(Category::Senior);
        Self {
            open: grid.open_count(),
            reserved: grid.reserved_count(),
            adult,
            child,
            senior,
            revenue: pricing.charge(TicketCounts::new(seat_count(adult), seat_count(child), seat_count(senior))),
        }
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
        writeln!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t${:.2}",
            label, self.open, self.reserved, self.adult, self.child, self.senior, self.revenue
        )
    }
}

fn seat_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl AddAssign for SeatReport {
    fn add_assign(&mut self, other: Self) {
        self.open += other.open;
        self.reserved += other.reserved;
        self.adult += other.adult;
        self.child += other.child;
        self.senior += other.senior;
        self.revenue += other.revenue;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditoriumReport {
    pub auditorium: u32,
    #[serde(flatten)]
    pub seats: SeatReport,
}

/// One row per auditorium plus the column-wise total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TheaterReport {
    pub auditoriums: Vec<AuditoriumReport>,
    pub total: SeatReport,
}

/// Roll up every `(auditorium number, grid)` pair.
pub fn aggregate<'a, I>(grids: I, pricing: &PricingConfig) -> TheaterReport
where
    I: IntoIterator<Item = (u32, &'a SeatGrid)>,
{
    let mut report = TheaterReport::default();
    for (auditorium, grid) in grids {
        let seats = SeatReport::for_grid(grid, pricing);
        report.total += seats;
        report.auditoriums.push(AuditoriumReport { auditorium, seats });
    }
    report
}

/// Tab-separated table: open, reserved, adult, child, senior, sales.
impl fmt::Display for TheaterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.auditoriums {
            row.seats.write_row(f, &format!("Auditorium {}", row.auditorium))?;
        }
        self.total.write_row(f, "Total")
    }
}
