//! grid.rs
//!
//! Row-major seat matrix of a single auditorium.
//!
//! Rows are addressed 1-indexed and columns 0-indexed, the same way they are
//! shown to customers (`3C` is row 3, column 2). Every query or mutation that
//! receives coordinates outside the grid answers `false`/`None` or does nothing.

use std::fmt;
use tracing::{debug, trace};

use crate::error::LoadError;
use crate::models::booking::SeatBlock;
use crate::models::seat::{column_letter, Category, Seat, MAX_COLUMNS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    rows: usize,
    columns: usize,
    seats: Vec<Seat>,
}

impl SeatGrid {
    /// Build a grid from its text layout, one line per row.
    ///
    /// `.` is a free seat, any other character is a reserved seat carrying that
    /// category code. The width is taken from the first row and every other row
    /// must match it.
    pub fn load(layout: &str) -> Result<Self, LoadError> {
        let mut lines: Vec<&str> = layout.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let columns = lines.first().map_or(0, |line| line.chars().count());
        if columns == 0 {
            return Err(LoadError::EmptyLayout);
        }
        if columns > MAX_COLUMNS {
            return Err(LoadError::TooManyColumns { found: columns, max: MAX_COLUMNS });
        }

        let mut seats = Vec::with_capacity(lines.len() * columns);
        for (index, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != columns {
                return Err(LoadError::MalformedLayout { row: index + 1, expected: columns, found });
            }
            seats.extend(
                line.chars()
                    .enumerate()
                    .map(|(column, code)| Seat::new(index + 1, column, Category::from_code(code))),
            );
        }

        debug!("Loaded seat grid {}x{}", lines.len(), columns);
        Ok(Self { rows: lines.len(), columns, seats })
    }

    /// An all-free grid, mostly useful for tests and benches.
    pub fn empty(rows: usize, columns: usize) -> Self {
        let columns = columns.min(MAX_COLUMNS);
        let seats = (1..=rows)
            .flat_map(|row| (0..columns).map(move |column| Seat::new(row, column, None)))
            .collect();
        Self { rows, columns, seats }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row == 0 || row > self.rows || column >= self.columns {
            return None;
        }
        Some((row - 1) * self.columns + column)
    }

    pub fn seat(&self, row: usize, column: usize) -> Option<&Seat> {
        self.index(row, column).map(|i| &self.seats[i])
    }

    fn seat_mut(&mut self, row: usize, column: usize) -> Option<&mut Seat> {
        self.index(row, column).map(move |i| &mut self.seats[i])
    }

    /// All seats of one row, left to right.
    pub fn row(&self, row: usize) -> Option<&[Seat]> {
        if row == 0 || row > self.rows {
            return None;
        }
        let start = (row - 1) * self.columns;
        Some(&self.seats[start..start + self.columns])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Seat]> + '_ {
        self.seats.chunks(self.columns.max(1))
    }

    /// True when `count` consecutive seats starting at (`row`, `start_column`)
    /// are inside the grid and all free.
    pub fn check_availability(&self, row: usize, start_column: usize, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        let Some(end) = start_column.checked_add(count) else {
            return false;
        };
        if end > self.columns {
            return false;
        }
        self.row(row)
            .is_some_and(|seats| seats[start_column..end].iter().all(|seat| !seat.is_reserved()))
    }

    pub fn check_block(&self, block: &SeatBlock) -> bool {
        self.check_availability(block.row, block.start_column, block.count)
    }

    pub fn reserve(&mut self, row: usize, column: usize, category: Category) {
        match self.seat_mut(row, column) {
            Some(seat) => seat.reserve(category),
            None => trace!(row, column, "reserve outside the grid ignored"),
        }
    }

    pub fn unreserve(&mut self, row: usize, column: usize) {
        match self.seat_mut(row, column) {
            Some(seat) => seat.unreserve(),
            None => trace!(row, column, "unreserve outside the grid ignored"),
        }
    }

    /// Ticket class of a seat. `None` both for free seats and for coordinates
    /// outside the grid.
    pub fn category(&self, row: usize, column: usize) -> Option<Category> {
        self.seat(row, column).and_then(|seat| seat.category)
    }

    /// Block of `count` free seats in one row whose center lies closest to the
    /// center of the grid.
    ///
    /// Ties go to the smaller row, then to the smaller starting column.
    pub fn find_best_available(&self, count: usize) -> Option<SeatBlock> {
        if count == 0 || count > self.columns {
            return None;
        }

        // Doubled coordinates keep every center on an integer, so distances
        // compare exactly.
        let center_row = (self.rows + 1) as i64;
        let center_column = (self.columns + 1) as i64;

        let mut best: Option<(i64, SeatBlock)> = None;
        for (row_index, seats) in self.iter_rows().enumerate() {
            let row = row_index + 1;
            let mut free_run = 0;
            for (column, seat) in seats.iter().enumerate() {
                free_run = if seat.is_reserved() { 0 } else { free_run + 1 };
                if free_run < count {
                    continue;
                }

                let start = column + 1 - count;
                let d_row = 2 * row as i64 - center_row;
                let d_column = (2 * start + count + 1) as i64 - center_column;
                let distance = d_row * d_row + d_column * d_column;

                // Strict comparison: row-major scan order already favours the
                // smaller row and column on ties.
                if best.as_ref().is_none_or(|(best_distance, _)| distance < *best_distance) {
                    best = Some((distance, SeatBlock::new(row, start, count)));
                }
            }
        }

        best.map(|(_, block)| block)
    }

    pub fn open_count(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.is_reserved()).count()
    }

    pub fn reserved_count(&self) -> usize {
        self.seats.iter().filter(|seat| seat.is_reserved()).count()
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.seats
            .iter()
            .filter(|seat| seat.category.is_some_and(|held| held.code() == category.code()))
            .count()
    }

    /// Text layout in the same format `load` reads, one newline-terminated line per row.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.columns + 1));
        for seats in self.iter_rows() {
            out.extend(seats.iter().map(Seat::code));
            out.push('\n');
        }
        out
    }
}

/// Seat chart with column letters on top and row numbers on the left,
/// `#` for taken seats.
impl fmt::Display for SeatGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.to_string().len();
        write!(f, "{:width$} ", "")?;
        for column in 0..self.columns {
            write!(f, "{}", column_letter(column).unwrap_or('?'))?;
        }
        writeln!(f)?;

        for (index, seats) in self.iter_rows().enumerate() {
            write!(f, "{:>width$} ", index + 1)?;
            for seat in seats {
                write!(f, "{}", if seat.is_reserved() { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
