use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of columns a row can have, one per display letter.
pub const MAX_COLUMNS: usize = 26;

/// Ticket class of a reserved seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Adult,
    Child,
    Senior,
    /// Any other code found in a loaded layout. Kept so the layout saves back unchanged.
    Other(char),
}

impl Category {
    /// The three priced ticket classes, in reservation order.
    pub const TICKET_CLASSES: [Category; 3] = [Category::Adult, Category::Child, Category::Senior];

    /// Parse a layout character. `.` is an unreserved seat and yields `None`.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '.' => None,
            'A' => Some(Category::Adult),
            'C' => Some(Category::Child),
            'S' => Some(Category::Senior),
            other => Some(Category::Other(other)),
        }
    }

    pub fn code(self) -> char {
        match self {
            Category::Adult => 'A',
            Category::Child => 'C',
            Category::Senior => 'S',
            Category::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Adult => "adult",
            Category::Child => "child",
            Category::Senior => "senior",
            Category::Other(_) => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Display letter for a 0-indexed column (`0 -> 'A'`), `None` past `Z`.
pub fn column_letter(column: usize) -> Option<char> {
    u8::try_from(column)
        .ok()
        .filter(|&offset| usize::from(offset) < MAX_COLUMNS)
        .map(|offset| char::from(b'A' + offset))
}

/// One seat of an auditorium. `row` is 1-indexed, `column` is 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub row: usize,
    pub column: usize,
    pub category: Option<Category>,
}

impl Seat {
    pub fn new(row: usize, column: usize, category: Option<Category>) -> Self {
        Self { row, column, category }
    }

    pub fn is_reserved(&self) -> bool {
        self.category.is_some()
    }

    pub fn reserve(&mut self, category: Category) {
        self.category = Some(category);
    }

    // Always clears the ticket class, whatever it was.
    pub fn unreserve(&mut self) {
        self.category = None;
    }

    /// Layout character: `.` when free, the category code otherwise.
    pub fn code(&self) -> char {
        self.category.map_or('.', Category::code)
    }
}

/// Display address of a seat such as `3C`. Orders by row, then column.
///
/// Columns without a letter render numerically, e.g. `1#30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatLabel {
    pub row: usize,
    pub column: usize,
}

impl SeatLabel {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match column_letter(self.column) {
            Some(letter) => write!(f, "{}{}", self.row, letter),
            None => write!(f, "{}#{}", self.row, self.column),
        }
    }
}
