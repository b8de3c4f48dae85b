use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::grid::SeatGrid;
use crate::models::seat::{Category, SeatLabel};

/// Identifier of an order, stable while other orders of the same customer come and go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contiguous run of seats in one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatBlock {
    pub row: usize,
    pub start_column: usize,
    pub count: usize,
}

impl SeatBlock {
    pub fn new(row: usize, start_column: usize, count: usize) -> Self {
        Self { row, start_column, count }
    }

    pub fn labels(&self) -> impl Iterator<Item = SeatLabel> {
        let row = self.row;
        (self.start_column..self.start_column + self.count).map(move |column| SeatLabel::new(row, column))
    }
}

impl fmt::Display for SeatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = SeatLabel::new(self.row, self.start_column);
        if self.count <= 1 {
            return write!(f, "{first}");
        }
        let last = SeatLabel::new(self.row, self.start_column + self.count - 1);
        write!(f, "{first}-{last}")
    }
}

/// Per-category ticket quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    pub adult: u32,
    pub child: u32,
    pub senior: u32,
}

impl TicketCounts {
    pub fn new(adult: u32, child: u32, senior: u32) -> Self {
        Self { adult, child, senior }
    }

    /// Sum of all three classes, widened so it cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.adult) + u64::from(self.child) + u64::from(self.senior)
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Adult => self.adult,
            Category::Child => self.child,
            Category::Senior => self.senior,
            Category::Other(_) => 0,
        }
    }

    fn slot_mut(&mut self, category: Category) -> Option<&mut u32> {
        match category {
            Category::Adult => Some(&mut self.adult),
            Category::Child => Some(&mut self.child),
            Category::Senior => Some(&mut self.senior),
            Category::Other(_) => None,
        }
    }

    /// Category of each seat of a block filled left to right: adults, then
    /// children, then seniors.
    pub fn seating_order(&self) -> impl Iterator<Item = Category> {
        let counts = *self;
        Category::TICKET_CLASSES
            .into_iter()
            .flat_map(move |category| std::iter::repeat_n(category, counts.get(category) as usize))
    }
}

impl std::ops::AddAssign for TicketCounts {
    fn add_assign(&mut self, other: Self) {
        self.adult = self.adult.saturating_add(other.adult);
        self.child = self.child.saturating_add(other.child);
        self.senior = self.senior.saturating_add(other.senior);
    }
}

impl fmt::Display for TicketCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} adult, {} child, {} senior", self.adult, self.child, self.senior)
    }
}

/// A customer's reservation in one auditorium.
///
/// The blocks are history: removing a single ticket frees its grid seat but
/// leaves the block untouched. The seats an order currently holds are always
/// read back from the grid, see [`Order::current_seats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    auditorium: u32,
    original: SeatBlock,
    additional: Vec<SeatBlock>,
    tickets: TicketCounts,
}

impl Order {
    pub fn new(auditorium: u32, row: usize, start_column: usize, tickets: TicketCounts) -> Self {
        Self {
            id: OrderId::new(),
            auditorium,
            original: SeatBlock::new(row, start_column, tickets.total() as usize),
            additional: Vec::new(),
            tickets,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn auditorium(&self) -> u32 {
        self.auditorium
    }

    pub fn original_block(&self) -> &SeatBlock {
        &self.original
    }

    /// Original block first, then appended blocks in the order they were added.
    pub fn blocks(&self) -> impl Iterator<Item = &SeatBlock> + '_ {
        std::iter::once(&self.original).chain(self.additional.iter())
    }

    pub fn tickets(&self) -> TicketCounts {
        self.tickets
    }

    pub fn total_tickets(&self) -> u64 {
        self.tickets.total()
    }

    /// Record another block of seats. The grid is not consulted; the caller
    /// reserves the seats beforehand.
    pub fn append_tickets(&mut self, block: SeatBlock, tickets: TicketCounts) {
        self.additional.push(block);
        self.tickets += tickets;
    }

    /// Drop one ticket of `category`. Returns false when the order holds none.
    pub fn remove_one(&mut self, category: Category) -> bool {
        match self.tickets.slot_mut(category) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Seats of every recorded block that the grid still marks as reserved,
    /// sorted by row and column. A seat covered by two blocks is listed twice.
    pub fn current_seats(&self, grid: &SeatGrid) -> Vec<SeatLabel> {
        let mut seats: Vec<SeatLabel> = self
            .blocks()
            .flat_map(SeatBlock::labels)
            .filter(|label| grid.category(label.row, label.column).is_some())
            .collect();
        seats.sort();
        seats
    }

    /// Free every seat of every recorded block on the grid.
    pub fn release_seats(&self, grid: &mut SeatGrid) {
        for label in self.blocks().flat_map(SeatBlock::labels) {
            grid.unreserve(label.row, label.column);
        }
    }
}
