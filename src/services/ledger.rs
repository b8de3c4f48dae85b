//! ledger.rs
//!
//! Order bookkeeping that has to touch both a customer's orders and the seat
//! grid of the order's auditorium.
//!
//! Which seats an order holds is never stored: it is recomputed from the
//! order's block history against the grid each time (see
//! [`Order::current_seats`]). Releasing a single ticket therefore only frees the
//! grid seat and decrements a counter.

use tracing::{debug, info};

use crate::error::BookingError;
use crate::grid::SeatGrid;
use crate::models::{Customer, Order, OrderId, SeatBlock, SeatLabel, TicketCounts, TicketRemoval};

/// Reserve `tickets.total()` seats from (`row`, `start_column`) rightwards:
/// adults first, then children, then seniors.
///
/// Availability is not checked here; callers run
/// [`SeatGrid::check_availability`] first.
pub fn reserve_block(grid: &mut SeatGrid, row: usize, start_column: usize, tickets: TicketCounts) -> SeatBlock {
    for (offset, category) in tickets.seating_order().enumerate() {
        grid.reserve(row, start_column + offset, category);
    }
    SeatBlock::new(row, start_column, tickets.total() as usize)
}

/// Seats the order currently holds, or `None` for an unknown order.
pub fn current_seat_list(customer: &Customer, grid: &SeatGrid, id: OrderId) -> Option<Vec<SeatLabel>> {
    customer.order(id).map(|order| order.current_seats(grid))
}

/// Give back one seat of an order.
///
/// The seat has to be among the order's current seats. Its ticket class is
/// read from the grid, the seat is freed, and the matching counter goes down;
/// an order left without tickets is dropped. A seat whose class the order holds
/// no ticket of is left reserved and reported as [`TicketRemoval::NotHeld`].
pub fn release_ticket(
    customer: &mut Customer,
    grid: &mut SeatGrid,
    id: OrderId,
    seat: SeatLabel,
) -> Result<TicketRemoval, BookingError> {
    let order = customer.order(id).ok_or(BookingError::UnknownOrder(id))?;
    if !order.current_seats(grid).contains(&seat) {
        return Err(BookingError::SeatNotInOrder(seat));
    }

    let category = grid
        .category(seat.row, seat.column)
        .ok_or(BookingError::SeatNotInOrder(seat))?;
    if order.tickets().get(category) == 0 {
        return Ok(TicketRemoval::NotHeld);
    }
    grid.unreserve(seat.row, seat.column);

    let outcome = customer
        .remove_one_of_category(id, category)
        .ok_or(BookingError::UnknownOrder(id))?;
    debug!("Released seat {} ({}) from order {}: {:?}", seat, category, id, outcome);
    Ok(outcome)
}

/// Free every seat recorded by the order and remove it from the customer.
pub fn cancel_order(customer: &mut Customer, grid: &mut SeatGrid, id: OrderId) -> Option<Order> {
    customer.order(id)?.release_seats(grid);
    let order = customer.remove_order(id)?;
    info!("Cancelled order {} for {} ({} tickets)", id, customer.username, order.total_tickets());
    Some(order)
}
