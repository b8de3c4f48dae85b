use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

use crate::auditorium::Auditorium;
use crate::error::BookingError;
use crate::middleware::AuthUser;
use crate::models::{Order, OrderId, SeatBlock, SeatLabel, TicketCounts, TicketRemoval};
use crate::services::ledger;
use crate::Theater;

/* ---------- helpers ---------- */

fn find_auditorium(auditoriums: &mut [Auditorium], number: u32) -> Result<&mut Auditorium, BookingError> {
    auditoriums
        .iter_mut()
        .find(|auditorium| auditorium.number() == number)
        .ok_or(BookingError::UnknownAuditorium(number))
}

fn join_seats(seats: &[SeatLabel]) -> String {
    seats.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/* ---------- RESERVATIONS ---------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The requested block was free and now belongs to a new order.
    Reserved(OrderId),
    /// The requested block was taken; nothing was reserved. This is the best
    /// free block of the same size, which the caller may request instead.
    Suggested(SeatBlock),
    /// No block of that size is left anywhere in the auditorium.
    SoldOut,
}

/// Reserve `tickets.total()` seats starting at (`row`, `start_column`).
pub fn reserve_seats(
    theater: &mut Theater,
    user: &AuthUser,
    auditorium: u32,
    row: usize,
    start_column: usize,
    tickets: TicketCounts,
) -> Result<ReservationOutcome, BookingError> {
    let (customer, auditoriums) = theater.customer_and_auditoriums(&user.username)?;
    let grid = find_auditorium(auditoriums, auditorium)?.grid_mut();

    // Too large for any row, so availability and best-available both come back empty
    let total = usize::try_from(tickets.total()).unwrap_or(usize::MAX);
    if total == 0 {
        return Err(BookingError::NoTicketsRequested);
    }

    if !grid.check_availability(row, start_column, total) {
        return Ok(match grid.find_best_available(total) {
            Some(block) => {
                info!("Auditorium {}: requested seats taken, suggesting {}", auditorium, block);
                ReservationOutcome::Suggested(block)
            }
            None => {
                warn!("Auditorium {}: no block of {} seats left", auditorium, total);
                ReservationOutcome::SoldOut
            }
        });
    }

    let block = ledger::reserve_block(grid, row, start_column, tickets);
    let id = customer.create_order(auditorium, row, start_column, tickets);
    info!("Order {} for {}: auditorium {}, seats {} ({})", id, user.username, auditorium, block, tickets);
    Ok(ReservationOutcome::Reserved(id))
}

/* ---------- ORDER UPDATES ---------- */

/// Reserve another block in the order's auditorium and append it to the order.
pub fn add_tickets(
    theater: &mut Theater,
    user: &AuthUser,
    order_id: OrderId,
    row: usize,
    start_column: usize,
    tickets: TicketCounts,
) -> Result<SeatBlock, BookingError> {
    let (customer, auditoriums) = theater.customer_and_auditoriums(&user.username)?;
    let number = customer
        .order(order_id)
        .ok_or(BookingError::UnknownOrder(order_id))?
        .auditorium();
    let grid = find_auditorium(auditoriums, number)?.grid_mut();

    // Too large for any row, so availability and best-available both come back empty
    let total = usize::try_from(tickets.total()).unwrap_or(usize::MAX);
    if total == 0 {
        return Err(BookingError::NoTicketsRequested);
    }
    if !grid.check_availability(row, start_column, total) {
        return Err(BookingError::SeatsUnavailable);
    }

    let block = ledger::reserve_block(grid, row, start_column, tickets);
    customer
        .append_tickets(order_id, block, tickets)
        .ok_or(BookingError::UnknownOrder(order_id))?;
    info!("Order {}: added seats {} ({})", order_id, block, tickets);
    Ok(block)
}

/// Give back a single seat of an order.
pub fn delete_ticket(
    theater: &mut Theater,
    user: &AuthUser,
    order_id: OrderId,
    seat: SeatLabel,
) -> Result<TicketRemoval, BookingError> {
    let (customer, auditoriums) = theater.customer_and_auditoriums(&user.username)?;
    let number = customer
        .order(order_id)
        .ok_or(BookingError::UnknownOrder(order_id))?
        .auditorium();
    let grid = find_auditorium(auditoriums, number)?.grid_mut();

    let outcome = ledger::release_ticket(customer, grid, order_id, seat)?;
    if outcome == TicketRemoval::OrderClosed {
        info!("Order {} closed after its last seat {} was released", order_id, seat);
    }
    Ok(outcome)
}

/// Release every seat of an order and drop it.
pub fn cancel_order(theater: &mut Theater, user: &AuthUser, order_id: OrderId) -> Result<Order, BookingError> {
    let (customer, auditoriums) = theater.customer_and_auditoriums(&user.username)?;
    let number = customer
        .order(order_id)
        .ok_or(BookingError::UnknownOrder(order_id))?
        .auditorium();
    let grid = find_auditorium(auditoriums, number)?.grid_mut();

    ledger::cancel_order(customer, grid, order_id).ok_or(BookingError::UnknownOrder(order_id))
}

/* ---------- VIEWS ---------- */

/// An order as the customer sees it: the seats it still holds and its ticket counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub auditorium: u32,
    pub seats: Vec<SeatLabel>,
    pub tickets: TicketCounts,
}

impl OrderSummary {
    fn new(order: &Order, theater: &Theater) -> Self {
        let seats = theater
            .auditorium(order.auditorium())
            .map(|auditorium| order.current_seats(auditorium.grid()))
            .unwrap_or_default();
        Self {
            id: order.id(),
            auditorium: order.auditorium(),
            seats,
            tickets: order.tickets(),
        }
    }
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Auditorium {}, {}", self.auditorium, join_seats(&self.seats))?;
        write!(f, "{}", self.tickets)
    }
}

pub fn orders(theater: &Theater, user: &AuthUser) -> Result<Vec<OrderSummary>, BookingError> {
    let customer = theater
        .customers()
        .get(&user.username)
        .ok_or_else(|| BookingError::UnknownCustomer(user.username.clone()))?;
    Ok(customer.orders().iter().map(|order| OrderSummary::new(order, theater)).collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub order: OrderSummary,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub customer_total: f64,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "No orders")?;
        }
        for line in &self.lines {
            writeln!(f, "{}", line.order)?;
            writeln!(f, "Order Total: ${:.2}", line.total)?;
            writeln!(f)?;
        }
        writeln!(f, "Customer Total: ${:.2}", self.customer_total)
    }
}

/// Every order of the user priced at the configured rates.
pub fn receipt(theater: &Theater, user: &AuthUser) -> Result<Receipt, BookingError> {
    let pricing = theater.config().pricing;
    let lines: Vec<ReceiptLine> = orders(theater, user)?
        .into_iter()
        .map(|order| ReceiptLine {
            total: pricing.charge(order.tickets),
            order,
        })
        .collect();
    let customer_total = lines.iter().map(|line| line.total).sum();
    Ok(Receipt { lines, customer_total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::directory::{CustomerDirectory, DEFAULT_BUCKETS};
    use crate::grid::SeatGrid;
    use crate::middleware::Role;

    fn theater() -> Theater {
        let config = Config::from_lookup(|_| None).unwrap();
        let customers = CustomerDirectory::from_records("admin root\nalice pw\nbob pw2\n", DEFAULT_BUCKETS).unwrap();
        let hall = Auditorium::new(1, SeatGrid::empty(4, 5));
        Theater::new(config, vec![hall], customers)
    }

    fn customer(name: &str) -> AuthUser {
        AuthUser {
            username: name.to_string(),
            role: Role::Customer,
        }
    }

    fn reserved(outcome: ReservationOutcome) -> OrderId {
        match outcome {
            ReservationOutcome::Reserved(id) => id,
            other => panic!("expected a reservation, got {other:?}"),
        }
    }

    #[test]
    fn reserves_free_block_and_fills_categories_in_order() {
        let mut theater = theater();
        let alice = customer("alice");
        let id = reserved(reserve_seats(&mut theater, &alice, 1, 2, 1, TicketCounts::new(1, 1, 1)).unwrap());

        let grid = theater.auditorium(1).unwrap().grid();
        assert_eq!(grid.serialize(), ".....\n.ACS.\n.....\n.....\n");
        let summaries = orders(&theater, &alice).unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, id);
        assert_eq!(summaries[0].to_string(), "Auditorium 1, 2B,2C,2D\n1 adult, 1 child, 1 senior");
    }

    #[test]
    fn taken_block_yields_suggestion_without_reserving() {
        let mut theater = theater();
        reserved(reserve_seats(&mut theater, &customer("alice"), 1, 1, 0, TicketCounts::new(2, 0, 0)).unwrap());

        let outcome = reserve_seats(&mut theater, &customer("bob"), 1, 1, 1, TicketCounts::new(2, 0, 0)).unwrap();
        assert_eq!(outcome, ReservationOutcome::Suggested(SeatBlock::new(2, 1, 2)));
        assert_eq!(theater.auditorium(1).unwrap().grid().reserved_count(), 2);
        assert!(orders(&theater, &customer("bob")).unwrap().is_empty());
    }

    #[test]
    fn oversized_request_is_sold_out() {
        let mut theater = theater();
        let outcome = reserve_seats(&mut theater, &customer("alice"), 1, 1, 0, TicketCounts::new(6, 0, 0)).unwrap();
        assert_eq!(outcome, ReservationOutcome::SoldOut);
    }

    #[test]
    fn rejects_bad_requests() {
        let mut theater = theater();
        let alice = customer("alice");
        assert_eq!(
            reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::default()),
            Err(BookingError::NoTicketsRequested)
        );
        assert_eq!(
            reserve_seats(&mut theater, &alice, 7, 1, 0, TicketCounts::new(1, 0, 0)),
            Err(BookingError::UnknownAuditorium(7))
        );
        assert_eq!(
            reserve_seats(&mut theater, &customer("mallory"), 1, 1, 0, TicketCounts::new(1, 0, 0)),
            Err(BookingError::UnknownCustomer("mallory".to_string()))
        );
    }

    #[test]
    fn huge_counts_are_refused_without_touching_the_grid() {
        let mut theater = theater();
        let alice = customer("alice");
        let tickets = TicketCounts::new(u32::MAX, 1, 0);
        assert_eq!(reserve_seats(&mut theater, &alice, 1, 1, 0, tickets), Ok(ReservationOutcome::SoldOut));

        let id = reserved(reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::new(1, 0, 0)).unwrap());
        assert_eq!(add_tickets(&mut theater, &alice, id, 2, 0, tickets), Err(BookingError::SeatsUnavailable));
        assert_eq!(theater.auditorium(1).unwrap().grid().reserved_count(), 1);
    }

    #[test]
    fn seat_outside_the_lettered_columns_is_reported() {
        let mut theater = theater();
        let alice = customer("alice");
        let id = reserved(reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::new(1, 0, 0)).unwrap());

        let err = delete_ticket(&mut theater, &alice, id, SeatLabel::new(1, 30)).unwrap_err();
        assert_eq!(err, BookingError::SeatNotInOrder(SeatLabel::new(1, 30)));
        assert_eq!(err.to_string(), "seat 1#30 is not part of this order");
    }

    #[test]
    fn add_tickets_extends_order() {
        let mut theater = theater();
        let alice = customer("alice");
        let id = reserved(reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::new(1, 0, 0)).unwrap());

        let block = add_tickets(&mut theater, &alice, id, 3, 3, TicketCounts::new(0, 2, 0)).unwrap();
        assert_eq!(block, SeatBlock::new(3, 3, 2));
        assert_eq!(
            add_tickets(&mut theater, &alice, id, 3, 4, TicketCounts::new(1, 0, 0)),
            Err(BookingError::SeatsUnavailable)
        );

        let summary = &orders(&theater, &alice).unwrap()[0];
        assert_eq!(summary.seats, vec![SeatLabel::new(1, 0), SeatLabel::new(3, 3), SeatLabel::new(3, 4)]);
        assert_eq!(summary.tickets, TicketCounts::new(1, 2, 0));
    }

    #[test]
    fn orders_belong_to_their_customer() {
        let mut theater = theater();
        let id = reserved(reserve_seats(&mut theater, &customer("alice"), 1, 1, 0, TicketCounts::new(1, 0, 0)).unwrap());
        assert_eq!(
            cancel_order(&mut theater, &customer("bob"), id),
            Err(BookingError::UnknownOrder(id))
        );
    }

    #[test]
    fn deleting_last_ticket_closes_order() {
        let mut theater = theater();
        let alice = customer("alice");
        let id = reserved(reserve_seats(&mut theater, &alice, 1, 4, 0, TicketCounts::new(1, 0, 1)).unwrap());

        assert_eq!(
            delete_ticket(&mut theater, &alice, id, SeatLabel::new(4, 3)),
            Err(BookingError::SeatNotInOrder(SeatLabel::new(4, 3)))
        );
        assert_eq!(
            delete_ticket(&mut theater, &alice, id, SeatLabel::new(4, 1)),
            Ok(TicketRemoval::Decremented { remaining: 1 })
        );
        assert_eq!(orders(&theater, &alice).unwrap()[0].tickets, TicketCounts::new(1, 0, 0));
        assert_eq!(delete_ticket(&mut theater, &alice, id, SeatLabel::new(4, 0)), Ok(TicketRemoval::OrderClosed));
        assert!(orders(&theater, &alice).unwrap().is_empty());
        assert_eq!(theater.auditorium(1).unwrap().grid().reserved_count(), 0);
    }

    #[test]
    fn cancel_frees_every_seat() {
        let mut theater = theater();
        let alice = customer("alice");
        let id = reserved(reserve_seats(&mut theater, &alice, 1, 2, 0, TicketCounts::new(2, 1, 0)).unwrap());
        add_tickets(&mut theater, &alice, id, 4, 4, TicketCounts::new(0, 0, 1)).unwrap();

        let order = cancel_order(&mut theater, &alice, id).unwrap();
        assert_eq!(order.total_tickets(), 4);
        assert_eq!(theater.auditorium(1).unwrap().grid().reserved_count(), 0);
        assert!(orders(&theater, &alice).unwrap().is_empty());
    }

    #[test]
    fn receipt_prices_each_order() {
        let mut theater = theater();
        let alice = customer("alice");
        reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::new(2, 1, 0)).unwrap();
        reserve_seats(&mut theater, &alice, 1, 3, 0, TicketCounts::new(0, 0, 2)).unwrap();

        let receipt = receipt(&theater, &alice).unwrap();
        let totals: Vec<f64> = receipt.lines.iter().map(|line| line.total).collect();
        assert_eq!(totals, vec![25.0, 15.0]);
        assert_eq!(receipt.customer_total, 40.0);
        assert!(receipt.to_string().ends_with("Order Total: $15.00\n\nCustomer Total: $40.00\n"));
    }

    #[test]
    fn empty_receipt() {
        let receipt = receipt(&theater(), &customer("bob")).unwrap();
        assert_eq!(receipt.to_string(), "No orders\nCustomer Total: $0.00\n");
    }
}
