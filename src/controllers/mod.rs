pub mod analytics;
pub mod bookings;

pub use analytics::report;
pub use bookings::{
    add_tickets, cancel_order, delete_ticket, orders, receipt, reserve_seats, OrderSummary, Receipt,
    ReservationOutcome,
};
