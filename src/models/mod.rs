pub mod user;
pub mod seat;
pub mod booking;

pub use user::{Customer, TicketRemoval};
pub use seat::{Category, Seat, SeatLabel};
pub use booking::{Order, OrderId, SeatBlock, TicketCounts};
