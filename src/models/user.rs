use serde::Serialize;

use crate::models::booking::{Order, OrderId, SeatBlock, TicketCounts};
use crate::models::seat::Category;

/// What happened to an order after one of its tickets was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketRemoval {
    /// One ticket fewer, the order is still open with `remaining` tickets.
    Decremented { remaining: u64 },
    /// The last ticket went away and the order was dropped from the customer.
    OrderClosed,
    /// The order has no ticket of that category; nothing changed.
    NotHeld,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub username: String,
    #[serde(skip_serializing)]
    password: String,
    orders: Vec<Order>,
}

impl Customer {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            orders: Vec::new(),
        }
    }

    // Passwords are stored as loaded from the user database, compared verbatim
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id() == id)
    }

    pub fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|order| order.id() == id)
    }

    /// Record a freshly reserved block as a new order.
    pub fn create_order(
        &mut self,
        auditorium: u32,
        row: usize,
        start_column: usize,
        tickets: TicketCounts,
    ) -> OrderId {
        let order = Order::new(auditorium, row, start_column, tickets);
        let id = order.id();
        self.orders.push(order);
        id
    }

    /// Append a block to an existing order. `None` if the order is unknown.
    pub fn append_tickets(&mut self, id: OrderId, block: SeatBlock, tickets: TicketCounts) -> Option<()> {
        self.order_mut(id).map(|order| order.append_tickets(block, tickets))
    }

    /// Take one ticket of `category` off an order, dropping the order once it is empty.
    ///
    /// The matching grid seat must already have been released by the caller.
    pub fn remove_one_of_category(&mut self, id: OrderId, category: Category) -> Option<TicketRemoval> {
        let order = self.order_mut(id)?;
        if !order.remove_one(category) {
            return Some(TicketRemoval::NotHeld);
        }

        let remaining = order.total_tickets();
        if remaining == 0 {
            self.remove_order(id);
            return Some(TicketRemoval::OrderClosed);
        }
        Some(TicketRemoval::Decremented { remaining })
    }

    pub fn remove_order(&mut self, id: OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|order| order.id() == id)?;
        Some(self.orders.remove(position))
    }
}
