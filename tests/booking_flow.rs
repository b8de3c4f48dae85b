use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use theater_seating::config::Config;
use theater_seating::controllers::{self, ReservationOutcome};
use theater_seating::error::{AuthError, BookingError, LoadError};
use theater_seating::middleware::authenticate;
use theater_seating::models::{SeatBlock, SeatLabel, TicketCounts};
use theater_seating::Theater;

struct Fixture {
    dir: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("theater-flow-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("userdb.dat"), "admin 2468\nalice pw1\nbob pw2\n").unwrap();
        fs::write(dir.join("A1.txt"), "AA...\n.....\n..C..\n").unwrap();
        fs::write(dir.join("A2.txt"), "....\n....\n").unwrap();
        Self { dir }
    }

    fn config(&self) -> Config {
        let vars: HashMap<&str, String> = HashMap::from([
            (
                "AUDITORIUM_FILES",
                format!("{},{}", self.dir.join("A1.txt").display(), self.dir.join("A2.txt").display()),
            ),
            ("USER_DB", self.dir.join("userdb.dat").display().to_string()),
            ("OUTPUT_DIR", self.dir.display().to_string()),
        ]);
        Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
    }

    fn theater(&self) -> Theater {
        Theater::load(self.config()).unwrap()
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

#[test]
fn loads_files_and_authenticates() {
    let fixture = Fixture::new();
    let theater = fixture.theater();

    assert_eq!(theater.auditoriums().len(), 2);
    assert_eq!(theater.auditorium(1).unwrap().grid().reserved_count(), 3);
    assert_eq!(theater.customers().len(), 3);

    assert!(authenticate(theater.customers(), "admin", "2468").unwrap().is_admin());
    assert_eq!(authenticate(theater.customers(), "bob", "wrong").unwrap_err(), AuthError::InvalidPassword);
}

#[test]
fn missing_layout_is_reported() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.dir.join("A2.txt")).unwrap();
    assert!(matches!(Theater::load(fixture.config()), Err(LoadError::Io { .. })));
}

#[test]
fn customer_session_end_to_end() {
    let fixture = Fixture::new();
    let mut theater = fixture.theater();
    let alice = authenticate(theater.customers(), "alice", "pw1").unwrap();

    // 1A and 1B are already taken
    let outcome = controllers::reserve_seats(&mut theater, &alice, 1, 1, 0, TicketCounts::new(2, 0, 0)).unwrap();
    let ReservationOutcome::Suggested(block) = outcome else {
        panic!("expected a suggestion, got {outcome:?}");
    };
    assert_eq!(block, SeatBlock::new(2, 1, 2));

    let outcome =
        controllers::reserve_seats(&mut theater, &alice, 1, block.row, block.start_column, TicketCounts::new(1, 1, 0))
            .unwrap();
    let ReservationOutcome::Reserved(id) = outcome else {
        panic!("expected a reservation, got {outcome:?}");
    };
    controllers::add_tickets(&mut theater, &alice, id, 1, 3, TicketCounts::new(0, 0, 1)).unwrap();

    let summary = &controllers::orders(&theater, &alice).unwrap()[0];
    assert_eq!(summary.to_string(), "Auditorium 1, 1D,2B,2C\n1 adult, 1 child, 1 senior");

    let receipt = controllers::receipt(&theater, &alice).unwrap();
    assert_eq!(receipt.customer_total, 22.5);

    let admin = authenticate(theater.customers(), "admin", "2468").unwrap();
    let report = controllers::report(&theater, &admin).unwrap();
    assert_eq!(report.total.reserved, 6);
    assert_eq!(report.total.open, 17);
    assert_eq!(controllers::report(&theater, &alice), Err(BookingError::Forbidden));

    let written = theater.save_all(&fixture.dir).unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(fs::read_to_string(fixture.dir.join("A1Final.txt")).unwrap(), "AA.S.\n.AC..\n..C..\n");
}

#[test]
fn seats_freed_outside_the_order_disappear_from_it() {
    let fixture = Fixture::new();
    let mut theater = fixture.theater();
    let bob = authenticate(theater.customers(), "bob", "pw2").unwrap();

    let outcome = controllers::reserve_seats(&mut theater, &bob, 2, 2, 0, TicketCounts::new(3, 0, 0)).unwrap();
    let ReservationOutcome::Reserved(id) = outcome else {
        panic!("expected a reservation, got {outcome:?}");
    };

    theater.auditorium_mut(2).unwrap().grid_mut().unreserve(2, 1);
    let seats = &controllers::orders(&theater, &bob).unwrap()[0].seats;
    assert_eq!(seats, &vec![SeatLabel::new(2, 0), SeatLabel::new(2, 2)]);

    assert_eq!(
        controllers::delete_ticket(&mut theater, &bob, id, SeatLabel::new(2, 1)),
        Err(BookingError::SeatNotInOrder(SeatLabel::new(2, 1)))
    );
    let order = controllers::cancel_order(&mut theater, &bob, id).unwrap();
    assert_eq!(order.total_tickets(), 3);
    assert_eq!(theater.auditorium(2).unwrap().grid().reserved_count(), 0);
}
