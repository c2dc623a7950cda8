use super::{EntityStore, Fetchable, Keyed, Listable, Resource};
use crate::gateway::endpoints::booking as routes;
use crate::gateway::Route;
use crate::models::{Booking, BookingStatus};

impl Resource for Booking {
    const KIND: &'static str = "booking";
}

impl Keyed for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Listable for Booking {
    const LISTED: Option<&'static str> = Some("Bookings fetched successfully!");
    const LIST_FAILED: &'static str = "Failed to fetch bookings";

    fn list_route() -> Route {
        routes::list_all()
    }
}

impl Fetchable for Booking {
    const FETCH_FAILED: &'static str = "Failed to fetch booking details";

    fn fetch_route(id: &str) -> Route {
        routes::get_one(id)
    }
}

impl EntityStore<Booking> {
    /// Cached bookings, optionally narrowed to one status
    pub fn by_status(&self, status: Option<BookingStatus>) -> Vec<Booking> {
        let bookings = self.snapshot();
        match status {
            None => bookings,
            Some(status) => bookings.into_iter().filter(|b| b.status == status).collect(),
        }
    }
}
