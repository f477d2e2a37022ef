//! Self-validating field types.
//!
//! Every type here checks its constraints when it is constructed or
//! deserialized, so holding a value means it is valid:
//!
//! - [`Money`]: two-decimal amount, wire-encoded as integer cents
//! - [`StructuredAddress`]: address object, wire-encoded as canonical JSON text
//! - [`PhoneNumber`]: E.164 phone number, default region Mexico
//! - [`Latitude`], [`Longitude`]: range-checked coordinates
//! - [`Notes`]: courier instructions of at most 280 characters
//! - [`TimeWindows`]: pickup and dropoff windows with ordering rules

mod address;
mod coordinate;
mod money;
mod notes;
mod phone;
mod time_window;

pub use address::{AddressInput, StructuredAddress};
pub use coordinate::{Latitude, Longitude};
pub use money::Money;
pub use notes::Notes;
pub use phone::{PhoneNumber, DEFAULT_REGION};
pub use time_window::{
    TimeWindows, TimeWindowsBuilder, Timestamp, MIN_DROPOFF_WINDOW_MINUTES,
    MIN_PICKUP_WINDOW_MINUTES,
};
