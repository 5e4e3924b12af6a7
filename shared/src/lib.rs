pub mod countdown;
pub mod error;
pub mod model;
pub mod ranking;

pub use countdown::{Countdown, format_remaining, remaining_seconds};
pub use error::FetchError;
pub use model::*;
pub use ranking::*;
