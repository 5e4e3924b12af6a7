pub mod poller;
pub mod ticker;
