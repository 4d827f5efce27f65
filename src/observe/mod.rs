pub use self::event::{Event, EventType};
pub use self::observer::{DEFAULT_POLL_INTERVAL, ObserveOptions, StatusObserver};

mod event;
mod observer;
mod runner;
