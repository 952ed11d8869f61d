pub mod clock;
pub mod counter;
pub mod log;
pub mod moon;
pub mod providers;
pub mod session;
pub mod stopwatch;
pub mod store;
pub mod timer;
