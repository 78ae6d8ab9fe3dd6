//! calendar/mod.rs
//!
//! Concrete [`crate::adapters::CalendarAdapter`] implementations. The core
//! only depends on the trait; this module exists so the crate has a usable
//! default without requiring a caller to plug in their own calendar system,
//! mirroring how the teacher's own `date.rs` built calendar arithmetic on
//! top of `chrono` rather than a hand-rolled Julian-day implementation.

pub mod gregorian;

pub use gregorian::GregorianCalendar;
