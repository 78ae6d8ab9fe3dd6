//! locale/mod.rs
//!
//! Concrete [`crate::adapters::LocaleCatalog`] implementations. Locale
//! catalogs are the spec's vocabulary (specification §9): the core must
//! never hard-code English phrasing into the passes or the driver. This
//! module ships the English catalog as fixtures for the test suite and as
//! the crate's usable-standalone default, per specification §9's "ship at
//! minimum the English catalog".

pub mod english;

pub use english::EnglishCatalog;
