//! # SpoolTrack Core
//!
//! Shared domain types for SpoolTrack: filament physical properties,
//! unit conversions between filament length, volume, and mass, and the
//! validation errors raised on bad filament records.

pub mod error;
pub mod filament;
pub mod units;

pub use error::{FilamentError, FilamentResult};
pub use filament::{remaining_after_use, FilamentProperties, DEFAULT_PLA_DENSITY};
pub use units::{grams_from_length, mm3_to_cm3, mm_to_meters};
