#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod constants;
pub mod modulation;
pub mod registers;
pub mod samples;
pub mod timing;
pub mod transmitter;
pub mod utils;

pub use modulation::{ModulationParameters, ParameterError};
pub use registers::RegisterBus;
pub use transmitter::{ModulationSummary, Transmitter};
