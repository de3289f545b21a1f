//! Busnode driver interface
//!
//! The crate provides an interface between a CAN transceiver driver and the busnode stack.
//! Limited scope facilitates compatibility across versions.
//! Driver crates should depend on this crate. Busnode stack users should depend on
//! the `busnode` crate instead.
//!
//! A driver implements [`bus::Bus`]: a non-blocking pair of `receive` and `send`
//! operations over fixed-size frames. The stack polls the bus from its cycle,
//! so a driver needs no runner task of its own. Peripherals implementing the
//! `embedded-can` non-blocking trait can be wrapped in [`bus::CanBus`] directly.

#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bus;
pub mod frame;

pub mod time {
    pub use embassy_time::{Duration, Instant};
}
