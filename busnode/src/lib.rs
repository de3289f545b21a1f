//! # Busnode
//!
//! This library provides the communication core of a device on a shared CAN bus in no_std
//! environments: message staging, bus presence tracking, registration with a controller and
//! cooperative multi-rate scheduling of periodic traffic. It uses fixed-capacity buffers and
//! requires no dynamic memory allocation.
//!
//! ## Architecture
//!
//! ```text
//!              ┌──────────┐
//!              │ Protocol │
//!              └────┬─────┘
//!                   ▼
//! ┌─────┐  rx  ┌────────┐  ┌─────────────────┐
//! │ Bus ├─────►│ Router ├─►│ Inbound buffer  ├──► application
//! │     │      └───┬────┘  └─────────────────┘
//! │     │          ▼
//! │     │      ┌──────────┐   ┌──────────────┐
//! │     │      │ Presence ├──►│ Registration │
//! │     │      └──────────┘   └──────────────┘
//! │     │  tx  ┌───────────┐  ┌─────────────────┐
//! │     │◄─────┤ Scheduler │◄─┤ Outbound buffer │◄── application
//! └─────┘      └───────────┘  └─────────────────┘
//! ```
//! Components:
//! * _Node_ owns all state and runs the cycle. The host calls [`node::Node::tick`] from its
//!   main loop.
//! * _Bus_ is a non-blocking frame driver, see [`bus::Bus`].
//! * _Protocol_ maps frame identifiers to message ids and device uids, classifies message ids
//!   and encodes payloads, see [`protocol::Protocol`].
//! * _Router_ classifies received frames: heartbeats feed presence, addressed requests for
//!   other devices are discarded and everything else goes to the inbound buffer.
//! * _Presence_ decides whether the bus is online from remote heartbeats.
//! * _Registration_ requests registration with the controller once the bus is online.
//! * _Scheduler_ gates the outbound flush, maintenance, heartbeat and device announcement
//!   tasks by their periods.
//!
//! ## Concurrency model
//!
//! The core is single-threaded and cooperative. Every operation takes `&mut self`; no task
//! blocks and no lock is held. A host that touches the node from interrupt context must
//! provide its own exclusion around the node.
//!
//! ## Limitations
//!
//! * Frames carry at most 8 payload bytes, multi-frame transfers are not supported.
//! * A full buffer drops the new message; the caller sees [`buffer::BufferFull`].
//! * Periodic tasks fire at most once per cycle, missed periods are not caught up.
#![no_std]

pub use busnode_core as core;
pub use busnode_driver::{bus, frame, time};

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod buffer;
pub mod clock;
pub mod config;
pub mod identity;
pub mod node;
pub mod presence;
pub mod protocol;
pub mod registration;
pub mod router;
pub mod scheduler;
pub mod status;
