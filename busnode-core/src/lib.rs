//! Busnode protocol core data types
//!
//! This crate provides basic data type definitions used by other busnode crates.
//! Busnode users should not depend on this crate directly. Use `busnode::core` reexport instead.
#![no_std]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidValue;

/// Short device identifier used on the bus
///
/// The bus form is the low 16 bits of the stable 64-bit device identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Uid(u16);

impl Uid {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn from_u64_truncating(value: u64) -> Self {
        Self(value as u16)
    }

    pub const fn into_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for Uid {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl From<Uid> for u16 {
    fn from(value: Uid) -> Self {
        value.into_u16()
    }
}

/// Protocol message identifier
///
/// Denotes the semantic kind of a message (heartbeat, status, device info field, timer, ...).
/// It is encoded within the frame identifier together with a device uid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pmid(u16);

impl Pmid {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn into_u16(self) -> u16 {
        self.0
    }
}

impl From<u16> for Pmid {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl From<Pmid> for u16 {
    fn from(value: Pmid) -> Self {
        value.into_u16()
    }
}

/// Section of the message identifier space
///
/// Both bounds are exclusive: they mark section delimiters and are never valid members.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PmidRange {
    pub start: Pmid,
    pub end: Pmid,
}

impl PmidRange {
    pub const fn new(start: u16, end: u16) -> Self {
        Self {
            start: Pmid::new(start),
            end: Pmid::new(end),
        }
    }

    pub const fn contains(&self, pmid: Pmid) -> bool {
        self.start.0 < pmid.0 && pmid.0 < self.end.0
    }
}

/// Role of a device on the bus
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceRole {
    /// Accepts registration requests from other devices. Never registers itself.
    Controller,
    /// Sensor or actuator node. Registers with a controller once the bus is alive.
    Node,
    /// Listener that never transmits anything.
    ReadOnly,
    /// A type the protocol does not assign a role to.
    Unclassified,
}

impl DeviceRole {
    pub const fn can_transmit(self) -> bool {
        !matches!(self, DeviceRole::ReadOnly)
    }
}
