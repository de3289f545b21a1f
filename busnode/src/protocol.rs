//! Wire protocol collaborator
//!
//! The stack does not define byte layouts or identifier numbering. A [`Protocol`]
//! implementation maps frame identifiers to `(pmid, uid)` pairs, classifies message ids,
//! encodes payloads and supplies protocol timing.

use crate::core::{DeviceRole, Pmid, PmidRange, Uid};
use crate::status::StatusSnapshot;
use crate::time::{Duration, Instant};

/// Decoded frame identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MessageId {
    pub pmid: Pmid,
    /// Source device for broadcasts
    pub uid: Uid,
}

/// Device information field announced periodically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceInfoField {
    SerialNumber,
    TypeId,
    Model,
    Vendor,
    ShortName,
}

/// Device information field with its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceInfo<'a> {
    SerialNumber(u64),
    TypeId(u16),
    Model(&'a str),
    Vendor(&'a str),
    ShortName(&'a str),
}

impl DeviceInfo<'_> {
    pub fn field(&self) -> DeviceInfoField {
        match self {
            DeviceInfo::SerialNumber(_) => DeviceInfoField::SerialNumber,
            DeviceInfo::TypeId(_) => DeviceInfoField::TypeId,
            DeviceInfo::Model(_) => DeviceInfoField::Model,
            DeviceInfo::Vendor(_) => DeviceInfoField::Vendor,
            DeviceInfo::ShortName(_) => DeviceInfoField::ShortName,
        }
    }
}

/// Application timer broadcast kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerKind {
    Main,
    Validation,
    Internal,
}

/// Identifier classification and payload codec
///
/// Encoders receive a buffer of exactly [`Protocol::message_length`] bytes (capped at the
/// frame payload size) and must not assume any previous content.
pub trait Protocol {
    fn encode_id(&self, id: MessageId) -> u32;
    fn decode_id(&self, raw: u32) -> MessageId;

    /// Identifier width used for transmission
    fn use_extended_ids(&self) -> bool;
    /// Number of payload bytes in every transmitted frame
    fn message_length(&self) -> usize;

    /// Message ids addressed to a single device. The target uid travels in the payload.
    fn addressed_requests(&self) -> PmidRange;
    fn heartbeats(&self) -> PmidRange;
    /// Type ids that take part in registration
    fn device_types(&self) -> PmidRange;

    /// Target of an addressed request, `None` if the payload is too short
    fn target_uid(&self, payload: &[u8]) -> Option<Uid>;

    fn device_role(&self, type_id: u16) -> DeviceRole;

    fn heartbeat_pmid(&self, role: DeviceRole) -> Option<Pmid>;
    fn status_pmid(&self, role: DeviceRole) -> Option<Pmid>;
    fn timer_pmid(&self, role: DeviceRole, kind: TimerKind) -> Option<Pmid>;
    fn device_info_pmid(&self, field: DeviceInfoField) -> Pmid;

    fn encode_device_info(&self, info: &DeviceInfo<'_>, buf: &mut [u8]);
    fn encode_heartbeat(&self, buf: &mut [u8], now: Instant, since_last: Duration);
    fn encode_status(&self, buf: &mut [u8], status: &StatusSnapshot);
    fn encode_timer(&self, buf: &mut [u8], current: u32, set: u32);

    fn heartbeat_interval(&self) -> Duration;
    /// Heartbeat gap after which the bus is considered offline
    fn heartbeat_timeout(&self) -> Duration;
    /// Current device update period, including the randomized offset
    fn device_update_interval(&self) -> Duration;
    /// Picks a new offset for the next device update period.
    ///
    /// Spreads device announcements so that devices powered up together do not
    /// announce in lockstep.
    fn randomize_device_update_offset(&mut self);
}
