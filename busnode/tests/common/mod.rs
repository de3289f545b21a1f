#![allow(dead_code)]

use std::cell::Cell;

use busnode::bus::Bus;
use busnode::clock::Clock;
use busnode::core::{DeviceRole, Pmid, PmidRange, Uid};
use busnode::frame::{Data, Frame};
use busnode::protocol::{DeviceInfo, DeviceInfoField, MessageId, Protocol, TimerKind};
use busnode::status::StatusSnapshot;
use busnode::time::{Duration, Instant};
use heapless::Deque;

pub const CONTROLLER_TYPE: u16 = 0x1001;
pub const READ_ONLY_TYPE: u16 = 0x1002;
pub const NODE_TYPE: u16 = 0x1003;
/// Transmitting type without heartbeat and status ids
pub const UNCLASSIFIED_TYPE: u16 = 0x1004;
/// Node type outside the registering range
pub const SILENT_NODE_TYPE: u16 = 0x3003;

pub const CONTROLLER_HEARTBEAT: Pmid = Pmid::new(0x11);
pub const NODE_HEARTBEAT: Pmid = Pmid::new(0x12);
pub const STATUS: Pmid = Pmid::new(0x30);
pub const MAIN_TIMER: Pmid = Pmid::new(0x40);
pub const VALIDATION_TIMER: Pmid = Pmid::new(0x41);
pub const INTERNAL_TIMER: Pmid = Pmid::new(0x42);
pub const SERIAL_NUMBER: Pmid = Pmid::new(0x50);
pub const TYPE_ID: Pmid = Pmid::new(0x51);
pub const MODEL: Pmid = Pmid::new(0x52);
pub const VENDOR: Pmid = Pmid::new(0x53);
pub const SHORT_NAME: Pmid = Pmid::new(0x54);
/// Addressed request id
pub const SET_OUTPUT: Pmid = Pmid::new(0x150);
/// Plain broadcast id
pub const SENSOR_VALUE: Pmid = Pmid::new(0x300);

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(1000);
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEVICE_UPDATE_INTERVAL: Duration = Duration::from_millis(2000);
/// Added to the device update period on every randomization
pub const DEVICE_UPDATE_STEP: Duration = Duration::from_millis(100);

pub const CONTROLLER_UID: Uid = Uid::new(0x0001);
pub const UID64: u64 = 0x0123_4567_89ab_0042;
pub const OWN_UID: Uid = Uid::new(0x0042);

/// Identifier layout: `pmid << 16 | uid`, extended frames
#[derive(Debug, Default)]
pub struct MockProtocol {
    pub randomizations: u32,
}

impl Protocol for MockProtocol {
    fn encode_id(&self, id: MessageId) -> u32 {
        (u32::from(id.pmid.into_u16()) << 16) | u32::from(id.uid.into_u16())
    }

    fn decode_id(&self, raw: u32) -> MessageId {
        MessageId {
            pmid: Pmid::new((raw >> 16) as u16),
            uid: Uid::new(raw as u16),
        }
    }

    fn use_extended_ids(&self) -> bool {
        true
    }

    fn message_length(&self) -> usize {
        8
    }

    fn addressed_requests(&self) -> PmidRange {
        PmidRange::new(0x100, 0x200)
    }

    fn heartbeats(&self) -> PmidRange {
        PmidRange::new(0x10, 0x20)
    }

    fn device_types(&self) -> PmidRange {
        PmidRange::new(0x1000, 0x2000)
    }

    fn target_uid(&self, payload: &[u8]) -> Option<Uid> {
        let bytes = payload.get(0..2)?;
        Some(Uid::new(u16::from_be_bytes([bytes[0], bytes[1]])))
    }

    fn device_role(&self, type_id: u16) -> DeviceRole {
        match type_id & 0xff {
            0x01 => DeviceRole::Controller,
            0x02 => DeviceRole::ReadOnly,
            0x03 => DeviceRole::Node,
            _ => DeviceRole::Unclassified,
        }
    }

    fn heartbeat_pmid(&self, role: DeviceRole) -> Option<Pmid> {
        match role {
            DeviceRole::Controller => Some(CONTROLLER_HEARTBEAT),
            DeviceRole::Node => Some(NODE_HEARTBEAT),
            DeviceRole::ReadOnly | DeviceRole::Unclassified => None,
        }
    }

    fn status_pmid(&self, role: DeviceRole) -> Option<Pmid> {
        match role {
            DeviceRole::Controller | DeviceRole::Node => Some(STATUS),
            DeviceRole::ReadOnly | DeviceRole::Unclassified => None,
        }
    }

    fn timer_pmid(&self, role: DeviceRole, kind: TimerKind) -> Option<Pmid> {
        match (role, kind) {
            (DeviceRole::ReadOnly, _) => None,
            (_, TimerKind::Main) => Some(MAIN_TIMER),
            (DeviceRole::Controller, TimerKind::Validation) => Some(VALIDATION_TIMER),
            (DeviceRole::Controller, TimerKind::Internal) => Some(INTERNAL_TIMER),
            _ => None,
        }
    }

    fn device_info_pmid(&self, field: DeviceInfoField) -> Pmid {
        match field {
            DeviceInfoField::SerialNumber => SERIAL_NUMBER,
            DeviceInfoField::TypeId => TYPE_ID,
            DeviceInfoField::Model => MODEL,
            DeviceInfoField::Vendor => VENDOR,
            DeviceInfoField::ShortName => SHORT_NAME,
        }
    }

    fn encode_device_info(&self, info: &DeviceInfo<'_>, buf: &mut [u8]) {
        match info {
            DeviceInfo::SerialNumber(value) => buf.copy_from_slice(&value.to_be_bytes()),
            DeviceInfo::TypeId(value) => buf[..2].copy_from_slice(&value.to_be_bytes()),
            DeviceInfo::Model(text) | DeviceInfo::Vendor(text) | DeviceInfo::ShortName(text) => {
                buf[..text.len()].copy_from_slice(text.as_bytes())
            }
        }
    }

    fn encode_heartbeat(&self, buf: &mut [u8], _now: Instant, since_last: Duration) {
        buf[..4].copy_from_slice(&(since_last.as_millis() as u32).to_be_bytes());
    }

    fn encode_status(&self, buf: &mut [u8], status: &StatusSnapshot) {
        buf[..4].copy_from_slice(&status.status.to_be_bytes());
        buf[4..6].copy_from_slice(&status.progress.to_be_bytes());
        buf[6..8].copy_from_slice(&status.progress_max.to_be_bytes());
    }

    fn encode_timer(&self, buf: &mut [u8], current: u32, set: u32) {
        buf[..4].copy_from_slice(&current.to_be_bytes());
        buf[4..8].copy_from_slice(&set.to_be_bytes());
    }

    fn heartbeat_interval(&self) -> Duration {
        HEARTBEAT_INTERVAL
    }

    fn heartbeat_timeout(&self) -> Duration {
        HEARTBEAT_TIMEOUT
    }

    fn device_update_interval(&self) -> Duration {
        DEVICE_UPDATE_INTERVAL + DEVICE_UPDATE_STEP * self.randomizations
    }

    fn randomize_device_update_offset(&mut self) {
        self.randomizations += 1;
    }
}

/// Loop-back free bus: frames pushed by the test are received, sent frames are recorded
#[derive(Debug, Default)]
pub struct MockBus {
    pub rx: Deque<Frame, 64>,
    pub sent: Vec<Frame>,
}

impl MockBus {
    pub fn push(&mut self, frame: Frame) {
        self.rx.push_back(frame).unwrap();
    }

    /// Sent frames decoded as `(pmid, uid, payload)`
    pub fn sent_messages(&self) -> Vec<(Pmid, Uid, Data)> {
        let protocol = MockProtocol::default();
        self.sent
            .iter()
            .map(|frame| {
                let id = protocol.decode_id(frame.id);
                (id.pmid, id.uid, frame.data)
            })
            .collect()
    }

    pub fn sent_with(&self, pmid: Pmid) -> Vec<Data> {
        self.sent_messages()
            .into_iter()
            .filter(|(p, _, _)| *p == pmid)
            .map(|(_, _, data)| data)
            .collect()
    }
}

impl Bus for MockBus {
    fn receive(&mut self) -> Option<Frame> {
        self.rx.pop_front()
    }

    fn send(&mut self, frame: &Frame) {
        self.sent.push(*frame);
    }
}

/// Clock advanced by the test
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::from_millis(0)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + Duration::from_millis(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(Instant::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

pub fn frame(pmid: Pmid, uid: Uid, payload: &[u8]) -> Frame {
    let protocol = MockProtocol::default();
    Frame::new(
        protocol.encode_id(MessageId { pmid, uid }),
        true,
        Data::new(payload).unwrap(),
    )
}

pub fn heartbeat_from_controller() -> Frame {
    frame(CONTROLLER_HEARTBEAT, CONTROLLER_UID, &[0; 8])
}
