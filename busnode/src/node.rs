//! Bus node implementation
//!
//! A [`Node`] owns the bus driver, the protocol codec, the staging buffers and the presence,
//! registration and scheduling state. The host calls [`Node::tick`] in its main loop, at
//! least as often as the shortest configured period, and talks to the bus through the
//! application methods in between.
//!
//! ## Examples
//!
//! ```ignore
//! use busnode::clock::SystemClock;
//! use busnode::config::Config;
//! use busnode::node::Node;
//!
//! let mut node = Node::<_, _, _>::begin(
//!     bus,
//!     protocol,
//!     SystemClock,
//!     Config::default(),
//!     UID64,
//!     TYPE_ID,
//!     "Model",
//!     "short",
//!     "Vendor",
//! );
//! loop {
//!     node.tick();
//!     while let Some(message) = node.drain_inbound() {
//!         handle(message);
//!     }
//! }
//! ```

use crate::buffer::{BufferFull, DEFAULT_CAPACITY, Direction, DualRingBuffer, StagedMessage};
use crate::bus::Bus;
use crate::clock::Clock;
use crate::config::Config;
use crate::core::{Pmid, Uid};
use crate::frame::{Data, Frame, PAYLOAD_BYTES};
use crate::identity::DeviceIdentity;
use crate::presence::Presence;
use crate::protocol::{MessageId, Protocol, TimerKind};
use crate::registration::{Registration, RegistrationState};
use crate::scheduler::SchedulerState;
use crate::status::{StatusSnapshot, StatusTracker};
use crate::time::Instant;

mod cycle;

pub struct Node<B, P, C, const N: usize = DEFAULT_CAPACITY> {
    bus: B,
    protocol: P,
    clock: C,
    config: Config,
    identity: DeviceIdentity,
    buffers: DualRingBuffer<N>,
    presence: Presence,
    registration: Registration,
    status: StatusTracker,
    scheduler: SchedulerState,
    last_heartbeat_sent: Instant,
}

impl<B: Bus, P: Protocol, C: Clock, const N: usize> Node<B, P, C, N> {
    /// Creates a node for the device and starts all periodic timers.
    ///
    /// Text fields are cut to fit a single frame payload.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        bus: B,
        protocol: P,
        clock: C,
        config: Config,
        uid64: u64,
        type_id: u16,
        model: &str,
        short_name: &str,
        vendor: &str,
    ) -> Self {
        let now = clock.now();
        let role = protocol.device_role(type_id);
        let identity = DeviceIdentity::new(uid64, type_id, role, model, short_name, vendor);
        let scheduler = SchedulerState::new(
            &config,
            protocol.heartbeat_interval(),
            protocol.device_update_interval(),
            now,
        );
        info!(
            "Node {} started, type {}, role {:?}",
            identity.uid().into_u16(),
            type_id,
            role
        );

        Self {
            bus,
            protocol,
            clock,
            config,
            identity,
            buffers: DualRingBuffer::new(),
            presence: Presence::new(now),
            registration: Registration::new(role),
            status: StatusTracker::default(),
            scheduler,
            last_heartbeat_sent: now,
        }
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn scheduler(&self) -> &SchedulerState {
        &self.scheduler
    }

    pub fn buffers(&self) -> &DualRingBuffer<N> {
        &self.buffers
    }

    /// Bytes available for a single payload
    pub fn payload_byte_count(&self) -> usize {
        PAYLOAD_BYTES
    }

    /// Stages an outbound message on behalf of `uid`.
    ///
    /// Read-only devices accept and discard the message.
    pub fn stage(&mut self, uid: Uid, pmid: Pmid, payload: &[u8]) -> Result<(), BufferFull> {
        if !self.can_transmit() {
            trace!("Read-only device, message {} discarded", pmid.into_u16());
            return Ok(());
        }
        self.buffers
            .write(Direction::Outbound, StagedMessage::new(uid, pmid, payload))
    }

    /// Stages an outbound message on behalf of this device.
    pub fn stage_own(&mut self, pmid: Pmid, payload: &[u8]) -> Result<(), BufferFull> {
        self.stage(self.identity.uid(), pmid, payload)
    }

    /// Takes the oldest received message.
    pub fn drain_inbound(&mut self) -> Option<StagedMessage> {
        self.buffers.read(Direction::Inbound)
    }

    /// Sets the status reported on the next maintenance cycle.
    pub fn update_status(&mut self, status: u32, progress: u16, progress_max: u16) {
        self.status.update(StatusSnapshot {
            status,
            progress,
            progress_max,
        });
    }

    pub fn status(&self) -> StatusSnapshot {
        self.status.current()
    }

    /// Stages the current status unconditionally.
    pub fn send_status(&mut self) {
        if !self.can_transmit() {
            return;
        }
        let Some(pmid) = self.protocol.status_pmid(self.identity.role()) else {
            return;
        };
        let status = self.status.current();
        let data = self.encode_payload(|protocol, buf| protocol.encode_status(buf, &status));
        let message = StagedMessage::new(self.identity.uid(), pmid, &data);
        if self.buffers.write(Direction::Outbound, message).is_ok() {
            self.status.mark_sent();
        }
    }

    /// Stages the current status if it differs from the last one sent.
    pub fn send_status_if_changed(&mut self) {
        if self.status.is_changed() {
            self.send_status();
        }
    }

    /// Stages a timer broadcast: current and set values in milliseconds.
    ///
    /// Roles without a message id for the timer kind send nothing.
    pub fn send_timer(&mut self, kind: TimerKind, current: u32, set: u32) -> Result<(), BufferFull> {
        if !self.can_transmit() {
            return Ok(());
        }
        let Some(pmid) = self.protocol.timer_pmid(self.identity.role(), kind) else {
            return Ok(());
        };
        let data = self.encode_payload(|protocol, buf| protocol.encode_timer(buf, current, set));
        self.stage_own(pmid, &data)
    }

    pub fn is_online(&self) -> bool {
        self.presence.is_online()
    }

    pub fn go_online(&mut self) {
        self.presence.go_online();
    }

    pub fn go_offline(&mut self) {
        self.presence.go_offline();
    }

    /// Registers a remote heartbeat received outside of [`Node::tick`].
    pub fn receive_heartbeat(&mut self) {
        let now = self.clock.now();
        self.presence.receive_heartbeat(now);
    }

    /// Last accepted bus traffic
    pub fn last_rx(&self) -> Option<Instant> {
        self.presence.last_rx()
    }

    /// Last frame handed to the bus driver
    pub fn last_tx(&self) -> Option<Instant> {
        self.presence.last_tx()
    }

    /// Whether traffic arrived within the configured activity threshold.
    pub fn is_bus_active(&self) -> bool {
        self.presence
            .is_active(self.clock.now(), self.config.activity_threshold)
    }

    pub fn registration_state(&self) -> RegistrationState {
        self.registration.state()
    }

    /// Confirms a pending registration on behalf of the registrar.
    ///
    /// Returns `true` if the node became `Registered`.
    pub fn acknowledge_registration(&mut self) -> bool {
        self.registration.acknowledge()
    }

    fn can_transmit(&self) -> bool {
        self.identity.role().can_transmit()
    }

    fn payload_len(&self) -> usize {
        self.protocol.message_length().min(PAYLOAD_BYTES)
    }

    fn encode_payload(&self, encode: impl FnOnce(&P, &mut [u8])) -> Data {
        let mut data = unwrap!(Data::new_zeros(self.payload_len()));
        encode(&self.protocol, &mut data);
        data
    }

    fn make_frame(&self, uid: Uid, pmid: Pmid, payload: &[u8]) -> Frame {
        Frame::new(
            self.protocol.encode_id(MessageId { pmid, uid }),
            self.protocol.use_extended_ids(),
            Data::new_truncating(payload),
        )
    }

    fn transmit(&mut self, frame: &Frame) {
        if !self.can_transmit() {
            trace!("Read-only device, frame {} suppressed", frame.id);
            return;
        }
        self.bus.send(frame);
        self.presence.record_transmit(self.clock.now());
    }
}
