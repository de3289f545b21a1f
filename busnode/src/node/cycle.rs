//! Cooperative node cycle
//!
//! One [`Node::tick`] call receives a bounded batch of frames and then evaluates the
//! periodic gates in a fixed order: flush, maintenance, heartbeat, device update.

use super::Node;
use crate::buffer::{Direction, StagedMessage};
use crate::bus::Bus;
use crate::clock::Clock;
use crate::core::Pmid;
use crate::protocol::{DeviceInfo, Protocol};
use crate::router;

impl<B: Bus, P: Protocol, C: Clock, const N: usize> Node<B, P, C, N> {
    /// Runs one scheduling cycle.
    pub fn tick(&mut self) {
        self.receive_batch();

        let now = self.clock.now();
        if self.scheduler.flush.poll(now) {
            self.flush();
        }
        if self.scheduler.maintenance.poll(now) {
            self.maintain();
        }
        if self.scheduler.heartbeat.poll(now) {
            self.send_heartbeat();
        }
        if self.scheduler.device_update.poll(now) {
            self.announce_device();
        }
    }

    /// Routes at most `rx_batch_limit` frames from the bus.
    ///
    /// Returns the number of frames taken.
    fn receive_batch(&mut self) -> usize {
        let mut taken = 0;
        while taken < self.config.rx_batch_limit {
            let Some(frame) = self.bus.receive() else {
                break;
            };
            taken += 1;

            let now = self.clock.now();
            router::route(
                &self.protocol,
                self.identity.uid(),
                &frame,
                now,
                &mut self.presence,
                &mut self.buffers,
            );
        }
        taken
    }

    /// Transmits at most `tx_batch_limit` staged messages.
    ///
    /// Returns the number of frames sent.
    pub fn flush(&mut self) -> usize {
        if !self.can_transmit() {
            return 0;
        }
        let mut sent = 0;
        while sent < self.config.tx_batch_limit {
            let Some(message) = self.buffers.read(Direction::Outbound) else {
                break;
            };
            let frame = self.make_frame(message.uid, message.pmid, message.payload());
            self.transmit(&frame);
            sent += 1;
        }
        sent
    }

    fn maintain(&mut self) {
        self.send_status_if_changed();

        let now = self.clock.now();
        if self
            .presence
            .check_timeout(now, self.protocol.heartbeat_timeout())
        {
            info!("No heartbeat for {} ms", self.protocol.heartbeat_timeout().as_millis());
        }

        let role = self.identity.role();
        if self.registration.update(role, self.presence.is_online()) {
            self.request_registration();
        }
    }

    /// Sends a heartbeat frame directly, bypassing the outbound buffer.
    pub fn send_heartbeat(&mut self) {
        if !self.can_transmit() {
            return;
        }
        let Some(pmid) = self.protocol.heartbeat_pmid(self.identity.role()) else {
            return;
        };
        let now = self.clock.now();
        let since_last = now.saturating_duration_since(self.last_heartbeat_sent);
        let data = self.encode_payload(|protocol, buf| {
            protocol.encode_heartbeat(buf, now, since_last)
        });
        let frame = self.make_frame(self.identity.uid(), pmid, &data);
        self.transmit(&frame);
        self.last_heartbeat_sent = now;
    }

    /// Stages every device information field.
    ///
    /// Fields that do not fit into the outbound buffer are skipped until the next
    /// announcement.
    pub fn send_device_info(&mut self) {
        if !self.can_transmit() {
            return;
        }
        let identity = &self.identity;
        let fields = [
            DeviceInfo::SerialNumber(identity.uid64()),
            DeviceInfo::TypeId(identity.type_id()),
            DeviceInfo::Model(identity.model()),
            DeviceInfo::Vendor(identity.vendor()),
            DeviceInfo::ShortName(identity.short_name()),
        ];
        for info in &fields {
            let pmid = self.protocol.device_info_pmid(info.field());
            let data = self.encode_payload(|protocol, buf| protocol.encode_device_info(info, buf));
            let message = StagedMessage::new(identity.uid(), pmid, &data);
            if self.buffers.write(Direction::Outbound, message).is_err() {
                debug!("Device info {:?} not staged", info.field());
            }
        }
    }

    /// Stages the device information and draws the next device update period.
    fn announce_device(&mut self) {
        self.send_device_info();
        self.protocol.randomize_device_update_offset();
        self.scheduler
            .device_update
            .set_period(self.protocol.device_update_interval());
    }

    /// Announces the device type, followed by its information and status.
    ///
    /// Types outside the registering range stay silent. The announcement restarts the
    /// device update period.
    fn request_registration(&mut self) {
        let type_id = self.identity.type_id();
        let pmid = Pmid::new(type_id);
        if !self.protocol.device_types().contains(pmid) {
            debug!("Type {} does not register", type_id);
            return;
        }

        let data = self.encode_payload(|protocol, buf| {
            protocol.encode_device_info(&DeviceInfo::TypeId(type_id), buf)
        });
        if self.stage_own(pmid, &data).is_err() {
            warn!("Registration request for type {} not staged", type_id);
        }

        let now = self.clock.now();
        self.scheduler.device_update.restart(now);
        self.announce_device();
        self.send_status();
    }
}
