//! Received frame dispatch

use crate::buffer::{Direction, DualRingBuffer, StagedMessage};
use crate::core::Uid;
use crate::frame::Frame;
use crate::presence::Presence;
use crate::protocol::Protocol;
use crate::time::Instant;

/// Outcome of routing a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Route {
    /// Heartbeat consumed by presence tracking
    Heartbeat,
    /// Addressed request for another device
    NotForUs,
    /// Stored in the inbound buffer
    Stored,
    /// Accepted, but the inbound buffer was full
    Overflow,
}

/// Dispatches a received frame.
///
/// Heartbeats refresh presence regardless of addressing and are never stored.
/// Addressed requests whose target is not `own_uid` are discarded without counting
/// as traffic. Everything else refreshes the traffic timestamp and goes to the inbound
/// buffer tagged with the decoded uid and message id.
pub fn route<P: Protocol + ?Sized, const N: usize>(
    protocol: &P,
    own_uid: Uid,
    frame: &Frame,
    now: Instant,
    presence: &mut Presence,
    buffers: &mut DualRingBuffer<N>,
) -> Route {
    let id = protocol.decode_id(frame.id);

    if protocol.heartbeats().contains(id.pmid) {
        presence.receive_heartbeat(now);
        return Route::Heartbeat;
    }

    if protocol.addressed_requests().contains(id.pmid)
        && protocol.target_uid(&frame.data) != Some(own_uid)
    {
        trace!(
            "Request {} from {} not addressed to us",
            id.pmid.into_u16(),
            id.uid.into_u16()
        );
        return Route::NotForUs;
    }

    presence.record_traffic(now);
    let message = StagedMessage::new(id.uid, id.pmid, &frame.data);
    match buffers.write(Direction::Inbound, message) {
        Ok(()) => Route::Stored,
        Err(_) => Route::Overflow,
    }
}
