//! Channel connecting a bus transceiver and the busnode stack

use embedded_can::{ErrorKind, ExtendedId, Id, StandardId};

use crate::frame::{Data, Frame};

/// Non-blocking bus transceiver
///
/// Both directions must return immediately. The stack polls `receive` until it
/// yields `None` or a per-cycle batch limit is reached.
pub trait Bus {
    /// Fetches the next received frame, if any.
    fn receive(&mut self) -> Option<Frame>;

    /// Hands a frame over for transmission.
    ///
    /// Delivery is best effort. A driver that cannot queue the frame drops it.
    fn send(&mut self, frame: &Frame);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn receive(&mut self) -> Option<Frame> {
        (**self).receive()
    }

    fn send(&mut self, frame: &Frame) {
        (**self).send(frame)
    }
}

/// Adapter for `embedded-can` non-blocking peripherals
///
/// Remote frames are ignored. Frames that the peripheral refuses are dropped and logged.
pub struct CanBus<C> {
    can: C,
}

impl<C: embedded_can::nb::Can> CanBus<C> {
    pub fn new(can: C) -> Self {
        Self { can }
    }

    pub fn inner(&mut self) -> &mut C {
        &mut self.can
    }

    pub fn into_inner(self) -> C {
        self.can
    }
}

impl<C: embedded_can::nb::Can> Bus for CanBus<C> {
    fn receive(&mut self) -> Option<Frame> {
        use embedded_can::Error;

        loop {
            match self.can.receive() {
                Ok(frame) => {
                    if let Some(frame) = convert_from_can(&frame) {
                        return Some(frame);
                    }
                }
                Err(nb::Error::WouldBlock) => return None,
                Err(nb::Error::Other(err)) => {
                    warn!("CAN receive error: {}", describe(err.kind()));
                    return None;
                }
            }
        }
    }

    fn send(&mut self, frame: &Frame) {
        use embedded_can::Error;

        let Some(can_frame) = convert_into_can::<C::Frame>(frame) else {
            warn!("Frame id {} does not fit the identifier width", frame.id);
            return;
        };
        match self.can.transmit(&can_frame) {
            Ok(None) => {}
            Ok(Some(_)) => debug!("Pending lower priority frame displaced"),
            Err(nb::Error::WouldBlock) => warn!("CAN transmit queue full, frame dropped"),
            Err(nb::Error::Other(err)) => warn!("CAN transmit error: {}", describe(err.kind())),
        }
    }
}

fn convert_from_can<F: embedded_can::Frame>(frame: &F) -> Option<Frame> {
    if frame.is_remote_frame() {
        return None;
    }
    let (id, extended) = match frame.id() {
        Id::Standard(id) => (u32::from(id.as_raw()), false),
        Id::Extended(id) => (id.as_raw(), true),
    };
    Some(Frame::new(id, extended, Data::new_truncating(frame.data())))
}

fn convert_into_can<F: embedded_can::Frame>(frame: &Frame) -> Option<F> {
    let id = if frame.extended {
        Id::Extended(ExtendedId::new(frame.id)?)
    } else {
        Id::Standard(StandardId::new(u16::try_from(frame.id).ok()?)?)
    };
    F::new(id, &frame.data)
}

fn describe(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Overrun => "overrun",
        ErrorKind::Bit => "bit",
        ErrorKind::Stuff => "stuff",
        ErrorKind::Crc => "crc",
        ErrorKind::Form => "form",
        ErrorKind::Acknowledge => "acknowledge",
        _ => "other",
    }
}
