//! Staging queues between the bus and the application
//!
//! Each direction owns a fixed-capacity FIFO. A write to a full queue is rejected and the
//! message is dropped; nothing is ever overwritten and the queues never grow.

use core::ops::{Index, IndexMut};

use crate::core::{InvalidValue, Pmid, Uid};
use crate::frame::PAYLOAD_BYTES;

/// Default number of slots per direction
pub const DEFAULT_CAPACITY: usize = 64;

/// Queue selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// Received from the bus, waiting for the application
    Inbound = 0,
    /// Staged by the application or periodic tasks, waiting for transmission
    Outbound = 1,
}

impl Direction {
    pub const fn into_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Inbound),
            1 => Ok(Direction::Outbound),
            _ => Err(InvalidValue),
        }
    }
}

/// Message waiting in a queue slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StagedMessage {
    pub uid: Uid,
    pub pmid: Pmid,
    payload: [u8; PAYLOAD_BYTES],
    length: u8,
}

impl StagedMessage {
    const EMPTY: StagedMessage = StagedMessage {
        uid: Uid::new(0),
        pmid: Pmid::new(0),
        payload: [0; PAYLOAD_BYTES],
        length: 0,
    };

    /// Creates a message. The payload is truncated to the slot width.
    pub fn new(uid: Uid, pmid: Pmid, payload: &[u8]) -> Self {
        let length = payload.len().min(PAYLOAD_BYTES);
        let mut bytes = [0; PAYLOAD_BYTES];
        bytes[..length].copy_from_slice(&payload[..length]);
        Self {
            uid,
            pmid,
            payload: bytes,
            length: length as u8,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload[..usize::from(self.length)]
    }

    pub fn length(&self) -> u8 {
        self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFull;

/// Circular FIFO with drop-on-full semantics
pub struct RingBuffer<const N: usize> {
    slots: [StagedMessage; N],
    write_pos: usize,
    read_pos: usize,
    count: usize,
}

impl<const N: usize> RingBuffer<N> {
    const _ASSERT: usize = N - 1;

    pub const fn new() -> Self {
        let _ = Self::_ASSERT;
        Self {
            slots: [StagedMessage::EMPTY; N],
            write_pos: 0,
            read_pos: 0,
            count: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Appends a message. A full buffer rejects it and stays unchanged.
    pub fn write(&mut self, message: StagedMessage) -> Result<(), BufferFull> {
        if self.is_full() {
            return Err(BufferFull);
        }
        self.slots[self.write_pos] = message;
        self.write_pos = Self::advance(self.write_pos);
        self.count += 1;
        Ok(())
    }

    /// Removes the oldest message.
    pub fn read(&mut self) -> Option<StagedMessage> {
        if self.is_empty() {
            return None;
        }
        let message = self.slots[self.read_pos];
        self.read_pos = Self::advance(self.read_pos);
        self.count -= 1;
        Some(message)
    }

    fn advance(pos: usize) -> usize {
        if pos + 1 == N { 0 } else { pos + 1 }
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Inbound and outbound queues addressed by [`Direction`]
pub struct DualRingBuffer<const N: usize = DEFAULT_CAPACITY> {
    buffers: [RingBuffer<N>; 2],
}

impl<const N: usize> DualRingBuffer<N> {
    pub const fn new() -> Self {
        Self {
            buffers: [RingBuffer::new(), RingBuffer::new()],
        }
    }

    pub fn write(&mut self, direction: Direction, message: StagedMessage) -> Result<(), BufferFull> {
        let res = self[direction].write(message);
        if res.is_err() {
            debug!(
                "{:?} buffer full, message {} dropped",
                direction,
                message.pmid.into_u16()
            );
        }
        res
    }

    pub fn read(&mut self, direction: Direction) -> Option<StagedMessage> {
        self[direction].read()
    }
}

impl<const N: usize> Default for DualRingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Index<Direction> for DualRingBuffer<N> {
    type Output = RingBuffer<N>;

    fn index(&self, index: Direction) -> &Self::Output {
        &self.buffers[usize::from(index.into_u8())]
    }
}

impl<const N: usize> IndexMut<Direction> for DualRingBuffer<N> {
    fn index_mut(&mut self, index: Direction) -> &mut Self::Output {
        &mut self.buffers[usize::from(index.into_u8())]
    }
}
