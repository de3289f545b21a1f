//! Bus frame object

/// Payload capacity of a single frame
pub const PAYLOAD_BYTES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidLength;

/// Classic-CAN compatible data vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Data {
    length: u8,
    bytes: [u8; PAYLOAD_BYTES],
}

impl Data {
    pub const EMPTY: Data = Data {
        length: 0,
        bytes: [0; PAYLOAD_BYTES],
    };

    /// Creates a new vector from a slice that fits into a frame.
    pub fn new(data: &[u8]) -> Result<Self, InvalidLength> {
        if data.len() > PAYLOAD_BYTES {
            return Err(InvalidLength);
        }
        Ok(Self::new_truncating(data))
    }

    /// Creates a new vector from the first `PAYLOAD_BYTES` bytes of the slice.
    pub fn new_truncating(data: &[u8]) -> Self {
        let length = data.len().min(PAYLOAD_BYTES);
        let mut bytes = [0; PAYLOAD_BYTES];
        bytes[..length].copy_from_slice(&data[..length]);
        Self {
            length: length as u8,
            bytes,
        }
    }

    pub fn new_zeros(length: usize) -> Result<Self, InvalidLength> {
        if length > PAYLOAD_BYTES {
            return Err(InvalidLength);
        }
        Ok(Self {
            length: length as u8,
            bytes: [0; PAYLOAD_BYTES],
        })
    }

    pub fn length(&self) -> u8 {
        self.length
    }
}

impl Default for Data {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::ops::Deref for Data {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes[..usize::from(self.length)]
    }
}

impl core::ops::DerefMut for Data {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.bytes[..usize::from(self.length)]
    }
}

/// Bus frame: a numeric identifier and a short payload
///
/// The identifier is opaque at this level. The protocol codec maps it to a
/// message kind and a device uid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub id: u32,
    /// 29-bit identifier if set, 11-bit otherwise
    pub extended: bool,
    pub data: Data,
}

impl Frame {
    pub fn new(id: u32, extended: bool, data: Data) -> Self {
        Self { id, extended, data }
    }
}
