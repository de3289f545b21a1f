//! Static device description announced on the bus

use crate::core::{DeviceRole, Uid};
use crate::frame::PAYLOAD_BYTES;

/// Text field that fits a single payload together with its terminator
pub type Label = heapless::String<PAYLOAD_BYTES>;

/// Longest label text in bytes
pub const LABEL_MAX_LEN: usize = PAYLOAD_BYTES - 1;

/// Copies at most [`LABEL_MAX_LEN`] bytes of `text`, cutting at a char boundary.
pub fn make_label(text: &str) -> Label {
    let mut end = text.len().min(LABEL_MAX_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut label = Label::new();
    unwrap!(label.push_str(&text[..end]));
    label
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    uid64: u64,
    uid: Uid,
    type_id: u16,
    role: DeviceRole,
    model: Label,
    short_name: Label,
    vendor: Label,
}

impl DeviceIdentity {
    pub fn new(
        uid64: u64,
        type_id: u16,
        role: DeviceRole,
        model: &str,
        short_name: &str,
        vendor: &str,
    ) -> Self {
        Self {
            uid64,
            uid: Uid::from_u64_truncating(uid64),
            type_id,
            role,
            model: make_label(model),
            short_name: make_label(short_name),
            vendor: make_label(vendor),
        }
    }

    pub fn uid64(&self) -> u64 {
        self.uid64
    }

    /// Bus form of the uid
    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn type_id(&self) -> u16 {
        self.type_id
    }

    pub fn role(&self) -> DeviceRole {
        self.role
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }
}
