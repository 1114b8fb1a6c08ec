//! Notification Source record decoding.

use structbuf::Unpacker;

use crate::{CategoryId, EventFlags, EventId};

/// One iOS notification summary, as pushed on the Notification Source
/// characteristic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Notif {
    /// Provider-assigned notification UID.
    pub uid: u32,
    /// Whether the notification was added, modified, or removed.
    pub event: EventId,
    /// Special conditions that apply to the notification.
    pub flags: EventFlags,
    /// Classification of the notification, such as email or location.
    pub category: CategoryId,
    /// Number of active notifications in the same category.
    pub category_count: u8,
}

impl Notif {
    /// Decodes one 8-byte record. Returns `None` if the event id or
    /// category is out of range. Missing bytes of a short record read as
    /// zero.
    pub(crate) fn unpack(p: &mut Unpacker) -> Option<Self> {
        let event = EventId::try_from(p.u8());
        let flags = EventFlags::from_bits_retain(p.u8());
        let category = CategoryId::try_from(p.u8());
        let category_count = p.u8();
        let uid = p.u32();
        Some(Self {
            uid,
            event: event.ok()?,
            flags,
            category: category.ok()?,
            category_count,
        })
    }
}
