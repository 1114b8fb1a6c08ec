//! Transport and discovery collaborator interfaces.

use std::fmt::{Debug, Display, Formatter};
use std::num::NonZeroU16;

use crate::uuid::Uuid;
use crate::Result;

/// Attribute handle of a remote characteristic or descriptor
/// ([Vol 3] Part F, Section 3.2.2).
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Handle(NonZeroU16);

impl Handle {
    /// Wraps a raw handle. Returns `None` if the handle is invalid.
    #[inline]
    #[must_use]
    pub const fn new(h: u16) -> Option<Self> {
        match NonZeroU16::new(h) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }
}

impl Debug for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({:#06X})", self.0.get())
    }
}

impl Display for Handle {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl From<Handle> for u16 {
    #[inline]
    fn from(h: Handle) -> Self {
        h.0.get()
    }
}

/// GATT client operations consumed by the session. One implementation wraps
/// one connection to the Notification Provider.
///
/// All methods must queue the operation and return without blocking.
/// Failures are reported as [`Error::Transport`](crate::Error::Transport)
/// with the stack's numeric code.
pub trait Transport: Send + Sync {
    /// Writes `value` to `handle` as a write-with-response. The caller must
    /// deliver the provider's write status to
    /// [`Client::on_write_complete`](crate::Client::on_write_complete) once
    /// the response arrives. An `Err` return means no completion will be
    /// delivered.
    fn write(&self, handle: Handle, value: &[u8]) -> Result<()>;

    /// Subscribes to notifications on the characteristic with value handle
    /// `value` and CCCD handle `cccd`.
    fn subscribe(&self, value: Handle, cccd: Handle) -> Result<()>;

    /// Reverts a previous [`Transport::subscribe`].
    fn unsubscribe(&self, value: Handle, cccd: Handle) -> Result<()>;
}

/// Result of a GATT service discovery performed by the caller, queried for
/// the handles of one discovered service.
pub trait Discovery {
    /// Returns the UUID of the discovered service.
    fn service(&self) -> Uuid;

    /// Returns the value handle of the characteristic with the specified
    /// UUID, or `None` if the service does not contain it.
    fn characteristic(&self, uuid: Uuid) -> Option<Handle>;

    /// Returns the handle of descriptor `desc` within the characteristic
    /// with UUID `chr`, or `None` if absent.
    fn descriptor(&self, chr: Uuid, desc: Uuid) -> Option<Handle>;
}

/// Resolved ANCS characteristic and descriptor handles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServiceHandles {
    /// Control Point characteristic.
    pub control_point: Handle,
    /// Notification Source characteristic.
    pub notif_source: Handle,
    /// CCCD of the Notification Source characteristic.
    pub notif_source_cccd: Handle,
    /// Data Source characteristic.
    pub data_source: Handle,
    /// CCCD of the Data Source characteristic.
    pub data_source_cccd: Handle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle() {
        assert_eq!(Handle::new(0), None);
        let h = Handle::new(0x1F).unwrap();
        assert_eq!(u16::from(h), 0x1F);
        assert_eq!(format!("{h}"), "Handle(0x001F)");
        assert_eq!(std::mem::size_of::<Option<Handle>>(), 2);
    }
}
