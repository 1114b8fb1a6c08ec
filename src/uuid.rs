//! ANCS service and characteristic UUIDs.

use std::fmt::{Debug, Display, Formatter};
use std::num::{NonZeroU128, NonZeroU16};

use structbuf::Unpack;

const SHIFT: u32 = u128::BITS - u32::BITS;
const BASE: u128 = 0x00000000_0000_1000_8000_00805F9B34FB;
const MASK_16: u128 = !((u16::MAX as u128) << SHIFT);

/// Apple Notification Center Service.
pub const SERVICE: Uuid = uuid128(0x7905F431_B5CE_4E99_A40F_4B1E122D00D0);

/// Notification Source characteristic.
pub const NOTIFICATION_SOURCE: Uuid = uuid128(0x9FBF120D_6301_42D9_8C58_25E699A21DBD);

/// Control Point characteristic.
pub const CONTROL_POINT: Uuid = uuid128(0x69D1D8F3_45E1_49A8_9821_9BBDFDAAD9D9);

/// Data Source characteristic.
pub const DATA_SOURCE: Uuid = uuid128(0x22EAC6E9_24D6_4BB5_BE44_B36ACE7C7BFB);

/// Client Characteristic Configuration descriptor.
pub const CCCD: Uuid16 = uuid16(0x2902);

/// 16- or 128-bit UUID ([Vol 3] Part B, Section 2.5.1).
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Uuid(NonZeroU128);

impl Uuid {
    /// Creates a UUID from a `u128`.
    #[inline]
    #[must_use]
    pub const fn new(v: u128) -> Option<Self> {
        match NonZeroU128::new(v) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Converts an assigned 16-bit Bluetooth SIG UUID to `u16`.
    #[inline]
    #[must_use]
    pub fn as_u16(self) -> Option<u16> {
        #[allow(clippy::cast_possible_truncation)]
        let v = (self.0.get() >> SHIFT) as u16;
        (self.0.get() & MASK_16 == BASE && v > 0).then_some(v)
    }

    /// Returns the UUID as a little-endian byte array.
    #[inline]
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0.get().to_le_bytes()
    }
}

impl From<Uuid16> for Uuid {
    #[inline]
    fn from(u: Uuid16) -> Self {
        u.as_uuid()
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ();

    /// Converts a little-endian byte slice to a UUID.
    #[inline]
    fn try_from(v: &[u8]) -> std::result::Result<Self, Self::Error> {
        match v.len() {
            2 => Uuid16::new(v.unpack().u16()).map(Uuid16::as_uuid),
            16 => Uuid::new(v.unpack().u128()),
            _ => None,
        }
        .ok_or(())
    }
}

impl Debug for Uuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        #[allow(clippy::cast_possible_truncation)]
        if let Some(v) = self.as_u16() {
            write!(f, "{v:#06X}")
        } else {
            let v = self.0.get();
            write!(
                f,
                "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}",
                (v >> 96) as u32,
                (v >> 80) as u16,
                (v >> 64) as u16,
                (v >> 48) as u16,
                (v & ((1 << 48) - 1)) as u64
            )
        }
    }
}

impl Display for Uuid {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

/// 16-bit Bluetooth SIG UUID.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Uuid16(NonZeroU16);

impl Uuid16 {
    /// Creates a 16-bit SIG UUID from a `u16`.
    #[inline]
    #[must_use]
    pub const fn new(v: u16) -> Option<Self> {
        match NonZeroU16::new(v) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Returns the 128-bit UUID representation.
    #[inline]
    #[must_use]
    pub const fn as_uuid(self) -> Uuid {
        // SAFETY: Always non-zero
        Uuid(unsafe { NonZeroU128::new_unchecked((self.0.get() as u128) << SHIFT | BASE) })
    }
}

impl Debug for Uuid16 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06X}", self.0.get())
    }
}

impl Display for Uuid16 {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

impl PartialEq<Uuid> for Uuid16 {
    #[inline]
    fn eq(&self, rhs: &Uuid) -> bool {
        self.as_uuid() == *rhs
    }
}

impl PartialEq<Uuid16> for Uuid {
    #[inline]
    fn eq(&self, rhs: &Uuid16) -> bool {
        *self == rhs.as_uuid()
    }
}

/// Creates a 128-bit UUID from a `u128` literal.
#[inline]
#[must_use]
const fn uuid128(v: u128) -> Uuid {
    // SAFETY: All crate uses guarantee that v != 0
    Uuid(unsafe { NonZeroU128::new_unchecked(v) })
}

/// Creates an assigned 16-bit SIG UUID from a `u16` literal.
#[inline]
#[must_use]
const fn uuid16(v: u16) -> Uuid16 {
    // SAFETY: All crate uses guarantee that v != 0
    Uuid16(unsafe { NonZeroU16::new_unchecked(v) })
}
