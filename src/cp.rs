//! Control Point command encoding.

use crate::consts::NOTIF_ATTR_COUNT;
use crate::parse::AttrTables;
use crate::{ActionId, CommandId, Error, Result};

/// Control Point staging buffer size. Commands larger than this, which can
/// only result from a long app identifier, fail with
/// [`Error::NoSpace`](crate::Error::NoSpace).
pub const CP_BUF_SIZE: usize = 32;

// Worst-case fixed-size command: command id, UID, and all eight attribute
// ids with three max-length fields
const _: () = assert!(CP_BUF_SIZE >= 1 + 4 + NOTIF_ATTR_COUNT + 3 * 2);

/// Encodes a "perform notification action" command and returns the encoded
/// length.
pub(crate) fn perform_notif_action(
    buf: &mut [u8; CP_BUF_SIZE],
    uid: u32,
    action: ActionId,
) -> usize {
    buf[0] = CommandId::PerformNotifAction.into();
    buf[1..5].copy_from_slice(&uid.to_le_bytes());
    buf[5] = action.into();
    6
}

/// Encodes a "get notification attributes" command for every requested
/// notification attribute. Returns the encoded length and the number of
/// requested attributes.
pub(crate) fn get_notif_attrs(
    buf: &mut [u8; CP_BUF_SIZE],
    uid: u32,
    tables: &AttrTables,
) -> (usize, u32) {
    buf[0] = CommandId::GetNotifAttrs.into();
    buf[1..5].copy_from_slice(&uid.to_le_bytes());
    let (mut i, mut n) = (5, 0);
    for (id, max_len) in tables.notif_requested() {
        buf[i] = id.into();
        i += 1;
        // The length field applies to Title, Subtitle, and Message only
        if id.has_max_len() {
            buf[i..i + 2].copy_from_slice(&max_len.to_le_bytes());
            i += 2;
        }
        n += 1;
    }
    (i, n)
}

/// Encoder states for the "get app attributes" command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Encode {
    /// Encoding the command id.
    CmdId,
    /// Encoding the app identifier.
    AppId,
    /// Encoding the attribute ids.
    AttrId,
    /// Encoding finished.
    Done,
    /// Encoding exceeded the staging buffer.
    Abort,
}

/// Encodes a "get app attributes" command. The app identifier is
/// caller-supplied and of arbitrary length, so encoding runs through a state
/// machine with a per-byte bound check; overflowing the staging buffer
/// aborts the command. Returns the encoded length and the number of
/// requested attributes.
pub(crate) fn get_app_attrs(
    buf: &mut [u8; CP_BUF_SIZE],
    app_id: &[u8],
    tables: &AttrTables,
) -> Result<(usize, u32)> {
    let mut state = Encode::CmdId;
    let (mut i, mut src, mut n) = (0, 0, 0);
    while !matches!(state, Encode::Done | Encode::Abort) {
        state = match state {
            Encode::CmdId => {
                buf[i] = CommandId::GetAppAttrs.into();
                i += 1;
                Encode::AppId
            }
            Encode::AppId if i >= buf.len() => Encode::Abort,
            Encode::AppId if src < app_id.len() => {
                buf[i] = app_id[src];
                i += 1;
                src += 1;
                Encode::AppId
            }
            Encode::AppId => {
                buf[i] = 0;
                i += 1;
                Encode::AttrId
            }
            Encode::AttrId => {
                let mut next = Encode::Done;
                for id in tables.app_requested() {
                    if i >= buf.len() {
                        next = Encode::Abort;
                        break;
                    }
                    buf[i] = id.into();
                    i += 1;
                    n += 1;
                }
                next
            }
            Encode::Done | Encode::Abort => state,
        };
    }
    match state {
        Encode::Abort => Err(Error::NoSpace),
        _ => Ok((i, n)),
    }
}
