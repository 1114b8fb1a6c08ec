//! Data Source response parsing.
//!
//! A Get Notification Attributes or Get App Attributes response is framed as
//! a command id, a notification UID or NUL-terminated app identifier, and a
//! sequence of `(id, len, data)` attribute tuples. The provider fragments
//! the response across GATT notifications at arbitrary byte boundaries, so
//! the parser consumes one byte at a time and carries its cursors across
//! records.

use tracing::debug;

use crate::consts::{APP_ATTR_COUNT, NOTIF_ATTR_COUNT};
use crate::{AppAttr, CommandId, Error, Event, EventSink, NotifAttr, Result, ATTR_DATA_MAX};

/// Registration entry for one attribute id.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    /// Whether the attribute is requested by Control Point commands.
    get: bool,
    /// Storage for received data; its length is the registered maximum.
    buf: Option<Box<[u8]>>,
}

impl Slot {
    /// Marks the attribute as requested with `max_len` bytes of storage.
    fn register(&mut self, max_len: u16) -> Result<()> {
        if !(1..=ATTR_DATA_MAX).contains(&max_len) {
            return Err(Error::Invalid);
        }
        self.get = true;
        self.buf = Some(vec![0; usize::from(max_len)].into_boxed_slice());
        Ok(())
    }

    /// Returns the registered maximum length, or 0 without storage.
    #[allow(clippy::cast_possible_truncation)]
    #[inline]
    fn max_len(&self) -> u16 {
        self.buf.as_ref().map_or(0, |b| b.len() as u16)
    }
}

/// Attribute registration tables for both response kinds.
#[derive(Debug, Default)]
pub(crate) struct AttrTables {
    notif: [Slot; NOTIF_ATTR_COUNT],
    app: [Slot; APP_ATTR_COUNT],
}

impl AttrTables {
    /// Registers a notification attribute.
    #[inline]
    pub fn add_notif(&mut self, id: NotifAttr, max_len: u16) -> Result<()> {
        self.notif[usize::from(u8::from(id))].register(max_len)
    }

    /// Registers an app attribute.
    #[inline]
    pub fn add_app(&mut self, id: AppAttr, max_len: u16) -> Result<()> {
        self.app[usize::from(u8::from(id))].register(max_len)
    }

    /// Returns the requested notification attributes in ascending id order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn notif_requested(&self) -> impl Iterator<Item = (NotifAttr, u16)> + '_ {
        (self.notif.iter().enumerate())
            .filter(|(_, s)| s.get)
            .filter_map(|(i, s)| Some((NotifAttr::try_from(i as u8).ok()?, s.max_len())))
    }

    /// Returns the requested app attributes in ascending id order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn app_requested(&self) -> impl Iterator<Item = AppAttr> + '_ {
        (self.app.iter().enumerate())
            .filter(|(_, s)| s.get)
            .filter_map(|(i, _)| AppAttr::try_from(i as u8).ok())
    }

    #[inline]
    fn slot(&self, kind: Kind, id: u8) -> &Slot {
        match kind {
            Kind::Notif => &self.notif[usize::from(id)],
            Kind::App => &self.app[usize::from(id)],
        }
    }

    #[inline]
    fn slot_mut(&mut self, kind: Kind, id: u8) -> &mut Slot {
        match kind {
            Kind::Notif => &mut self.notif[usize::from(id)],
            Kind::App => &mut self.app[usize::from(id)],
        }
    }
}

/// Parser states.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum State {
    /// Parsing the command id.
    #[default]
    CommandId,
    /// Parsing the notification UID.
    NotifUid,
    /// Parsing the app identifier.
    AppId,
    /// Parsing an attribute id.
    AttrId,
    /// Parsing the LSB of an attribute length.
    AttrLen1,
    /// Parsing the MSB of an attribute length.
    AttrLen2,
    /// Parsing attribute data.
    AttrData,
    /// Skipping to the end of an attribute.
    AttrSkip,
    /// Parsing finished; remaining bytes are discarded.
    Done,
}

/// Response kind selected by the command id.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Kind {
    #[default]
    Notif,
    App,
}

/// Re-entrant Data Source response parser. One instance parses at most one
/// response between [`Parser::arm`] calls; the dispatcher re-arms it for
/// every command that expects a response.
#[derive(Debug, Default)]
pub(crate) struct Parser {
    state: State,
    kind: Kind,
    /// Remaining requested attributes for this response.
    expected: u32,
    /// Notification UID accumulator.
    uid: u32,
    uid_n: u8,
    /// Response app identifier and its length.
    app_id: [u8; ATTR_DATA_MAX as usize],
    app_id_len: usize,
    /// Current attribute id and on-wire length.
    attr_id: u8,
    attr_len: u16,
    /// Bytes of the current attribute consumed so far.
    idx: u16,
    /// Bytes captured into storage: `min(attr_len, max_len - 1)`.
    lim: u16,
}

impl Parser {
    /// Re-arms the parser for the response to a newly dispatched command
    /// with `expected` requested attributes.
    pub fn arm(&mut self, expected: u32) {
        *self = Self {
            expected,
            ..Self::default()
        };
    }

    /// Feeds one Data Source record to the parser, emitting one sink event
    /// per completed requested attribute.
    pub fn feed(&mut self, tables: &mut AttrTables, sink: &EventSink, rec: &[u8]) {
        for &b in rec {
            if self.state == State::Done {
                break;
            }
            self.state = match self.state {
                State::CommandId => self.command_id(b),
                State::NotifUid => self.notif_uid(b),
                State::AppId => self.app_id(b),
                State::AttrId => self.attr_id(tables, b),
                State::AttrLen1 => {
                    self.attr_len = u16::from(b);
                    State::AttrLen2
                }
                State::AttrLen2 => self.attr_len2(tables, sink, b),
                State::AttrData => self.attr_data(tables, sink, b),
                State::AttrSkip => self.attr_skip(tables, sink, b),
                State::Done => State::Done,
            };
        }
    }

    fn command_id(&mut self, b: u8) -> State {
        match CommandId::try_from(b) {
            Ok(CommandId::GetNotifAttrs) => {
                self.kind = Kind::Notif;
                State::NotifUid
            }
            Ok(CommandId::GetAppAttrs) => {
                self.kind = Kind::App;
                State::AppId
            }
            _ => {
                debug!("Invalid command id {b:#04X}");
                State::Done
            }
        }
    }

    fn notif_uid(&mut self, b: u8) -> State {
        self.uid |= u32::from(b) << (8 * self.uid_n);
        self.uid_n += 1;
        if self.uid_n == 4 {
            State::AttrId
        } else {
            State::NotifUid
        }
    }

    fn app_id(&mut self, b: u8) -> State {
        if b == 0 {
            return State::AttrId;
        }
        // Oversized identifiers are truncated but consumed to stay in sync
        if self.app_id_len < self.app_id.len() - 1 {
            self.app_id[self.app_id_len] = b;
            self.app_id_len += 1;
        }
        State::AppId
    }

    fn attr_id(&mut self, tables: &AttrTables, b: u8) -> State {
        let nb = match self.kind {
            Kind::Notif => NOTIF_ATTR_COUNT,
            Kind::App => APP_ATTR_COUNT,
        };
        if usize::from(b) >= nb {
            debug!("Invalid attribute id {b}");
            return State::Done;
        }
        if self.expected == 0 {
            debug!("All requested attributes received");
            return State::Done;
        }
        self.attr_id = b;
        if tables.slot(self.kind, b).get {
            self.expected -= 1;
        }
        State::AttrLen1
    }

    fn attr_len2(&mut self, tables: &mut AttrTables, sink: &EventSink, b: u8) -> State {
        self.attr_len |= u16::from(b) << 8;
        self.idx = 0;
        let slot = tables.slot_mut(self.kind, self.attr_id);
        let requested = slot.get;
        self.lim = self.attr_len.min(slot.max_len().saturating_sub(1));
        if self.attr_len == 0 {
            // The attribute does not exist; report it as empty
            if requested {
                if let Some(buf) = slot.buf.as_mut() {
                    buf[0] = 0;
                }
                self.emit(tables, sink);
            }
            return self.next_attr();
        }
        if self.lim == 0 {
            // No storage, or only room for the terminator
            if requested {
                if let Some(buf) = slot.buf.as_mut() {
                    buf[0] = 0;
                }
            }
            return State::AttrSkip;
        }
        State::AttrData
    }

    fn attr_data(&mut self, tables: &mut AttrTables, sink: &EventSink, b: u8) -> State {
        let slot = tables.slot_mut(self.kind, self.attr_id);
        let requested = slot.get;
        if let Some(buf) = slot.buf.as_mut() {
            buf[usize::from(self.idx)] = b;
        }
        self.idx += 1;
        if self.idx < self.lim {
            return State::AttrData;
        }
        // Storage is full or the attribute ended; terminate the string
        if requested {
            if let Some(buf) = slot.buf.as_mut() {
                buf[usize::from(self.idx)] = 0;
            }
        }
        if self.idx < self.attr_len {
            return State::AttrSkip;
        }
        if requested {
            self.emit(tables, sink);
        }
        self.next_attr()
    }

    fn attr_skip(&mut self, tables: &AttrTables, sink: &EventSink, _b: u8) -> State {
        self.idx += 1;
        if self.idx < self.attr_len {
            return State::AttrSkip;
        }
        if tables.slot(self.kind, self.attr_id).get {
            self.emit(tables, sink);
        }
        self.next_attr()
    }

    /// Emits one completed attribute. The value is the captured prefix of
    /// the slot storage, which is NUL-terminated at the capture index.
    fn emit(&self, tables: &AttrTables, sink: &EventSink) {
        let slot = tables.slot(self.kind, self.attr_id);
        let value = (slot.buf.as_deref()).map_or(&[][..], |b| &b[..usize::from(self.lim)]);
        match self.kind {
            Kind::Notif => {
                let Ok(id) = NotifAttr::try_from(self.attr_id) else {
                    return;
                };
                sink.event(Event::NotifAttr {
                    uid: self.uid,
                    id,
                    value,
                });
            }
            Kind::App => {
                let Ok(id) = AppAttr::try_from(self.attr_id) else {
                    return;
                };
                sink.event(Event::AppAttr {
                    app_id: &self.app_id[..self.app_id_len],
                    id,
                    value,
                });
            }
        }
    }

    #[inline]
    fn next_attr(&self) -> State {
        if self.expected == 0 {
            State::Done
        } else {
            State::AttrId
        }
    }
}
