//! Event sink contract.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::notif::Notif;
use crate::{AppAttr, NotifAttr, NpError};

/// Event delivered to the application. Borrowed slices reference session
/// storage and are valid only for the duration of the sink call.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Event<'a> {
    /// A notification summary arrived on the Notification Source.
    Notif(Notif),
    /// A Notification Source record was malformed. Emitted at most once per
    /// record.
    InvalidNotif,
    /// One requested notification attribute finished parsing.
    NotifAttr {
        /// UID of the notification the response refers to.
        uid: u32,
        /// Attribute id.
        id: NotifAttr,
        /// Attribute data, truncated to the registered length.
        value: &'a [u8],
    },
    /// One requested app attribute finished parsing.
    AppAttr {
        /// Identifier of the app the response refers to.
        app_id: &'a [u8],
        /// Attribute id.
        id: AppAttr,
        /// Attribute data, truncated to the registered length.
        value: &'a [u8],
    },
    /// The Notification Provider rejected a Control Point command.
    NpError(NpError),
}

/// Application event callback. The sink is invoked from the transport's
/// callback context and must not block; longer work must be offloaded. It
/// must not call back into the session synchronously.
#[derive(Clone)]
#[repr(transparent)]
pub struct EventSink(Arc<dyn for<'a> Fn(Event<'a>) + Send + Sync>);

impl EventSink {
    /// Creates a sink from a callback.
    #[inline]
    #[must_use]
    pub fn new(f: impl for<'a> Fn(Event<'a>) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Delivers an event to the application.
    #[inline(always)]
    pub(crate) fn event(&self, evt: Event) {
        self.0(evt);
    }
}

impl Debug for EventSink {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        (f.debug_tuple("EventSink").field(&Arc::as_ptr(&self.0))).finish()
    }
}

impl<T: for<'a> Fn(Event<'a>) + Send + Sync + 'static> From<T> for EventSink {
    #[inline(always)]
    fn from(f: T) -> Self {
        Self(Arc::new(f))
    }
}
