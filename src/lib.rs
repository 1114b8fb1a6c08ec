//! Apple Notification Center Service (ANCS) consumer.
//!
//! This crate implements the Notification Consumer (NC) side of ANCS, the
//! GATT service through which an iOS device (the Notification Provider, NP)
//! exposes its notifications to a paired peripheral. The [`Client`] session
//! subscribes to the Notification Source and Data Source characteristics,
//! decodes notification summaries, reassembles attribute responses that may
//! arrive fragmented across any number of GATT notifications, and writes
//! Get Notification Attributes, Get App Attributes, and Perform Notification
//! Action commands to the Control Point.
//!
//! The transport is abstracted behind the [`Transport`] and [`Discovery`]
//! traits; service discovery, CCCD mechanics, and pairing are the caller's
//! responsibility. Decoded events are delivered through a single
//! [`EventSink`] callback.

use std::time::Duration;

pub use {client::*, consts::*, cp::CP_BUF_SIZE, event::*, notif::*, transport::*};

pub mod uuid;

mod client;
mod consts;
mod cp;
mod event;
mod notif;
mod parse;
mod transport;

/// Synchronous mutex used for session state.
pub(crate) type SyncMutex<T> = parking_lot::Mutex<T>;

/// Error type returned by the ANCS client.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument is out of range or malformed.
    #[error("invalid argument")]
    Invalid,
    /// The discovered service is not the ANCS service.
    #[error("not the ANCS service")]
    NotSupported,
    /// The subscription is already enabled.
    #[error("already done")]
    AlreadyDone,
    /// The subscription was never enabled.
    #[error("not enabled")]
    NotEnabled,
    /// Another Control Point command is outstanding.
    #[error("control point is busy")]
    Busy,
    /// The encoded command does not fit in the Control Point staging buffer.
    #[error("command exceeds control point buffer")]
    NoSpace,
    /// The transport reported a failure.
    #[error("transport error (code {0})")]
    Transport(i32),
}

/// Common ANCS result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Time limit for acquiring the Control Point for one command.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Timeout {
    /// Fail with [`Error::Busy`] immediately if another command is
    /// outstanding.
    NoWait,
    /// Wait up to the specified duration.
    After(Duration),
    /// Wait until the Control Point becomes available.
    #[default]
    Forever,
}
