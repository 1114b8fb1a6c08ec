//! ANCS protocol identifiers (Apple ANCS Specification).

use bitflags::bitflags;

/// Maximum storage length of a single attribute, including the terminator.
pub const ATTR_DATA_MAX: u16 = 32;

/// Length of one Notification Source record.
pub(crate) const NS_RECORD_LEN: usize = 8;

/// Number of defined notification attribute ids.
pub(crate) const NOTIF_ATTR_COUNT: usize = 8;

/// Number of defined app attribute ids.
pub(crate) const APP_ATTR_COUNT: usize = 1;

/// Notification event type.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum EventId {
    /// The notification was added.
    Added = 0,
    /// The notification was modified.
    Modified = 1,
    /// The notification was removed.
    Removed = 2,
}

bitflags! {
    /// Notification flags. All flags can be active at the same time; bits
    /// outside the defined set are retained but have no assigned meaning.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    #[repr(transparent)]
    pub struct EventFlags: u8 {
        /// The notification has a low priority.
        const SILENT = 1 << 0;
        /// The notification has a high priority.
        const IMPORTANT = 1 << 1;
        /// The notification existed before the subscription.
        const PRE_EXISTING = 1 << 2;
        /// A positive action can be performed on the notification.
        const POSITIVE_ACTION = 1 << 3;
        /// A negative action can be performed on the notification.
        const NEGATIVE_ACTION = 1 << 4;
    }
}

/// Notification category.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum CategoryId {
    Other = 0,
    IncomingCall = 1,
    MissedCall = 2,
    VoiceMail = 3,
    Social = 4,
    Schedule = 5,
    Email = 6,
    News = 7,
    HealthAndFitness = 8,
    BusinessAndFinance = 9,
    Location = 10,
    Entertainment = 11,
}

/// Control Point command id.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum CommandId {
    /// Requests attributes of one notification.
    GetNotifAttrs = 0,
    /// Requests attributes of one app.
    GetAppAttrs = 1,
    /// Performs an action on one notification.
    PerformNotifAction = 2,
}

/// Action performed on a notification, such as dismissing an alarm.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum ActionId {
    Positive = 0,
    Negative = 1,
}

/// Notification attribute id.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum NotifAttr {
    /// Identifier of the app that issued the notification.
    AppIdentifier = 0,
    Title = 1,
    Subtitle = 2,
    Message = 3,
    /// Total length of the message text, as a decimal string.
    MessageSize = 4,
    Date = 5,
    /// Label of the notification's positive action.
    PositiveActionLabel = 6,
    /// Label of the notification's negative action.
    NegativeActionLabel = 7,
}

impl NotifAttr {
    /// Returns whether the attribute request carries an explicit maximum
    /// length on the wire.
    #[inline]
    #[must_use]
    pub(crate) const fn has_max_len(self) -> bool {
        matches!(self, Self::Title | Self::Subtitle | Self::Message)
    }
}

/// App attribute id.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum AppAttr {
    /// Display name of the app.
    DisplayName = 0,
}

/// Error status written by the Notification Provider in response to a
/// Control Point command. Codes outside the defined set are carried
/// verbatim.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    num_enum::FromPrimitive,
    num_enum::IntoPrimitive,
    strum::Display,
)]
#[non_exhaustive]
#[repr(u8)]
pub enum NpError {
    /// The command id is unknown to the NP.
    UnknownCommand = 0xA0,
    /// The command format is invalid.
    InvalidCommand = 0xA1,
    /// One or more parameters do not exist in the NP.
    InvalidParameter = 0xA2,
    /// The NP failed to perform the action.
    ActionFailed = 0xA3,
    /// Any other non-zero write status.
    #[num_enum(catch_all)]
    Other(u8),
}
