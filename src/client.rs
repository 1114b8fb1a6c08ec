//! ANCS client session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use structbuf::Unpack;
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, warn};

use crate::consts::NS_RECORD_LEN;
use crate::parse::{AttrTables, Parser};
use crate::{
    cp, uuid, ActionId, AppAttr, Discovery, Error, Event, EventSink, Handle, Notif, NotifAttr,
    NpError, Result, ServiceHandles, SyncMutex, Timeout, Transport,
};

/// ANCS client session, one per logical connection to a Notification
/// Provider.
///
/// A session is created idle. The caller registers the attributes it wants
/// ([`Client::attr_add`], [`Client::app_attr_add`]), binds the session to a
/// discovered service ([`Client::handles_assign`]), and enables the two
/// inbound characteristics ([`Client::ns_enable`], [`Client::ds_enable`]).
/// Inbound GATT notifications are fed to [`Client::on_notification`] and
/// Control Point write completions to [`Client::on_write_complete`], both
/// from the transport's callback context. At most one Control Point command
/// is outstanding at any time.
pub struct Client {
    transport: Arc<dyn Transport>,
    sink: EventSink,
    /// Single-permit mutex guarding the staging buffer and the outstanding
    /// Control Point transaction.
    ctl: Semaphore,
    /// Whether a write was handed to the transport and its completion is
    /// still pending.
    busy: AtomicBool,
    ns_enabled: AtomicBool,
    ds_enabled: AtomicBool,
    inner: SyncMutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    handles: Option<ServiceHandles>,
    tables: AttrTables,
    parser: Parser,
    cp_buf: [u8; cp::CP_BUF_SIZE],
}

impl Client {
    /// Creates a new idle session that delivers events to `sink`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, sink: impl Into<EventSink>) -> Self {
        Self {
            transport,
            sink: sink.into(),
            ctl: Semaphore::new(1),
            busy: AtomicBool::new(false),
            ns_enabled: AtomicBool::new(false),
            ds_enabled: AtomicBool::new(false),
            inner: SyncMutex::new(Inner {
                handles: None,
                tables: AttrTables::default(),
                parser: Parser::default(),
                cp_buf: [0; cp::CP_BUF_SIZE],
            }),
        }
    }

    /// Registers a notification attribute to be requested by
    /// [`Client::request_attrs`], with `max_len` bytes of storage
    /// (`1..=32`, including the terminator).
    pub fn attr_add(&self, id: NotifAttr, max_len: u16) -> Result<()> {
        self.inner.lock().tables.add_notif(id, max_len)
    }

    /// Registers an app attribute to be requested by
    /// [`Client::app_attr_request`], with `max_len` bytes of storage
    /// (`1..=32`, including the terminator).
    pub fn app_attr_add(&self, id: AppAttr, max_len: u16) -> Result<()> {
        self.inner.lock().tables.add_app(id, max_len)
    }

    /// Extracts the ANCS characteristic and descriptor handles from a
    /// completed service discovery, binding the session to the connection.
    pub fn handles_assign(&self, dm: &dyn Discovery) -> Result<()> {
        if dm.service() != uuid::SERVICE {
            return Err(Error::NotSupported);
        }
        let cccd = uuid::CCCD.as_uuid();
        let h = ServiceHandles {
            control_point: (dm.characteristic(uuid::CONTROL_POINT)).ok_or(Error::Invalid)?,
            notif_source: (dm.characteristic(uuid::NOTIFICATION_SOURCE)).ok_or(Error::Invalid)?,
            notif_source_cccd: (dm.descriptor(uuid::NOTIFICATION_SOURCE, cccd))
                .ok_or(Error::Invalid)?,
            data_source: (dm.characteristic(uuid::DATA_SOURCE)).ok_or(Error::Invalid)?,
            data_source_cccd: (dm.descriptor(uuid::DATA_SOURCE, cccd)).ok_or(Error::Invalid)?,
        };
        debug!("ANCS service found: {h:?}");
        self.inner.lock().handles = Some(h);
        Ok(())
    }

    /// Subscribes to notification summaries on the Notification Source.
    pub fn ns_enable(&self) -> Result<()> {
        let h = self.handles()?;
        self.enable(&self.ns_enabled, h.notif_source, h.notif_source_cccd, "Notification Source")
    }

    /// Reverts [`Client::ns_enable`].
    pub fn ns_disable(&self) -> Result<()> {
        let h = self.handles()?;
        self.disable(&self.ns_enabled, h.notif_source, h.notif_source_cccd, "Notification Source")
    }

    /// Subscribes to attribute responses on the Data Source.
    pub fn ds_enable(&self) -> Result<()> {
        let h = self.handles()?;
        self.enable(&self.ds_enabled, h.data_source, h.data_source_cccd, "Data Source")
    }

    /// Reverts [`Client::ds_enable`].
    pub fn ds_disable(&self) -> Result<()> {
        let h = self.handles()?;
        self.disable(&self.ds_enabled, h.data_source, h.data_source_cccd, "Data Source")
    }

    /// Requests the registered notification attributes of `notif`. Fails
    /// with [`Error::Busy`] if another command is outstanding when `timeout`
    /// expires.
    pub async fn request_attrs(&self, notif: &Notif, timeout: Timeout) -> Result<()> {
        let permit = self.acquire(timeout).await?;
        let mut inner = self.inner.lock();
        let Inner { handles, tables, parser, cp_buf } = &mut *inner;
        let h = handles.ok_or(Error::Invalid)?;
        let (len, n) = cp::get_notif_attrs(cp_buf, notif.uid, tables);
        parser.arm(n);
        self.submit(permit, h.control_point, &cp_buf[..len])
    }

    /// Requests the registered app attributes for the app identified by
    /// `app_id` (non-empty, without embedded NUL). Fails with
    /// [`Error::Busy`] if another command is outstanding when `timeout`
    /// expires.
    pub async fn app_attr_request(&self, app_id: &[u8], timeout: Timeout) -> Result<()> {
        if app_id.is_empty() || app_id.contains(&0) {
            return Err(Error::Invalid);
        }
        let permit = self.acquire(timeout).await?;
        let mut inner = self.inner.lock();
        let Inner { handles, tables, parser, cp_buf } = &mut *inner;
        let h = handles.ok_or(Error::Invalid)?;
        let (len, n) = cp::get_app_attrs(cp_buf, app_id, tables)?;
        parser.arm(n);
        self.submit(permit, h.control_point, &cp_buf[..len])
    }

    /// Performs a positive or negative action on the notification with the
    /// specified UID. Fails with [`Error::Busy`] if another command is
    /// outstanding when `timeout` expires.
    pub async fn perform_action(&self, uid: u32, action: ActionId, timeout: Timeout) -> Result<()> {
        let permit = self.acquire(timeout).await?;
        let mut inner = self.inner.lock();
        let h = inner.handles.ok_or(Error::Invalid)?;
        let len = cp::perform_notif_action(&mut inner.cp_buf, uid, action);
        self.submit(permit, h.control_point, &inner.cp_buf[..len])
    }

    /// Feeds one inbound GATT notification to the session. Records on
    /// handles other than the Notification Source and Data Source are
    /// ignored.
    pub fn on_notification(&self, handle: Handle, value: &[u8]) {
        let mut inner = self.inner.lock();
        let Some(h) = inner.handles else { return };
        if handle == h.notif_source {
            drop(inner);
            self.parse_notif(value);
        } else if handle == h.data_source {
            let Inner { tables, parser, .. } = &mut *inner;
            parser.feed(tables, &self.sink, value);
        }
    }

    /// Completes the outstanding Control Point write with the provider's
    /// status. The Control Point is reopened for the next command; a
    /// non-zero status is surfaced as [`Event::NpError`].
    pub fn on_write_complete(&self, status: u8) {
        self.release();
        if status != 0 {
            let err = NpError::from(status);
            warn!("Control Point write failed: {err}");
            self.sink.event(Event::NpError(err));
        }
    }

    /// Resets the session after a disconnection. Subscription state is
    /// cleared and the Control Point is reopened even if a command was in
    /// flight.
    pub fn on_disconnected(&self) {
        self.ns_enabled.store(false, Ordering::SeqCst);
        self.ds_enabled.store(false, Ordering::SeqCst);
        self.release();
    }

    fn handles(&self) -> Result<ServiceHandles> {
        self.inner.lock().handles.ok_or(Error::Invalid)
    }

    fn enable(&self, bit: &AtomicBool, value: Handle, cccd: Handle, name: &str) -> Result<()> {
        if bit.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyDone);
        }
        match self.transport.subscribe(value, cccd) {
            Ok(()) => {
                debug!("{name} subscribed");
                Ok(())
            }
            Err(e) => {
                bit.store(false, Ordering::SeqCst);
                warn!("{name} subscribe failed: {e}");
                Err(e)
            }
        }
    }

    fn disable(&self, bit: &AtomicBool, value: Handle, cccd: Handle, name: &str) -> Result<()> {
        if !bit.load(Ordering::SeqCst) {
            return Err(Error::NotEnabled);
        }
        match self.transport.unsubscribe(value, cccd) {
            Ok(()) => {
                bit.store(false, Ordering::SeqCst);
                debug!("{name} unsubscribed");
                Ok(())
            }
            Err(e) => {
                warn!("{name} unsubscribe failed: {e}");
                Err(e)
            }
        }
    }

    /// Acquires the Control Point for one command.
    async fn acquire(&self, timeout: Timeout) -> Result<SemaphorePermit<'_>> {
        // The semaphore is never closed
        match timeout {
            Timeout::NoWait => self.ctl.try_acquire().map_err(|_| Error::Busy),
            Timeout::After(d) => match tokio::time::timeout(d, self.ctl.acquire()).await {
                Ok(r) => r.map_err(|_| Error::Busy),
                Err(_) => Err(Error::Busy),
            },
            Timeout::Forever => self.ctl.acquire().await.map_err(|_| Error::Busy),
        }
    }

    /// Hands an encoded command to the transport. The permit is consumed
    /// and restored by the write completion, or here if the transport
    /// rejects the write.
    fn submit(&self, permit: SemaphorePermit<'_>, handle: Handle, value: &[u8]) -> Result<()> {
        self.busy.store(true, Ordering::SeqCst);
        permit.forget();
        match self.transport.write(handle, value) {
            Ok(()) => Ok(()),
            Err(e) => {
                // No completion will arrive; reopen the Control Point
                warn!("Control Point write rejected: {e}");
                self.release();
                Err(e)
            }
        }
    }

    /// Restores the Control Point permit once per outstanding write.
    fn release(&self) {
        if self.busy.swap(false, Ordering::SeqCst) {
            self.ctl.add_permits(1);
        }
    }

    /// Decodes one Notification Source record, reporting a malformed record
    /// at most once.
    fn parse_notif(&self, rec: &[u8]) {
        if rec.len() != NS_RECORD_LEN {
            warn!("Invalid Notification Source record length: {}", rec.len());
            self.sink.event(Event::InvalidNotif);
        }
        match Notif::unpack(&mut rec.unpack()) {
            Some(n) => self.sink.event(Event::Notif(n)),
            None if rec.len() == NS_RECORD_LEN => self.sink.event(Event::InvalidNotif),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use matches::assert_matches;

    use crate::uuid::Uuid;
    use crate::{CategoryId, EventFlags, EventId};

    use super::*;

    const CP: u16 = 0x10;
    const NS: u16 = 0x12;
    const NS_CCCD: u16 = 0x13;
    const DS: u16 = 0x15;
    const DS_CCCD: u16 = 0x16;

    fn hdl(h: u16) -> Handle {
        Handle::new(h).unwrap()
    }

    /// Owned copy of a sink event.
    #[derive(Clone, Debug, Eq, PartialEq)]
    enum Ev {
        Notif(Notif),
        InvalidNotif,
        NotifAttr(u32, NotifAttr, Vec<u8>),
        AppAttr(Vec<u8>, AppAttr, Vec<u8>),
        NpError(NpError),
    }

    impl From<Event<'_>> for Ev {
        fn from(evt: Event) -> Self {
            match evt {
                Event::Notif(n) => Self::Notif(n),
                Event::InvalidNotif => Self::InvalidNotif,
                Event::NotifAttr { uid, id, value } => Self::NotifAttr(uid, id, value.to_vec()),
                Event::AppAttr { app_id, id, value } => {
                    Self::AppAttr(app_id.to_vec(), id, value.to_vec())
                }
                Event::NpError(e) => Self::NpError(e),
            }
        }
    }

    #[derive(Default)]
    struct Mock {
        writes: SyncMutex<Vec<(Handle, Vec<u8>)>>,
        subscribed: SyncMutex<Vec<Handle>>,
        fail_subscribe: AtomicBool,
        fail_write: AtomicBool,
    }

    impl Mock {
        fn take_writes(&self) -> Vec<(Handle, Vec<u8>)> {
            std::mem::take(&mut self.writes.lock())
        }
    }

    impl Transport for Mock {
        fn write(&self, handle: Handle, value: &[u8]) -> Result<()> {
            if self.fail_write.load(Ordering::SeqCst) {
                return Err(Error::Transport(-5));
            }
            self.writes.lock().push((handle, value.to_vec()));
            Ok(())
        }

        fn subscribe(&self, _value: Handle, cccd: Handle) -> Result<()> {
            if self.fail_subscribe.load(Ordering::SeqCst) {
                return Err(Error::Transport(-5));
            }
            self.subscribed.lock().push(cccd);
            Ok(())
        }

        fn unsubscribe(&self, _value: Handle, cccd: Handle) -> Result<()> {
            self.subscribed.lock().retain(|&h| h != cccd);
            Ok(())
        }
    }

    struct Dm(Uuid);

    impl Default for Dm {
        fn default() -> Self {
            Self(uuid::SERVICE)
        }
    }

    impl Discovery for Dm {
        fn service(&self) -> Uuid {
            self.0
        }

        fn characteristic(&self, u: Uuid) -> Option<Handle> {
            Handle::new(match u {
                u if u == uuid::CONTROL_POINT => CP,
                u if u == uuid::NOTIFICATION_SOURCE => NS,
                u if u == uuid::DATA_SOURCE => DS,
                _ => 0,
            })
        }

        fn descriptor(&self, chr: Uuid, desc: Uuid) -> Option<Handle> {
            if desc != uuid::CCCD.as_uuid() {
                return None;
            }
            Handle::new(match chr {
                u if u == uuid::NOTIFICATION_SOURCE => NS_CCCD,
                u if u == uuid::DATA_SOURCE => DS_CCCD,
                _ => 0,
            })
        }
    }

    fn client() -> (Arc<Mock>, Client, Arc<SyncMutex<Vec<Ev>>>) {
        let mock = Arc::new(Mock::default());
        let log = Arc::new(SyncMutex::new(Vec::new()));
        let events = Arc::clone(&log);
        let c = Client::new(
            Arc::clone(&mock) as _,
            EventSink::new(move |evt| log.lock().push(Ev::from(evt))),
        );
        c.handles_assign(&Dm::default()).unwrap();
        (mock, c, events)
    }

    fn summary() -> Notif {
        Notif {
            uid: 0x0403_0201,
            event: EventId::Added,
            flags: EventFlags::POSITIVE_ACTION | EventFlags::NEGATIVE_ACTION,
            category: CategoryId::Email,
            category_count: 2,
        }
    }

    /// Discovery result without CCCDs.
    struct NoCccd;

    impl Discovery for NoCccd {
        fn service(&self) -> Uuid {
            uuid::SERVICE
        }

        fn characteristic(&self, u: Uuid) -> Option<Handle> {
            Dm::default().characteristic(u)
        }

        fn descriptor(&self, _chr: Uuid, _desc: Uuid) -> Option<Handle> {
            None
        }
    }

    #[test]
    fn handles() {
        let mock = Arc::new(Mock::default());
        let c = Client::new(Arc::clone(&mock) as _, EventSink::new(|_| {}));
        assert_matches!(c.ns_enable(), Err(Error::Invalid));
        let other = Uuid::new(0xDEAD_BEEF).unwrap();
        assert_matches!(c.handles_assign(&Dm(other)), Err(Error::NotSupported));
        assert_matches!(c.handles_assign(&NoCccd), Err(Error::Invalid));
        assert_eq!(c.handles_assign(&Dm::default()), Ok(()));
    }

    #[test]
    fn subscribe_idempotence() {
        let (mock, c, _) = client();
        assert_eq!(c.ns_enable(), Ok(()));
        assert_matches!(c.ns_enable(), Err(Error::AlreadyDone));
        assert_eq!(c.ds_enable(), Ok(()));
        assert_eq!(&*mock.subscribed.lock(), &[hdl(NS_CCCD), hdl(DS_CCCD)]);
        assert_eq!(c.ns_disable(), Ok(()));
        assert_matches!(c.ns_disable(), Err(Error::NotEnabled));
        assert_eq!(c.ns_enable(), Ok(()));
        assert_matches!(c.ds_disable(), Ok(()));
    }

    #[test]
    fn subscribe_failure_rolls_back() {
        let (mock, c, _) = client();
        mock.fail_subscribe.store(true, Ordering::SeqCst);
        assert_matches!(c.ns_enable(), Err(Error::Transport(-5)));
        mock.fail_subscribe.store(false, Ordering::SeqCst);
        assert_eq!(c.ns_enable(), Ok(()));
    }

    #[test]
    fn notif_source_decode() {
        let (_, c, events) = client();
        c.on_notification(hdl(NS), &[0x00, 0x18, 0x06, 0x02, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(events.lock().as_slice(), &[Ev::Notif(summary())]);
    }

    #[test]
    fn invalid_notif_once_per_record() {
        let (_, c, events) = client();
        // Bad length, valid best-effort decode: both events
        c.on_notification(hdl(NS), &[0x00, 0x18, 0x06, 0x02, 0x01, 0x02, 0x03, 0x04, 0xFF]);
        // Bad length and bad event id: one InvalidNotif
        c.on_notification(hdl(NS), &[0x07, 0x18, 0x06]);
        // Valid length, bad category: one InvalidNotif
        c.on_notification(hdl(NS), &[0x00, 0x00, 0x0C, 0x00, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(
            events.lock().as_slice(),
            &[
                Ev::InvalidNotif,
                Ev::Notif(summary()),
                Ev::InvalidNotif,
                Ev::InvalidNotif,
            ]
        );
    }

    #[tokio::test]
    async fn perform_action() {
        let (mock, c, events) = client();
        c.perform_action(0x0403_0201, ActionId::Positive, Timeout::NoWait)
            .await
            .unwrap();
        assert_eq!(
            mock.take_writes(),
            [(hdl(CP), vec![0x02, 0x01, 0x02, 0x03, 0x04, 0x00])]
        );
        // The Control Point is busy until the write completes
        assert_matches!(
            c.perform_action(1, ActionId::Negative, Timeout::NoWait).await,
            Err(Error::Busy)
        );
        c.on_write_complete(0);
        assert!(events.lock().is_empty());
        c.perform_action(1, ActionId::Negative, Timeout::NoWait).await.unwrap();
    }

    #[tokio::test]
    async fn provider_error_reopens_control_point() {
        let (_, c, events) = client();
        c.perform_action(0x0403_0201, ActionId::Positive, Timeout::NoWait)
            .await
            .unwrap();
        c.on_write_complete(0xA3);
        assert_eq!(events.lock().as_slice(), &[Ev::NpError(NpError::ActionFailed)]);
        c.perform_action(1, ActionId::Negative, Timeout::NoWait).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn busy_timeout() {
        let (_, c, _) = client();
        c.perform_action(1, ActionId::Positive, Timeout::NoWait).await.unwrap();
        assert_matches!(
            c.perform_action(2, ActionId::Positive, Timeout::After(Duration::from_millis(100)))
                .await,
            Err(Error::Busy)
        );
        c.on_write_complete(0);
        c.perform_action(2, ActionId::Positive, Timeout::Forever).await.unwrap();
    }

    #[tokio::test]
    async fn write_failure_reopens_control_point() {
        let (mock, c, _) = client();
        mock.fail_write.store(true, Ordering::SeqCst);
        assert_matches!(
            c.perform_action(1, ActionId::Positive, Timeout::NoWait).await,
            Err(Error::Transport(-5))
        );
        mock.fail_write.store(false, Ordering::SeqCst);
        c.perform_action(1, ActionId::Positive, Timeout::NoWait).await.unwrap();
    }

    #[tokio::test]
    async fn disconnect_cancels_outstanding_command() {
        let (_, c, _) = client();
        c.ns_enable().unwrap();
        c.ds_enable().unwrap();
        c.perform_action(1, ActionId::Positive, Timeout::NoWait).await.unwrap();
        c.on_disconnected();
        assert_eq!(c.ns_enable(), Ok(()));
        assert_eq!(c.ds_enable(), Ok(()));
        c.perform_action(2, ActionId::Positive, Timeout::NoWait).await.unwrap();
    }

    #[tokio::test]
    async fn request_attrs_end_to_end() {
        let (mock, c, events) = client();
        for id in [
            NotifAttr::AppIdentifier,
            NotifAttr::Title,
            NotifAttr::Message,
            NotifAttr::Date,
            NotifAttr::PositiveActionLabel,
            NotifAttr::NegativeActionLabel,
        ] {
            c.attr_add(id, 32).unwrap();
        }
        c.request_attrs(&summary(), Timeout::NoWait).await.unwrap();
        assert_eq!(
            mock.take_writes(),
            [(
                hdl(CP),
                vec![
                    0x00, 0x01, 0x02, 0x03, 0x04, 0x00, 0x01, 0x20, 0x00, 0x03, 0x20, 0x00, 0x05,
                    0x06, 0x07
                ]
            )]
        );
        c.on_write_complete(0);
        // The response enumerates three of the six requested attributes and
        // arrives fragmented
        c.on_notification(
            hdl(DS),
            &[
                0x00, 0x01, 0x02, 0x03, 0x04, 0x01, 0x03, 0x00, 0x6E, 0x52, 0x46, 0x03, 0x02,
                0x00, 0x35, 0x32,
            ],
        );
        c.on_notification(hdl(DS), &[0x00, 0x03, 0x00, 0x63, 0x6F, 0x6D]);
        let uid = 0x0403_0201;
        assert_eq!(
            events.lock().as_slice(),
            &[
                Ev::NotifAttr(uid, NotifAttr::Title, b"nRF".to_vec()),
                Ev::NotifAttr(uid, NotifAttr::Message, b"52".to_vec()),
                Ev::NotifAttr(uid, NotifAttr::AppIdentifier, b"com".to_vec()),
            ]
        );
    }

    #[tokio::test]
    async fn app_attr_request_end_to_end() {
        let (mock, c, events) = client();
        c.app_attr_add(AppAttr::DisplayName, 16).unwrap();
        assert_matches!(
            c.app_attr_request(b"", Timeout::NoWait).await,
            Err(Error::Invalid)
        );
        assert_matches!(
            c.app_attr_request(b"a\0b", Timeout::NoWait).await,
            Err(Error::Invalid)
        );
        c.app_attr_request(b"com", Timeout::NoWait).await.unwrap();
        assert_eq!(
            mock.take_writes(),
            [(hdl(CP), vec![0x01, 0x63, 0x6F, 0x6D, 0x00, 0x00])]
        );
        c.on_write_complete(0);
        c.on_notification(hdl(DS), &[0x01, 0x63, 0x6F, 0x6D, 0x00, 0x00, 0x04, 0x00]);
        c.on_notification(hdl(DS), b"Mail");
        assert_eq!(
            events.lock().as_slice(),
            &[Ev::AppAttr(b"com".to_vec(), AppAttr::DisplayName, b"Mail".to_vec())]
        );
    }

    #[tokio::test]
    async fn no_space_reopens_control_point() {
        let (mock, c, _) = client();
        c.app_attr_add(AppAttr::DisplayName, 16).unwrap();
        let long = vec![b'x'; cp::CP_BUF_SIZE];
        assert_matches!(
            c.app_attr_request(&long, Timeout::NoWait).await,
            Err(Error::NoSpace)
        );
        assert!(mock.take_writes().is_empty());
        c.app_attr_request(b"com", Timeout::NoWait).await.unwrap();
    }

    #[test]
    fn unrelated_handles_ignored() {
        let (_, c, events) = client();
        c.on_notification(hdl(0x42), &[0x00, 0x18, 0x06, 0x02, 0x01, 0x02, 0x03, 0x04]);
        assert!(events.lock().is_empty());
    }
}
