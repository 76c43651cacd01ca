use std::sync::Arc;
use std::time::Duration;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{Catalog, ServerRecord};
use crate::deferred::DeferredSlot;

/// Static throughput figures shown while connected (MB/s)
pub const DOWNLOAD_MBPS: f64 = 45.2;
pub const UPLOAD_MBPS: f64 = 12.8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Unknown server id {0}")]
    UnknownServer(u32),
    #[error("Server {0} is offline")]
    ServerOffline(u32),
    #[error("Server catalog is empty")]
    EmptyCatalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Snapshot for the home screen
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub server: ServerRecord,
    pub connected_since: Option<DateTime<Utc>>,
    pub download_mbps: Option<f64>,
    pub upload_mbps: Option<f64>,
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

struct Inner {
    state: ConnectionState,
    server_id: u32,
    connected_since: Option<DateTime<Utc>>,
}

/// Simulated VPN connection - 接続トグル
///
/// No tunnel is built. Connecting is a fixed delay through a `DeferredSlot`;
/// any toggle issued meanwhile supersedes the pending completion.
pub struct ConnectionManager {
    catalog: Arc<Catalog>,
    inner: Arc<RwLock<Inner>>,
    slot: DeferredSlot,
    connect_delay: Duration,
}

impl ConnectionManager {
    /// Starts disconnected, pointed at the first catalog server
    pub fn new(catalog: Arc<Catalog>, connect_delay: Duration) -> anyhow::Result<Self> {
        let first = catalog
            .servers()
            .first()
            .ok_or_else(|| anyhow::anyhow!("Cannot manage a connection with an empty catalog"))?;
        let inner = Inner {
            state: ConnectionState::Disconnected,
            server_id: first.id,
            connected_since: None,
        };
        Ok(Self {
            catalog,
            inner: Arc::new(RwLock::new(inner)),
            slot: DeferredSlot::new(),
            connect_delay,
        })
    }

    pub fn status(&self) -> ConnectionStatus {
        let inner = self.inner.read();
        self.snapshot(&inner)
    }

    fn snapshot(&self, inner: &Inner) -> ConnectionStatus {
        let connected = inner.state == ConnectionState::Connected;
        // server_id always comes from this catalog
        let server = self
            .catalog
            .get(inner.server_id)
            .cloned()
            .unwrap_or_else(|| self.catalog.servers()[0].clone());
        ConnectionStatus {
            state: inner.state,
            server,
            connected_since: inner.connected_since,
            download_mbps: connected.then_some(DOWNLOAD_MBPS),
            upload_mbps: connected.then_some(UPLOAD_MBPS),
        }
    }

    /// The shield button. Connected/connecting → disconnected right away,
    /// disconnected → connecting, then connected after the delay.
    pub fn toggle(&self) -> ConnectionStatus {
        let mut inner = self.inner.write();
        match inner.state {
            ConnectionState::Connected | ConnectionState::Connecting => {
                self.slot.supersede();
                inner.state = ConnectionState::Disconnected;
                inner.connected_since = None;
                info!("🔌 Disconnected");
            }
            ConnectionState::Disconnected => {
                inner.state = ConnectionState::Connecting;
                let shared = self.inner.clone();
                self.slot.schedule(self.connect_delay, move |ticket| {
                    let mut inner = shared.write();
                    if ticket.is_current() && inner.state == ConnectionState::Connecting {
                        inner.state = ConnectionState::Connected;
                        inner.connected_since = Some(Utc::now());
                        info!("🔒 Connected to server {}", inner.server_id);
                    }
                });
                debug!("🔌 Connecting to server {} ({:?})", inner.server_id, self.connect_delay);
            }
        }
        self.snapshot(&inner)
    }

    /// Pick a server from the list. An active connection moves over to it.
    pub fn select_server(&self, id: u32) -> Result<ConnectionStatus, ConnectionError> {
        let server = self.catalog.get(id).ok_or(ConnectionError::UnknownServer(id))?;
        if !server.is_online {
            return Err(ConnectionError::ServerOffline(id));
        }

        let mut inner = self.inner.write();
        inner.server_id = id;
        if inner.state == ConnectionState::Connected {
            inner.connected_since = Some(Utc::now());
        }
        info!("📍 Selected server {} ({}, {})", id, server.city, server.country);
        Ok(self.snapshot(&inner))
    }

    /// "Best Server" button: the catalog's lowest-ping record
    pub fn select_best(&self) -> Result<ConnectionStatus, ConnectionError> {
        let fastest = self.catalog.find_fastest().ok_or(ConnectionError::EmptyCatalog)?;
        self.select_server(fastest.id)
    }
}

/// Label shown under the ping figure
pub fn ping_quality(ping: u32) -> &'static str {
    match ping {
        p if p < 50 => "Excellent",
        p if p < 100 => "Good",
        p if p < 200 => "Fair",
        _ => "Poor",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(Arc::new(Catalog::builtin()), Duration::from_millis(2000)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_after_delay() {
        let conn = manager();
        let status = conn.toggle();
        assert_eq!(status.state, ConnectionState::Connecting);
        assert!(status.download_mbps.is_none());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(conn.status().state, ConnectionState::Connecting);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let status = conn.status();
        assert!(status.is_connected());
        assert!(status.connected_since.is_some());
        assert_eq!(status.download_mbps, Some(DOWNLOAD_MBPS));
        assert_eq!(status.upload_mbps, Some(UPLOAD_MBPS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_is_immediate() {
        let conn = manager();
        conn.toggle();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(conn.status().is_connected());

        let status = conn.toggle();
        assert_eq!(status.state, ConnectionState::Disconnected);
        assert!(status.connected_since.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_while_connecting_cancels() {
        let conn = manager();
        conn.toggle();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(conn.toggle().state, ConnectionState::Disconnected);

        // stale completion must not flip us back on
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(conn.status().state, ConnectionState::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_uses_fresh_delay() {
        let conn = manager();
        conn.toggle();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        conn.toggle();
        conn.toggle();
        // first timer would have fired at 2000ms
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(conn.status().state, ConnectionState::Connecting);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(conn.status().is_connected());
    }

    #[test]
    fn test_default_server_is_first() {
        let status = manager().status();
        assert_eq!(status.server.city, "New York");
        assert_eq!(status.state, ConnectionState::Disconnected);
    }

    #[test]
    fn test_select_server() {
        let conn = manager();
        assert_eq!(conn.select_server(3).unwrap().server.city, "Frankfurt");
        assert_eq!(conn.select_server(99).unwrap_err(), ConnectionError::UnknownServer(99));
    }

    #[test]
    fn test_select_best_uses_fastest() {
        let conn = manager();
        conn.select_server(5).unwrap();
        assert_eq!(conn.select_best().unwrap().server.id, 1);
    }

    #[test]
    fn test_select_best_surfaces_offline_fastest() {
        let catalog = Catalog::new(vec![
            ServerRecord::new(1, "A", "a", "", 40),
            ServerRecord::new(2, "B", "b", "", 10).offline(),
        ])
        .unwrap();
        let conn = ConnectionManager::new(Arc::new(catalog), Duration::ZERO).unwrap();
        assert_eq!(conn.select_best().unwrap_err(), ConnectionError::ServerOffline(2));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Arc::new(Catalog::new(vec![]).unwrap());
        assert!(ConnectionManager::new(catalog, Duration::ZERO).is_err());
    }

    #[test]
    fn test_ping_quality() {
        assert_eq!(ping_quality(28), "Excellent");
        assert_eq!(ping_quality(52), "Good");
        assert_eq!(ping_quality(156), "Fair");
        assert_eq!(ping_quality(203), "Poor");
    }
}
