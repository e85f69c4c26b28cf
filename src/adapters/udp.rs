//! UDP transport for status reports and leader identities.
//!
//! Both directions are best-effort: a status datagram that fails to send is
//! logged and dropped, and the listener treats a receive timeout as "no
//! message yet" so its task can poll the shutdown flag.

use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::{debug, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, IdentitySource};
use crate::error::{CommsError, Result};
use crate::leader::{LeaderIdentity, parse_identity};
use crate::motion::MotionState;
use crate::status::status_line;

/// Receive timeout; bounds how long shutdown can go unnoticed.
pub const RECV_TIMEOUT_MS: u64 = 500;
/// Largest identity datagram read; the rest is discarded.
pub const MAX_DATAGRAM: usize = 128;

// ───────────────────────────────────────────────────────────────
// Status reporter (collar → collector)
// ───────────────────────────────────────────────────────────────

/// Sends one status line per motion transition. Fire-and-forget.
pub struct UdpStatusReporter {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl UdpStatusReporter {
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let dest = (host, port)
            .to_socket_addrs()
            .map_err(|_| CommsError::BadAddress)?
            .next()
            .ok_or(CommsError::BadAddress)?;
        let socket = UdpSocket::bind(("0.0.0.0", 0)).map_err(|_| CommsError::BindFailed)?;
        Ok(Self { socket, dest })
    }

    pub fn destination(&self) -> SocketAddr {
        self.dest
    }

    pub fn send_status(&self, elapsed_secs: u64, state: MotionState) -> Result<()> {
        let line = status_line(elapsed_secs, state);
        self.socket
            .send_to(line.as_bytes(), self.dest)
            .map_err(|_| CommsError::SendFailed)?;
        Ok(())
    }
}

impl EventSink for UdpStatusReporter {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::MotionChanged {
            to, elapsed_secs, ..
        } = event
        {
            if let Err(e) = self.send_status(*elapsed_secs, *to) {
                warn!("STATUS | {} to {} (dropped)", e, self.dest);
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Identity listener (collector → collar)
// ───────────────────────────────────────────────────────────────

pub struct IdentityListener {
    socket: UdpSocket,
}

impl IdentityListener {
    /// Bind on all interfaces. Port 0 picks an ephemeral port.
    pub fn bind(port: u16) -> Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port)).map_err(|_| CommsError::BindFailed)?;
        socket
            .set_read_timeout(Some(Duration::from_millis(RECV_TIMEOUT_MS)))
            .map_err(|_| CommsError::BindFailed)?;
        Ok(Self { socket })
    }

    pub fn local_port(&self) -> Option<u16> {
        self.socket.local_addr().ok().map(|a| a.port())
    }
}

impl IdentitySource for IdentityListener {
    fn next_identity(&mut self) -> Result<Option<LeaderIdentity>> {
        let mut buf = [0u8; MAX_DATAGRAM];
        match self.socket.recv_from(&mut buf) {
            Ok((len, from)) => {
                debug!("IDENT | {} bytes from {}", len, from);
                Ok(parse_identity(&buf[..len]))
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Ok(None),
            Err(e) => {
                warn!("IDENT | recv_from failed: {}", e);
                Err(CommsError::ReceiveFailed.into())
            }
        }
    }
}
