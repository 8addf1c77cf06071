//! TCP transport for the channel collaborator
//!
//! One length-prefixed (u32 big-endian + UTF-8) request/response exchange
//! per connection, one in-flight exchange at a time. The listener stores
//! the latest received wire string and echoes it back as the
//! acknowledgement.

use linksim_core::channel::Channel;
use linksim_core::{LinkError, Result};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// Client side of the channel: connects to a listening peer per exchange
#[derive(Debug, Clone)]
pub struct TcpChannel {
    addr: String,
}

impl TcpChannel {
    /// Channel towards a peer at `host:port`
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }
}

impl Channel for TcpChannel {
    fn send(&mut self, wire: &str) -> Result<String> {
        send(&self.addr, wire)
    }
}

/// Run one request/response exchange with a listening peer
pub fn send(addr: &str, wire: &str) -> Result<String> {
    let mut stream = TcpStream::connect(addr)?;
    write_message(&mut stream, wire)?;
    read_message(&mut stream)
}

fn write_message(stream: &mut TcpStream, message: &str) -> Result<()> {
    let bytes = message.as_bytes();
    stream.write_all(&(bytes.len() as u32).to_be_bytes())?;
    stream.write_all(bytes)?;
    Ok(())
}

fn read_message(stream: &mut TcpStream) -> Result<String> {
    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf) as usize;
    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|err| LinkError::Channel(err.to_string()))
}

/// Server side of the channel: accepts one connection at a time
pub struct WireListener {
    listener: TcpListener,
    latest: Arc<Mutex<Option<String>>>,
}

impl WireListener {
    /// Bind to `host:port` (port 0 picks a free port)
    pub fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr)?;
        Ok(Self {
            listener,
            latest: Arc::new(Mutex::new(None)),
        })
    }

    /// The address actually bound
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Block until one exchange completes, returning the received wire string
    pub fn accept_one(&self) -> Result<String> {
        let (mut stream, peer) = self.listener.accept()?;
        info!("{} connected", peer);
        let wire = read_message(&mut stream)?;
        *self
            .latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(wire.clone());
        write_message(&mut stream, &wire)?;
        Ok(wire)
    }

    /// The most recent wire string received by this listener
    pub fn latest_received(&self) -> Option<String> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serve exchanges on a background thread for the rest of the process
    pub fn spawn_background(self) -> BackgroundListener {
        let latest = Arc::clone(&self.latest);
        let handle = thread::spawn(move || loop {
            if let Err(err) = self.accept_one() {
                warn!("exchange failed: {}", err);
            }
        });
        BackgroundListener {
            latest,
            _handle: handle,
        }
    }
}

/// Handle onto a listener serving in the background
pub struct BackgroundListener {
    latest: Arc<Mutex<Option<String>>>,
    _handle: JoinHandle<()>,
}

impl BackgroundListener {
    /// The most recent wire string received by the background listener
    pub fn latest_received(&self) -> Option<String> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
