//! VXI-11 instrument link over the ONC-RPC core channel.
//!
//! [`Vxi11`] looks the core channel port up through the portmapper, opens a
//! device link and then behaves like any other byte stream: writes become
//! `device_write` calls and reads become `device_read` calls, so the rest of
//! the crate can treat a VXI-11 instrument exactly like a raw socket one.

pub mod core;
pub mod vxi11_error;

pub use vxi11_error::Vxi11Error;

use self::core::Core;
use super::port_mapper::{self, PortMapper};
use super::RpcStream;
use crate::error::Error;
use crate::protocols::error::ConnectionError;
use log::{debug, warn};
use std::io::{self, Read, Write};
use std::net::TcpStream;

/// Device name of the default instrument behind a LAN adapter.
const DEVICE_NAME: &str = "inst0";
/// Per-call timeouts handed to the server, in milliseconds. These are fields
/// of the protocol, not a client setting.
const IO_TIMEOUT_MS: u32 = 10_000;
const LOCK_TIMEOUT_MS: u32 = 10_000;

/// `device_read` termination reason bits.
pub mod reason {
    /// Requested byte count transferred.
    pub const REQCNT: i32 = 1;
    /// Termination character transferred.
    pub const CHR: i32 = 1 << 1;
    /// Device signalled the end of the message.
    pub const END: i32 = 1 << 2;
}

/// `Device_Flags` builder.
#[derive(Debug, Clone, Copy)]
pub struct DeviceFlags(i32);

impl DeviceFlags {
    pub fn new_zero() -> Self {
        Self(0)
    }
    pub fn wait_lock(mut self) -> Self {
        self.0 |= 1;
        self
    }
    pub fn end(mut self) -> Self {
        self.0 |= 1 << 3;
        self
    }
    pub fn terminator_set(mut self) -> Self {
        self.0 |= 1 << 7;
        self
    }
}

impl From<DeviceFlags> for i32 {
    fn from(d: DeviceFlags) -> Self {
        d.0
    }
}

/// An open device link on the VXI-11 core channel.
pub struct Vxi11<S: RpcStream = TcpStream> {
    core: Core<S>,
    link_id: i32,
    max_recv_size: u32,
    link_open: bool,
}

impl Vxi11 {
    /// Opens a link to the instrument at `host`, asking the portmapper on
    /// its well-known port where the core channel lives.
    pub fn connect(host: &str) -> Result<Self, Error> {
        Self::connect_with_mapper(host, port_mapper::PORT)
    }

    /// Same as [`Vxi11::connect`] with the portmapper on a different port.
    pub fn connect_with_mapper(host: &str, mapper_port: u16) -> Result<Self, Error> {
        let endpoint = format!("{}:{}", host, mapper_port);
        debug!("asking portmapper at {} for the vxi11 core port", endpoint);
        let mapper_io = TcpStream::connect((host, mapper_port))
            .map_err(|source| ConnectionError { endpoint, source })?;
        let core_port = PortMapper::new(mapper_io).get_port(core::PROGRAM, core::VERSION)?;

        let endpoint = format!("{}:{}", host, core_port);
        let core_io = TcpStream::connect((host, core_port)).map_err(|source| ConnectionError {
            endpoint: endpoint.clone(),
            source,
        })?;
        let mut core = Core::new(core_io);

        let client_id = rand::random::<u16>() as i32;
        let link = core.create_link(client_id, false, LOCK_TIMEOUT_MS, DEVICE_NAME)?;
        debug!(
            "link {} to {} open, max_recv_size {}",
            link.lid, endpoint, link.max_recv_size
        );
        Ok(Self::bound(core, link.lid, link.max_recv_size))
    }
}

impl<S: RpcStream> Vxi11<S> {
    fn bound(core: Core<S>, link_id: i32, max_recv_size: u32) -> Self {
        // Some servers report 0 for "no particular limit"; a sane floor keeps
        // write chunking working either way.
        let max_recv_size = match max_recv_size {
            0 => 1024,
            n => n.min(1024 * 1024),
        };
        Self {
            core,
            link_id,
            max_recv_size,
            link_open: true,
        }
    }

    /// Destroys the device link and hands the channel back.
    pub fn close(mut self) -> Result<(), Vxi11Error> {
        self.destroy()
    }

    fn destroy(&mut self) -> Result<(), Vxi11Error> {
        if self.link_open {
            self.link_open = false;
            self.core.destroy_link(self.link_id)?;
        }
        Ok(())
    }
}

impl<S: RpcStream> Drop for Vxi11<S> {
    fn drop(&mut self) {
        if self.link_open {
            if let Err(e) = self.destroy() {
                warn!("failed to destroy link {}: {}", self.link_id, e);
            }
        }
    }
}

fn device_io_error(e: Vxi11Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

impl<S: RpcStream> Read for Vxi11<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut filled = 0;
        // One message may span several device_read replies; keep asking until
        // the device marks the end or the caller's buffer is full.
        loop {
            let request_size = (buf.len() - filled).min(u32::MAX as usize) as u32;
            let resp = self
                .core
                .device_read(
                    self.link_id,
                    DeviceFlags::new_zero(),
                    LOCK_TIMEOUT_MS,
                    IO_TIMEOUT_MS,
                    request_size,
                    0,
                )
                .map_err(device_io_error)?;
            debug!(
                "device_read returned {} byte(s), reason {:#x}",
                resp.data.len(),
                resp.reason
            );
            let n = resp.data.len().min(buf.len() - filled);
            buf[filled..filled + n].copy_from_slice(&resp.data[..n]);
            filled += n;
            let done = resp.reason & (reason::END | reason::CHR) != 0;
            if done || filled == buf.len() || resp.data.is_empty() {
                return Ok(filled);
            }
        }
    }
}

impl<S: RpcStream> Write for Vxi11<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        // The link advertises how much one device_write may carry; anything
        // longer goes out in chunks via write_all, and only the chunk that
        // finishes the message carries the END flag.
        let chunk = &buf[..buf.len().min(self.max_recv_size as usize)];
        let flags = if chunk.len() == buf.len() {
            DeviceFlags::new_zero().end()
        } else {
            DeviceFlags::new_zero()
        };
        let accepted = self
            .core
            .device_write(self.link_id, flags, LOCK_TIMEOUT_MS, IO_TIMEOUT_MS, chunk)
            .map_err(device_io_error)?;
        Ok(accepted.min(chunk.len()))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An already-open link over a scripted stream, for tests elsewhere in the
/// crate that need a VXI-11 transport without sockets.
#[cfg(test)]
pub(crate) fn test_link(fake: super::testing::FakeRpc) -> Vxi11<super::testing::FakeRpc> {
    Vxi11::bound(Core::new(fake), 7, 1024)
}
