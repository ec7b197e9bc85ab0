//! XDR wire types for the portmapper and the VXI-11 core channel.
//!
//! Call parameters go out through `serde_xdr`, where field order matches the
//! order in the protocol definition. Replies are flat structs decoded by hand
//! off the accepted payload.

use bytes::{Buf, Bytes};
use serde::Serialize;
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reply truncated: wanted {wanted} more byte(s)")]
    Truncated { wanted: usize },
    #[error("opaque length {0} overruns the reply")]
    BadOpaqueLength(u32),
}

fn take_u32(buf: &mut Bytes) -> Result<u32, Error> {
    if buf.remaining() < 4 {
        return Err(Error::Truncated {
            wanted: 4 - buf.remaining(),
        });
    }
    Ok(buf.get_u32())
}

fn take_i32(buf: &mut Bytes) -> Result<i32, Error> {
    if buf.remaining() < 4 {
        return Err(Error::Truncated {
            wanted: 4 - buf.remaining(),
        });
    }
    Ok(buf.get_i32())
}

fn take_opaque(buf: &mut Bytes) -> Result<Bytes, Error> {
    let len = take_u32(buf)? as usize;
    if buf.remaining() < len {
        return Err(Error::BadOpaqueLength(len as u32));
    }
    let data = buf.split_to(len);
    // Skip the pad up to the four-byte boundary.
    let pad = (4 - len % 4) % 4;
    buf.advance(pad.min(buf.remaining()));
    Ok(data)
}

pub const IPPROTO_TCP: u32 = 6;

/// Portmapper `mapping` argument (RFC 1833).
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Mapping {
    pub prog: u32,
    pub vers: u32,
    pub prot: u32,
    pub port: u32,
}

/// GETPORT reply.
#[derive(Debug, Clone, Copy)]
pub struct Port(pub u32);

impl TryFrom<Bytes> for Port {
    type Error = Error;
    fn try_from(mut value: Bytes) -> Result<Self, Error> {
        Ok(Port(take_u32(&mut value)?))
    }
}

/// `Create_LinkParms`
#[derive(Serialize, Debug)]
pub struct CreateLinkParms<'a> {
    pub client_id: i32,
    pub lock_device: bool,
    pub lock_timeout: u32,
    pub device: &'a str,
}

/// `Create_LinkResp`
#[derive(Debug, Clone, Copy)]
pub struct CreateLinkResp {
    pub error: i32,
    pub lid: i32,
    pub abort_port: u32,
    pub max_recv_size: u32,
}

impl TryFrom<Bytes> for CreateLinkResp {
    type Error = Error;
    fn try_from(mut value: Bytes) -> Result<Self, Error> {
        Ok(CreateLinkResp {
            error: take_i32(&mut value)?,
            lid: take_i32(&mut value)?,
            abort_port: take_u32(&mut value)?,
            max_recv_size: take_u32(&mut value)?,
        })
    }
}

/// `Device_WriteParms`
#[derive(Serialize, Debug)]
pub struct DeviceWriteParms<'a> {
    pub lid: i32,
    pub io_timeout: u32,
    pub lock_timeout: u32,
    pub flags: i32,
    pub data: &'a serde_bytes::Bytes,
}

/// `Device_WriteResp`
#[derive(Debug, Clone, Copy)]
pub struct DeviceWriteResp {
    pub error: i32,
    pub size: u32,
}

impl TryFrom<Bytes> for DeviceWriteResp {
    type Error = Error;
    fn try_from(mut value: Bytes) -> Result<Self, Error> {
        Ok(DeviceWriteResp {
            error: take_i32(&mut value)?,
            size: take_u32(&mut value)?,
        })
    }
}

/// `Device_ReadParms`
#[derive(Serialize, Debug)]
pub struct DeviceReadParms {
    pub lid: i32,
    pub request_size: u32,
    pub io_timeout: u32,
    pub lock_timeout: u32,
    pub flags: i32,
    pub term_char: i32,
}

/// `Device_ReadResp`
#[derive(Debug, Clone)]
pub struct DeviceReadResp {
    pub error: i32,
    pub reason: i32,
    pub data: Bytes,
}

impl TryFrom<Bytes> for DeviceReadResp {
    type Error = Error;
    fn try_from(mut value: Bytes) -> Result<Self, Error> {
        Ok(DeviceReadResp {
            error: take_i32(&mut value)?,
            reason: take_i32(&mut value)?,
            data: take_opaque(&mut value)?,
        })
    }
}

/// `Device_Link` on its own, the whole argument of destroy_link.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct DeviceLink(pub i32);

/// `Device_Error`
#[derive(Debug, Clone, Copy)]
pub struct DeviceError {
    pub error: i32,
}

impl TryFrom<Bytes> for DeviceError {
    type Error = Error;
    fn try_from(mut value: Bytes) -> Result<Self, Error> {
        Ok(DeviceError {
            error: take_i32(&mut value)?,
        })
    }
}
