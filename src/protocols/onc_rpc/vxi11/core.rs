//! Core channel procedures of VXI-11, client side only.

use super::super::xdr;
use super::super::{Rpc, RpcProgram, RpcStream};
use super::vxi11_error::{check, Vxi11Error};
use super::DeviceFlags;

pub const PROGRAM: u32 = 0x0607AF;
pub const VERSION: u32 = 1;

/// Core channel procedure numbers.
pub enum Procedure {
    /// Opens a link to a device.
    CreateLink,
    /// Device receives a message.
    DeviceWrite,
    /// Device returns a result.
    DeviceRead,
    /// Device returns its status byte.
    DeviceReadStb,
    /// Device executes a trigger.
    DeviceTrigger,
    /// Device clears itself.
    DeviceClear,
    /// Device disables its front panel.
    DeviceRemote,
    /// Device enables its front panel.
    DeviceLocal,
    /// Device is locked.
    DeviceLock,
    /// Device is unlocked.
    DeviceUnlock,
    /// Device enables or disables sending of service requests.
    DeviceEnableSrq,
    /// Device executes a command.
    DeviceDoCmd,
    /// Closes a link to a device.
    DestroyLink,
    /// Device creates an interrupt channel.
    CreateIntrChan,
    /// Device destroys its interrupt channel.
    DestroyIntrChan,
}

impl From<Procedure> for u32 {
    fn from(p: Procedure) -> Self {
        use Procedure::*;
        match p {
            CreateLink => 10,
            DeviceWrite => 11,
            DeviceRead => 12,
            DeviceReadStb => 13,
            DeviceTrigger => 14,
            DeviceClear => 15,
            DeviceRemote => 16,
            DeviceLocal => 17,
            DeviceLock => 18,
            DeviceUnlock => 19,
            DeviceEnableSrq => 20,
            DeviceDoCmd => 22,
            DestroyLink => 23,
            CreateIntrChan => 25,
            DestroyIntrChan => 26,
        }
    }
}

pub struct Core<S> {
    io: S,
}

impl<S> RpcProgram for Core<S> {
    type IO = S;
    const PROGRAM: u32 = PROGRAM;
    const VERSION: u32 = VERSION;
    fn get_io(&self) -> &Self::IO {
        &self.io
    }
    fn mut_io(&mut self) -> &mut Self::IO {
        &mut self.io
    }
}

impl<S> Core<S> {
    pub fn new(io: S) -> Self {
        Self { io }
    }
}

impl<S: RpcStream> Core<S> {
    pub fn create_link(
        &mut self,
        client_id: i32,
        lock_device: bool,
        lock_timeout: u32,
        device: &str,
    ) -> Result<xdr::CreateLinkResp, Vxi11Error> {
        let resp: xdr::CreateLinkResp = self.call(
            Procedure::CreateLink,
            xdr::CreateLinkParms {
                client_id,
                lock_device,
                lock_timeout,
                device,
            },
        )?;
        check(resp.error)?;
        Ok(resp)
    }

    pub fn device_write(
        &mut self,
        link_id: i32,
        flags: DeviceFlags,
        lock_timeout: u32,
        io_timeout: u32,
        data: &[u8],
    ) -> Result<usize, Vxi11Error> {
        let resp: xdr::DeviceWriteResp = self.call(
            Procedure::DeviceWrite,
            xdr::DeviceWriteParms {
                lid: link_id,
                io_timeout,
                lock_timeout,
                flags: flags.into(),
                data: serde_bytes::Bytes::new(data),
            },
        )?;
        check(resp.error)?;
        Ok(resp.size as usize)
    }

    pub fn device_read(
        &mut self,
        link_id: i32,
        flags: DeviceFlags,
        lock_timeout: u32,
        io_timeout: u32,
        request_size: u32,
        term_char: u8,
    ) -> Result<xdr::DeviceReadResp, Vxi11Error> {
        let resp: xdr::DeviceReadResp = self.call(
            Procedure::DeviceRead,
            xdr::DeviceReadParms {
                lid: link_id,
                request_size,
                io_timeout,
                lock_timeout,
                flags: flags.into(),
                term_char: term_char as i32,
            },
        )?;
        check(resp.error)?;
        Ok(resp)
    }

    pub fn destroy_link(&mut self, link_id: i32) -> Result<(), Vxi11Error> {
        let resp: xdr::DeviceError =
            self.call(Procedure::DestroyLink, xdr::DeviceLink(link_id))?;
        check(resp.error)
    }
}
