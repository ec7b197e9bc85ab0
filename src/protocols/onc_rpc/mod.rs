//! ONC-RPC client plumbing (RFC 5531) over record-marked TCP streams.

pub mod error;
pub mod port_mapper;
#[cfg(test)]
pub(crate) mod testing;
pub mod vxi11;
pub mod xdr;

use bytes::Bytes;
use error::{OncRpcError, RejectedReply, UnsuccessfulAcceptStatus};
use onc_rpc::{auth::AuthFlavor, CallBody, MessageType, ReplyBody, RpcMessage};
use serde::Serialize;
use std::convert::{TryFrom, TryInto};
use std::net::TcpStream;

type Result<T> = std::result::Result<T, OncRpcError>;

const HEAD_LEN: usize = 4;

fn parse_bytes(bytes: Bytes) -> Result<RpcMessage<Bytes, Bytes>> {
    match RpcMessage::try_from(bytes) {
        Ok(m) => Ok(m),
        // The caller hands over exactly one whole record.
        Err(onc_rpc::Error::IncompleteHeader) | Err(onc_rpc::Error::IncompleteMessage { .. }) => {
            unreachable!()
        }
        Err(e) => Err(e.into()),
    }
}

fn closed_early() -> OncRpcError {
    std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        "connection closed mid-reply",
    )
    .into()
}

/// Byte stream carrying record-marked RPC messages.
pub trait RpcStream {
    fn raw_write(&mut self, buf: &[u8]) -> std::io::Result<usize>;
    fn raw_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
    fn flush(&mut self) -> std::io::Result<()>;

    fn send<T, P>(&mut self, message: RpcMessage<T, P>) -> Result<()>
    where
        T: AsRef<[u8]>,
        P: AsRef<[u8]>,
    {
        raw_write_all(self, &message.serialise()?)?;
        self.flush()?;
        Ok(())
    }

    /// Reads one whole reply record.
    fn read_message(&mut self) -> Result<RpcMessage<Bytes, Bytes>> {
        let mut buf = vec![0_u8; HEAD_LEN];
        let mut filled = 0;
        let expected = loop {
            let n = self.raw_read(&mut buf[filled..])?;
            if n == 0 {
                return Err(closed_early());
            }
            filled += n;
            match onc_rpc::expected_message_len(&buf[..filled]) {
                Ok(len) => break len as usize,
                Err(onc_rpc::Error::IncompleteHeader) => continue,
                Err(e) => return Err(e.into()),
            }
        };
        buf.resize(expected, 0);
        while filled < expected {
            match self.raw_read(&mut buf[filled..]) {
                Ok(0) => return Err(closed_early()),
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        parse_bytes(Bytes::from(buf))
    }
}

fn raw_write_all<S: RpcStream + ?Sized>(s: &mut S, mut buf: &[u8]) -> Result<()> {
    while !buf.is_empty() {
        match s.raw_write(buf) {
            Ok(0) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "failed to write whole buffer",
                )
                .into());
            }
            Ok(n) => buf = &buf[n..],
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

impl RpcStream for TcpStream {
    fn raw_read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        std::io::Read::read(self, buf)
    }
    fn raw_write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        std::io::Write::write(self, buf)
    }
    fn flush(&mut self) -> std::io::Result<()> {
        std::io::Write::flush(self)
    }
}

/// A client bound to one RPC program number.
pub trait RpcProgram {
    type IO;
    const PROGRAM: u32;
    const VERSION: u32;
    fn gen_xid(&mut self) -> u32 {
        rand::random()
    }
    fn get_io(&self) -> &Self::IO;
    fn mut_io(&mut self) -> &mut Self::IO;
}

pub trait Rpc {
    /// Issues one call with AUTH_NONE credentials and decodes the reply
    /// payload. Blocks until the reply record arrives.
    fn call<P, C, R>(&mut self, procedure: P, content: C) -> Result<R>
    where
        P: Into<u32>,
        C: Serialize,
        R: TryFrom<Bytes>,
        OncRpcError: From<<R as TryFrom<Bytes>>::Error>;
}

impl<S> Rpc for S
where
    S: RpcProgram,
    <S as RpcProgram>::IO: RpcStream,
{
    fn call<P, C, R>(&mut self, procedure: P, content: C) -> Result<R>
    where
        P: Into<u32>,
        C: Serialize,
        R: TryFrom<Bytes>,
        OncRpcError: From<<R as TryFrom<Bytes>>::Error>,
    {
        let xid = self.gen_xid();
        let content = serde_xdr::to_bytes(&content)?;
        let credentials: AuthFlavor<&[u8]> = AuthFlavor::AuthNone(None);
        let verifier: AuthFlavor<&[u8]> = AuthFlavor::AuthNone(None);
        let call_body = CallBody::new(
            Self::PROGRAM,
            Self::VERSION,
            procedure.into(),
            credentials,
            verifier,
            &content[..],
        );
        self.mut_io()
            .send(RpcMessage::new(xid, MessageType::Call(call_body)))?;
        let reply = self.mut_io().read_message()?;
        if reply.xid() != xid {
            return Err(OncRpcError::XidUnmatched {
                sent: xid,
                received: reply.xid(),
            });
        }
        match reply.reply_body().ok_or_else(|| {
            OncRpcError::Other("expected reply, found call".to_string())
        })? {
            ReplyBody::Accepted(a) => match a.status() {
                onc_rpc::AcceptedStatus::Success(p) => Ok(p.clone().try_into()?),
                u => Err(UnsuccessfulAcceptStatus::from(u).into()),
            },
            ReplyBody::Denied(d) => Err(RejectedReply::from(d).into()),
        }
    }
}
