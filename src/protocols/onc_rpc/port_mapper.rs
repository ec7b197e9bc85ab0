//! Portmapper client (RFC 1833), used only to look up the VXI-11 core port.

use super::error::OncRpcError;
use super::xdr::{self, Mapping};
use super::{Rpc, RpcProgram, RpcStream};
use log::debug;
use std::convert::TryFrom;

/// Well-known portmapper port.
pub const PORT: u16 = 111;

pub struct PortMapper<S> {
    io: S,
}

impl<S> PortMapper<S> {
    pub fn new(io: S) -> Self {
        Self { io }
    }
    pub fn into_inner(self) -> S {
        self.io
    }
}

impl<S> RpcProgram for PortMapper<S> {
    type IO = S;
    const PROGRAM: u32 = 100_000;
    const VERSION: u32 = 2;
    fn get_io(&self) -> &S {
        &self.io
    }
    fn mut_io(&mut self) -> &mut S {
        &mut self.io
    }
}

impl<S: RpcStream> PortMapper<S> {
    /// Asks which TCP port serves `program` at `version`.
    pub fn get_port(&mut self, program: u32, version: u32) -> Result<u16, OncRpcError> {
        let reply: xdr::Port = self.call(
            Procedure::GetPort,
            Mapping {
                prog: program,
                vers: version,
                prot: xdr::IPPROTO_TCP,
                port: 0,
            },
        )?;
        if reply.0 == 0 {
            return Err(OncRpcError::Other(format!(
                "program {} version {} is not registered",
                program, version
            )));
        }
        let port = u16::try_from(reply.0).map_err(|_| {
            OncRpcError::Other(format!("portmapper returned invalid port {}", reply.0))
        })?;
        debug!("program {} v{} maps to port {}", program, version, port);
        Ok(port)
    }
}

/// Portmapper procedures (RFC 1833 section 3).
pub enum Procedure {
    Null,
    Set,
    Unset,
    GetPort,
    Dump,
    CallIt,
}

impl From<Procedure> for u32 {
    fn from(p: Procedure) -> Self {
        use Procedure::*;
        match p {
            Null => 0,
            Set => 1,
            Unset => 2,
            GetPort => 3,
            Dump => 4,
            CallIt => 5,
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::testing::FakeRpc;
    use super::super::vxi11::core;
    use super::*;

    #[test]
    fn get_port_asks_for_tcp_mapping() {
        let fake = FakeRpc::new();
        fake.push_reply(&[0, 0, 2, 155]); // port 667
        let mut mapper = PortMapper::new(fake.clone());
        let port = mapper.get_port(core::PROGRAM, core::VERSION).unwrap();
        assert_eq!(port, 667);
        assert_eq!(fake.call_program(0), 100_000);
        assert_eq!(fake.call_procedure(0), 3);
        assert_eq!(
            fake.call_args(0),
            [
                0x00, 0x06, 0x07, 0xAF, // vxi11 core program
                0, 0, 0, 1, // version
                0, 0, 0, 6, // tcp
                0, 0, 0, 0, // port, ignored for GETPORT
            ]
        );
    }

    #[test]
    fn get_port_rejects_unregistered_program() {
        let fake = FakeRpc::new();
        fake.push_reply(&[0, 0, 0, 0]);
        let mut mapper = PortMapper::new(fake);
        assert!(matches!(
            mapper.get_port(core::PROGRAM, core::VERSION),
            Err(OncRpcError::Other(_))
        ));
    }

    #[test]
    fn get_port_rejects_port_beyond_u16() {
        let fake = FakeRpc::new();
        fake.push_reply(&[0, 1, 0, 0]); // 65536
        let mut mapper = PortMapper::new(fake);
        let err = mapper.get_port(core::PROGRAM, core::VERSION).unwrap_err();
        assert!(err.to_string().contains("invalid port 65536"));
    }

    #[test]
    fn mismatched_xid_is_an_error() {
        let fake = FakeRpc::new();
        fake.corrupt_xid();
        fake.push_reply(&[0, 0, 2, 155]);
        let mut mapper = PortMapper::new(fake);
        assert!(matches!(
            mapper.get_port(core::PROGRAM, core::VERSION),
            Err(OncRpcError::XidUnmatched { .. })
        ));
    }
}
