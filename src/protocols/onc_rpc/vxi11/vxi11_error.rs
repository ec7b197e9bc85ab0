use thiserror::Error;

/// Errors of the VXI-11 core channel: device error codes plus the RPC
/// transport failures underneath them.
#[derive(Error, Debug)]
pub enum Vxi11Error {
    #[error("syntax error")]
    SyntaxError,
    #[error("device not accessible")]
    NotAccessible,
    #[error("invalid link identifier")]
    InvalidIdentifier,
    #[error("parameter error")]
    ParameterError,
    #[error("channel not established")]
    NotEstablished,
    #[error("operation not supported")]
    NotSupported,
    #[error("out of resources")]
    OutOfResources,
    #[error("device locked by another link")]
    LockedByAnother,
    #[error("no lock held by this link")]
    NoLockHeld,
    #[error("I/O timeout")]
    IOTimeOut,
    #[error("I/O error")]
    IOError,
    #[error("invalid address")]
    InvalidAddress,
    #[error("abort")]
    Abort,
    #[error("channel already established")]
    AlreadyEstablished,
    #[error("unknown device error code {0}")]
    Unknown(i32),
    #[error("onc-rpc error: {0}")]
    Rpc(#[from] super::super::error::OncRpcError),
}

/// Checks the `error` field of a core channel reply, zero meaning success.
pub(crate) fn check(code: i32) -> Result<(), Vxi11Error> {
    use Vxi11Error::*;
    Err(match code {
        0 => return Ok(()),
        1 => SyntaxError,
        3 => NotAccessible,
        4 => InvalidIdentifier,
        5 => ParameterError,
        6 => NotEstablished,
        8 => NotSupported,
        9 => OutOfResources,
        11 => LockedByAnother,
        12 => NoLockHeld,
        15 => IOTimeOut,
        17 => IOError,
        21 => InvalidAddress,
        23 => Abort,
        29 => AlreadyEstablished,
        n => Unknown(n),
    })
}
