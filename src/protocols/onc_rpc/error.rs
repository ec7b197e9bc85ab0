use onc_rpc::AcceptedStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OncRpcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid onc-rpc message: {0}")]
    InvalidMessage(#[from] onc_rpc::Error),
    #[error("call rejected: {0}")]
    Rejected(#[from] RejectedReply),
    #[error("call not executed: {0}")]
    Unsuccessful(#[from] UnsuccessfulAcceptStatus),
    #[error("cannot serialize call parameters: {0}")]
    Serialization(#[from] serde_xdr::CompatSerializationError),
    #[error("cannot decode reply: {0}")]
    Decode(#[from] super::xdr::Error),
    #[error("reply xid {received} does not match call xid {sent}")]
    XidUnmatched { sent: u32, received: u32 },
    #[error("rpc error: {0}")]
    Other(String),
}

/// Reply accepted but the call failed (RFC 5531 `accept_stat`).
#[derive(Error, Debug)]
pub enum UnsuccessfulAcceptStatus {
    #[error("program unavailable on this server")]
    ProgramUnavailable,
    #[error("program version unsupported, server handles {low}-{high}")]
    ProgramMismatch { low: u32, high: u32 },
    #[error("procedure number not recognized")]
    ProcedureUnavailable,
    #[error("server could not decode the call arguments")]
    GarbageArgs,
    #[error("server internal error")]
    SystemError,
}

impl<S: AsRef<[u8]>> From<&AcceptedStatus<S>> for UnsuccessfulAcceptStatus {
    fn from(value: &AcceptedStatus<S>) -> Self {
        match value {
            AcceptedStatus::Success(_) => unreachable!(),
            AcceptedStatus::ProgramUnavailable => UnsuccessfulAcceptStatus::ProgramUnavailable,
            AcceptedStatus::ProgramMismatch { low, high } => {
                UnsuccessfulAcceptStatus::ProgramMismatch {
                    low: *low,
                    high: *high,
                }
            }
            AcceptedStatus::ProcedureUnavailable => UnsuccessfulAcceptStatus::ProcedureUnavailable,
            AcceptedStatus::GarbageArgs => UnsuccessfulAcceptStatus::GarbageArgs,
            AcceptedStatus::SystemError => UnsuccessfulAcceptStatus::SystemError,
        }
    }
}

/// Reply denied outright (RFC 5531 `rejected_reply`).
#[derive(Error, Debug)]
pub enum RejectedReply {
    #[error("rpc version unsupported, server handles {low}-{high}")]
    RpcVersionMismatch { low: u32, high: u32 },
    #[error("authentication rejected: {0}")]
    AuthError(String),
}

impl From<&onc_rpc::RejectedReply> for RejectedReply {
    fn from(value: &onc_rpc::RejectedReply) -> Self {
        match value {
            onc_rpc::RejectedReply::RpcVersionMismatch { low, high } => {
                RejectedReply::RpcVersionMismatch {
                    low: *low,
                    high: *high,
                }
            }
            onc_rpc::RejectedReply::AuthError(s) => RejectedReply::AuthError(format!("{:?}", s)),
        }
    }
}
