use thiserror::Error;

use crate::instruments::ParseError;
use crate::protocols::error::{ConnectionError, TransportError};
use crate::protocols::onc_rpc::error::OncRpcError;
use crate::protocols::onc_rpc::vxi11::Vxi11Error;
use crate::units::UnitError;

/// Everything that can go wrong talking to an instrument, one layer per
/// variant. Callers that care match on the variant; everyone else gets a
/// message naming the layer that failed.
#[derive(Error, Debug)]
pub enum Error {
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("unit error: {0}")]
    Unit(#[from] UnitError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("vxi11 error: {0}")]
    Vxi11(#[from] Vxi11Error),
    #[error("onc-rpc error: {0}")]
    OncRpc(#[from] OncRpcError),
}
