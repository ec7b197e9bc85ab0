//! Scripted RPC stream double for exercising clients without sockets.
//!
//! Handles are cheap clones sharing one script, so a test can keep a handle
//! for inspection after the client takes ownership of the other.

use super::RpcStream;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

#[derive(Clone, Default)]
pub(crate) struct FakeRpc {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    outgoing: Vec<u8>,
    calls: Vec<Vec<u8>>,
    replies: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    corrupt_xid: bool,
}

// Offsets into a call record: record mark, xid, mtype, rpcvers, then
// program, version, procedure, credentials and verifier, then arguments.
const PROGRAM_AT: usize = 16;
const PROCEDURE_AT: usize = 24;
const ARGS_AT: usize = 44;

impl FakeRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the payload answering the next unanswered call.
    pub fn push_reply(&self, payload: &[u8]) {
        self.inner.borrow_mut().replies.push_back(payload.to_vec());
    }

    /// Makes every later reply carry a wrong xid.
    pub fn corrupt_xid(&self) {
        self.inner.borrow_mut().corrupt_xid = true;
    }

    /// Number of complete calls seen so far.
    pub fn calls(&self) -> usize {
        self.inner.borrow().calls.len()
    }

    pub fn call_program(&self, i: usize) -> u32 {
        word(&self.inner.borrow().calls[i], PROGRAM_AT)
    }

    pub fn call_procedure(&self, i: usize) -> u32 {
        word(&self.inner.borrow().calls[i], PROCEDURE_AT)
    }

    /// Serialized arguments of call `i`.
    pub fn call_args(&self, i: usize) -> Vec<u8> {
        self.inner.borrow().calls[i][ARGS_AT..].to_vec()
    }
}

fn word(record: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
}

impl RpcStream for FakeRpc {
    fn raw_write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().outgoing.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn raw_read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut inner = self.inner.borrow_mut();
        let mut n = 0;
        while n < buf.len() {
            match inner.pending.pop_front() {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }

    // The client sends one record per call and flushes it, so the flush is
    // the moment the "server" answers.
    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.outgoing.len() < ARGS_AT {
            return Ok(());
        }
        let record = std::mem::take(&mut inner.outgoing);
        let mut xid = word(&record, 4);
        if inner.corrupt_xid {
            xid = xid.wrapping_add(1);
        }
        let payload = inner.replies.pop_front().unwrap_or_default();
        let mut body = Vec::with_capacity(24 + payload.len());
        body.extend_from_slice(&xid.to_be_bytes());
        body.extend_from_slice(&1_u32.to_be_bytes()); // REPLY
        body.extend_from_slice(&0_u32.to_be_bytes()); // MSG_ACCEPTED
        body.extend_from_slice(&0_u32.to_be_bytes()); // verifier AUTH_NONE
        body.extend_from_slice(&0_u32.to_be_bytes()); // verifier length
        body.extend_from_slice(&0_u32.to_be_bytes()); // SUCCESS
        body.extend_from_slice(&payload);
        let mark = (body.len() as u32) | 0x8000_0000;
        inner.pending.extend(mark.to_be_bytes().iter().copied());
        inner.pending.extend(body.iter().copied());
        inner.calls.push(record);
        Ok(())
    }
}
