//! In-memory transport double: captures writes, serves scripted replies.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

#[derive(Default)]
pub struct MockIo {
    written: Vec<u8>,
    replies: VecDeque<Vec<u8>>,
}

impl MockIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(reply: &[u8]) -> Self {
        let mut io = Self::new();
        io.push_reply(reply);
        io
    }

    pub fn push_reply(&mut self, reply: &[u8]) {
        self.replies.push_back(reply.to_vec());
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl Read for MockIo {
    /// One scripted reply per read call; an exhausted script reads as EOF.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.replies.pop_front() {
            None => Ok(0),
            Some(reply) => {
                let n = reply.len().min(buf.len());
                buf[..n].copy_from_slice(&reply[..n]);
                Ok(n)
            }
        }
    }
}

impl Write for MockIo {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
