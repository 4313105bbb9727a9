// felilite/src/transport/mock.rs

use std::collections::VecDeque;
use std::time::Duration;

use crate::tag::NfcF;
use crate::transport::traits::Transport;
use crate::types::SystemCode;
use crate::{Error, Result};

/// Scripted reply for [`MockTransport`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Frame(Vec<u8>),
    LinkLost,
    IoError(String),
}

/// Mock transport for unit tests. It records sent frames and returns queued
/// replies in order; an empty queue behaves like a card that never answers.
#[derive(Debug)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub replies: VecDeque<MockReply>,
    pub system_code: SystemCode,
    pub timeout: Option<Duration>,
    pub open: bool,
    /// Testing hook: make the next `open` fail
    pub fail_open: bool,
    /// Testing hook: make `close` report an error (the link still closes)
    pub fail_close: bool,
    pub close_calls: usize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::with_system_code(SystemCode::FELICA_LITE)
    }

    pub fn with_system_code(system_code: SystemCode) -> Self {
        Self {
            sent: Vec::new(),
            replies: VecDeque::new(),
            system_code,
            timeout: None,
            open: false,
            fail_open: false,
            fail_close: false,
            close_calls: 0,
        }
    }

    pub fn push_response(&mut self, frame: Vec<u8>) {
        self.replies.push_back(MockReply::Frame(frame));
    }

    pub fn push_link_lost(&mut self) {
        self.replies.push_back(MockReply::LinkLost);
    }

    pub fn push_io_error(&mut self, msg: &str) {
        self.replies.push_back(MockReply::IoError(msg.to_string()));
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<()> {
        if self.fail_open {
            self.fail_open = false;
            return Err(Error::Transport("open refused".into()));
        }
        self.open = true;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.open = false;
        if self.fail_close {
            return Err(Error::Transport("close failed".into()));
        }
        Ok(())
    }

    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        if !self.open {
            return Err(Error::Transport("not connected".into()));
        }
        self.sent.push(request.to_vec());
        match self.replies.pop_front() {
            Some(MockReply::Frame(frame)) => Ok(frame),
            Some(MockReply::LinkLost) => Err(Error::LinkLost),
            Some(MockReply::IoError(msg)) => Err(Error::Transport(msg)),
            None => Err(Error::Timeout),
        }
    }

    fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }
}

impl NfcF for MockTransport {
    fn system_code(&self) -> SystemCode {
        self.system_code
    }
}
