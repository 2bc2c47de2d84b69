// libntag/src/transport/mock.rs

//! Queue-driven transport for tests.

use std::time::Duration;

use crate::transport::traits::{DEFAULT_MAX_TRANSCEIVE_LEN, Transport};
use crate::types::Uid;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent frames and returns queued
/// replies (or queued errors) in order.
#[derive(Debug)]
pub struct MockTransport {
    /// Frames passed to `transceive`, in order
    pub sent: Vec<Vec<u8>>,
    /// Timeout passed with each entry of `sent`
    pub timeouts: Vec<Duration>,
    /// Replies handed out by `transceive`, front first
    pub responses: Vec<Result<Vec<u8>>>,
    /// Returned by `uid`
    pub uid: Uid,
    /// Set by `connect`, cleared by `close`
    pub connected: bool,
    /// Reported by `max_transceive_length`
    pub max_transceive_len: usize,
    /// Testing hook: error returned by the next `connect`
    pub connect_error: Option<Error>,
    /// Testing hook: error returned by the next `close`
    pub close_error: Option<Error>,
    /// Number of `close` calls, successful or not
    pub closes: usize,
}

impl MockTransport {
    /// Disconnected mock for a tag with `uid` and an empty reply queue.
    pub fn new(uid: Uid) -> Self {
        Self {
            sent: Vec::new(),
            timeouts: Vec::new(),
            responses: Vec::new(),
            uid,
            connected: false,
            max_transceive_len: DEFAULT_MAX_TRANSCEIVE_LEN,
            connect_error: None,
            close_error: None,
            closes: 0,
        }
    }

    /// Queue a reply for the next transceive.
    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(Ok(resp));
    }

    /// Queue a failure for the next transceive.
    pub fn push_error(&mut self, err: Error) {
        self.responses.push(Err(err));
    }
}

impl Transport for MockTransport {
    fn connect(&mut self) -> Result<()> {
        if let Some(err) = self.connect_error.take() {
            return Err(err);
        }
        self.connected = true;
        Ok(())
    }

    fn transceive(&mut self, frame: &[u8], timeout: Duration) -> Result<Vec<u8>> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.sent.push(frame.to_vec());
        self.timeouts.push(timeout);
        if self.responses.is_empty() {
            Err(Error::Timeout)
        } else {
            self.responses.remove(0)
        }
    }

    fn uid(&self) -> Result<Uid> {
        Ok(self.uid.clone())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        self.connected = false;
        match self.close_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn max_transceive_length(&self) -> usize {
        self.max_transceive_len
    }
}
