// libntag/src/tag/mock.rs

//! In-memory tag for exercising the reader without a transport.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::constants::PAGE_SIZE;
use crate::tag::traits::TagCapability;
use crate::types::{Pack, Password, Uid};
use crate::{Error, Result};

/// One call observed by a [`MockTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagCall {
    /// `connect`
    Connect,
    /// `authenticate` with these password bytes
    Authenticate(Vec<u8>),
    /// `free_memory_bytes`
    FreeMemoryBytes,
    /// `bounded_read(start, end)`
    BoundedRead(usize, usize),
    /// `uid`
    Uid,
    /// `tag_name`
    TagName,
    /// `close`
    Close,
}

/// Shared record of the calls made on a [`MockTag`]. Clone it before the
/// tag is boxed and handed to the reader, then inspect it afterwards.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<TagCall>>>,
    timeout: Arc<Mutex<Option<Duration>>>,
}

impl CallLog {
    fn push(&self, call: TagCall) {
        self.calls.lock().push(call);
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<TagCall> {
        self.calls.lock().clone()
    }

    /// Number of calls matching `pred`
    pub fn count(&self, pred: impl Fn(&TagCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    /// `(start, end)` of every bounded read, in order
    pub fn reads(&self) -> Vec<(usize, usize)> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                TagCall::BoundedRead(s, e) => Some((*s, *e)),
                _ => None,
            })
            .collect()
    }

    /// Last timeout handed to the tag, if any
    pub fn timeout(&self) -> Option<Duration> {
        *self.timeout.lock()
    }
}

/// Capability-level mock tag backed by an in-memory page image.
#[derive(Debug)]
pub struct MockTag {
    /// Returned by `uid`
    pub uid: Uid,
    /// Returned by `tag_name`
    pub name: String,
    /// Page image served by `bounded_read`
    pub memory: Vec<u8>,
    /// Returned by a successful `authenticate`
    pub pack: Pack,
    /// Reported by `free_memory_bytes`; defaults to `memory.len()`
    pub free_memory: usize,
    /// Largest window accepted by `bounded_read`; unbounded by default
    pub max_pages_per_transfer: usize,
    /// Failure for the next `connect`
    pub connect_error: Option<Error>,
    /// Failure for the next `authenticate`
    pub auth_error: Option<Error>,
    /// Failure for the next `free_memory_bytes`
    pub free_memory_error: Option<Error>,
    /// Fail the n-th bounded read (0-based) with the given error
    pub read_error: Option<(usize, Error)>,
    /// Failure for every `uid` call
    pub uid_error: Option<Error>,
    /// Failure for the next `close`
    pub close_error: Option<Error>,
    log: CallLog,
    reads_done: usize,
}

impl MockTag {
    /// Healthy tag serving `memory`, with all of it reported free.
    pub fn new(uid: Uid, name: &str, memory: Vec<u8>) -> Self {
        let free_memory = memory.len();
        Self {
            uid,
            name: name.to_string(),
            memory,
            pack: Pack::from_bytes([0x80, 0x80]),
            free_memory,
            max_pages_per_transfer: usize::MAX,
            connect_error: None,
            auth_error: None,
            free_memory_error: None,
            read_error: None,
            uid_error: None,
            close_error: None,
            log: CallLog::default(),
            reads_done: 0,
        }
    }

    /// Handle on the call record; stays valid after the tag is boxed.
    pub fn call_log(&self) -> CallLog {
        self.log.clone()
    }

    /// Refuse windows larger than `max` pages.
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages_per_transfer = max;
        self
    }

    /// Fail the `index`-th bounded read with `err`.
    pub fn fail_read(mut self, index: usize, err: Error) -> Self {
        self.read_error = Some((index, err));
        self
    }

    /// Fail authentication with `err`.
    pub fn fail_auth(mut self, err: Error) -> Self {
        self.auth_error = Some(err);
        self
    }

    /// Fail connect with `err`.
    pub fn fail_connect(mut self, err: Error) -> Self {
        self.connect_error = Some(err);
        self
    }

    /// Fail close with `err`.
    pub fn fail_close(mut self, err: Error) -> Self {
        self.close_error = Some(err);
        self
    }

    /// Fail the free memory query with `err`.
    pub fn fail_free_memory(mut self, err: Error) -> Self {
        self.free_memory_error = Some(err);
        self
    }

    /// Fail every UID query with `err`.
    pub fn fail_uid(mut self, err: Error) -> Self {
        self.uid_error = Some(err);
        self
    }
}

impl TagCapability for MockTag {
    fn connect(&mut self) -> Result<()> {
        self.log.push(TagCall::Connect);
        match self.connect_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn authenticate(&mut self, password: &Password) -> Result<Pack> {
        self.log
            .push(TagCall::Authenticate(password.as_bytes().to_vec()));
        match self.auth_error.take() {
            Some(err) => Err(err),
            None => Ok(self.pack),
        }
    }

    fn free_memory_bytes(&mut self) -> Result<usize> {
        self.log.push(TagCall::FreeMemoryBytes);
        match self.free_memory_error.take() {
            Some(err) => Err(err),
            None => Ok(self.free_memory),
        }
    }

    fn bounded_read(&mut self, start: usize, end: usize) -> Result<Vec<u8>> {
        self.log.push(TagCall::BoundedRead(start, end));
        let index = self.reads_done;
        self.reads_done += 1;
        if self.read_error.as_ref().is_some_and(|(n, _)| *n == index) {
            if let Some((_, err)) = self.read_error.take() {
                return Err(err);
            }
        }
        if end < start {
            return Err(Error::InvalidWindow { start, end });
        }
        let pages = end - start + 1;
        if pages > self.max_pages_per_transfer {
            return Err(Error::WindowTooLarge {
                pages,
                max: self.max_pages_per_transfer,
            });
        }
        let from = start * PAGE_SIZE;
        let to = (end + 1) * PAGE_SIZE;
        self.memory
            .get(from..to)
            .map(|s| s.to_vec())
            .ok_or(Error::InvalidWindow { start, end })
    }

    fn uid(&self) -> Result<Uid> {
        self.log.push(TagCall::Uid);
        match &self.uid_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.uid.clone()),
        }
    }

    fn tag_name(&self) -> String {
        self.log.push(TagCall::TagName);
        self.name.clone()
    }

    fn close(&mut self) -> Result<()> {
        self.log.push(TagCall::Close);
        match self.close_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn max_pages_per_transfer(&self) -> usize {
        self.max_pages_per_transfer
    }

    fn set_transceive_timeout(&mut self, timeout: Duration) {
        *self.log.timeout.lock() = Some(timeout);
    }
}
