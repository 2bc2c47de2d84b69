// libntag/src/tag/ntag.rs

//! NTAG21x over a raw [`Transport`](crate::transport::Transport).

use std::time::Duration;

use crate::constants::{PAGE_SIZE, PASSWORD_LEN};
use crate::tag::commands::{self, Command, Version};
use crate::tag::traits::TagCapability;
use crate::transport::Transport;
use crate::types::{Pack, Password, TagFamily, Uid};
use crate::utils::default_transceive_timeout;
use crate::{Error, Result};

/// NTAG210/212/213/215/216 (and the F variants) over any [`Transport`].
///
/// The family is identified with GET_VERSION during `connect`; user memory
/// size follows from it. Reads use FAST_READ and refuse windows larger
/// than the per-transfer bound.
pub struct Ntag21x<T: Transport> {
    transport: T,
    family: Option<TagFamily>,
    max_pages_per_transfer: usize,
    timeout: Duration,
}

impl<T: Transport> Ntag21x<T> {
    /// Tag over `transport` accepting windows of at most
    /// `max_pages_per_transfer` pages. The link may lower that bound
    /// further; see [`TagCapability::max_pages_per_transfer`].
    pub fn new(transport: T, max_pages_per_transfer: usize) -> Self {
        Self {
            transport,
            family: None,
            max_pages_per_transfer,
            timeout: default_transceive_timeout(),
        }
    }

    /// Family identified at connect, if connected.
    pub fn family(&self) -> Option<TagFamily> {
        self.family
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn execute(&mut self, cmd: &Command) -> Result<Vec<u8>> {
        if !self.transport.is_connected() {
            return Err(Error::NotConnected);
        }
        let frame = cmd.encode();
        let resp = self.transport.transceive(&frame, self.timeout)?;
        log::trace!(
            "ntag {} -> {}",
            crate::utils::bytes_to_hex_spaced(&frame),
            crate::utils::dump_bytes(&resp, 16)
        );
        Ok(resp)
    }
}

impl<T: Transport> TagCapability for Ntag21x<T> {
    /// Open the link and identify the tag with GET_VERSION.
    ///
    /// A tag that answers but is not an NXP NTAG21x fails here with
    /// [`Error::UnsupportedTag`], so it is reported as unsupported after
    /// the link was opened rather than at discovery.
    fn connect(&mut self) -> Result<()> {
        self.transport.connect()?;
        let cmd = Command::GetVersion;
        let resp = self.execute(&cmd)?;
        commands::check_reply(&cmd, &resp)?;
        let family = Version::parse(&resp)?.family()?;
        log::debug!("identified {}", family);
        self.family = Some(family);
        Ok(())
    }

    fn authenticate(&mut self, password: &Password) -> Result<Pack> {
        let bytes: [u8; PASSWORD_LEN] =
            password
                .as_bytes()
                .try_into()
                .map_err(|_| Error::InvalidPassword {
                    len: password.len(),
                })?;
        let cmd = Command::PwdAuth { password: bytes };
        let resp = self.execute(&cmd)?;
        if commands::is_nak(&resp) {
            return Err(Error::AuthenticationRejected { nak: resp[0] });
        }
        commands::check_reply(&cmd, &resp)?;
        Pack::try_from(resp.as_slice())
    }

    fn free_memory_bytes(&mut self) -> Result<usize> {
        self.family
            .and_then(|f| f.user_memory_bytes())
            .ok_or(Error::NotConnected)
    }

    fn bounded_read(&mut self, start: usize, end: usize) -> Result<Vec<u8>> {
        if end < start || end > u8::MAX as usize {
            return Err(Error::InvalidWindow { start, end });
        }
        let pages = end - start + 1;
        let max = self.max_pages_per_transfer();
        if pages > max {
            return Err(Error::WindowTooLarge { pages, max });
        }
        let cmd = Command::FastRead {
            start: start as u8,
            end: end as u8,
        };
        let resp = self.execute(&cmd)?;
        commands::check_reply(&cmd, &resp)?;
        Ok(resp)
    }

    fn uid(&self) -> Result<Uid> {
        self.transport.uid()
    }

    fn tag_name(&self) -> String {
        match self.family {
            Some(f) => f.to_string(),
            None => "NTAG21x".to_string(),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.transport.close()
    }

    /// The configured bound, capped by what one transceive can carry.
    fn max_pages_per_transfer(&self) -> usize {
        self.max_pages_per_transfer
            .min(self.transport.max_transceive_length() / PAGE_SIZE)
    }

    fn set_transceive_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }
}
