// libntag/src/transport/pcsc_reader.rs

//! PC/SC reader transport (feature `pcsc`).

use std::ffi::CString;
use std::time::Duration;

use ::pcsc::{Card, Context, Disposition, Protocols, Scope, ShareMode};

use crate::constants::APDU_GET_UID;
use crate::transport::envelope;
use crate::transport::traits::Transport;
use crate::types::Uid;
use crate::{Error, Result};

/// PC/SC transport for PN532-based readers (ACR122U and similar).
pub struct PcscTransport {
    ctx: Context,
    reader: Option<CString>,
    card: Option<Card>,
    uid: Option<Uid>,
}

impl PcscTransport {
    /// Establish a user-scope PC/SC context. The first listed reader is used
    /// unless one is named with [`PcscTransport::with_reader`].
    pub fn new() -> Result<Self> {
        let ctx = Context::establish(Scope::User).map_err(map_pcsc)?;
        Ok(Self {
            ctx,
            reader: None,
            card: None,
            uid: None,
        })
    }

    /// Use the reader called `name` instead of the first one listed.
    pub fn with_reader(mut self, name: &str) -> Result<Self> {
        let name = CString::new(name)
            .map_err(|e| Error::InvalidConfig(format!("reader name: {}", e)))?;
        self.reader = Some(name);
        Ok(self)
    }

    /// Names of the readers currently attached.
    pub fn list_readers(&self) -> Result<Vec<String>> {
        let readers = self.ctx.list_readers_owned().map_err(map_pcsc)?;
        Ok(readers
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect())
    }

    fn transmit(&self, apdu: &[u8]) -> Result<Vec<u8>> {
        let card = self.card.as_ref().ok_or(Error::NotConnected)?;
        let mut buf = [0u8; ::pcsc::MAX_BUFFER_SIZE];
        let resp = card.transmit(apdu, &mut buf).map_err(map_pcsc)?;
        log::trace!(
            "pcsc {} -> {}",
            crate::utils::bytes_to_hex_spaced(apdu),
            crate::utils::bytes_to_hex_spaced(resp)
        );
        Ok(resp.to_vec())
    }
}

impl Transport for PcscTransport {
    fn connect(&mut self) -> Result<()> {
        let reader = match &self.reader {
            Some(r) => r.clone(),
            None => self
                .ctx
                .list_readers_owned()
                .map_err(map_pcsc)?
                .into_iter()
                .next()
                .ok_or_else(|| Error::Io("no pc/sc reader attached".into()))?,
        };
        log::debug!("connecting through reader {:?}", reader);
        let card = self
            .ctx
            .connect(&reader, ShareMode::Shared, Protocols::ANY)
            .map_err(map_pcsc)?;
        self.card = Some(card);

        let resp = self.transmit(&APDU_GET_UID)?;
        let uid = envelope::strip_status_word(&resp)?;
        self.uid = Some(Uid::from_bytes(uid));
        Ok(())
    }

    fn transceive(&mut self, frame: &[u8], _timeout: Duration) -> Result<Vec<u8>> {
        // PC/SC exposes no per-transmit timeout; the reader's own applies.
        let apdu = envelope::wrap_native(frame)?;
        let resp = self.transmit(&apdu)?;
        envelope::unwrap_native(&resp)
    }

    fn uid(&self) -> Result<Uid> {
        self.uid.clone().ok_or(Error::NotConnected)
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn close(&mut self) -> Result<()> {
        self.uid = None;
        match self.card.take() {
            Some(card) => card
                .disconnect(Disposition::LeaveCard)
                .map_err(|(_, e)| map_pcsc(e)),
            None => Ok(()),
        }
    }
}

fn map_pcsc(err: ::pcsc::Error) -> Error {
    use ::pcsc::Error as E;
    match err {
        E::SecurityViolation | E::WrongChv | E::ChvBlocked => Error::Security(err.to_string()),
        E::Timeout => Error::Timeout,
        E::RemovedCard | E::NoSmartcard => Error::TagLost,
        other => Error::Io(other.to_string()),
    }
}
