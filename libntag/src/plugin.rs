// libntag/src/plugin.rs

//! Application-facing plugin: lifecycle hooks, the `execute` action entry
//! point, and per-tap worker dispatch.

use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;

use crate::classify;
use crate::config::{ReaderConfig, SharedConfig};
use crate::constants::{ACTION_INIT, ACTION_WRITE_TAG};
use crate::outcome::{FailureMessage, OutcomeSink, ReadOutcome};
use crate::reader::TagReader;
use crate::tag::TagHandle;
use crate::types::TagFamily;
use crate::{Error, Result};

/// The platform radio stack: registration and foreground tag dispatch.
pub trait RadioStack: Send + Sync {
    /// Attach to the hosting activity. Called once at plugin start.
    fn register(&self) -> Result<()>;

    /// Start delivering tag discoveries to the plugin.
    fn start_dispatch(&self) -> Result<()>;

    /// Stop delivering tag discoveries.
    fn stop_dispatch(&self) -> Result<()>;
}

/// What discovery hands over for one tap.
pub enum DetectedTag {
    /// A family the reader handles, with its handle
    Supported {
        /// Family reported by discovery
        family: TagFamily,
        /// Handle to read through
        handle: TagHandle,
    },
    /// Any other family; the handle has already been dropped
    Unsupported(TagFamily),
}

impl DetectedTag {
    /// Route a discovered tag by family. Unsupported families drop the
    /// handle without touching it.
    pub fn new(family: TagFamily, handle: TagHandle) -> Self {
        if family.is_supported() {
            DetectedTag::Supported { family, handle }
        } else {
            DetectedTag::Unsupported(family)
        }
    }

    /// Family reported by discovery
    pub fn family(&self) -> TagFamily {
        match self {
            DetectedTag::Supported { family, .. } => *family,
            DetectedTag::Unsupported(family) => *family,
        }
    }
}

impl std::fmt::Debug for DetectedTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectedTag::Supported { family, .. } => write!(f, "Supported({})", family),
            DetectedTag::Unsupported(family) => write!(f, "Unsupported({})", family),
        }
    }
}

/// Produce the outcome for one tap. Supported tags go through `reader`;
/// unsupported ones are answered directly.
pub fn process_detected(reader: &TagReader, detected: DetectedTag) -> ReadOutcome {
    match detected {
        DetectedTag::Supported { family, handle } => {
            log::info!("found {} tag", family);
            reader.read(handle)
        }
        DetectedTag::Unsupported(family) => {
            log::info!("rejecting unsupported {} tag", family);
            ReadOutcome::Failure(classify::unsupported(family))
        }
    }
}

/// Reply to an `execute` call. Each call gets exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginResult {
    /// Success with a reply string
    Ok(String),
    /// Failure, classified like a read failure
    Error(FailureMessage),
    /// The action name is not known
    InvalidAction(String),
}

impl PluginResult {
    fn from_error(err: &Error) -> Self {
        PluginResult::Error(FailureMessage::from(&classify::classify(err, false)))
    }
}

/// Ties the radio stack, the session configuration and the outcome sink
/// together.
pub struct TagPlugin<R: RadioStack> {
    radio: R,
    config: SharedConfig,
    sink: Arc<dyn OutcomeSink>,
}

impl<R: RadioStack> TagPlugin<R> {
    /// Plugin over `radio`, emitting outcomes to `sink`, with the default
    /// configuration until `init` replaces it.
    pub fn new(radio: R, sink: Arc<dyn OutcomeSink>) -> Self {
        Self {
            radio,
            config: SharedConfig::default(),
            sink,
        }
    }

    /// Session configuration
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// The radio stack this plugin drives
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Plugin start: register with the radio stack.
    pub fn initialize(&self) -> Result<()> {
        self.radio.register()?;
        log::info!("tag plugin initialized");
        Ok(())
    }

    /// Foreground again: (re)start tag dispatch.
    pub fn on_resume(&self) -> Result<()> {
        log::info!("resume");
        self.radio.start_dispatch()
    }

    /// Dispatch keeps running while paused; background scanning is not
    /// supported by the radio stack.
    pub fn on_pause(&self) {
        log::info!("pause");
    }

    /// Plugin teardown: stop tag dispatch.
    pub fn on_destroy(&self) -> Result<()> {
        log::info!("destroy");
        self.radio.stop_dispatch()
    }

    /// Entry point for application calls. `args` is the JSON argument
    /// array.
    pub fn execute(&self, action: &str, args: &serde_json::Value) -> PluginResult {
        log::debug!("execute {}", action);
        match action {
            ACTION_INIT => match self.init(args) {
                Ok(()) => PluginResult::Ok("OK".to_string()),
                Err(e) => {
                    log::warn!("init failed: {}", e);
                    PluginResult::from_error(&e)
                }
            },
            ACTION_WRITE_TAG => self.write_tag(args),
            other => PluginResult::InvalidAction(other.to_string()),
        }
    }

    fn init(&self, args: &serde_json::Value) -> Result<()> {
        // Start dispatch here; the first resume is not delivered on launch.
        self.radio.start_dispatch()?;
        let options = args
            .get(0)
            .filter(|o| o.is_object())
            .ok_or_else(|| Error::InvalidConfig("options not JSON object".into()))?;
        self.config.replace(ReaderConfig::from_json(options)?)
    }

    /// Writing is reserved; it always fails once with "not implemented".
    pub fn write_tag(&self, _data: &serde_json::Value) -> PluginResult {
        PluginResult::from_error(&Error::NotImplemented(ACTION_WRITE_TAG.into()))
    }

    /// Handle one tap on a dedicated worker thread. The configuration is
    /// captured now; later `init` calls affect only later taps.
    ///
    /// If the worker cannot be started, the tap is read and its outcome
    /// emitted on the calling thread; the spawn failure is still returned.
    pub fn on_tag_detected(&self, detected: DetectedTag) -> Result<JoinHandle<ReadOutcome>> {
        self.dispatch(detected, |worker| {
            std::thread::Builder::new()
                .name("ntag-read".into())
                .spawn(worker)
        })
    }

    /// [`TagPlugin::on_tag_detected`] on the tokio blocking pool. Must be
    /// called from within a runtime.
    #[cfg(feature = "async")]
    pub fn on_tag_detected_async(
        &self,
        detected: DetectedTag,
    ) -> tokio::task::JoinHandle<ReadOutcome> {
        let job = self.job(detected);
        tokio::task::spawn_blocking(move || job.run())
    }

    fn job(&self, detected: DetectedTag) -> ReadJob {
        ReadJob {
            reader: TagReader::new(self.config.snapshot()),
            detected,
            sink: Arc::clone(&self.sink),
        }
    }

    /// Start a worker with `spawn` and hand it the job once it is running,
    /// so a worker that never starts leaves the job with the caller.
    fn dispatch<S>(&self, detected: DetectedTag, spawn: S) -> Result<JoinHandle<ReadOutcome>>
    where
        S: FnOnce(Worker) -> std::io::Result<JoinHandle<ReadOutcome>>,
    {
        let job = self.job(detected);
        let (tx, rx) = mpsc::channel::<ReadJob>();
        let worker: Worker = Box::new(move || match rx.recv() {
            Ok(job) => job.run(),
            Err(_) => ReadOutcome::Failure(classify::classify(
                &Error::Io("read job never delivered".into()),
                false,
            )),
        });

        match spawn(worker) {
            Ok(handle) => {
                if let Err(mpsc::SendError(job)) = tx.send(job) {
                    log::warn!("read worker exited early; reading on the calling thread");
                    job.run();
                }
                Ok(handle)
            }
            Err(e) => {
                log::warn!("read worker not started ({}); reading on the calling thread", e);
                job.run();
                Err(Error::Io(format!("spawning read worker: {}", e)))
            }
        }
    }
}

type Worker = Box<dyn FnOnce() -> ReadOutcome + Send + 'static>;

/// Everything one tap needs, movable to whichever thread runs it.
struct ReadJob {
    reader: TagReader,
    detected: DetectedTag,
    sink: Arc<dyn OutcomeSink>,
}

impl ReadJob {
    fn run(self) -> ReadOutcome {
        let outcome = process_detected(&self.reader, self.detected);
        self.sink.emit(&outcome);
        outcome
    }
}
