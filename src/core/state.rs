//! Top-level workflow: Empty -> ImageLoaded -> Enhancing -> Enhanced | Errored.
//!
//! Every state past `Empty` owns the original upload, so an enhancement
//! without an image, or an enhanced image without its original, cannot be
//! expressed. Requests are tagged with a [`Ticket`]; only the outstanding
//! ticket may complete, which keeps at most one enhancement in flight even
//! across a reset.
use tracing::{debug, info, warn};

use super::datauri::DataUri;
use super::intake::UploadedImage;
use super::naming::download_file_name;
use crate::error::{Error, Result};
use crate::types::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// What the enhancement worker needs: a snapshot of the image and the tier.
#[derive(Debug, Clone)]
pub struct EnhancementRequest {
    pub ticket: Ticket,
    pub image: DataUri,
    pub resolution: Resolution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancementResult {
    pub image: DataUri,
    pub resolution: Resolution,
    pub download_name: String,
}

impl EnhancementResult {
    pub fn new(original: &UploadedImage, image: DataUri, resolution: Resolution) -> Self {
        Self {
            download_name: download_file_name(&original.file_name, resolution),
            image,
            resolution,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum UiState {
    #[default]
    Empty,
    ImageLoaded {
        original: UploadedImage,
    },
    Enhancing {
        original: UploadedImage,
        resolution: Resolution,
        ticket: Ticket,
    },
    Enhanced {
        original: UploadedImage,
        result: EnhancementResult,
    },
    Errored {
        original: UploadedImage,
        message: String,
    },
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Empty => "empty",
            UiState::ImageLoaded { .. } => "image loaded",
            UiState::Enhancing { .. } => "enhancing",
            UiState::Enhanced { .. } => "enhanced",
            UiState::Errored { .. } => "errored",
        }
    }

    pub fn original(&self) -> Option<&UploadedImage> {
        match self {
            UiState::Empty => None,
            UiState::ImageLoaded { original }
            | UiState::Enhancing { original, .. }
            | UiState::Enhanced { original, .. }
            | UiState::Errored { original, .. } => Some(original),
        }
    }

    fn into_original(self) -> Option<UploadedImage> {
        match self {
            UiState::Empty => None,
            UiState::ImageLoaded { original }
            | UiState::Enhancing { original, .. }
            | UiState::Enhanced { original, .. }
            | UiState::Errored { original, .. } => Some(original),
        }
    }
}

#[derive(Debug, Default)]
pub struct Workflow {
    state: UiState,
    /// Banner raised by a failed upload; the state itself is left alone.
    upload_error: Option<String>,
    in_flight: Option<Ticket>,
    next_ticket: u64,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn original(&self) -> Option<&UploadedImage> {
        self.state.original()
    }

    pub fn result(&self) -> Option<&EnhancementResult> {
        match &self.state {
            UiState::Enhanced { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The message for the error banner, if any. A rejected upload is the
    /// most recent event, so it shows over an earlier enhancement failure.
    pub fn error(&self) -> Option<&str> {
        if let Some(message) = self.upload_error.as_deref() {
            return Some(message);
        }
        match &self.state {
            UiState::Errored { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_enhancing(&self) -> bool {
        matches!(self.state, UiState::Enhancing { .. })
    }

    /// A request that has not reported back yet, possibly abandoned by a reset.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.in_flight
    }

    /// Whether the selector may start an enhancement right now.
    pub fn can_enhance(&self) -> bool {
        self.in_flight.is_none()
            && matches!(
                self.state,
                UiState::ImageLoaded { .. } | UiState::Enhanced { .. } | UiState::Errored { .. }
            )
    }

    /// A new image was read successfully. Replaces any previous image and
    /// result, and clears the banner.
    pub fn accept_upload(&mut self, image: UploadedImage) -> Result<()> {
        if self.is_enhancing() {
            return Err(Error::InvalidTransition {
                action: "upload an image",
                state: self.state.name(),
            });
        }
        info!("Loaded {} ({})", image.file_name, image.mime_type());
        self.upload_error = None;
        self.state = UiState::ImageLoaded { original: image };
        Ok(())
    }

    /// Reading a new image failed; the current state is kept.
    pub fn reject_upload(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Upload rejected: {}", message);
        self.upload_error = Some(message);
    }

    /// Move to `Enhancing` and hand out the work item. Any previous result or
    /// error is discarded.
    pub fn begin_enhancement(&mut self, resolution: Resolution) -> Result<EnhancementRequest> {
        if self.in_flight.is_some() {
            return Err(Error::EnhancementInFlight);
        }
        if !self.can_enhance() {
            return Err(Error::InvalidTransition {
                action: "start an enhancement",
                state: self.state.name(),
            });
        }

        let original = std::mem::take(&mut self.state)
            .into_original()
            .ok_or(Error::InvalidTransition {
                action: "start an enhancement",
                state: "empty",
            })?;

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.upload_error = None;

        let request = EnhancementRequest {
            ticket,
            image: original.data_uri.clone(),
            resolution,
        };
        debug!("Enhancement {:?} started at {}", ticket, resolution);
        self.state = UiState::Enhancing {
            original,
            resolution,
            ticket,
        };
        Ok(request)
    }

    /// The worker reported back. Returns true if the outcome was applied;
    /// outcomes for abandoned requests are dropped.
    pub fn complete_enhancement(&mut self, ticket: Ticket, outcome: Result<DataUri>) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }

        let current = match &self.state {
            UiState::Enhancing { ticket: t, .. } => *t,
            _ => {
                debug!("Dropping outcome of abandoned enhancement {:?}", ticket);
                return false;
            }
        };
        if current != ticket {
            debug!("Dropping stale outcome {:?}, waiting for {:?}", ticket, current);
            return false;
        }

        let UiState::Enhancing {
            original,
            resolution,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return false;
        };

        self.state = match outcome {
            Ok(image) => {
                let result = EnhancementResult::new(&original, image, resolution);
                info!("Enhanced {} -> {}", original.file_name, result.download_name);
                UiState::Enhanced { original, result }
            }
            Err(e) => {
                let message = format!("Failed to enhance image: {}", e);
                warn!("{}", message);
                UiState::Errored { original, message }
            }
        };
        true
    }

    /// Back to `Empty` from anywhere, dropping image, result and banner.
    /// An outstanding request keeps its ticket so its late outcome is ignored.
    pub fn reset(&mut self) {
        debug!("Reset from {}", self.state.name());
        self.state = UiState::Empty;
        self.upload_error = None;
    }
}
