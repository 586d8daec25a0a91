use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pictura_imagegen::{ErrorKind, GeneratedImage, GenerationRequest, ImageGenerator, data_uri::DataUriError};
use serde::Serialize;

use crate::{
    download::Download,
    error::{SubmitRejection, user_message},
    phase::{Phase, View},
};

/// Outcome of the most recent attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success { image: GeneratedImage, prompt: String },
    Failure { kind: ErrorKind, message: &'static str },
}

#[derive(Debug, Default)]
struct SessionState {
    phase: Phase,
    current_prompt: Option<String>,
    current_result: Option<GenerationResult>,
}

/// Everything the page needs to render the current state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub view: View,
    pub prompt: Option<String>,
    pub error: Option<String>,
    /// `data:` URI of the generated image
    pub image: Option<String>,
}

/// A single UI session driving one generation attempt at a time
///
/// The state lock is only held for synchronous transitions, never across
/// the provider call.
pub struct Session {
    generator: Arc<dyn ImageGenerator>,
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self {
            generator,
            state: Mutex::new(SessionState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    /// Result of the last resolved attempt, if one is current
    pub fn result(&self) -> Option<GenerationResult> {
        self.state().current_result.clone()
    }

    /// Render-ready view of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();

        let (prompt, error, image) = match (state.phase, &state.current_result) {
            (Phase::Succeeded, Some(GenerationResult::Success { image, prompt })) => {
                (Some(prompt.clone()), None, Some(image.data_uri().to_string()))
            }
            (Phase::Failed, Some(GenerationResult::Failure { message, .. })) => {
                (state.current_prompt.clone(), Some((*message).to_string()), None)
            }
            _ => (state.current_prompt.clone(), None, None),
        };

        SessionSnapshot {
            phase: state.phase,
            view: state.phase.view(),
            prompt,
            error,
            image,
        }
    }

    /// Start an attempt, moving the session to [`Phase::InFlight`]
    ///
    /// The transition happens before this returns; the provider is only
    /// called once the returned [`Attempt`] is run. Blank input and a
    /// second submission while one is outstanding leave the state untouched.
    pub fn begin(self: &Arc<Self>, prompt: &str, credential: &str) -> Result<Attempt, SubmitRejection> {
        if prompt.trim().is_empty() {
            return Err(SubmitRejection::BlankPrompt);
        }

        if credential.trim().is_empty() {
            return Err(SubmitRejection::BlankCredential);
        }

        {
            let mut state = self.state();

            if state.phase.is_in_flight() {
                tracing::debug!("submission ignored, generation already in flight");
                return Err(SubmitRejection::InFlight);
            }

            state.phase = Phase::InFlight;
            state.current_prompt = Some(prompt.to_string());
            state.current_result = None;
        }

        tracing::info!(prompt_len = prompt.len(), "image generation started");

        Ok(Attempt {
            session: Arc::clone(self),
            request: GenerationRequest::new(prompt, credential),
            resolved: false,
        })
    }

    /// Begin an attempt and wait for it to resolve
    pub async fn submit(self: &Arc<Self>, prompt: &str, credential: &str) -> Result<SessionSnapshot, SubmitRejection> {
        let attempt = self.begin(prompt, credential)?;
        attempt.run().await;
        Ok(self.snapshot())
    }

    /// The current image as a downloadable file, stamped with the current time
    pub fn download(&self) -> Result<Option<Download>, DataUriError> {
        self.download_at(jiff::Timestamp::now().as_millisecond())
    }

    /// The current image as a downloadable file stamped with `timestamp_ms`
    ///
    /// `None` unless the session is [`Phase::Succeeded`].
    pub fn download_at(&self, timestamp_ms: i64) -> Result<Option<Download>, DataUriError> {
        let state = self.state();

        match (state.phase, &state.current_result) {
            (Phase::Succeeded, Some(GenerationResult::Success { image, .. })) => {
                Download::from_image(image, timestamp_ms).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn resolve(&self, prompt: &str, outcome: pictura_imagegen::Result<GeneratedImage>) -> Phase {
        let result = match outcome {
            Ok(image) => {
                tracing::info!(bytes = image.byte_len(), "image generation succeeded");
                GenerationResult::Success {
                    image,
                    prompt: prompt.to_string(),
                }
            }
            Err(e) => {
                let kind = e.kind();
                tracing::error!(error = %e, kind = ?kind, "image generation failed");
                GenerationResult::Failure {
                    kind,
                    message: user_message(kind),
                }
            }
        };

        self.store(result)
    }

    fn store(&self, result: GenerationResult) -> Phase {
        let mut state = self.state();

        state.phase = match result {
            GenerationResult::Success { .. } => Phase::Succeeded,
            GenerationResult::Failure { .. } => Phase::Failed,
        };
        state.current_result = Some(result);

        state.phase
    }
}

/// An in-flight generation attempt
///
/// Dropping an attempt before it resolves, including by a panic in the
/// provider, records a generic failure so the session never stays in flight.
/// Requires the default unwinding panic strategy.
pub struct Attempt {
    session: Arc<Session>,
    request: GenerationRequest,
    resolved: bool,
}

impl std::fmt::Debug for Attempt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attempt")
            .field("prompt", &self.request.prompt)
            .field("resolved", &self.resolved)
            .finish_non_exhaustive()
    }
}

impl Attempt {
    pub fn prompt(&self) -> &str {
        &self.request.prompt
    }

    /// Call the provider and record the outcome
    pub async fn run(mut self) -> Phase {
        let outcome = self.session.generator.generate_image(&self.request).await;
        let phase = self.session.resolve(&self.request.prompt, outcome);
        self.resolved = true;
        phase
    }
}

impl Drop for Attempt {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }

        tracing::warn!("image generation abandoned before resolving");

        self.session.store(GenerationResult::Failure {
            kind: ErrorKind::GenerationFailed,
            message: user_message(ErrorKind::GenerationFailed),
        });
    }
}
