//! Garden visualizer session: one prompt, one result slot.

use std::sync::Arc;

use async_trait::async_trait;
use evergreen_common::{Notification, NotificationQueue};
use tracing::info;

use crate::prompts::visual_prompt;
use crate::{GeneratedImage, GenerationClient, GenerationError};

use super::flight::{FlightPolicy, FlightSession};
use super::types::SubmitOutcome;

/// Alert raised when a generation fails.
pub const VISUALIZATION_FAILED_ALERT: &str =
    "Failed to generate garden visualization. Please try again.";

/// Notice raised when a generation succeeds without producing an image.
pub const NO_DESIGN_NOTICE: &str = "No design generated.";

/// Visualizer state: the latest prompt and the latest completed image.
#[derive(Debug, Default)]
pub struct Canvas {
    prompt: String,
    result: Option<String>,
    notifications: NotificationQueue,
}

impl Canvas {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }
}

#[async_trait]
impl FlightPolicy for Canvas {
    type Request = String;
    type Reply = Option<GeneratedImage>;

    const KIND: &'static str = "visualize";

    fn issue(&mut self, input: &str) -> String {
        self.prompt = input.to_string();
        // Cleared now, not on completion, so a stale image never shows while pending.
        self.result = None;
        visual_prompt(input)
    }

    async fn dispatch(
        client: &dyn GenerationClient,
        request: String,
    ) -> Result<Option<GeneratedImage>, GenerationError> {
        client.generate_image(&request).await
    }

    fn settle(&mut self, result: Result<Option<GeneratedImage>, GenerationError>) {
        match result {
            Ok(Some(image)) => self.result = Some(image.to_reference()),
            Ok(None) => {
                info!("backend returned no image");
                self.notifications.push(Notification::info(NO_DESIGN_NOTICE));
            }
            Err(_) => self
                .notifications
                .push(Notification::error(VISUALIZATION_FAILED_ALERT)),
        }
    }
}

/// Single-slot garden image generation.
pub type VisualizationSession = FlightSession<Canvas>;

impl FlightSession<Canvas> {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_policy(client, Canvas::default())
    }

    /// The last prompt supplied, whether typed or picked from a preset.
    pub fn prompt(&self) -> String {
        self.read(|c| c.prompt.clone())
    }

    /// Edit the prompt without generating.
    pub fn set_prompt(&self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        self.update(|c| c.prompt = prompt);
    }

    /// Generate from the current prompt.
    pub async fn generate(&self) -> SubmitOutcome {
        let prompt = self.prompt();
        self.submit(&prompt).await
    }

    /// Reference to the most recently completed image, if any.
    pub fn result(&self) -> Option<String> {
        self.read(|c| c.result.clone())
    }

    /// Take pending alerts for display. They are not kept afterwards.
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.update(|c| c.notifications.drain())
    }
}
