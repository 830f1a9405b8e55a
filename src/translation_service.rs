use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::TranslationOutcome;
use crate::llm::Llm;
use crate::translation::{TranslationRequest, Translator};
use crate::tui::events::AppEvent;

/// Identifies one dispatched translation.
pub type RequestId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResponse {
    pub id: RequestId,
    pub result: Result<TranslationOutcome, String>,
}

/// Runs translations in the background and reports back through the event queue.
pub struct TranslationService<L: Llm + 'static> {
    translator: Arc<Translator<L>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl<L: Llm + 'static> TranslationService<L> {
    pub fn new(translator: Translator<L>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            translator: Arc::new(translator),
            event_tx,
        }
    }

    /// Spawn the request; exactly one `TranslationFinished` event follows.
    pub fn dispatch(&self, request: TranslationRequest) -> RequestId {
        let id = Uuid::new_v4();
        let translator = Arc::clone(&self.translator);
        let event_tx = self.event_tx.clone();

        info!(
            "Dispatching translation {id} ({} -> {})",
            request.source_language, request.target_language
        );

        tokio::spawn(async move {
            let result = match translator.translate(&request).await {
                Ok(outcome) => {
                    debug!("Translation {id} finished");
                    Ok(outcome)
                }
                Err(e) => {
                    warn!("Translation {id} failed at {} stage: {e}", e.stage());
                    Err(e.to_string())
                }
            };

            if let Err(e) = event_tx.send(AppEvent::TranslationFinished(TranslationResponse {
                id,
                result,
            })) {
                warn!("Failed to deliver translation {id}: {e}");
            }
        });

        id
    }
}
