use corewire_domain::repositories::action_submitter::ActionSubmitter;
use corewire_domain::services::action_codec;
use corewire_domain::value_objects::action::Action;
use corewire_domain::value_objects::encoded_action::TransactionHandle;
use tracing::{info, info_span, warn};

/// Encodes actions and hands them to the execution engine.
pub struct ActionService<'a, S: ActionSubmitter + ?Sized> {
    submitter: &'a S,
}

impl<'a, S: ActionSubmitter + ?Sized> ActionService<'a, S> {
    pub fn new(submitter: &'a S) -> Self {
        Self { submitter }
    }

    /// The handle and any submitter error are returned unchanged.
    pub fn send(&self, action: &Action) -> Result<TransactionHandle, String> {
        let kind = action.kind();
        let _span = info_span!("send_action", kind = kind.as_str(), action_id = kind.id()).entered();

        let encoded = action_codec::encode_action(action);
        match self.submitter.submit(&encoded) {
            Ok(handle) => {
                metrics::counter!("corewire.actions.submitted_total", "kind" => kind.as_str())
                    .increment(1);
                info!(handle = %handle, bytes = encoded.as_bytes().len(), "action submitted");
                Ok(handle)
            }
            Err(err) => {
                metrics::counter!("corewire.actions.errors_total", "kind" => kind.as_str())
                    .increment(1);
                warn!(error = %err, "action submission failed");
                Err(err)
            }
        }
    }
}
