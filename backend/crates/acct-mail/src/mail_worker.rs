use crate::{EmailSender, MailError, MailTask, OutgoingEmail, Result as MailErrorResult};

use acct_auth::{ActionCodeSettings, IdentityProvider};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{error, info};
use tokio::sync::mpsc::Receiver;

/// Consumes the mail queue: asks the provider for an action link, renders
/// the message and hands it to the sender. One attempt per task.
pub struct MailWorker {
    provider: Arc<dyn IdentityProvider>,
    sender: Arc<dyn EmailSender>,
    settings: ActionCodeSettings,
    team_name: String,
}

impl MailWorker {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        sender: Arc<dyn EmailSender>,
        settings: ActionCodeSettings,
        team_name: &str,
    ) -> Self {
        Self {
            provider,
            sender,
            settings,
            team_name: team_name.to_string(),
        }
    }

    /// Run until every [`crate::TaskQueue`] handle has been dropped
    pub async fn run(self, mut receiver: Receiver<MailTask>) {
        info!("Mail worker started");

        while let Some(task) = receiver.recv().await {
            if let Err(e) = self.process(&task).await {
                error!("Mail task {} failed: {}", task, e);
            }
        }

        info!("Mail worker stopped");
    }

    pub async fn process(&self, task: &MailTask) -> MailErrorResult<()> {
        let email = self.render(task).await?;

        let sender = Arc::clone(&self.sender);
        tokio::task::spawn_blocking(move || sender.send(&email))
            .await
            .map_err(|e| MailError::Transport {
                message: format!("Send task panicked: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })??;

        info!("Mail task {} delivered", task);
        Ok(())
    }

    async fn render(&self, task: &MailTask) -> MailErrorResult<OutgoingEmail> {
        let email = task.email();
        let link = match task {
            MailTask::VerifyEmail { .. } => {
                self.provider
                    .generate_email_verification_link(email, &self.settings)
                    .await
            }
            MailTask::ResetPassword { .. } => {
                self.provider
                    .generate_password_reset_link(email, &self.settings)
                    .await
            }
        }
        .map_err(|source| MailError::Link {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let build = match task {
            MailTask::VerifyEmail { .. } => OutgoingEmail::verification,
            MailTask::ResetPassword { .. } => OutgoingEmail::password_reset,
        };
        Ok(build(email, task.display_name(), &link, &self.team_name))
    }
}
