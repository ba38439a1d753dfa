use tracing::{error, info};

use super::{Client, ClientError};
use crate::backend::Backend;
use crate::credentials::{Credential, CredentialError};
use crate::directory::{Protocol, ServiceId};
use crate::state::Action;

impl<B: Backend> Client<B> {
    /// Answer the pending credential prompt for a service.
    ///
    /// `None` skips the prompt. A credential is forwarded to the daemon; if
    /// the daemon rejects it, the cached copy is dropped and the prompt
    /// reopens for re-entry, unless a prompt for another service has taken
    /// its place in the meantime.
    pub async fn submit_credential(
        &self,
        service_id: ServiceId,
        credential: Option<Credential>,
        remember: bool,
    ) -> Result<(), ClientError> {
        if let Some(credential) = &credential {
            self.check_credential(service_id, credential)?;
        }

        self.store.dispatch(Action::ResolveCredential {
            service: service_id,
            credential: credential.clone(),
            remember,
        })?;

        let Some(credential) = credential else {
            info!(event = "core.credentials.prompt_skipped", service_id = %service_id);
            return Ok(());
        };

        info!(
            event = "core.credentials.save_started",
            service_id = %service_id,
            remember = remember,
        );
        if let Err(e) = self
            .backend
            .save_service_credential(service_id, &credential, remember)
            .await
        {
            error!(
                event = "core.credentials.save_failed",
                service_id = %service_id,
                error = %e,
            );
            self.store.dispatch(Action::ForgetCredential {
                service: service_id,
            })?;
            let still_in_view = self.store.read(|s| {
                s.credentials()
                    .prompt()
                    .is_some_and(|prompt| prompt.service == service_id)
            });
            if still_in_view {
                self.store.dispatch(Action::OfferCredential {
                    service: service_id,
                    remember: false,
                    credential: None,
                })?;
            }
            return Err(CredentialError::from(e).into());
        }

        info!(event = "core.credentials.save_completed", service_id = %service_id);
        Ok(())
    }

    /// Dismiss the prompt in view without answering it.
    pub fn dismiss_prompt(&self) -> Result<(), ClientError> {
        self.store.dispatch(Action::ClearCredentialPrompt)?;
        Ok(())
    }

    /// Drop a remembered credential.
    pub fn forget_credential(&self, service_id: ServiceId) -> Result<(), ClientError> {
        self.store.dispatch(Action::ForgetCredential {
            service: service_id,
        })?;
        Ok(())
    }

    fn check_credential(
        &self,
        service_id: ServiceId,
        credential: &Credential,
    ) -> Result<(), CredentialError> {
        if credential.is_empty() {
            return Err(CredentialError::EmptyLogin);
        }

        let expected = self
            .store
            .read(|s| s.directory().service(service_id).map(|svc| svc.protocol));
        match expected {
            // Plain TCP forwards carry no login; any credential is passed through.
            Some(Protocol::Tcp) | None => Ok(()),
            Some(expected) if expected != credential.protocol() => {
                Err(CredentialError::ProtocolMismatch {
                    expected,
                    actual: credential.protocol(),
                })
            }
            Some(_) => Ok(()),
        }
    }
}
