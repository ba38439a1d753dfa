use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::errors::CredentialError;
use super::types::Credential;
use crate::directory::ServiceId;

/// Where a service's credential prompt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPhase {
    /// No prompt for this service is in view.
    Idle,
    /// The user must supply a credential (or skip).
    PromptPending,
    /// A credential (possibly none, meaning "skip") has been supplied.
    Resolved,
}

/// The single prompt currently in view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialPrompt {
    pub service: ServiceId,
    pub remember: bool,
    pub credential: Option<Credential>,
    pub phase: PromptPhase,
}

/// Credential prompt state machine and session credential cache.
///
/// Only one prompt is in view at a time; a prompt for another service
/// replaces it outright. Cached credentials take precedence over prompting.
#[derive(Debug, Clone, Default)]
pub struct CredentialFlow {
    prompt: Option<CredentialPrompt>,
    cache: HashMap<ServiceId, Credential>,
}

impl CredentialFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backend asked for credentials for a service.
    ///
    /// With a cached credential the prompt is shown already resolved and
    /// prefilled; otherwise it is pending with nothing filled in.
    pub fn request_prompt(&mut self, service: ServiceId) -> PromptPhase {
        let prompt = match self.cache.get(&service) {
            Some(cached) => CredentialPrompt {
                service,
                remember: true,
                credential: Some(cached.clone()),
                phase: PromptPhase::Resolved,
            },
            None => CredentialPrompt {
                service,
                remember: false,
                credential: None,
                phase: PromptPhase::PromptPending,
            },
        };
        let phase = prompt.phase;
        self.show(prompt);
        phase
    }

    /// The backend offered a credential for display.
    ///
    /// `None` is an explicit re-prompt and ignores the cache. A credential
    /// is cached when `remember` is set.
    pub fn offer(&mut self, service: ServiceId, remember: bool, credential: Option<Credential>) {
        let phase = if credential.is_some() {
            PromptPhase::Resolved
        } else {
            PromptPhase::PromptPending
        };

        if remember && let Some(credential) = &credential {
            self.cache.insert(service, credential.clone());
        }

        self.show(CredentialPrompt {
            service,
            remember,
            credential,
            phase,
        });
    }

    /// Supply the answer to the pending prompt.
    ///
    /// `remember` caches the credential for the session; without it the
    /// credential is used once and any stale cached entry is evicted.
    ///
    /// # Errors
    /// Returns `CredentialError::NoPendingPrompt` unless the prompt in view
    /// belongs to `service` and is pending.
    pub fn resolve(
        &mut self,
        service: ServiceId,
        credential: Option<Credential>,
        remember: bool,
    ) -> Result<Option<Credential>, CredentialError> {
        let prompt = self
            .prompt
            .as_mut()
            .filter(|p| p.service == service && p.phase == PromptPhase::PromptPending)
            .ok_or(CredentialError::NoPendingPrompt { service })?;

        prompt.phase = PromptPhase::Resolved;
        prompt.remember = remember;
        prompt.credential = credential.clone();

        match (&credential, remember) {
            (Some(credential), true) => {
                self.cache.insert(service, credential.clone());
            }
            _ => {
                self.cache.remove(&service);
            }
        }

        debug!(
            event = "core.credentials.prompt_resolved",
            service = %service,
            remember = remember,
            skipped = credential.is_none(),
        );
        Ok(credential)
    }

    /// Dismiss the prompt in view without resolving it.
    pub fn clear_prompt(&mut self) -> Option<CredentialPrompt> {
        self.prompt.take()
    }

    /// Drop a cached credential. Returns `true` if one was cached.
    pub fn forget(&mut self, service: ServiceId) -> bool {
        self.cache.remove(&service).is_some()
    }

    pub fn prompt(&self) -> Option<&CredentialPrompt> {
        self.prompt.as_ref()
    }

    pub fn phase(&self, service: ServiceId) -> PromptPhase {
        self.prompt
            .as_ref()
            .filter(|p| p.service == service)
            .map_or(PromptPhase::Idle, |p| p.phase)
    }

    pub fn cached(&self, service: ServiceId) -> Option<&Credential> {
        self.cache.get(&service)
    }

    fn show(&mut self, prompt: CredentialPrompt) {
        if let Some(previous) = &self.prompt
            && previous.service != prompt.service
        {
            debug!(
                event = "core.credentials.prompt_replaced",
                previous = %previous.service,
                next = %prompt.service,
            );
        }
        self.prompt = Some(prompt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssh(login: &str) -> Credential {
        Credential::SshUserPassword {
            login: login.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_prompt_without_cache_is_pending() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        assert_eq!(flow.phase(service), PromptPhase::Idle);
        assert_eq!(flow.request_prompt(service), PromptPhase::PromptPending);
        assert_eq!(flow.phase(service), PromptPhase::PromptPending);
    }

    #[test]
    fn test_remembered_credential_satisfies_next_prompt() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();

        flow.request_prompt(service);
        flow.resolve(service, Some(ssh("deploy")), true).unwrap();
        assert_eq!(flow.cached(service).map(Credential::login), Some("deploy"));

        flow.clear_prompt();
        assert_eq!(flow.request_prompt(service), PromptPhase::Resolved);
        let prompt = flow.prompt().unwrap();
        assert_eq!(prompt.credential.as_ref().map(Credential::login), Some("deploy"));
    }

    #[test]
    fn test_unremembered_credential_is_used_once() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();

        flow.request_prompt(service);
        let used = flow.resolve(service, Some(ssh("ops")), false).unwrap();
        assert_eq!(used.as_ref().map(Credential::login), Some("ops"));
        assert!(flow.cached(service).is_none());

        assert_eq!(flow.request_prompt(service), PromptPhase::PromptPending);
    }

    #[test]
    fn test_skip_resolves_without_caching() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        flow.request_prompt(service);
        assert_eq!(flow.resolve(service, None, true).unwrap(), None);
        assert_eq!(flow.phase(service), PromptPhase::Resolved);
        assert!(flow.cached(service).is_none());
    }

    #[test]
    fn test_resolve_without_pending_prompt_fails() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        let result = flow.resolve(service, Some(ssh("x")), true);
        assert!(matches!(result, Err(CredentialError::NoPendingPrompt { .. })));

        flow.request_prompt(service);
        flow.resolve(service, None, false).unwrap();
        assert!(flow.resolve(service, None, false).is_err());
    }

    #[test]
    fn test_new_prompt_replaces_previous() {
        let mut flow = CredentialFlow::new();
        let first = ServiceId::new_v4();
        let second = ServiceId::new_v4();

        flow.request_prompt(first);
        flow.request_prompt(second);

        assert_eq!(flow.phase(first), PromptPhase::Idle);
        assert_eq!(flow.phase(second), PromptPhase::PromptPending);
        assert!(flow.resolve(first, None, false).is_err());
    }

    #[test]
    fn test_clear_prompt_returns_to_idle() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        flow.request_prompt(service);
        assert!(flow.clear_prompt().is_some());
        assert_eq!(flow.phase(service), PromptPhase::Idle);
        assert!(flow.prompt().is_none());
    }

    #[test]
    fn test_offer_with_remember_caches() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        flow.offer(service, true, Some(ssh("admin")));
        assert_eq!(flow.phase(service), PromptPhase::Resolved);
        assert!(flow.cached(service).is_some());
    }

    #[test]
    fn test_offer_without_credential_forces_reprompt() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        flow.offer(service, true, Some(ssh("admin")));

        flow.offer(service, false, None);
        assert_eq!(flow.phase(service), PromptPhase::PromptPending);
        // The cache still holds the old credential until the prompt resolves.
        assert!(flow.cached(service).is_some());
    }

    #[test]
    fn test_forget_evicts_cache() {
        let mut flow = CredentialFlow::new();
        let service = ServiceId::new_v4();
        flow.offer(service, true, Some(ssh("admin")));
        assert!(flow.forget(service));
        assert!(!flow.forget(service));
        assert_eq!(flow.request_prompt(service), PromptPhase::PromptPending);
    }
}
