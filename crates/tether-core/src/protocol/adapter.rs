//! Turns push events into store actions.
//!
//! This is the only place that knows how the daemon's events map onto
//! component operations. Every event becomes one or more authoritative
//! actions, applied in order.

use super::messages::{DirectoryEvent, PushEvent, RemoteEvent};
use crate::state::Action;

pub fn normalize(event: PushEvent) -> Vec<Action> {
    match event {
        PushEvent::Directory(event) => directory_actions(event),
        PushEvent::Remote(event) => remote_actions(event),
    }
}

pub fn directory_actions(event: DirectoryEvent) -> Vec<Action> {
    match event {
        DirectoryEvent::Empty => vec![Action::ClearDirectory],
        DirectoryEvent::Updated(companies) => vec![Action::ReplaceDirectory { companies }],
        DirectoryEvent::Expanded(company_ids) => vec![Action::SetExpanded { company_ids }],
        DirectoryEvent::ServiceCredential {
            service,
            remember,
            credential,
        } => vec![Action::OfferCredential {
            service,
            remember,
            credential,
        }],
    }
}

pub fn remote_actions(event: RemoteEvent) -> Vec<Action> {
    match event {
        RemoteEvent::ConnectedServices(services) => vec![Action::ReplaceConnected { services }],
        RemoteEvent::Connected(service) => vec![Action::MarkConnected { service }],
        RemoteEvent::Disconnected(service) => vec![Action::MarkDisconnected { service }],
        // A prompt means the connect attempt did not go through.
        RemoteEvent::PromptCredentials(service) => vec![
            Action::MarkDisconnected { service },
            Action::RequestCredentials { service },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credential;
    use crate::directory::{CompanyId, ServiceId};

    #[test]
    fn test_empty_clears_directory() {
        assert_eq!(
            normalize(PushEvent::Directory(DirectoryEvent::Empty)),
            vec![Action::ClearDirectory]
        );
    }

    #[test]
    fn test_updated_and_expanded() {
        assert_eq!(
            directory_actions(DirectoryEvent::Updated(Vec::new())),
            vec![Action::ReplaceDirectory {
                companies: Vec::new()
            }]
        );

        let id = CompanyId::new_v4();
        assert_eq!(
            directory_actions(DirectoryEvent::Expanded(vec![id])),
            vec![Action::SetExpanded {
                company_ids: vec![id]
            }]
        );
    }

    #[test]
    fn test_service_credential_becomes_offer() {
        let service = ServiceId::new_v4();
        let credential = Credential::SshKey {
            login: "root".to_string(),
            key: "k".to_string(),
        };
        let actions = directory_actions(DirectoryEvent::ServiceCredential {
            service,
            remember: true,
            credential: Some(credential.clone()),
        });
        assert_eq!(
            actions,
            vec![Action::OfferCredential {
                service,
                remember: true,
                credential: Some(credential),
            }]
        );
    }

    #[test]
    fn test_remote_events_map_to_authoritative_writes() {
        let service = ServiceId::new_v4();
        assert_eq!(
            remote_actions(RemoteEvent::ConnectedServices(vec![service])),
            vec![Action::ReplaceConnected {
                services: vec![service]
            }]
        );
        assert_eq!(
            remote_actions(RemoteEvent::Connected(service)),
            vec![Action::MarkConnected { service }]
        );
        assert_eq!(
            remote_actions(RemoteEvent::Disconnected(service)),
            vec![Action::MarkDisconnected { service }]
        );
    }

    #[test]
    fn test_prompt_credentials_disconnects_then_prompts() {
        let service = ServiceId::new_v4();
        assert_eq!(
            remote_actions(RemoteEvent::PromptCredentials(service)),
            vec![
                Action::MarkDisconnected { service },
                Action::RequestCredentials { service },
            ]
        );
    }
}
