use std::fmt;

use serde::{Deserialize, Serialize};

use crate::directory::Protocol;

/// Login material for a service, one variant per protocol-specific shape.
///
/// `Debug` redacts passwords and keys.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credential {
    RdpUserPassword {
        login: String,
        password: String,
        domain: String,
    },
    SshUserPassword {
        login: String,
        password: String,
    },
    SshKey {
        login: String,
        key: String,
    },
}

impl Credential {
    pub fn login(&self) -> &str {
        match self {
            Credential::RdpUserPassword { login, .. }
            | Credential::SshUserPassword { login, .. }
            | Credential::SshKey { login, .. } => login,
        }
    }

    /// The password, when this credential carries one.
    pub fn password(&self) -> Option<&str> {
        match self {
            Credential::RdpUserPassword { password, .. }
            | Credential::SshUserPassword { password, .. } => Some(password),
            Credential::SshKey { .. } => None,
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Credential::RdpUserPassword { .. } => Protocol::Rdp,
            Credential::SshUserPassword { .. } | Credential::SshKey { .. } => Protocol::Ssh,
        }
    }

    /// A credential without a login is treated as not filled in.
    pub fn is_empty(&self) -> bool {
        self.login().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::RdpUserPassword { login, domain, .. } => f
                .debug_struct("RdpUserPassword")
                .field("login", login)
                .field("password", &"<redacted>")
                .field("domain", domain)
                .finish(),
            Credential::SshUserPassword { login, .. } => f
                .debug_struct("SshUserPassword")
                .field("login", login)
                .field("password", &"<redacted>")
                .finish(),
            Credential::SshKey { login, .. } => f
                .debug_struct("SshKey")
                .field("login", login)
                .field("key", &"<redacted>")
                .finish(),
        }
    }
}
