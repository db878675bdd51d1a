// Session module - admin token lifecycle
//
// The console is reached from the platform's browser login page, which hands
// the admin a one-line launch command: `maitred --token <jwt>`. The token is
// persisted to a session file so later launches skip the handoff, and it is
// validated lazily by the first authenticated response.

use std::path::PathBuf;

/// Validation state of the admin session.
///
/// Starts at `Pending` and stays there until the first authenticated
/// response arrives. `Pending` is not a failure: only `Invalid` means
/// the backend rejected the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No authenticated response seen yet
    #[default]
    Pending,
    /// Backend accepted the token
    Valid,
    /// Backend rejected the token (401/403)
    Invalid,
}

impl SessionStatus {
    /// Short display string for the status bar
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Valid => "valid",
            SessionStatus::Invalid => "invalid",
        }
    }
}

/// Admin session: bearer token plus validation state
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    status: SessionStatus,
}

impl Session {
    pub fn new(token: String) -> Self {
        Self {
            token,
            status: SessionStatus::Pending,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Fold an HTTP status from an authenticated request into the session state.
    ///
    /// 401/403 marks the token rejected, any success confirms it. Server
    /// errors and transport failures say nothing about the token and leave
    /// the state unchanged.
    pub fn observe_status(&mut self, http_status: u16) {
        match http_status {
            401 | 403 => self.status = SessionStatus::Invalid,
            200..=299 => self.status = SessionStatus::Valid,
            _ => {}
        }
    }

    /// True once the backend has rejected the token. `Pending` does not block.
    pub fn is_rejected(&self) -> bool {
        self.status == SessionStatus::Invalid
    }
}

/// Where the session token is persisted between runs
pub fn session_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("maitred").join("session"))
}

/// Resolve the session token: `--token` flag first, then the session file.
///
/// A token passed on the command line replaces the persisted one, so the
/// freshest browser login always wins. Returns `None` when neither source
/// has a token; the caller prints the login URL and exits.
pub fn establish(cli_token: Option<String>) -> Option<Session> {
    if let Some(token) = cli_token {
        let token = token.trim().to_string();
        if !token.is_empty() {
            persist(&token);
            tracing::info!("Session token taken from command line");
            return Some(Session::new(token));
        }
    }

    let token = load_persisted()?;
    tracing::info!("Session token loaded from session file");
    Some(Session::new(token))
}

/// Write the token to the session file for future launches
fn persist(token: &str) {
    let Some(path) = session_path() else {
        return;
    };

    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    if let Err(e) = std::fs::write(&path, token) {
        tracing::warn!("Could not persist session token: {}", e);
    }
}

/// Read the persisted token, if any
fn load_persisted() -> Option<String> {
    let path = session_path()?;
    let contents = std::fs::read_to_string(path).ok()?;
    let token = contents.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_pending() {
        let session = Session::new("jwt".to_string());
        assert_eq!(session.status(), SessionStatus::Pending);
        assert!(!session.is_rejected());
    }

    #[test]
    fn test_success_confirms_token() {
        let mut session = Session::new("jwt".to_string());
        session.observe_status(200);
        assert_eq!(session.status(), SessionStatus::Valid);
    }

    #[test]
    fn test_unauthorized_rejects_token() {
        let mut session = Session::new("jwt".to_string());
        session.observe_status(401);
        assert_eq!(session.status(), SessionStatus::Invalid);
        assert!(session.is_rejected());
    }

    #[test]
    fn test_forbidden_rejects_token() {
        let mut session = Session::new("jwt".to_string());
        session.observe_status(403);
        assert_eq!(session.status(), SessionStatus::Invalid);
    }

    #[test]
    fn test_server_error_leaves_state_unchanged() {
        let mut session = Session::new("jwt".to_string());
        session.observe_status(500);
        assert_eq!(session.status(), SessionStatus::Pending);

        session.observe_status(200);
        session.observe_status(503);
        assert_eq!(session.status(), SessionStatus::Valid);
    }

    #[test]
    fn test_rejection_overrides_earlier_success() {
        let mut session = Session::new("jwt".to_string());
        session.observe_status(200);
        session.observe_status(401);
        assert_eq!(session.status(), SessionStatus::Invalid);
    }

    #[test]
    fn test_later_success_revalidates() {
        // A fresh token written over the session file can succeed after
        // an earlier rejection within the same run
        let mut session = Session::new("jwt".to_string());
        session.observe_status(401);
        session.observe_status(204);
        assert_eq!(session.status(), SessionStatus::Valid);
    }
}
