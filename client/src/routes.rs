//! Path routing of `whalehub open`, mirroring the pages of the web client.

use crate::registry::{find_token, RegisteredToken, DEFAULT_TOKEN_ID};

const TERMS: &str = include_str!("legal/terms.txt");
const PRIVACY_POLICY: &str = include_str!("legal/privacy_policy.txt");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/stake/sol`, the SOL liquid staking page.
    LiquidStake,
    Stake(&'static RegisteredToken),
    Gauge,
    Admin,
    Terms,
    PrivacyPolicy,
}

impl Route {
    /// Resolves `path`. Anything unknown, including an unregistered token id,
    /// lands on the default stake page.
    pub fn resolve(path: &str) -> Route {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            ["stake", "sol"] => Route::LiquidStake,
            ["stake", token_id] => match find_token(token_id) {
                Some(token) => Route::Stake(token),
                None => Route::default(),
            },
            ["gauge"] => Route::Gauge,
            ["admin"] => Route::Admin,
            ["terms"] => Route::Terms,
            ["privacy-policy"] => Route::PrivacyPolicy,
            _ => Route::default(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::LiquidStake => "/stake/sol".to_string(),
            Route::Stake(token) => format!("/stake/{}", token.id),
            Route::Gauge => "/gauge".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::PrivacyPolicy => "/privacy-policy".to_string(),
        }
    }

    /// Text of the static document pages.
    pub fn document(&self) -> Option<&'static str> {
        match self {
            Route::Terms => Some(TERMS),
            Route::PrivacyPolicy => Some(PRIVACY_POLICY),
            _ => None,
        }
    }
}

impl Default for Route {
    fn default() -> Self {
        // the default token id is always registered
        match find_token(DEFAULT_TOKEN_ID) {
            Some(token) => Route::Stake(token),
            None => Route::Gauge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths() {
        assert_eq!(Route::resolve("/gauge"), Route::Gauge);
        assert_eq!(Route::resolve("/admin/"), Route::Admin);
        assert_eq!(Route::resolve("/terms"), Route::Terms);
        assert_eq!(Route::resolve("/privacy-policy"), Route::PrivacyPolicy);
        assert_eq!(Route::resolve("/stake/hades").path(), "/stake/hades");
        assert_eq!(Route::resolve("/stake/sol"), Route::LiquidStake);
    }

    #[test]
    fn document_pages_carry_their_text() {
        let terms = Route::Terms.document().unwrap();
        assert!(terms.starts_with("TERMS & CONDITIONS"));
        assert!(terms.contains("Limitation of Liability"));
        let privacy = Route::PrivacyPolicy.document().unwrap();
        assert!(privacy.starts_with("PRIVACY POLICY"));
        assert!(privacy.contains("On-Chain Data"));
        assert_eq!(Route::Gauge.document(), None);
    }

    #[test]
    fn unknown_paths_fall_back_to_default_stake() {
        for path in ["", "/", "/swap", "/stake", "/stake/unknown", "/gauge/1"] {
            assert_eq!(Route::resolve(path).path(), "/stake/hades", "{}", path);
        }
    }
}
