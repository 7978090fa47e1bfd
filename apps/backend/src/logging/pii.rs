use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Characters kept in front of the mask.
const VISIBLE_PREFIX: usize = 3;

/// Regex patterns used for redaction, one construction site each.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email pattern: player names are free text and may carry an address.
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Player token pattern: a standalone run of ≥10 lowercase alphanumerics.
    ///
    /// Six-character session ids are shorter and stay readable. Runs glued to
    /// other word characters (`shop_dress_00000001`) have no boundary and
    /// do not match.
    /// SAFETY: This regex pattern is a vetted literal that compiles successfully
    pub fn player_token() -> &'static Regex {
        static PLAYER_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[a-z0-9]{10,}\b").unwrap()
        });
        &PLAYER_TOKEN_REGEX
    }
}

/// Mask a single bearer-like value, keeping a short prefix for correlation.
pub fn mask_token(token: &str) -> String {
    if token.is_empty() {
        return String::new();
    }
    let prefix: String = token.chars().take(VISIBLE_PREFIX).collect();
    format!("{prefix}***")
}

/// Redacts sensitive information from free text (request bodies, error details).
///
/// - Emails: keeps the first character of the local part and the full domain
/// - Player tokens: masked with [`mask_token`]
///
/// Emails go first so their local parts are not treated as tokens.
pub fn redact(input: &str) -> String {
    let email_redacted = PiiRegexRegistry::email().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                let (local_part, domain) = full_match.split_at(at_pos);
                format!("{}***{domain}", &local_part[..1])
            }
            _ => full_match.to_string(),
        }
    });

    PiiRegexRegistry::player_token()
        .replace_all(&email_redacted, |caps: &regex::Captures| mask_token(&caps[0]))
        .into_owned()
}

/// A wrapper that masks a player token when displayed.
pub struct Redacted<'a>(pub &'a str);

impl<'a> fmt::Display for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_token(self.0))
    }
}

impl<'a> fmt::Debug for Redacted<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", mask_token(self.0))
    }
}
