use http::StatusCode;

/// A single allow rule: a status code that counts as alive, optionally
/// restricted to one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptRule {
    /// The status code the rule matches.
    pub status: StatusCode,
    /// When set, the rule only applies to responses from this host.
    pub host: Option<String>,
}

/// The table of error statuses that are nevertheless accepted as alive.
///
/// These rules encode tested false-positive suppression, not incidental
/// behavior: many sites answer `403` to scripted HEAD requests while being
/// genuinely reachable, `405` means the server rejects HEAD specifically,
/// and two well-known hosts return idiosyncratic codes for pages that exist.
#[derive(Debug, Clone)]
pub struct AcceptedStatuses {
    rules: Vec<AcceptRule>,
}

impl Default for AcceptedStatuses {
    fn default() -> Self {
        let status = |code| StatusCode::from_u16(code).unwrap();
        Self {
            rules: vec![
                // Often used to ward off scrapers.
                AcceptRule {
                    status: StatusCode::FORBIDDEN,
                    host: None,
                },
                // The server rejects HEAD specifically.
                AcceptRule {
                    status: StatusCode::METHOD_NOT_ALLOWED,
                    host: None,
                },
                // Rate-limit false positive on one well-known host.
                AcceptRule {
                    status: StatusCode::TOO_MANY_REQUESTS,
                    host: Some("github.com".into()),
                },
                AcceptRule {
                    status: status(520),
                    host: Some("twitter.com".into()),
                },
            ],
        }
    }
}

impl AcceptedStatuses {
    /// Whether a response with `status` from `host` is accepted as alive.
    #[must_use]
    pub fn permits(&self, status: StatusCode, host: Option<&str>) -> bool {
        self.rules.iter().any(|rule| {
            rule.status == status
                && match &rule.host {
                    None => true,
                    Some(h) => host == Some(h.as_str()),
                }
        })
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[AcceptRule] {
        &self.rules
    }
}
