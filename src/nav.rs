//! One-shot redirect rule for documentation routes.
//!
//! A rule starts pending and fires at most once: when the current path
//! matches its source (or no source is configured), it yields the target
//! and becomes terminal. Re-evaluating a navigated rule is a no-op, so
//! repeated route events are harmless.

/// Fixed landing page when the site is served from the root path.
const DOCS_INDEX: &str = "/guides/index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RedirectState {
    Pending,
    Navigated,
}

#[derive(Debug)]
pub struct RedirectRule {
    /// Path the rule applies to; `None` means any path.
    from: Option<String>,
    /// Caller-specified target, used when the site is not served from `/`.
    to: String,
    state: RedirectState,
}

impl RedirectRule {
    pub fn new(from: Option<String>, to: impl Into<String>) -> Self {
        Self {
            from,
            to: to.into(),
            state: RedirectState::Pending,
        }
    }

    /// Evaluate the rule against the current path. Returns the replace-
    /// navigation target the first time the rule matches, `None` otherwise.
    pub fn evaluate(&mut self, current_path: &str, site_base: &str) -> Option<String> {
        if self.state == RedirectState::Navigated {
            return None;
        }

        let matches = match self.from {
            None => true,
            Some(ref from) => from == current_path,
        };
        if !matches {
            return None;
        }

        self.state = RedirectState::Navigated;
        if site_base == "/" {
            Some(DOCS_INDEX.to_string())
        } else {
            Some(self.to.clone())
        }
    }

    #[allow(dead_code)] // Exercised by tests; interactive mode will poll this
    pub fn has_navigated(&self) -> bool {
        self.state == RedirectState::Navigated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_source_path_redirects_to_docs_index_at_root_base() {
        let mut rule = RedirectRule::new(None, "/docs/start.html");
        assert_eq!(
            rule.evaluate("/foo", "/").as_deref(),
            Some("/guides/index.html")
        );
        assert!(rule.has_navigated());
    }

    #[test]
    fn test_non_matching_source_does_not_navigate() {
        let mut rule = RedirectRule::new(Some("/bar".to_string()), "/docs/start.html");
        assert_eq!(rule.evaluate("/baz", "/"), None);
        assert!(!rule.has_navigated());
    }

    #[test]
    fn test_matching_source_uses_caller_target_off_root() {
        let mut rule = RedirectRule::new(Some("/bar".to_string()), "/docs/start.html");
        assert_eq!(
            rule.evaluate("/bar", "/admin/").as_deref(),
            Some("/docs/start.html")
        );
    }

    #[test]
    fn test_rule_fires_at_most_once() {
        let mut rule = RedirectRule::new(None, "/docs/start.html");
        assert!(rule.evaluate("/foo", "/").is_some());
        // Terminal: repeated route events are no-ops
        assert_eq!(rule.evaluate("/foo", "/"), None);
        assert_eq!(rule.evaluate("/elsewhere", "/"), None);
    }

    #[test]
    fn test_pending_rule_can_fire_after_earlier_miss() {
        let mut rule = RedirectRule::new(Some("/bar".to_string()), "/docs/start.html");
        assert_eq!(rule.evaluate("/baz", "/admin/"), None);
        // Still pending, so a later matching route fires it
        assert_eq!(
            rule.evaluate("/bar", "/admin/").as_deref(),
            Some("/docs/start.html")
        );
    }
}
