//! Explicit exemptions from authentication.

/// A single exemption: path prefix plus an optional method set.
/// `methods: None` matches any method.
#[derive(Debug, Clone)]
pub struct BypassRule {
    path_prefix: String,
    methods: Option<Vec<String>>,
}

impl BypassRule {
    /// Exempt every method under the given path prefix.
    pub fn any_method(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            methods: None,
        }
    }

    /// Exempt only the listed methods under the given path prefix.
    pub fn methods(path_prefix: impl Into<String>, methods: &[&str]) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            methods: Some(methods.iter().map(|m| m.to_string()).collect()),
        }
    }

    fn matches(&self, path: &str, method: &str) -> bool {
        if !path.starts_with(&self.path_prefix) {
            return false;
        }
        match &self.methods {
            None => true,
            Some(set) => set.iter().any(|m| m.eq_ignore_ascii_case(method)),
        }
    }
}

/// The process-wide bypass list, constant after startup and shared
/// read-only across request handlers.
#[derive(Debug, Clone, Default)]
pub struct BypassPolicy {
    rules: Vec<BypassRule>,
}

impl BypassPolicy {
    pub fn new(rules: Vec<BypassRule>) -> Self {
        Self { rules }
    }

    /// Whether the request is exempt from authentication.
    pub fn is_exempt(&self, path: &str, method: &str) -> bool {
        self.rules.iter().any(|r| r.matches(path, method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_any_method() {
        let policy = BypassPolicy::new(vec![BypassRule::any_method("/user/login")]);
        assert!(policy.is_exempt("/user/login", "POST"));
        assert!(policy.is_exempt("/user/login", "GET"));
        assert!(policy.is_exempt("/user/login/refresh", "POST"));
        assert!(!policy.is_exempt("/user", "POST"));
        assert!(!policy.is_exempt("/products", "GET"));
    }

    #[test]
    fn method_restricted_rule() {
        let policy = BypassPolicy::new(vec![BypassRule::methods("/health", &["GET"])]);
        assert!(policy.is_exempt("/health", "GET"));
        assert!(policy.is_exempt("/health", "get"));
        assert!(!policy.is_exempt("/health", "POST"));
    }

    #[test]
    fn empty_policy_exempts_nothing() {
        let policy = BypassPolicy::default();
        assert!(!policy.is_exempt("/user/login", "POST"));
    }
}
