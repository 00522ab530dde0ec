//! Security constraints: the declarative access policy.
//!
//! Evaluation is two-staged. Public matchers exempt a route from
//! authentication entirely; deny matchers then require the caller to hold a
//! role whose method set contains the request method. The set is compiled
//! once from configuration and never mutated, so it can be shared across
//! request handlers without locking.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{Method, PathPattern, Role};

/// What to do with a path that no deny matcher covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPolicy {
    /// Unlisted routes are allowed without authentication (fail-open).
    #[default]
    Allow,
    /// Unlisted routes are forbidden (fail-closed).
    Deny,
}

/// Public route exemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermitMatcher {
    pub pattern: PathPattern,
    /// Empty means every method.
    pub methods: Vec<Method>,
}

impl PermitMatcher {
    pub fn new(pattern: PathPattern, methods: impl IntoIterator<Item = Method>) -> Self {
        let mut seen = HashSet::new();
        let methods = methods
            .into_iter()
            .filter(|m| seen.insert(m.clone()))
            .collect();
        Self { pattern, methods }
    }

    pub fn permits(&self, path: &str, method: &Method) -> bool {
        self.pattern.matches(path) && (self.methods.is_empty() || self.methods.contains(method))
    }
}

/// Role-gated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyMatcher {
    pub pattern: PathPattern,
    pub role_mappings: HashMap<Role, HashSet<Method>>,
}

impl DenyMatcher {
    pub fn new<R, M>(pattern: PathPattern, role_mappings: R) -> Self
    where
        R: IntoIterator<Item = (Role, M)>,
        M: IntoIterator<Item = Method>,
    {
        let role_mappings = role_mappings
            .into_iter()
            .map(|(role, methods)| (role, methods.into_iter().collect()))
            .collect();
        Self {
            pattern,
            role_mappings,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }

    pub fn permits(&self, roles: &[Role], method: &Method) -> bool {
        roles
            .iter()
            .filter_map(|r| self.role_mappings.get(r))
            .any(|methods| methods.contains(method))
    }
}

/// The complete, immutable policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityConstraints {
    pub public_constraints: Vec<PermitMatcher>,
    pub constraints: Vec<DenyMatcher>,
    pub unmatched: UnmatchedPolicy,
}

impl SecurityConstraints {
    pub fn new(public_constraints: Vec<PermitMatcher>, constraints: Vec<DenyMatcher>) -> Self {
        Self {
            public_constraints,
            constraints,
            unmatched: UnmatchedPolicy::default(),
        }
    }

    pub fn with_unmatched(mut self, unmatched: UnmatchedPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Compile the serialized form (patterns are validated on deserialize).
    pub fn from_config(config: SecurityConfig) -> Self {
        let public_constraints = config
            .public
            .into_iter()
            .map(|rule| PermitMatcher::new(rule.pattern, rule.methods))
            .collect();
        let constraints = config
            .constraints
            .into_iter()
            .map(|rule| DenyMatcher::new(rule.pattern, rule.roles))
            .collect();

        Self {
            public_constraints,
            constraints,
            unmatched: config.unmatched,
        }
    }

    /// True iff some public matcher covers `path` for `method`.
    pub fn validate_public_constraints(&self, path: &str, method: &Method) -> bool {
        self.public_constraints
            .iter()
            .any(|m| m.permits(path, method))
    }

    /// First deny matcher covering `path`, in declaration order.
    pub fn find_constraint(&self, path: &str) -> Option<&DenyMatcher> {
        self.constraints.iter().find(|m| m.matches(path))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serialized form
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub unmatched: UnmatchedPolicy,
    #[serde(default)]
    pub public: Vec<PermitRule>,
    #[serde(default)]
    pub constraints: Vec<DenyRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PermitRule {
    pub pattern: PathPattern,
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DenyRule {
    pub pattern: PathPattern,
    pub roles: HashMap<Role, Vec<Method>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(raw: &str) -> PathPattern {
        PathPattern::new(raw).unwrap()
    }

    fn user_constraint() -> DenyMatcher {
        DenyMatcher::new(
            pattern("/test"),
            [(Role::new("user"), vec![Method::POST, Method::GET])],
        )
    }

    #[test]
    fn public_match_requires_method_membership() {
        let sc = SecurityConstraints::new(
            vec![PermitMatcher::new(pattern("/test"), [Method::GET])],
            vec![],
        );
        assert!(sc.validate_public_constraints("/test", &Method::GET));
        assert!(!sc.validate_public_constraints("/test", &Method::POST));
        assert!(!sc.validate_public_constraints("/other", &Method::GET));
    }

    #[test]
    fn empty_methods_means_any_method() {
        let sc = SecurityConstraints::new(vec![PermitMatcher::new(pattern("/health"), [])], vec![]);
        assert!(sc.validate_public_constraints("/health", &Method::GET));
        assert!(sc.validate_public_constraints("/health", &Method::DELETE));
    }

    #[test]
    fn permit_matcher_deduplicates_methods() {
        let m = PermitMatcher::new(pattern("/x"), [Method::GET, Method::new("get"), Method::POST]);
        assert_eq!(m.methods, vec![Method::GET, Method::POST]);
    }

    #[test]
    fn deny_matcher_permits_by_role_union() {
        let m = DenyMatcher::new(
            pattern("/reports"),
            [
                (Role::new("reader"), vec![Method::GET]),
                (Role::new("writer"), vec![Method::POST]),
            ],
        );
        let both = [Role::new("reader"), Role::new("writer")];
        assert!(m.permits(&both, &Method::GET));
        assert!(m.permits(&both, &Method::POST));
        assert!(!m.permits(&both, &Method::DELETE));
        assert!(!m.permits(&[Role::new("reader")], &Method::POST));
        assert!(!m.permits(&[], &Method::GET));
    }

    #[test]
    fn first_matching_constraint_wins() {
        let sc = SecurityConstraints::new(
            vec![],
            vec![
                user_constraint(),
                DenyMatcher::new(pattern("/**"), [(Role::new("admin"), vec![Method::GET])]),
            ],
        );
        let found = sc.find_constraint("/test").unwrap();
        assert_eq!(found.pattern.as_str(), "/test");
        let fallback = sc.find_constraint("/elsewhere").unwrap();
        assert_eq!(fallback.pattern.as_str(), "/**");
    }

    #[test]
    fn compiles_from_json_config() {
        let json = r#"{
            "unmatched": "deny",
            "public": [{"pattern": "/login", "methods": ["post"]}, {"pattern": "/health"}],
            "constraints": [{"pattern": "/test", "roles": {"user": ["POST", "GET"]}}]
        }"#;
        let cfg: SecurityConfig = serde_json::from_str(json).unwrap();
        let sc = SecurityConstraints::from_config(cfg);

        assert_eq!(sc.unmatched, UnmatchedPolicy::Deny);
        assert!(sc.validate_public_constraints("/login", &Method::POST));
        assert!(sc.validate_public_constraints("/health", &Method::GET));
        let c = sc.find_constraint("/test").unwrap();
        assert!(c.permits(&[Role::new("user")], &Method::GET));
    }

    #[test]
    fn unmatched_defaults_to_allow() {
        let cfg: SecurityConfig = serde_json::from_str("{}").unwrap();
        let sc = SecurityConstraints::from_config(cfg);
        assert_eq!(sc.unmatched, UnmatchedPolicy::Allow);
    }

    #[test]
    fn invalid_pattern_rejected_in_config() {
        let json = r#"{"public": [{"pattern": "login"}]}"#;
        assert!(serde_json::from_str::<SecurityConfig>(json).is_err());
    }
}
