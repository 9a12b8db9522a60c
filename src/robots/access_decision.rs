/// Outcome of evaluating one path against a parsed robots.txt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub matched_rule: Option<String>,
}

impl AccessDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            matched_rule: None,
        }
    }

    pub fn deny(rule: &str) -> Self {
        Self {
            allowed: false,
            matched_rule: Some(rule.to_owned()),
        }
    }
}
