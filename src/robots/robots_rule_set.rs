use crate::robots::access_decision::AccessDecision;
use crate::robots::agent_relevance_policy::AgentRelevancePolicy;
use std::collections::BTreeSet;
use tracing::debug;

const USER_AGENT_DIRECTIVE: &str = "user-agent:";
const DISALLOW_DIRECTIVE: &str = "disallow:";

/// One `User-agent` block of a robots.txt, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsGroup {
    pub agent_tokens: BTreeSet<String>,
    pub disallowed_prefixes: Vec<String>,
}

impl RobotsGroup {
    fn new(agent_token: &str) -> Self {
        Self {
            agent_tokens: BTreeSet::from([agent_token.to_owned()]),
            disallowed_prefixes: Vec::new(),
        }
    }

    pub fn is_relevant(&self, policy: AgentRelevancePolicy) -> bool {
        self.agent_tokens
            .iter()
            .any(|token| policy.is_relevant(token))
    }
}

/// Parsed exclusion rules for one origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRuleSet {
    origin: String,
    groups: Vec<RobotsGroup>,
    anomalies: usize,
}

impl RobotsRuleSet {
    /// A rule set with no groups; every path is allowed.
    pub fn empty(origin: &str) -> Self {
        Self {
            origin: origin.to_owned(),
            groups: Vec::new(),
            anomalies: 0,
        }
    }

    /// Parses a robots.txt body into groups in file order.
    ///
    /// Unlike a plain `starts_with` scan, directive names match ASCII
    /// case-insensitively and a trailing `#` comment is dropped, so
    /// `Disallow: /a#b` collects `/a`.
    pub fn parse(origin: &str, content: &str) -> Self {
        let mut rule_set = Self::empty(origin);
        let mut current_token: Option<String> = None;
        let mut disallow_seen = false;

        for raw_line in content.lines() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(agent_token) = directive_value(line, USER_AGENT_DIRECTIVE) {
                // Only a repeated token directly after its own User-agent line continues the group.
                if disallow_seen || current_token.as_deref() != Some(agent_token) {
                    rule_set.groups.push(RobotsGroup::new(agent_token));
                    current_token = Some(agent_token.to_owned());
                    disallow_seen = false;
                }
            } else if let Some(path) = directive_value(line, DISALLOW_DIRECTIVE) {
                disallow_seen = true;
                match rule_set.groups.last_mut() {
                    Some(group) => {
                        if !path.is_empty() {
                            group.disallowed_prefixes.push(path.to_owned());
                        }
                    }
                    None => rule_set.record_anomaly(line),
                }
            } else if !line.contains(':') {
                rule_set.record_anomaly(line);
            }
        }

        rule_set
    }

    fn record_anomaly(&mut self, line: &str) {
        debug!(origin = %self.origin, line, "Ignoring unexpected robots.txt line");
        self.anomalies += 1;
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn groups(&self) -> &[RobotsGroup] {
        &self.groups
    }

    /// Number of lines that could not be attributed to any group.
    pub fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Disallowed prefixes of every group the policy considers relevant, in file order.
    pub fn disallowed_prefixes(&self, policy: AgentRelevancePolicy) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|group| group.is_relevant(policy))
            .flat_map(|group| group.disallowed_prefixes.iter().map(String::as_str))
            .collect()
    }

    pub fn evaluate(&self, target_path: &str, policy: AgentRelevancePolicy) -> AccessDecision {
        let target_path = if target_path.is_empty() {
            "/"
        } else {
            target_path
        };
        let prefixes = self.disallowed_prefixes(policy);

        if prefixes.iter().any(|prefix| *prefix == "/") {
            return AccessDecision::deny("/");
        }

        match prefixes
            .iter()
            .find(|prefix| target_path.starts_with(**prefix))
        {
            Some(prefix) => AccessDecision::deny(prefix),
            None => AccessDecision::allow(),
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Returns the trimmed value after `directive` when the line starts with it (ASCII case-insensitive).
fn directive_value<'a>(line: &'a str, directive: &str) -> Option<&'a str> {
    let head = line.get(..directive.len())?;
    if head.eq_ignore_ascii_case(directive) {
        Some(line[directive.len()..].trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://example.com";

    fn decide(content: &str, path: &str, policy: AgentRelevancePolicy) -> AccessDecision {
        RobotsRuleSet::parse(ORIGIN, content).evaluate(path, policy)
    }

    #[test]
    fn later_section_does_not_leak_into_wildcard_rules() {
        let content = "User-agent: *\nDisallow: /private\nUser-agent: special\nDisallow: /other";
        let policy = AgentRelevancePolicy::WildcardOrBotToken;

        assert!(decide(content, "/other", policy).allowed);
        assert_eq!(decide(content, "/private", policy), AccessDecision::deny("/private"));
    }

    #[test]
    fn root_disallow_denies_everything() {
        let content = "User-agent: *\nDisallow: /\n";
        for path in ["/", "/chart", "/a/b/c", ""] {
            let decision = decide(content, path, AgentRelevancePolicy::WildcardOnly);
            assert_eq!(decision, AccessDecision::deny("/"));
        }
    }

    #[test]
    fn root_disallow_wins_over_earlier_prefix() {
        let content = "User-agent: *\nDisallow: /private\nDisallow: /\n";
        let decision = decide(content, "/private/page", AgentRelevancePolicy::WildcardOnly);
        assert_eq!(decision.matched_rule.as_deref(), Some("/"));
    }

    #[test]
    fn first_matching_prefix_is_reported() {
        let content = "User-agent: *\nDisallow: /api\nDisallow: /api/v1\n";
        let decision = decide(content, "/api/v1/items", AgentRelevancePolicy::WildcardOnly);
        assert_eq!(decision, AccessDecision::deny("/api"));
    }

    #[test]
    fn prefix_match_is_literal() {
        let content = "User-agent: *\nDisallow: /*.php\n";
        assert!(decide(content, "/index.php", AgentRelevancePolicy::WildcardOnly).allowed);
        assert!(!decide(content, "/*.php", AgentRelevancePolicy::WildcardOnly).allowed);
    }

    #[test]
    fn empty_content_allows() {
        let rule_set = RobotsRuleSet::parse(ORIGIN, "");
        assert!(rule_set.groups().is_empty());
        assert!(rule_set.evaluate("/anything", AgentRelevancePolicy::WildcardOnly).allowed);
    }

    #[test]
    fn relevant_group_without_disallow_allows() {
        let content = "User-agent: *\nAllow: /\nCrawl-delay: 10\n";
        assert!(decide(content, "/chart", AgentRelevancePolicy::WildcardOnly).allowed);
    }

    #[test]
    fn empty_disallow_value_is_skipped() {
        let rule_set = RobotsRuleSet::parse(ORIGIN, "User-agent: *\nDisallow:\n");
        assert!(rule_set.groups()[0].disallowed_prefixes.is_empty());
    }

    #[test]
    fn bot_group_honoured_only_under_bot_policy() {
        let content = "User-agent: Googlebot\nDisallow: /x\n";
        assert!(!decide(content, "/x/1", AgentRelevancePolicy::WildcardOrBotToken).allowed);
        assert!(decide(content, "/x/1", AgentRelevancePolicy::WildcardOnly).allowed);
    }

    #[test]
    fn repeated_token_after_rules_starts_a_new_group() {
        let content = "User-agent: *\nDisallow: /a\nUser-agent: *\nDisallow: /b\n";
        let rule_set = RobotsRuleSet::parse(ORIGIN, content);
        assert_eq!(rule_set.groups().len(), 2);
        assert_eq!(rule_set.groups()[0].disallowed_prefixes, vec!["/a"]);
        assert_eq!(rule_set.groups()[1].disallowed_prefixes, vec!["/b"]);

        let policy = AgentRelevancePolicy::WildcardOnly;
        assert_eq!(decide(content, "/a/1", policy), AccessDecision::deny("/a"));
        assert_eq!(decide(content, "/b/1", policy), AccessDecision::deny("/b"));
    }

    #[test]
    fn consecutive_identical_user_agent_lines_share_a_group() {
        let content = "User-agent: *\nUser-agent: *\nDisallow: /a\n";
        let rule_set = RobotsRuleSet::parse(ORIGIN, content);
        assert_eq!(rule_set.groups().len(), 1);
        assert_eq!(rule_set.groups()[0].disallowed_prefixes, vec!["/a"]);
    }

    #[test]
    fn hash_in_disallow_value_starts_a_comment() {
        let rule_set = RobotsRuleSet::parse(ORIGIN, "User-agent: *\nDisallow: /a#b\n");
        assert_eq!(rule_set.groups()[0].disallowed_prefixes, vec!["/a"]);
    }

    #[test]
    fn returning_token_starts_a_new_group() {
        let content = "User-agent: *\nDisallow: /a\nUser-agent: special\nDisallow: /s\nUser-agent: *\nDisallow: /b\n";
        let rule_set = RobotsRuleSet::parse(ORIGIN, content);
        assert_eq!(rule_set.groups().len(), 3);
        assert_eq!(
            rule_set.disallowed_prefixes(AgentRelevancePolicy::WildcardOnly),
            vec!["/a", "/b"]
        );
    }

    #[test]
    fn comments_and_directive_case_are_handled() {
        let content = "# robots\nUSER-AGENT: * # everyone\ndisallow: /tmp # scratch\n";
        assert_eq!(
            decide(content, "/tmp/file", AgentRelevancePolicy::WildcardOnly),
            AccessDecision::deny("/tmp")
        );
    }

    #[test]
    fn orphan_lines_are_counted_as_anomalies() {
        let content = "Disallow: /early\nthis is not a directive\nUser-agent: *\nDisallow: /late\n";
        let rule_set = RobotsRuleSet::parse(ORIGIN, content);
        assert_eq!(rule_set.anomalies(), 2);
        assert!(decide(content, "/early", AgentRelevancePolicy::WildcardOnly).allowed);
        assert!(!decide(content, "/late", AgentRelevancePolicy::WildcardOnly).allowed);
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        let content = "User-agent: *\r\nDisallow: /private\r\n";
        assert_eq!(
            decide(content, "/private", AgentRelevancePolicy::WildcardOnly),
            AccessDecision::deny("/private")
        );
    }
}
