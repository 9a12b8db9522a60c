mod access_decision;
mod agent_relevance_policy;
mod robots_error;
mod robots_policy_checker;
mod robots_rule_set;
mod robots_txt_source;

pub use access_decision::AccessDecision;
pub use agent_relevance_policy::AgentRelevancePolicy;
pub use robots_error::RobotsError;
pub use robots_policy_checker::{DEFAULT_ROBOTS_TIMEOUT, RobotsPolicyChecker};
pub use robots_rule_set::{RobotsGroup, RobotsRuleSet};
pub use robots_txt_source::RobotsTxtSource;
