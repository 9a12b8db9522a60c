use serde::Deserialize;

/// Decides which `User-agent` groups of a robots.txt apply to this crawler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AgentRelevancePolicy {
    /// Only the `*` group applies.
    WildcardOnly,
    /// The `*` group and any group whose token contains "bot" (case-insensitive).
    #[default]
    WildcardOrBotToken,
}

impl AgentRelevancePolicy {
    pub fn is_relevant(&self, agent_token: &str) -> bool {
        if agent_token == "*" {
            return true;
        }
        match self {
            AgentRelevancePolicy::WildcardOnly => false,
            AgentRelevancePolicy::WildcardOrBotToken => {
                agent_token.to_ascii_lowercase().contains("bot")
            }
        }
    }
}
