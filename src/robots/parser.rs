//! Robots.txt parser implementation
//!
//! Allow/disallow matching is delegated to the robotstxt crate; Crawl-delay,
//! which that crate does not expose, is read directly from the groups.

use robotstxt::DefaultMatcher;

/// A downloaded robots.txt body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRobots {
    content: String,
}

impl ParsedRobots {
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Returns the raw robots.txt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Checks whether `url` (absolute) may be fetched by `user_agent`
    ///
    /// An empty file allows everything.
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Crawl-delay in seconds for `user_agent`
    ///
    /// A group naming the agent wins over the `*` group. Consecutive
    /// User-agent lines form one group.
    pub fn crawl_delay(&self, user_agent: &str) -> Option<f64> {
        let agent = user_agent.to_lowercase();
        let mut group: Vec<String> = Vec::new();
        let mut reading_agents = false;
        let mut for_agent = None;
        let mut for_wildcard = None;

        for line in self.content.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    if !reading_agents {
                        group.clear();
                        reading_agents = true;
                    }
                    group.push(value.to_lowercase());
                }
                "crawl-delay" => {
                    reading_agents = false;
                    let Ok(delay) = value.parse::<f64>() else {
                        continue;
                    };
                    for ua in group.iter().filter(|ua| !ua.is_empty()) {
                        if ua == "*" {
                            for_wildcard.get_or_insert(delay);
                        } else if agent.contains(ua.as_str()) {
                            for_agent.get_or_insert(delay);
                        }
                    }
                }
                _ => reading_agents = false,
            }
        }

        for_agent.or(for_wildcard)
    }
}
