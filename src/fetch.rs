//! Article retrieval with robots.txt enforcement
//!
//! The robots check fails closed: when robots.txt cannot be retrieved or
//! parsed the page is not fetched. `skip_robots` bypasses the check for
//! pages the operator already knows to be fair game.

use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

use crate::error::{AnalysisError, Result};

/// User-agent sent with every request, and matched against robots.txt groups
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Minimal robots.txt model: agent groups with prefix rules
///
/// Follows the longest-match rule: the matching rule with the longest path
/// prefix decides, and an Allow wins a length tie. A group is selected by
/// the longest agent token contained in our user-agent, falling back to
/// `*`. No groups, or no matching rule, means allowed.
#[derive(Debug, Default)]
pub struct RobotsTxt {
    groups: Vec<Group>,
}

#[derive(Debug, Default)]
struct Group {
    agents: Vec<String>,
    rules: Vec<Rule>,
}

#[derive(Debug)]
struct Rule {
    allow: bool,
    path: String,
}

impl RobotsTxt {
    pub fn parse(text: &str) -> Self {
        let mut groups: Vec<Group> = Vec::new();
        let mut current: Option<Group> = None;
        let mut last_was_agent = false;

        for raw in text.lines() {
            let line = match raw.split_once('#') {
                Some((before, _)) => before,
                None => raw,
            }
            .trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    // Consecutive user-agent lines share one group
                    if !last_was_agent {
                        if let Some(group) = current.take() {
                            groups.push(group);
                        }
                        current = Some(Group::default());
                    }
                    if !value.is_empty() {
                        if let Some(group) = current.as_mut() {
                            group.agents.push(value.to_ascii_lowercase());
                        }
                    }
                    last_was_agent = true;
                }
                "allow" | "disallow" => {
                    last_was_agent = false;
                    // An empty Disallow permits everything; no rule needed
                    if !value.is_empty() {
                        if let Some(group) = current.as_mut() {
                            group.rules.push(Rule {
                                allow: key == "allow",
                                path: value.to_string(),
                            });
                        }
                    }
                }
                _ => {
                    // crawl-delay, sitemap, and unknown directives
                    last_was_agent = false;
                }
            }
        }
        if let Some(group) = current.take() {
            groups.push(group);
        }
        groups.retain(|g| !g.agents.is_empty());

        RobotsTxt { groups }
    }

    /// Whether `agent` may fetch `path`
    pub fn allows(&self, agent: &str, path: &str) -> bool {
        let Some(group) = self.group_for(agent) else {
            return true;
        };
        let mut verdict = true;
        let mut best_len = 0;
        for rule in &group.rules {
            if !path.starts_with(rule.path.as_str()) {
                continue;
            }
            let len = rule.path.len();
            if len > best_len || (len == best_len && rule.allow) {
                verdict = rule.allow;
                best_len = len;
            }
        }
        verdict
    }

    fn group_for(&self, agent: &str) -> Option<&Group> {
        let agent = agent.to_ascii_lowercase();
        let mut best: Option<(&Group, usize)> = None;
        for group in &self.groups {
            for token in &group.agents {
                let score = if token == "*" {
                    Some(0)
                } else if agent.contains(token.as_str()) {
                    Some(token.len())
                } else {
                    None
                };
                if let Some(score) = score {
                    let better = match best {
                        None => true,
                        Some((_, current)) => score > current,
                    };
                    if better {
                        best = Some((group, score));
                    }
                }
            }
        }
        best.map(|(group, _)| group)
    }
}

fn network_error(context: &str, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Network(format!("{context}: {err}"))
}

fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| network_error("building http client", e))
}

/// Check robots.txt for `url`, failing closed on any retrieval problem
///
/// Status handling mirrors the common crawler convention: 401 and 403 deny
/// everything, other 4xx responses mean no robots policy exists, and server
/// errors leave the policy unknown.
fn check_robots(client: &Client, url: &Url) -> Result<()> {
    let robots_url = url
        .join("/robots.txt")
        .map_err(|e| network_error("resolving robots.txt url", e))?;
    let response = client
        .get(robots_url.clone())
        .send()
        .map_err(|e| network_error(&format!("robots.txt at {robots_url} could not be checked"), e))?;

    let status = response.status();
    let allowed = if status.is_success() {
        let body = response
            .text()
            .map_err(|e| network_error("reading robots.txt", e))?;
        RobotsTxt::parse(&body).allows(USER_AGENT, url.path())
    } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        false
    } else if status.is_client_error() {
        true
    } else {
        return Err(AnalysisError::Network(format!(
            "robots.txt at {robots_url} could not be checked: status {status}"
        )));
    };

    if allowed {
        tracing::debug!("robots.txt permits {}", url);
        Ok(())
    } else {
        Err(AnalysisError::Network(format!(
            "fetching {url} disallowed by robots.txt"
        )))
    }
}

/// Fetch an article page as HTML, honoring robots.txt unless told otherwise
pub fn fetch_article(url: &str, skip_robots: bool) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| AnalysisError::format("url", format!("{url}: {e}")))?;
    let client = build_client()?;

    if skip_robots {
        tracing::warn!("skipping robots.txt check for {}", url);
    } else {
        check_robots(&client, &parsed)?;
    }

    let response = client
        .get(parsed)
        .send()
        .map_err(|e| network_error(&format!("fetching {url}"), e))?
        .error_for_status()
        .map_err(|e| network_error(&format!("fetching {url}"), e))?;
    response
        .text()
        .map_err(|e| network_error(&format!("reading {url}"), e))
}
