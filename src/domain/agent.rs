//! User-agent classification for link-preview crawlers.

/// Product tokens of known automated preview fetchers, lower-cased.
///
/// Matching is case-insensitive substring containment. Append new tokens here;
/// no prefix, suffix or regex semantics are applied. Only crawler tokens
/// belong here: app names such as `Snapchat` or `Pinterest` also appear in
/// the user agents of those apps' built-in browsers.
pub const BOT_SIGNATURES: &[&str] = &[
    // Social networks
    "facebookexternalhit",
    "facebot",
    "facebookcatalog",
    "meta-externalagent",
    "metainspector",
    "twitterbot",
    "linkedinbot",
    "pinterestbot",
    "redditbot",
    "vkshare",
    // Messaging apps
    "whatsapp",
    "telegrambot",
    "slackbot",
    "slack-imgproxy",
    "discordbot",
    "skypeuripreview",
    "line-poker",
    "snap url preview",
    // Generic crawlers and embed services
    "googlebot",
    "bingbot",
    "applebot",
    "duckduckbot",
    "yandexbot",
    "embedly",
    "iframely",
    "crawler",
    "spider",
];

/// Who is asking for a short link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentClass {
    /// An automated preview fetcher that wants metadata, not navigation.
    Bot,
    /// Anything else, including empty and unrecognized user agents.
    Human,
}

impl AgentClass {
    /// Classifies a raw `User-Agent` header value.
    pub fn classify(user_agent: &str) -> Self {
        if matched_signature(user_agent).is_some() {
            AgentClass::Bot
        } else {
            AgentClass::Human
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentClass::Bot => "bot",
            AgentClass::Human => "human",
        }
    }
}

/// Returns the first signature contained in `user_agent`, if any.
pub fn matched_signature(user_agent: &str) -> Option<&'static str> {
    if user_agent.is_empty() {
        return None;
    }

    let ua = user_agent.to_ascii_lowercase();
    BOT_SIGNATURES.iter().copied().find(|sig| ua.contains(sig))
}
