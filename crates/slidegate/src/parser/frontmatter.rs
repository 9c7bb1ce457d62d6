use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_LOCKOUT_MINUTES: u64 = 5;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PresentationMeta {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub footer: Option<String>,
    pub access: Option<AccessMeta>,
    pub characters: Vec<RoleMeta>,
}

/// Access gate settings. The digest is SHA-256 over `code + salt`, hex encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessMeta {
    #[serde(default)]
    pub digest: Option<String>,

    #[serde(default)]
    pub salt: String,

    /// 1-based slide numbers.
    #[serde(default)]
    pub sensitive: Vec<usize>,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_lockout_minutes")]
    pub lockout_minutes: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleMeta {
    pub role: String,
    #[serde(default)]
    pub options: Vec<CharacterOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterOption {
    pub name: String,
    pub image: String,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_lockout_minutes() -> u64 {
    DEFAULT_LOCKOUT_MINUTES
}

/// Split YAML front matter (delimited by `---` lines at the very top) from the body.
/// A document without front matter yields default metadata and the full text.
pub fn extract(content: &str) -> Result<(PresentationMeta, String)> {
    let content = content.replace("\r\n", "\n");
    let Some(rest) = content.strip_prefix("---\n") else {
        return Ok((PresentationMeta::default(), content));
    };

    let Some(end) = find_closing_fence(rest) else {
        return Ok((PresentationMeta::default(), content));
    };

    let yaml = &rest[..end];
    let body = rest[end..]
        .split_once('\n')
        .map(|(_, b)| b)
        .unwrap_or("")
        .to_string();

    let meta = if yaml.trim().is_empty() {
        PresentationMeta::default()
    } else {
        serde_yaml::from_str(yaml).context("Invalid front matter")?
    };
    Ok((meta, body))
}

fn find_closing_fence(rest: &str) -> Option<usize> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}
