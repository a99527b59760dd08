use std::fmt;

/// Canonical form of a channel reference as stored in a session record.
///
/// Numeric ids (including the negative ids Telegram-style platforms use for
/// broadcast channels and supergroups) and plain names are both accepted;
/// the stored value decides which one a reference is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ChannelHandle {
    Id(i64),
    Name(String),
}

impl fmt::Display for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelHandle::Id(id) => write!(f, "{id}"),
            ChannelHandle::Name(name) => f.write_str(name),
        }
    }
}

/// Normalize a raw configuration value into a canonical handle.
///
/// Empty or whitespace-only input yields `None` and the caller skips the
/// pair. A trimmed value that is all decimal digits after at most one
/// leading `-` parses as a signed id; anything else (including numbers too
/// large for `i64`) falls back to the name branch unchanged.
pub fn normalize(raw: &str) -> Option<ChannelHandle> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        && let Ok(id) = trimmed.parse::<i64>()
    {
        return Some(ChannelHandle::Id(id));
    }

    Some(ChannelHandle::Name(trimmed.to_string()))
}
