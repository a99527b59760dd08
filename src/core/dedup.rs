use crate::core::platform::Message;

/// Decide whether `candidate` is already present in the target's recent
/// window.
///
/// Text messages compare by exact text equality. Media-only messages
/// compare by media descriptor plus sender id, since re-uploads of the
/// same file by different senders are distinct posts. An empty window is
/// never a duplicate. Any single match suffices; order is irrelevant.
pub fn is_duplicate(candidate: &Message, window: &[Message]) -> bool {
    match candidate.text.as_deref() {
        Some(text) => window.iter().any(|m| m.text.as_deref() == Some(text)),
        None => window
            .iter()
            .any(|m| m.media == candidate.media && m.sender_id == candidate.sender_id),
    }
}
