use crate::models::Channel;

/// Case-insensitive substring filter over channel name and group.
/// An empty or whitespace-only query returns the list unchanged; otherwise
/// the result is an order-preserving subsequence of `channels`.
pub fn filter_channels(channels: &[Channel], query: &str) -> Vec<Channel> {
    let query = query.trim();
    if query.is_empty() {
        return channels.to_vec();
    }
    let needle = query.to_lowercase();
    channels
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.group
                    .as_deref()
                    .is_some_and(|g| g.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
