use crate::models::Channel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use url::Url;

static ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"([A-Za-z0-9-]+)="([^"]*)""#).unwrap());

/// Directive state carried between an #EXTINF line and the URL line that
/// consumes it. Any URL line (accepted or not) discards it.
struct PendingEntry {
    name: String,
    attributes: HashMap<String, String>,
}

/// Parse extended-M3U playlist text into channels.
///
/// Never fails: malformed lines only reduce the number of channels emitted.
/// Entries whose URL is not absolute https are dropped entirely.
pub fn parse(text: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut pending: Option<PendingEntry> = None;

    for raw_line in text.split(['\r', '\n']) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("#EXTINF") {
            // Name is everything after the first comma; a directive without
            // a comma gets the placeholder name. A later directive replaces
            // any earlier unconsumed one.
            let (prefix, name) = match line.split_once(',') {
                Some((prefix, rest)) => (prefix, rest.trim().to_string()),
                None => (line, "Unknown".to_string()),
            };
            pending = Some(PendingEntry {
                name,
                attributes: parse_attributes(prefix),
            });
            continue;
        }

        if line.starts_with('#') {
            // Comment; leaves the pending directive intact.
            continue;
        }

        // URL candidate. Whatever happens next, the pending entry is spent.
        let entry = pending.take();
        let Ok(url) = Url::parse(line) else {
            continue;
        };
        if url.scheme() != "https" {
            continue;
        }

        let (name, attributes) = match entry {
            Some(info) => (info.name, info.attributes),
            None => (String::new(), HashMap::new()),
        };
        let name = if name.is_empty() {
            "Stream".to_string()
        } else {
            name
        };
        let logo_url = attributes
            .get("tvg-logo")
            .and_then(|v| Url::parse(v).ok());
        let group = attributes.get("group-title").cloned();
        channels.push(Channel::new(name, url, logo_url, group));
    }

    channels
}

fn parse_attributes(prefix: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();
    for caps in ATTR_RE.captures_iter(prefix) {
        attributes.insert(caps[1].to_string(), caps[2].to_string());
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_channels() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn parses_directive_with_attributes() {
        let text = "#EXTINF:-1 tvg-logo=\"https://logo.example/l.png\" group-title=\"News\",CNN\nhttps://stream.example/cnn\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "CNN");
        assert_eq!(channels[0].url.as_str(), "https://stream.example/cnn");
        assert_eq!(
            channels[0].logo_url.as_ref().map(|u| u.as_str()),
            Some("https://logo.example/l.png")
        );
        assert_eq!(channels[0].group.as_deref(), Some("News"));
    }

    #[test]
    fn non_https_url_is_dropped_and_clears_pending() {
        let text = "#EXTINF:-1 group-title=\"News\",CNN\nhttp://stream.example/cnn\nhttps://stream.example/other\n";
        let channels = parse(text);
        // The directive was consumed by the rejected http line, so the
        // following https line has no name to use.
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Stream");
        assert_eq!(channels[0].group, None);
    }

    #[test]
    fn empty_name_after_comma_defaults_to_stream() {
        let channels = parse("#EXTINF:-1,\nhttps://stream.example/a\n");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Stream");
    }

    #[test]
    fn directive_without_comma_is_named_unknown() {
        let channels = parse("#EXTINF:-1\nhttps://stream.example/a\n");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Unknown");
    }

    #[test]
    fn url_without_directive_is_named_stream() {
        let channels = parse("https://stream.example/bare\n");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Stream");
        assert_eq!(channels[0].logo_url, None);
        assert_eq!(channels[0].group, None);
    }

    #[test]
    fn unknown_attributes_are_inert() {
        let text = "#EXTINF:-1 tvg-id=\"x\" catchup=\"default\",Ch\nhttps://stream.example/ch\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Ch");
        assert_eq!(channels[0].logo_url, None);
        assert_eq!(channels[0].group, None);
    }

    #[test]
    fn bad_logo_url_is_dropped_silently() {
        let channels = parse("#EXTINF:-1 tvg-logo=\"\",Ch\nhttps://stream.example/ch\n");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].logo_url, None);
    }

    #[test]
    fn consecutive_directives_keep_only_the_latest() {
        let text = "#EXTINF:-1,First\n#EXTINF:-1,Second\nhttps://stream.example/x\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Second");
    }

    #[test]
    fn comments_do_not_erase_pending_state() {
        let text = "#EXTINF:-1,Kept\n#EXTGRP:whatever\n# just a note\nhttps://stream.example/x\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Kept");
    }

    #[test]
    fn trailing_directive_without_url_emits_nothing() {
        let channels = parse("https://stream.example/a\n#EXTINF:-1,Dangling\n");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Stream");
    }

    #[test]
    fn duplicate_attribute_keys_last_wins() {
        let text = "#EXTINF:-1 group-title=\"Old\" group-title=\"New\",Ch\nhttps://stream.example/ch\n";
        let channels = parse(text);
        assert_eq!(channels[0].group.as_deref(), Some("New"));
    }

    #[test]
    fn handles_crlf_and_blank_lines() {
        let text = "\r\n#EXTINF:-1,Ch\r\nhttps://stream.example/ch\r\n\r\n";
        let channels = parse(text);
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].name, "Ch");
    }

    #[test]
    fn preserves_playlist_order() {
        let text = "#EXTINF:-1,A\nhttps://s.example/a\n#EXTINF:-1,B\nhttps://s.example/b\n";
        let names: Vec<String> = parse(text).into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "B"]);
    }
}
