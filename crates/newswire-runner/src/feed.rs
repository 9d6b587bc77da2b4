//! RSS 2.0 feed rendering.
//!
//! Every headline becomes one `<item>` sharing the generation timestamp as
//! its `pubDate`. GUIDs combine the Unix timestamp with the item's position,
//! so they are unique within a run and across runs a second or more apart.
//! Text is escaped by the `rss` writer, so `&` and `<` in a headline still
//! yield well-formed XML.

use std::path::Path;

use chrono::{DateTime, Utc};
use rss::{Channel, Guid, Item};
use tracing::debug;

use crate::config::ChannelConfig;
use crate::error::RunnerError;

/// RFC-822 date format used for `pubDate`, always in GMT.
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Build the GUID for the headline at `index`.
pub fn item_guid(generated_at: DateTime<Utc>, index: usize) -> String {
    format!("future-{}-{index}", generated_at.timestamp())
}

/// Format `generated_at` as an RFC-822 `pubDate`.
pub fn pub_date(generated_at: DateTime<Utc>) -> String {
    generated_at.format(PUB_DATE_FORMAT).to_string()
}

/// Render `headlines` into an RSS 2.0 document.
///
/// # Errors
///
/// Returns [`RunnerError::Feed`] if the XML writer fails.
pub fn build_feed(
    channel: &ChannelConfig,
    headlines: &[String],
    generated_at: DateTime<Utc>,
) -> Result<String, RunnerError> {
    let date = pub_date(generated_at);

    let items: Vec<Item> = headlines
        .iter()
        .enumerate()
        .map(|(index, headline)| {
            let mut guid = Guid::default();
            guid.set_value(item_guid(generated_at, index));
            guid.set_permalink(false);

            let mut item = Item::default();
            item.set_title(headline.clone());
            item.set_pub_date(date.clone());
            item.set_guid(guid);
            item
        })
        .collect();

    let mut rss_channel = Channel::default();
    rss_channel.set_title(channel.title.clone());
    rss_channel.set_description(channel.description.clone());
    rss_channel.set_link(channel.link.clone());
    rss_channel.set_items(items);

    let bytes = rss_channel
        .pretty_write_to(Vec::new(), b' ', 2)
        .map_err(|e| RunnerError::Feed(format!("failed to write RSS document: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| RunnerError::Feed(format!("RSS document is not UTF-8: {e}")))
}

/// Write the rendered feed to `path`, replacing any previous feed.
///
/// # Errors
///
/// Returns [`RunnerError::Io`] if the file cannot be written.
pub fn write_feed(path: &Path, xml: &str) -> Result<(), RunnerError> {
    std::fs::write(path, xml).map_err(|source| RunnerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = xml.len(), "feed written");
    Ok(())
}
