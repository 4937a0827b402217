mod feed;
mod suggest;

pub use feed::{available_commands, feed, AutocompleteFeed, FeedEntry};
pub use suggest::{slash_filter, suggest};
