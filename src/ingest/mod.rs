//! Adapters turning external tabular data into a [`DataFeed`](crate::core::DataFeed).

mod csv_feed;
mod palette;

pub use csv_feed::{
    CsvColumns, CsvFeedOptions, TimelineOrder, feed_from_csv_path, feed_from_csv_reader,
    feed_from_csv_str, parse_timeline_date,
};
pub use palette::ColorPalette;
