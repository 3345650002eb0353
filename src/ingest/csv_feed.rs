use std::cmp::Ordering;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DataFeed, SeriesInput};
use crate::error::{RaceError, RaceResult};

use super::ColorPalette;

/// How timeline labels are ordered in the resulting feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimelineOrder {
    /// Order of first appearance in the file.
    #[default]
    Appearance,
    /// Parsed dates ascending; unparsable labels follow in appearance order.
    Chronological,
}

/// Zero-based column positions of a long-format `time,label,value` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    pub time: usize,
    pub label: usize,
    pub value: usize,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            time: 0,
            label: 1,
            value: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvFeedOptions {
    pub columns: CsvColumns,
    pub timeline_order: TimelineOrder,
    pub palette: ColorPalette,
    pub delimiter: u8,
}

impl Default for CsvFeedOptions {
    fn default() -> Self {
        Self {
            columns: CsvColumns::default(),
            timeline_order: TimelineOrder::default(),
            palette: ColorPalette::default(),
            delimiter: b',',
        }
    }
}

impl CsvFeedOptions {
    #[must_use]
    pub fn with_columns(mut self, columns: CsvColumns) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_timeline_order(mut self, order: TimelineOrder) -> Self {
        self.timeline_order = order;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Reads long-format rows into a wide [`DataFeed`].
///
/// The header row names the axes: the time column header becomes the time
/// axis title and the value column header the value axis title. Rows too
/// short for the configured columns, or with an empty time or label, are
/// skipped. A (time, label) pair missing from the file reads as zero; a
/// repeated pair keeps its last value.
pub fn feed_from_csv_reader<Rd: Read>(reader: Rd, options: &CsvFeedOptions) -> RaceResult<DataFeed> {
    let columns = options.columns;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| RaceError::InvalidData(format!("failed to read csv header: {e}")))?
        .clone();
    let header_title = |index: usize| {
        headers
            .get(index)
            .filter(|title| !title.is_empty())
            .map(str::to_owned)
    };

    let mut samples: IndexMap<String, IndexMap<String, f64>> = IndexMap::new();
    let mut labels: IndexSet<String> = IndexSet::new();
    let mut skipped_rows = 0_usize;

    for (index, record) in csv_reader.records().enumerate() {
        // Row 1 is the header.
        let row = index + 2;
        let record =
            record.map_err(|e| RaceError::InvalidData(format!("csv row {row}: {e}")))?;

        let (Some(time), Some(label), Some(value_text)) = (
            record.get(columns.time),
            record.get(columns.label),
            record.get(columns.value),
        ) else {
            warn!(row, fields = record.len(), "skipping short csv row");
            skipped_rows += 1;
            continue;
        };
        if time.is_empty() || label.is_empty() {
            warn!(row, "skipping csv row with empty time or label");
            skipped_rows += 1;
            continue;
        }

        let value: f64 = value_text.parse().map_err(|_| {
            RaceError::InvalidData(format!(
                "csv row {row}: value `{value_text}` for `{label}` is not a number"
            ))
        })?;

        labels.insert(label.to_owned());
        samples
            .entry(time.to_owned())
            .or_default()
            .insert(label.to_owned(), value);
    }

    if samples.is_empty() {
        return Err(RaceError::InvalidData(
            "csv input contains no data rows".to_owned(),
        ));
    }

    let mut timeline: Vec<String> = samples.keys().cloned().collect();
    if options.timeline_order == TimelineOrder::Chronological {
        sort_chronologically(&mut timeline);
    }

    let series = labels
        .into_iter()
        .map(|label| {
            let values = timeline
                .iter()
                .map(|time| {
                    samples
                        .get(time)
                        .and_then(|row| row.get(&label))
                        .copied()
                        .unwrap_or(0.0)
                })
                .collect();
            let color = options.palette.color_for(&label);
            SeriesInput::new(label, color, values)
        })
        .collect::<Vec<_>>();

    debug!(
        frames = timeline.len(),
        series = series.len(),
        skipped_rows,
        order = ?options.timeline_order,
        "parsed csv data feed"
    );

    let mut feed = DataFeed::new(timeline, series);
    feed.time_axis_title = header_title(columns.time);
    feed.value_axis_title = header_title(columns.value);
    Ok(feed)
}

pub fn feed_from_csv_str(input: &str, options: &CsvFeedOptions) -> RaceResult<DataFeed> {
    feed_from_csv_reader(input.as_bytes(), options)
}

pub fn feed_from_csv_path(path: impl AsRef<Path>, options: &CsvFeedOptions) -> RaceResult<DataFeed> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        RaceError::InvalidData(format!("failed to open csv file `{}`: {e}", path.display()))
    })?;
    feed_from_csv_reader(file, options)
}

/// Parses `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY-MM` or `YYYY`.
#[must_use]
pub fn parse_timeline_date(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(label, format) {
            return Some(date);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if label.len() == 4 {
        let year: i32 = label.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}

fn sort_chronologically(timeline: &mut [String]) {
    let mut keyed: Vec<(Option<NaiveDate>, String)> = timeline
        .iter()
        .map(|label| (parse_timeline_date(label), label.clone()))
        .collect();
    // Stable: equal dates and all unparsable labels keep appearance order.
    keyed.sort_by(|left, right| match (left.0, right.0) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    for (slot, (_, label)) in timeline.iter_mut().zip(keyed) {
        *slot = label;
    }
}

#[cfg(test)]
mod tests {
    use super::parse_timeline_date;
    use chrono::NaiveDate;

    #[test]
    fn parses_supported_date_shapes() {
        assert_eq!(
            parse_timeline_date("2020-03-15"),
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert_eq!(
            parse_timeline_date("2020/03/15"),
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert_eq!(parse_timeline_date("2020-03"), NaiveDate::from_ymd_opt(2020, 3, 1));
        assert_eq!(parse_timeline_date("1999"), NaiveDate::from_ymd_opt(1999, 1, 1));
        assert_eq!(parse_timeline_date("Q1 2020"), None);
    }
}
