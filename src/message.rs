// The MIT License (MIT)
// Copyright (c) 2023 IBP.network
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::severity::Severity;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

/// Day-of-week, month, day, time, literal zone and year, e.g. `Wed Jan 02 15:04:05 UTC 2019`
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

lazy_static! {
    // Labels must appear in this exact order, each value ends at the first newline
    static ref MESSAGE_REGEX: Regex = Regex::new(
        r"(?s)Timestamp:\s(?P<timestamp>.*?)\n.*?Message:\s(?P<message>.*?)\n.*?Environment:\s(?P<environment>.*?)\n.*?Application:\s(?P<application>.*?)\n.*?Environment URL:\s(?P<environment_url>.*?)\n"
    )
    .unwrap();
    // chrono alone accepts unpadded days and extra spaces, the layout is fixed
    static ref TIMESTAMP_REGEX: Regex =
        Regex::new(r"^[A-Za-z]{3} [A-Za-z]{3} \d{2} \d{2}:\d{2}:\d{2} UTC \d{4}$").unwrap();
}

/// A Beanstalk notification extracted from the SNS message body
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub environment_name: String,
    pub application_name: String,
    pub environment_url: String,
}

impl NotificationRecord {
    /// Severity is always derived from the current message text
    pub fn severity(&self) -> Severity {
        Severity::from_message(&self.message)
    }
}

/// Parses the `Label: value` lines published by Elastic Beanstalk.
///
/// Returns `None` when the text does not carry the five expected labels in order
/// or when the timestamp is not in the expected format.
pub fn parse(text: &str) -> Option<NotificationRecord> {
    let caps = match MESSAGE_REGEX.captures(text) {
        Some(caps) => caps,
        None => {
            debug!("message does not match the expected notification layout");
            return None;
        }
    };

    let timestamp = parse_timestamp(&caps["timestamp"])?;

    Some(NotificationRecord {
        timestamp,
        message: caps["message"].to_string(),
        environment_name: caps["environment"].to_string(),
        application_name: caps["application"].to_string(),
        environment_url: caps["environment_url"].to_string(),
    })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if !TIMESTAMP_REGEX.is_match(value) {
        debug!("unexpected timestamp layout '{}'", value);
        return None;
    }
    match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        Ok(naive) => Some(Utc.from_utc_datetime(&naive)),
        Err(e) => {
            debug!("invalid timestamp '{}': {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Timestamp: Wed Jan 02 15:04:05 UTC 2019\nMessage: Environment health has transitioned from Ok to Warning.\nEnvironment: prod\nApplication: myapp\nEnvironment URL: http://example.com\n";

    fn to_text(record: &NotificationRecord) -> String {
        format!(
            "Timestamp: {}\nMessage: {}\nEnvironment: {}\nApplication: {}\nEnvironment URL: {}\n",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.message,
            record.environment_name,
            record.application_name,
            record.environment_url
        )
    }

    #[test]
    fn it_parses_a_beanstalk_notification() {
        let record = parse(SAMPLE).unwrap();
        assert_eq!(
            record.timestamp,
            Utc.with_ymd_and_hms(2019, 1, 2, 15, 4, 5).unwrap()
        );
        assert_eq!(
            record.message,
            "Environment health has transitioned from Ok to Warning."
        );
        assert_eq!(record.environment_name, "prod");
        assert_eq!(record.application_name, "myapp");
        assert_eq!(record.environment_url, "http://example.com");
        assert_eq!(record.severity(), Severity::Warning);
    }

    #[test]
    fn it_reparses_a_rendered_record_identically() {
        let record = parse(SAMPLE).unwrap();
        let reparsed = parse(&to_text(&record)).unwrap();
        assert_eq!(record, reparsed);
        assert_eq!(to_text(&reparsed), SAMPLE);
    }

    #[test]
    fn it_skips_lines_between_labels() {
        let text = "Timestamp: Wed Jan 02 15:04:05 UTC 2019\nMessage: Adding instance 'i-0abc' to your environment.\n\nEnvironment: prod\nApplication: myapp\n\nEnvironment URL: http://example.com\nRequestId: 1234\nNotificationProcessId: 5678\n";
        let record = parse(text).unwrap();
        assert_eq!(
            record.message,
            "Adding instance 'i-0abc' to your environment."
        );
        assert_eq!(record.environment_url, "http://example.com");
        assert_eq!(record.severity(), Severity::Info);
    }

    #[test]
    fn it_returns_none_when_labels_are_out_of_order() {
        let text = "Timestamp: Wed Jan 02 15:04:05 UTC 2019\nMessage: hello\nApplication: myapp\nEnvironment: prod\nEnvironment URL: http://example.com\n";
        assert_eq!(parse(text), None);
    }

    #[test]
    fn it_returns_none_without_the_trailing_newline() {
        assert_eq!(parse(SAMPLE.trim_end()), None);
    }

    #[test]
    fn it_returns_none_for_unrelated_text() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("{\"AlarmName\":\"cpu\"}"), None);
    }

    #[test]
    fn it_returns_none_for_a_mismatched_timestamp() {
        let text = SAMPLE.replace("Wed Jan 02 15:04:05 UTC 2019", "2019-01-02T15:04:05Z");
        assert_eq!(parse(&text), None);
        let text = SAMPLE.replace("UTC", "JST");
        assert_eq!(parse(&text), None);
    }

    #[test]
    fn it_requires_the_fixed_timestamp_layout() {
        for timestamp in &[
            "Wed Jan 2 15:04:05 UTC 2019",
            "Wed Jan  2 15:04:05 UTC 2019",
            "Wed Jan 02 15:04:05  UTC 2019",
            "Wednesday Jan 02 15:04:05 UTC 2019",
            "Wed January 02 15:04:05 UTC 2019",
            "Thu Jan 02 15:04:05 UTC 2019",
            "Wed Jan 02 15:04:05 UTC 2019 ",
        ] {
            let text = SAMPLE.replace("Wed Jan 02 15:04:05 UTC 2019", timestamp);
            assert_eq!(parse(&text), None, "{}", timestamp);
        }
    }

    #[test]
    fn it_matches_day_and_month_names_case_insensitively() {
        let text = SAMPLE.replace("Wed Jan 02", "wed jan 02");
        assert_eq!(
            parse(&text).unwrap().timestamp,
            Utc.with_ymd_and_hms(2019, 1, 2, 15, 4, 5).unwrap()
        );
    }
}
