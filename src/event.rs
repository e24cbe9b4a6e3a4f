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

// Inbound SNS envelope. Keys are accepted as published by the platform
// (PascalCase) or in lowercase.
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Envelope {
    #[serde(rename = "Records", alias = "records", default)]
    pub records: Vec<Record>,
}

#[derive(Debug, Deserialize)]
pub struct Record {
    #[serde(rename = "Sns", alias = "sns")]
    pub sns: Sns,
}

#[derive(Debug, Deserialize)]
pub struct Sns {
    #[serde(rename = "Subject", alias = "subject", default)]
    pub subject: Option<String>,
    #[serde(rename = "Message", alias = "message")]
    pub message: String,
    #[serde(rename = "Timestamp", alias = "timestamp", default)]
    pub timestamp: Option<String>,
}

impl Envelope {
    /// Only the first record is ever relayed
    pub fn first(&self) -> Option<&Sns> {
        self.records.first().map(|r| &r.sns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_deserializes_an_sns_event() {
        let data = r#"{
            "Records": [
                {
                    "EventSource": "aws:sns",
                    "Sns": {
                        "Type": "Notification",
                        "Subject": "AWS Elastic Beanstalk Notification - New application version was deployed",
                        "Message": "Timestamp: Wed Jan 02 15:04:05 UTC 2019\nMessage: hello\n",
                        "Timestamp": "2019-01-02T15:04:06.123Z"
                    }
                },
                {
                    "Sns": { "Message": "second" }
                }
            ]
        }"#;
        let envelope: Envelope = serde_json::from_str(data).unwrap();
        assert_eq!(envelope.records.len(), 2);
        let sns = envelope.first().unwrap();
        assert!(sns.message.starts_with("Timestamp: "));
        assert_eq!(sns.timestamp.as_deref(), Some("2019-01-02T15:04:06.123Z"));
    }

    #[test]
    fn it_deserializes_lowercase_keys() {
        let data = r#"{"records":[{"sns":{"subject":"s","message":"m","timestamp":"t"}}]}"#;
        let envelope: Envelope = serde_json::from_str(data).unwrap();
        assert_eq!(envelope.first().unwrap().message, "m");
        assert_eq!(envelope.first().unwrap().subject.as_deref(), Some("s"));
    }

    #[test]
    fn it_has_nothing_to_relay_without_records() {
        let envelope: Envelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.first().is_none());
    }
}
