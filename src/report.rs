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

use crate::beanstalk::EnvironmentDescription;
use crate::message::NotificationRecord;
use chrono::SecondsFormat;
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct Field {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

impl Field {
    fn new(title: &str, value: String) -> Field {
        Field {
            title: title.into(),
            value,
            short: None,
        }
    }

    fn short(title: &str, value: String) -> Field {
        Field {
            title: title.into(),
            value,
            short: Some(true),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Attachment {
    pub color: String,
    pub text: String,
    pub fields: Vec<Field>,
}

/// Slack incoming webhook message
#[derive(Debug, Serialize, PartialEq)]
pub struct Report {
    pub channel: String,
    pub username: String,
    pub attachments: Vec<Attachment>,
}

/// Everything a report needs besides the notification itself
pub struct Context<'a> {
    pub channel: &'a str,
    pub username: &'a str,
    pub console_region: &'a str,
    pub environment: &'a EnvironmentDescription,
}

impl Report {
    pub fn new(record: &NotificationRecord, context: Context) -> Report {
        let console = console_url(context.console_region);

        let fields = vec![
            Field::new(
                "Version Label",
                context.environment.version_label.to_string(),
            ),
            Field::short(
                "Application",
                format!(
                    "<{}#/application/overview?applicationName={}|{}>",
                    console, record.application_name, record.application_name
                ),
            ),
            Field::short(
                "Environment",
                format!(
                    "<{}#/environment/dashboard?applicationName={}&environmentId={}|{}>",
                    console,
                    record.application_name,
                    context.environment.environment_id,
                    record.environment_name
                ),
            ),
            Field::new("Environment URL", record.environment_url.to_string()),
            Field::new(
                "Timestamp",
                record.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        ];

        Report {
            channel: context.channel.into(),
            username: context.username.into(),
            attachments: vec![Attachment {
                color: record.severity().to_string(),
                text: record.message.to_string(),
                fields,
            }],
        }
    }

    pub fn log(&self) {
        info!("__START__");
        for attachment in &self.attachments {
            info!("[{}] {}", attachment.color, attachment.text);
            for field in &attachment.fields {
                info!("‣ {}: {}", field.title, field.value);
            }
        }
        info!("__END__");
    }
}

fn console_url(region: &str) -> String {
    format!(
        "https://{}.console.aws.amazon.com/elasticbeanstalk/home?region={}",
        region, region
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::parse;
    use serde_json::json;

    fn sample_report() -> Report {
        let record = parse("Timestamp: Wed Jan 02 15:04:05 UTC 2019\nMessage: Failed to deploy application.\nEnvironment: prod\nApplication: myapp\nEnvironment URL: http://example.com\n").unwrap();
        let environment = EnvironmentDescription {
            version_label: "app-v42".into(),
            environment_id: "e-abc123".into(),
        };
        Report::new(
            &record,
            Context {
                channel: "#random",
                username: "Elastic Beanstalk",
                console_region: "ap-northeast-1",
                environment: &environment,
            },
        )
    }

    #[test]
    fn it_builds_a_slack_payload() {
        let report = sample_report();
        let expected = json!({
            "channel": "#random",
            "username": "Elastic Beanstalk",
            "attachments": [{
                "color": "danger",
                "text": "Failed to deploy application.",
                "fields": [
                    { "title": "Version Label", "value": "app-v42" },
                    {
                        "title": "Application",
                        "value": "<https://ap-northeast-1.console.aws.amazon.com/elasticbeanstalk/home?region=ap-northeast-1#/application/overview?applicationName=myapp|myapp>",
                        "short": true
                    },
                    {
                        "title": "Environment",
                        "value": "<https://ap-northeast-1.console.aws.amazon.com/elasticbeanstalk/home?region=ap-northeast-1#/environment/dashboard?applicationName=myapp&environmentId=e-abc123|prod>",
                        "short": true
                    },
                    { "title": "Environment URL", "value": "http://example.com" },
                    { "title": "Timestamp", "value": "2019-01-02T15:04:05Z" }
                ]
            }]
        });
        assert_eq!(serde_json::to_value(&report).unwrap(), expected);
    }

    #[test]
    fn it_links_the_application_by_name() {
        let report = sample_report();
        let application = &report.attachments[0].fields[1];
        assert!(application.value.contains("applicationName=myapp|"));
        assert!(application.value.ends_with("|myapp>"));
    }
}
