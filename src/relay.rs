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

use crate::beanstalk::EnvironmentLookup;
use crate::config::Config;
use crate::errors::RelayError;
use crate::event::Envelope;
use crate::message;
use crate::report::{Context, Report};
use crate::slack::Slack;
use log::{debug, info, warn};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Delivered,
    Undelivered,
    Skipped,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Undelivered => write!(f, "undelivered"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Clone)]
pub struct Relay {
    lookup: Arc<dyn EnvironmentLookup>,
    slack: Slack,
    channel: String,
    username: String,
    console_region: String,
}

impl Relay {
    pub fn new(config: &Config, lookup: Arc<dyn EnvironmentLookup>) -> Relay {
        Relay {
            lookup,
            slack: Slack::new(&config.slack_webhook_url),
            channel: config.slack_channel.to_string(),
            username: config.slack_username.to_string(),
            console_region: config.console_region.to_string(),
        }
    }

    /// Parse, classify, look up and deliver the first record of the envelope
    pub async fn relay(&self, envelope: &Envelope) -> Result<Status, RelayError> {
        // 1st. only the first record is relayed
        let sns = match envelope.first() {
            Some(sns) => sns,
            None => {
                warn!("envelope without records, nothing to relay");
                return Ok(Status::Skipped);
            }
        };
        debug!(
            "sns subject: {:?} timestamp: {:?}",
            sns.subject, sns.timestamp
        );

        // 2nd. extract the notification fields
        let record = match message::parse(&sns.message) {
            Some(record) => record,
            None => {
                warn!("skipping unrecognized notification: {:?}", sns.message);
                return Ok(Status::Skipped);
            }
        };
        info!(
            "{} notification from {}/{}",
            record.severity(),
            record.application_name,
            record.environment_name
        );

        // 3rd. fetch the deployed version and environment id
        let environment = self
            .lookup
            .describe_environment(&record.application_name, &record.environment_name)
            .await?;

        // 4th. build and deliver the report
        let report = Report::new(
            &record,
            Context {
                channel: &self.channel,
                username: &self.username,
                console_region: &self.console_region,
                environment: &environment,
            },
        );
        report.log();

        match self.slack.send(&report).await {
            Ok(()) => {
                info!("notification delivered to {}", self.channel);
                Ok(Status::Delivered)
            }
            Err(e) => {
                warn!("notification not delivered: {}", e);
                Ok(Status::Undelivered)
            }
        }
    }
}
