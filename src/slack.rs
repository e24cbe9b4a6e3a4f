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

use crate::errors::DeliveryError;
use crate::report::Report;
use log::debug;
use reqwest::Url;

/// Slack incoming webhook client
#[derive(Clone)]
pub struct Slack {
    client: reqwest::Client,
    webhook_url: String,
}

impl Slack {
    pub fn new(webhook_url: &str) -> Slack {
        Slack {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }

    /// Posts the report as a form encoded `payload` field holding its JSON.
    ///
    /// A non successful status is reported back but never retried.
    pub async fn send(&self, report: &Report) -> Result<(), DeliveryError> {
        let url = Url::parse(&self.webhook_url)?;
        let payload = serde_json::to_string(report).map_err(|e| {
            DeliveryError::Payload(e.to_string())
        })?;

        let response = self
            .client
            .post(url)
            .form(&[("payload", payload)])
            .send()
            .await?;

        debug!("webhook response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DeliveryError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}
