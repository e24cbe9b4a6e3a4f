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

use crate::config::Config;
use crate::errors::LookupError;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_elasticbeanstalk::{config::Region, error::DisplayErrorContext, Client};
use log::debug;

/// The deployment details the Slack notification needs about an environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentDescription {
    pub version_label: String,
    pub environment_id: String,
}

#[async_trait]
pub trait EnvironmentLookup: Send + Sync {
    async fn describe_environment(
        &self,
        application_name: &str,
        environment_name: &str,
    ) -> Result<EnvironmentDescription, LookupError>;
}

/// Elastic Beanstalk backed lookup
#[derive(Clone)]
pub struct Beanstalk {
    client: Client,
}

impl Beanstalk {
    pub async fn new(config: &Config) -> Beanstalk {
        let region_provider =
            RegionProviderChain::first_try(config.aws_region.clone().map(Region::new))
                .or_default_provider();
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        Beanstalk {
            client: Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl EnvironmentLookup for Beanstalk {
    async fn describe_environment(
        &self,
        application_name: &str,
        environment_name: &str,
    ) -> Result<EnvironmentDescription, LookupError> {
        debug!(
            "describe environment {} of application {}",
            environment_name, application_name
        );

        let output = self
            .client
            .describe_environments()
            .application_name(application_name)
            .environment_names(environment_name)
            .send()
            .await
            .map_err(|e| LookupError::Sdk(DisplayErrorContext(e).to_string()))?;

        let environment =
            output
                .environments()
                .first()
                .ok_or_else(|| LookupError::NotFound {
                    application: application_name.to_string(),
                    environment: environment_name.to_string(),
                })?;

        Ok(EnvironmentDescription {
            version_label: environment
                .version_label()
                .ok_or(LookupError::MissingField("version label"))?
                .to_string(),
            environment_id: environment
                .environment_id()
                .ok_or(LookupError::MissingField("environment id"))?
                .to_string(),
        })
    }
}
