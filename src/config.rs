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

// Load environment variables into a Config struct
//
// Envy is a library for deserializing environment variables into
// typesafe structs
//
// Dotenv loads environment variables from a .env file, if available,
// and mashes those with the actual environment variables provided by
// the operative system.
//
// Set Config struct into a CONFIG lazy_static to avoid multiple processing.
//
use clap::{App, Arg};
use dotenv;
use lazy_static::lazy_static;
use log::info;
use serde::Deserialize;
use std::env;

// Set Config struct into a CONFIG lazy_static to avoid multiple processing
lazy_static! {
    pub static ref CONFIG: Config = get_config();
}

/// provides default value for slack_webhook_url if BNOTIFY_SLACK_WEBHOOK_URL env var is not set
fn default_slack_webhook_url() -> String {
    "https://hooks.slack.com/services/XXXXX".into()
}

/// provides default value for slack_channel if BNOTIFY_SLACK_CHANNEL env var is not set
fn default_slack_channel() -> String {
    "#random".into()
}

/// provides default value for slack_username if BNOTIFY_SLACK_USERNAME env var is not set
fn default_slack_username() -> String {
    "Elastic Beanstalk".into()
}

/// provides default value for console_region if BNOTIFY_CONSOLE_REGION env var is not set
fn default_console_region() -> String {
    "ap-northeast-1".into()
}

/// provides default value for api_host if BNOTIFY_API_HOST env var is not set
fn default_api_host() -> String {
    "127.0.0.1".into()
}

/// provides default value for api_port if BNOTIFY_API_PORT env var is not set
fn default_api_port() -> u16 {
    5010
}

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    // slack configuration
    #[serde(default = "default_slack_webhook_url")]
    pub slack_webhook_url: String,
    #[serde(default = "default_slack_channel")]
    pub slack_channel: String,
    #[serde(default = "default_slack_username")]
    pub slack_username: String,
    // aws configuration
    #[serde(default = "default_console_region")]
    pub console_region: String,
    #[serde(default)]
    pub aws_region: Option<String>,
    // general configuration
    #[serde(default)]
    pub event_file: Option<String>,
    #[serde(default)]
    pub is_debug: bool,
    // api
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

/// Inject dotenv and env vars into the Config struct
fn get_config() -> Config {
    // Define CLI flags with clap
    let matches = App::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .author(env!("CARGO_PKG_AUTHORS"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .arg(
      Arg::with_name("slack-webhook-url")
        .long("slack-webhook-url")
        .takes_value(true)
        .help("Slack incoming webhook URL where notifications are posted. e.g. 'https://hooks.slack.com/services/T000/B000/XXXX'"))
    .arg(
      Arg::with_name("slack-channel")
        .long("slack-channel")
        .takes_value(true)
        .help("Slack channel the notifications are posted to. (default: '#random')"))
    .arg(
      Arg::with_name("console-region")
        .long("console-region")
        .takes_value(true)
        .help("AWS region used to build the Elastic Beanstalk console links. (default: 'ap-northeast-1')"))
    .arg(
      Arg::with_name("aws-region")
        .long("aws-region")
        .takes_value(true)
        .help("AWS region of the Elastic Beanstalk API. If not set the default AWS provider chain is used."))
    .arg(
      Arg::with_name("event-file")
        .long("event-file")
        .takes_value(true)
        .value_name("FILE")
        .help("Relay the SNS event stored in FILE once and exit, instead of starting the http server."))
    .arg(
        Arg::with_name("debug")
          .long("debug")
          .help("Prints debug information verbosely."))
    .arg(
      Arg::with_name("config-path")
        .short("c")
        .long("config-path")
        .takes_value(true)
        .value_name("FILE")
        .default_value(".env")
        .help(
          "Sets a custom config file path. The config file contains the relay configuration variables.",
        ),
    )
    .get_matches();

    // Try to load configuration from file first
    let config_path = matches.value_of("config-path").unwrap_or(".env");

    match dotenv::from_filename(&config_path).ok() {
        Some(_) => info!("Loading configuration from {} file", &config_path),
        None => {
            let config_path = env::var("BNOTIFY_CONFIG_FILENAME").unwrap_or(".env".to_string());
            if let Some(_) = dotenv::from_filename(&config_path).ok() {
                info!("Loading configuration from {} file", &config_path);
            }
        }
    }

    if let Some(slack_webhook_url) = matches.value_of("slack-webhook-url") {
        env::set_var("BNOTIFY_SLACK_WEBHOOK_URL", slack_webhook_url);
    }

    if let Some(slack_channel) = matches.value_of("slack-channel") {
        env::set_var("BNOTIFY_SLACK_CHANNEL", slack_channel);
    }

    if let Some(console_region) = matches.value_of("console-region") {
        env::set_var("BNOTIFY_CONSOLE_REGION", console_region);
    }

    if let Some(aws_region) = matches.value_of("aws-region") {
        env::set_var("BNOTIFY_AWS_REGION", aws_region);
    }

    if let Some(event_file) = matches.value_of("event-file") {
        env::set_var("BNOTIFY_EVENT_FILE", event_file);
    }

    if matches.is_present("debug") {
        env::set_var("BNOTIFY_IS_DEBUG", "true");
    }

    match envy::prefixed("BNOTIFY_").from_env::<Config>() {
        Ok(config) => config,
        Err(error) => panic!("Configuration error: {:#?}", error),
    }
}
