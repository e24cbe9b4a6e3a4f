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

use serde::Serialize;

// Trigger substrings are matched literally and case-sensitively
const DANGER_MESSAGES: &[&str] = &[
    " but with errors",
    " to RED",
    " to Degraded",
    " to Severe",
    "During an aborted deployment",
    "Failed to deploy",
    "has a dependent object",
    "is not authorized to perform",
    "Pending to Degraded",
    "Stack deletion failed",
    "Unsuccessful command execution",
    "You do not have permission",
    "Your quota allows for 0 more running instance",
];

const WARNING_MESSAGES: &[&str] = &[
    " to YELLOW",
    " to Warning",
    " aborted operation",
    "Degraded to Info",
    "Deleting SNS topic",
    "is currently running under desired capacity",
    "Ok to Info",
    "Ok to Warning",
    "Pending Initialization",
    "Rollback of environment",
];

const INFO_MESSAGES: &[&str] = &["Adding instance", "Removed instance"];

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Good,
    Warning,
    Danger,
}

impl Severity {
    /// Classifies a notification message.
    ///
    /// Danger triggers win over warning triggers, which win over info triggers.
    /// A message with no trigger at all is `Good`.
    pub fn from_message(message: &str) -> Severity {
        if contains_any(message, DANGER_MESSAGES) {
            return Severity::Danger;
        }

        if contains_any(message, WARNING_MESSAGES) {
            return Severity::Warning;
        }

        if contains_any(message, INFO_MESSAGES) {
            return Severity::Info;
        }

        Severity::Good
    }
}

fn contains_any(message: &str, triggers: &[&str]) -> bool {
    triggers.iter().any(|t| message.contains(t))
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Good
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}
