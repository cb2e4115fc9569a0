// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{ErrorContext, ProbeError};
use colored::Colorize;
use std::fmt::Write;

/// Plain rendering of an error with its details and suggestion.
pub fn format_error_chain(error: &ProbeError) -> String {
    ErrorContext::new(error).to_string()
}

/// Terminal rendering of an error.
///
/// Styling goes through `colored`, so `NO_COLOR`, `CLICOLOR` and
/// `colored::control::set_override` decide whether escapes are emitted.
pub fn format_error_with_color(error: &ProbeError) -> String {
    let context = ErrorContext::new(error);
    let mut output = String::new();

    let _ = writeln!(output, "{} {error}", "Error:".red().bold());

    if let Some(details) = &context.details {
        let _ = writeln!(output, "\n{details}");
    }

    if let Some(suggestion) = &context.suggestion {
        let _ = writeln!(output, "\n{}", "Suggestions:".yellow().bold());
        for line in suggestion.lines().filter(|line| !line.trim().is_empty()) {
            let _ = writeln!(output, "{}", format!("• {line}").cyan());
        }
    }

    output
}
