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

use crate::config::ProbeConfig;
use crate::error::Result;
use crate::platform::SystemProcessRunner;
use crate::report::{ProbeReport, format_human_readable, format_json};
use std::io::Write;

pub struct InfoCommand<'a> {
    config: &'a ProbeConfig,
}

impl<'a> InfoCommand<'a> {
    pub fn new(config: &'a ProbeConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, json: bool, verbose: bool) -> Result<()> {
        self.write_to(&mut std::io::stdout(), json, verbose)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, json: bool, verbose: bool) -> Result<()> {
        let runner = SystemProcessRunner::from_config(&self.config.runner);
        let report = ProbeReport::collect(&runner);

        if json {
            format_json(writer, &report)?;
        } else {
            format_human_readable(writer, &report, verbose)?;
        }
        Ok(())
    }
}
