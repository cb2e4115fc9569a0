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

use crate::error::Result;
use crate::platform::Capabilities;
use crate::report::{format_capabilities, format_capabilities_json};
use std::io::Write;

pub struct CapabilitiesCommand;

impl CapabilitiesCommand {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        self.write_to(&mut std::io::stdout(), json)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, json: bool) -> Result<()> {
        let capabilities = Capabilities::detect();
        if json {
            format_capabilities_json(writer, &capabilities)?;
        } else {
            format_capabilities(writer, &capabilities)?;
        }
        Ok(())
    }
}
