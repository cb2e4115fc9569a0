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
use crate::platform::OsFamily;
use clap::ValueEnum;

/// Platform a caller can insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequiredPlatform {
    Windows,
    Macos,
    Linux,
    Posix,
}

pub struct RequireCommand {
    family: OsFamily,
}

impl RequireCommand {
    pub fn new() -> Result<Self> {
        Ok(Self::for_family(OsFamily::current()))
    }

    pub fn for_family(family: OsFamily) -> Self {
        Self { family }
    }

    pub fn execute(&self, platform: RequiredPlatform) -> Result<()> {
        match platform {
            RequiredPlatform::Windows => self.family.ensure_windows(),
            RequiredPlatform::Macos => self.family.ensure_macos(),
            RequiredPlatform::Linux => self.family.ensure_linux(),
            RequiredPlatform::Posix => self.family.ensure_posix(),
        }?;
        log::info!("Platform requirement {platform:?} satisfied on {}", self.family);
        Ok(())
    }
}
