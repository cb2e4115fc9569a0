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

use clap::{Parser, Subcommand};
use envprobe::commands::capabilities::CapabilitiesCommand;
use envprobe::commands::entry_path::EntryPathCommand;
use envprobe::commands::info::InfoCommand;
use envprobe::commands::require::{RequireCommand, RequiredPlatform};
use envprobe::config::{ProbeConfig, new_probe_config};
use envprobe::error::{Result, format_error_chain, format_error_with_color, get_exit_code};
use envprobe::logging;

#[derive(Parser)]
#[command(name = "envprobe")]
#[command(author, version, about = "Runtime platform and environment probe", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show platform, capabilities and entry path
    Info {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the absolute path of the running executable
    #[command(visible_alias = "which")]
    EntryPath,

    /// Show POSIX, elevation and authentication broker support
    #[command(visible_alias = "caps")]
    Capabilities {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Fail unless running on the given platform
    #[command(long_about = "Fail unless running on the given platform

Exits with status 3 when the requirement is not met.

Examples:
  envprobe require posix && ./install.sh
  envprobe require windows")]
    Require {
        /// Platform to require
        #[arg(value_enum)]
        platform: RequiredPlatform,
    },
}

fn setup_logger(cli: &Cli) {
    logging::setup_logger(cli.verbose);
}

fn apply_report_settings(config: &ProbeConfig) {
    if !config.report.color {
        colored::control::set_override(false);
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    setup_logger(&cli);

    // Load configuration once at startup
    let config = match new_probe_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };
    apply_report_settings(&config);

    let result: Result<()> = (|| match cli.command {
        Commands::Info { json } => {
            let command = InfoCommand::new(&config)?;
            command.execute(json, cli.verbose > 0)
        }
        Commands::EntryPath => {
            let command = EntryPathCommand::new()?;
            command.execute()
        }
        Commands::Capabilities { json } => {
            let command = CapabilitiesCommand::new()?;
            command.execute(json)
        }
        Commands::Require { platform } => {
            let command = RequireCommand::new()?;
            command.execute(platform)
        }
    })();

    if let Err(e) = result {
        eprint!("{}", format_error_with_color(&e));
        std::process::exit(get_exit_code(&e));
    }
}
