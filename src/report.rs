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
use crate::platform::{
    Capabilities, OsFamily, PlatformSnapshot, ProcessRunner, native_entry_path_for,
    platform_information_with,
};
use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use comfy_table::{Cell, Table};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

const NOT_AVAILABLE: &str = "(not available)";

/// Everything the probe knows about the running environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub platform: PlatformSnapshot,
    pub capabilities: Capabilities,
    pub entry_path: Option<PathBuf>,
}

impl ProbeReport {
    /// Gather a report for the running process.
    pub fn collect(runner: &dyn ProcessRunner) -> Self {
        Self::collect_for(OsFamily::current(), runner)
    }

    pub fn collect_for(family: OsFamily, runner: &dyn ProcessRunner) -> Self {
        Self {
            platform: platform_information_with(family, runner),
            capabilities: Capabilities::detect_for(family),
            entry_path: native_entry_path_for(family),
        }
    }
}

fn flag(value: bool) -> ColoredString {
    if value { "✓".green() } else { "✗".red() }
}

pub fn platform_table(snapshot: &PlatformSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![Cell::new("Property"), Cell::new("Value")]);
    table.add_row(vec![
        Cell::new("OS family"),
        Cell::new(snapshot.os_family.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("OS version"),
        Cell::new(&snapshot.os_version),
    ]);
    table.add_row(vec![
        Cell::new("CPU architecture"),
        Cell::new(snapshot.cpu_architecture.to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Runtime"),
        Cell::new(&snapshot.runtime_version),
    ]);
    table
}

pub fn format_capabilities<W: Write>(
    writer: &mut W,
    capabilities: &Capabilities,
) -> std::io::Result<()> {
    writeln!(writer, "{} POSIX", flag(capabilities.is_posix))?;
    writeln!(
        writer,
        "{} Elevated user",
        flag(capabilities.is_elevated_user)
    )?;
    writeln!(
        writer,
        "{} Windows authentication broker",
        flag(capabilities.windows_broker_supported)
    )?;
    Ok(())
}

pub fn format_human_readable<W: Write>(
    writer: &mut W,
    report: &ProbeReport,
    verbose: bool,
) -> std::io::Result<()> {
    writeln!(writer, "\nEnvironment Probe Report")?;
    writeln!(writer, "========================")?;
    writeln!(writer)?;

    writeln!(writer, "Platform")?;
    writeln!(writer, "--------")?;
    writeln!(writer, "{}", platform_table(&report.platform))?;
    writeln!(writer)?;

    writeln!(writer, "Capabilities")?;
    writeln!(writer, "------------")?;
    format_capabilities(writer, &report.capabilities)?;
    writeln!(writer)?;

    writeln!(writer, "Entry path")?;
    writeln!(writer, "----------")?;
    match &report.entry_path {
        Some(path) => writeln!(writer, "{}", path.display())?,
        None => writeln!(writer, "{}", NOT_AVAILABLE.bright_black())?,
    }

    if verbose {
        writeln!(writer)?;
        writeln!(writer, "envprobe {}", env!("CARGO_PKG_VERSION"))?;
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    version: &'static str,
    timestamp: DateTime<Utc>,
    platform: &'a PlatformSnapshot,
    capabilities: &'a Capabilities,
    entry_path: Option<String>,
}

pub fn format_json<W: Write>(writer: &mut W, report: &ProbeReport) -> Result<()> {
    let output = JsonOutput {
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
        platform: &report.platform,
        capabilities: &report.capabilities,
        entry_path: report
            .entry_path
            .as_ref()
            .map(|path| path.display().to_string()),
    };

    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}

pub fn format_capabilities_json<W: Write>(
    writer: &mut W,
    capabilities: &Capabilities,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, capabilities)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::platform::CpuArchitecture;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn create_test_report(entry_path: Option<&str>) -> ProbeReport {
        ProbeReport {
            platform: PlatformSnapshot {
                os_family: OsFamily::Linux,
                os_version: "Linux host 6.8.0 #1 SMP x86_64 GNU/Linux".to_string(),
                cpu_architecture: CpuArchitecture::X86_64,
                runtime_version: "rustc 1.85.0".to_string(),
            },
            capabilities: Capabilities {
                is_posix: true,
                is_elevated_user: false,
                windows_broker_supported: false,
            },
            entry_path: entry_path.map(PathBuf::from),
        }
    }

    #[test]
    fn test_human_readable_format() {
        let report = create_test_report(Some("/usr/local/bin/envprobe"));

        let mut output = Vec::new();
        format_human_readable(&mut output, &report, false).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Environment Probe Report"));
        assert!(output_str.contains("Linux"));
        assert!(output_str.contains("X86_64"));
        assert!(output_str.contains("rustc 1.85.0"));
        assert!(output_str.contains("✓"));
        assert!(output_str.contains("✗"));
        assert!(output_str.contains("/usr/local/bin/envprobe"));
        assert!(!output_str.contains("envprobe 0."));
    }

    #[test]
    fn test_human_readable_without_entry_path() {
        let report = create_test_report(None);

        let mut output = Vec::new();
        format_human_readable(&mut output, &report, true).unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains(NOT_AVAILABLE));
        assert!(output_str.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_json_format() {
        let report = create_test_report(Some("/usr/local/bin/envprobe"));

        let mut output = Vec::new();
        format_json(&mut output, &report).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(json["version"].is_string());
        assert!(json["timestamp"].is_string());
        assert_eq!(json["platform"]["os_family"], "Linux");
        assert_eq!(json["platform"]["cpu_architecture"], "X86_64");
        assert_eq!(json["capabilities"]["is_posix"], true);
        assert_eq!(json["capabilities"]["windows_broker_supported"], false);
        assert_eq!(json["entry_path"], "/usr/local/bin/envprobe");
    }

    #[test]
    fn test_json_missing_entry_path_is_null() {
        let report = create_test_report(None);

        let mut output = Vec::new();
        format_json(&mut output, &report).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert!(json["entry_path"].is_null());
    }

    #[test]
    fn test_capabilities_json() {
        let report = create_test_report(None);

        let mut output = Vec::new();
        format_capabilities_json(&mut output, &report.capabilities).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["is_posix"], true);
        assert_eq!(json["is_elevated_user"], false);
    }

    #[test]
    fn test_platform_table_lists_every_field() {
        let report = create_test_report(None);
        let rendered = platform_table(&report.platform).to_string();
        for label in ["OS family", "OS version", "CPU architecture", "Runtime"] {
            assert!(rendered.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_json_write_failure_is_json_error() {
        let report = create_test_report(None);

        let err = format_json(&mut BrokenWriter, &report).unwrap_err();
        assert!(matches!(err, ProbeError::Json(_)), "unexpected error: {err:?}");

        let err = format_capabilities_json(&mut BrokenWriter, &report.capabilities).unwrap_err();
        assert!(matches!(err, ProbeError::Json(_)), "unexpected error: {err:?}");
    }
}
