// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Workflow commands understood by the runner
//!
//! Outputs are appended to the `GITHUB_OUTPUT` file when the runner provides
//! one, and fall back to `::set-output` commands on stdout otherwise. Other
//! commands (`::add-mask::`, `::error::`) always go to stdout.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::Value;
use uuid::Uuid;

use crate::InvocationOutcome;

/// Output names set on success
pub const OUTPUT_DATA: &str = "data";
pub const OUTPUT_SELECTION: &str = "selection";
pub const OUTPUT_SELECTIONS: &str = "selections";

/// Writes workflow commands and step outputs
pub struct WorkflowCommands<W: Write> {
    stdout: W,
    output_file: Option<PathBuf>,
}

impl<W: Write> WorkflowCommands<W> {
    pub fn new(stdout: W, output_file: Option<PathBuf>) -> Self {
        Self {
            stdout,
            output_file,
        }
    }

    /// Hide `secret` from the job log
    pub fn add_mask(&mut self, secret: &str) -> io::Result<()> {
        self.issue("add-mask", &[], secret)
    }

    /// Report a failure annotation
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.issue("error", &[], message)
    }

    pub fn set_output(&mut self, name: &str, value: &Value) -> io::Result<()> {
        let value = to_command_value(value);
        match &self.output_file {
            Some(path) => {
                let entry = file_command_entry(name, &value, &Uuid::new_v4().to_string())?;
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(entry.as_bytes())
            }
            None => {
                writeln!(self.stdout)?;
                self.issue("set-output", &[("name", name)], &value)
            }
        }
    }

    /// Set `data`, `selection` and `selections` from a successful invocation
    pub fn publish(&mut self, outcome: &InvocationOutcome) -> io::Result<()> {
        self.set_output(OUTPUT_DATA, &outcome.data)?;
        self.set_output(OUTPUT_SELECTION, &outcome.selection)?;
        self.set_output(OUTPUT_SELECTIONS, &Value::Array(outcome.selections.clone()))
    }

    pub fn into_inner(self) -> W {
        self.stdout
    }

    fn issue(&mut self, command: &str, properties: &[(&str, &str)], message: &str) -> io::Result<()> {
        let mut line = format!("::{}", command);
        if !properties.is_empty() {
            let props: Vec<String> = properties
                .iter()
                .map(|(k, v)| format!("{}={}", k, escape_property(v)))
                .collect();
            line.push(' ');
            line.push_str(&props.join(","));
        }
        line.push_str("::");
        line.push_str(&escape_data(message));
        writeln!(self.stdout, "{}", line)?;
        self.stdout.flush()
    }
}

/// Strings are written verbatim, `null` as empty, anything else as compact JSON
pub fn to_command_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn file_command_entry(name: &str, value: &str, id: &str) -> io::Result<String> {
    let delimiter = format!("ghadelimiter_{}", id);
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(io::Error::other(format!(
            "output {} contains its own delimiter",
            name
        )));
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
