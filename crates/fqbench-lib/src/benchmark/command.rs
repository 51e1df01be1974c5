use std::ffi::OsString;
use std::fs::File;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::CommandError;

/// Command line template of one compress or decompress step.
///
/// Resolved against concrete paths as: base arguments, optional input
/// option, input path, then (unless output goes to stdout) optional output
/// option and output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub args: Vec<String>,
    pub input_option: Option<String>,
    pub output_option: Option<String>,
    /// The program writes its result to stdout instead of an output path
    pub output_stdout: bool,
}

impl Command {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            input_option: None,
            output_option: None,
            output_stdout: false,
        }
    }

    /// Capture stdout into the output file
    pub fn stdout(mut self) -> Self {
        self.output_stdout = true;
        self
    }

    /// Pass the input path after `option`
    pub fn input_option(mut self, option: impl Into<String>) -> Self {
        self.input_option = Some(option.into());
        self
    }

    /// Pass the output path after `option`
    pub fn output_option(mut self, option: impl Into<String>) -> Self {
        self.output_option = Some(option.into());
        self
    }

    /// Full argument list (program first) for the given paths
    pub fn resolve(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if let Some(option) = &self.input_option {
            args.push(option.into());
        }
        args.push(input.into());
        if !self.output_stdout {
            if let Some(option) = &self.output_option {
                args.push(option.into());
            }
            args.push(output.into());
        }
        args
    }

    /// Human-readable command line with `$INPUT`/`$OUTPUT` placeholders
    pub fn description(&self) -> String {
        let args = self.resolve(Path::new("$INPUT"), Path::new("$OUTPUT"));
        let mut cmd = join_args(&args);
        if self.output_stdout {
            cmd.push_str(" > $OUTPUT");
        }
        cmd
    }

    /// Run to completion. Any non-zero exit status is an error.
    pub fn run(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.resolve(input, output);
        let (program, rest) = args
            .split_first()
            .context("Compressor command has no program")?;
        let command_line = join_args(&args);

        let stdout = if self.output_stdout {
            let file = File::create(output)
                .with_context(|| format!("Failed to create output file: {:?}", output))?;
            Stdio::from(file)
        } else {
            Stdio::null()
        };

        debug!(command = %command_line, "running");
        let status = std::process::Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::null())
            .status()
            .map_err(|source| CommandError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CommandError::Failed {
                command: command_line,
                status,
            }
            .into());
        }
        Ok(())
    }
}

fn join_args(args: &[OsString]) -> String {
    args.iter()
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A named pair of compress and decompress commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressor {
    pub name: String,
    pub compress: Command,
    pub decompress: Command,
}

impl Compressor {
    pub fn new(name: impl Into<String>, compress: Command, decompress: Command) -> Self {
        Self {
            name: name.into(),
            compress,
            decompress,
        }
    }
}
