use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use doc_template::RunOptions;

#[derive(Parser, Debug)]
#[command(
    name = "doc-template",
    version,
    about = "Render text templates from key=value arguments, JSON data or a job config"
)]
pub struct CliArgs {
    /// Config file listing template jobs [default: .doc-template-go.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read a single template from this file (replaces the configured jobs)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Write every job's output to this file instead of stdout; never overwrites
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Read template data from this JSON file
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Template data as an inline JSON object
    #[arg(long, value_name = "JSON")]
    pub data: Option<String>,

    /// Fail on undefined template variables
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Template data as KEY=VALUE pairs. Values may be JSON, [a,b] lists or {k:v} maps
    #[arg(value_name = "KEY=VALUE", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl From<CliArgs> for RunOptions {
    fn from(args: CliArgs) -> Self {
        RunOptions {
            config: args.config,
            file: args.file,
            output: args.output,
            data_file: args.data_file,
            data: args.data,
            args: args.args,
            strict: args.strict,
        }
    }
}

const LONG_FLAGS: &[&str] = &[
    "config",
    "file",
    "output",
    "data-file",
    "data",
    "strict",
    "log",
    "help",
    "version",
];

/// Accept the single-dash spelling of long flags (`-config x`, `-data={..}`)
/// by rewriting it to the double-dash form before clap sees it. Switches
/// also take an explicit value (`-strict=true`, `--log=0`): a true value
/// becomes the bare flag and a false one is dropped. Rewriting stops at the
/// first positional argument or a `--` separator.
pub fn normalize_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut rewriting = true;
    let mut expect_value = false;

    for (position, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if position == 0 || !rewriting {
            out.push(arg);
            continue;
        }
        if expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            rewriting = false;
            out.push(arg);
            continue;
        }

        let flag = text
            .strip_prefix("--")
            .or_else(|| text.strip_prefix('-'));
        match flag {
            Some(body) => {
                let (name, inline_value) = match body.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (body, None),
                };
                if !LONG_FLAGS.contains(&name) {
                    out.push(arg);
                    continue;
                }
                match (inline_value, is_switch(name)) {
                    (Some(value), true) => match parse_switch(value) {
                        Some(true) => out.push(OsString::from(format!("--{name}"))),
                        Some(false) => {}
                        None => out.push(OsString::from(format!("--{body}"))),
                    },
                    _ => {
                        expect_value = inline_value.is_none() && takes_value(name);
                        out.push(OsString::from(format!("--{body}")));
                    }
                }
            }
            None => {
                rewriting = false;
                out.push(arg);
            }
        }
    }

    out
}

fn takes_value(name: &str) -> bool {
    matches!(name, "config" | "file" | "output" | "data-file" | "data")
}

fn is_switch(name: &str) -> bool {
    matches!(name, "strict" | "log")
}

/// Boolean spellings accepted by `-strict=<value>` and `-log=<value>`.
fn parse_switch(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
