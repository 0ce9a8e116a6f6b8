#![doc = r#"
doc-template: parameterized text generation from the command line.

This crate loads a text template, binds a data context built from `key=value`
arguments, an inline JSON object, a JSON data file, or a JSON configuration
listing several template jobs, and renders the result to stdout or to a new
file. Template syntax and evaluation come from [`minijinja`].

Quick start: render one template
--------------------------------
```rust,no_run
use doc_template::{run, RunOptions};

fn main() -> doc_template::Result<()> {
    let options = RunOptions {
        file: Some("report.tmpl".into()),
        output: Some("report.txt".into()),
        args: vec!["title=Weekly".to_string(), "items=[a,b,c]".to_string()],
        ..RunOptions::default()
    };
    let report = run(&options)?;
    assert_eq!(report.rendered, 1);
    Ok(())
}
```

Typed values from loose arguments
---------------------------------
```rust
use doc_template::{parse_args, DynamicValue};

let data = parse_args(["list=[s1,s2]", "n=3", "name=world"]).unwrap();
assert_eq!(data["n"], DynamicValue::from(3_i64));
assert_eq!(data["name"], DynamicValue::from("world"));
assert_eq!(
    data["list"],
    DynamicValue::List(vec![DynamicValue::from("s1"), DynamicValue::from("s2")])
);
```

Configuration file
------------------
```json
{
  "Templates": [
    { "File": "a.tmpl", "Output": "a.txt", "DataFile": "a.json" },
    { "File": "b.tmpl", "Data": { "name": "world" } }
  ]
}
```

Top-level `File`, `Output`, `DataFile`, `Data` and `Strict` fields act like the
matching command-line flags, which override them.

Error handling
--------------
All public functions return `doc_template::Result<T>`; match on
[`Error`] (through [`Error::root`] for per-job failures) to handle specific cases.

```rust,no_run
use doc_template::{run, Error, RunOptions};

match run(&RunOptions::default()) {
    Ok(report) => println!("rendered {}", report.rendered),
    Err(err) => match err.root() {
        Error::NoTemplates => eprintln!("nothing to do"),
        Error::Output { target, .. } => eprintln!("refusing to overwrite {target}"),
        _ => eprintln!("{err}"),
    },
}
```

Useful modules
--------------
- [`api`]: resolve a run and render its jobs.
- [`core`]: argument parsing, configuration model, run options.
- [`io`]: templates, data files and output destinations.
- [`types`]: `DynamicValue` and `DataContext`.
- [`error`]: crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

pub use api::{RunReport, render_job, resolve, run, run_jobs};
pub use core::args::{format_value, parse_args, parse_json, parse_value};
pub use core::config::{Configuration, DEFAULT_CONFIG_FILE, Job};
pub use core::params::RunOptions;
pub use error::{Error, LoadError, Result};
pub use io::{Destination, DocTemplate};
pub use types::{DataContext, DynamicValue};
