//! # confinator demo application
//!
//! A sample CLI that binds a config struct to flags through a
//! [`Confinator`] registry, including one custom type. It exists to
//! demonstrate and manually verify the library.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example confinator_demo -- --port 9090 --peer a --peer b
//! cargo run --example confinator_demo -- --label zone:eu --label tier
//! cargo run --example confinator_demo -- --header Accept:text/html --header Accept:*/*
//! cargo run --example confinator_demo -- --upstream https://api.example.com --timeout 1m30s
//! cargo run --example confinator_demo -- --backoff nope        # parse error + help
//! cargo run --example confinator_demo -- help                  # help text
//! ```

mod config;

use std::process::ExitCode;

use confinator::{Confinator, FlagSet, HelpTextConf};

use config::{DemoConfig, Upstream, UpstreamValue};

fn help(fs: &FlagSet) -> String {
    HelpTextConf::new(fs)
        .header(|state| format!("Usage: {} [flags] [help]\n\n", state.flag_set.name()))
        .footer(|state| format!("\n\n{} flags.", state.flag_set.len()))
        .render()
}

fn main() -> ExitCode {
    let cf = Confinator::new();
    cf.register::<Upstream, _>(|fs, var, name, usage| {
        fs.var(UpstreamValue::new(var), name, usage);
    });

    let config = DemoConfig::default();
    let mut fs = FlagSet::new("confinator-demo");
    config.bind(&cf, &mut fs);

    if let Err(err) = fs.parse(std::env::args_os().skip(1)) {
        eprintln!("error: {err}\n");
        eprintln!("{}", help(&fs));
        return ExitCode::from(2);
    }

    if fs.args().first().map(String::as_str) == Some("help") {
        println!("{}", help(&fs));
        return ExitCode::SUCCESS;
    }

    if config.verbose.get() {
        let mut set = Vec::new();
        fs.visit(|flag| set.push(flag.name().to_string()));
        println!("[verbose] flags given: {}", set.join(", "));
    }

    match serde_json::to_string_pretty(&config) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
