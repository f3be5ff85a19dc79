//! Generic `tool` command: calls any facade tool by name with `key=value` args.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Settings;
use crate::facade::ToolFacade;
use crate::indexing::IndexCore;

pub fn run_tool(settings: &Settings, name: &str, args: Vec<String>) {
    let mut parsed = HashMap::new();
    for raw in &args {
        match raw.split_once('=') {
            Some((key, value)) => {
                parsed.insert(key.to_string(), value.to_string());
            }
            None => {
                eprintln!("invalid --arg '{raw}', expected key=value");
                std::process::exit(1);
            }
        }
    }

    let core = IndexCore::new(settings);
    let facade = ToolFacade::new(core, vec![PathBuf::from(".")], settings.indexing.excluded_dirs.clone());
    let events = facade.call("cli-0", name, &parsed);

    match serde_json::to_string_pretty(&events) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("failed to serialize tool output: {e}");
            std::process::exit(1);
        }
    }
}
