//! Default configuration file generation.

use crate::{
    config::{
        CONFIG_FILE, ChannelConfig, InputConfig, LabelsConfig, OutputConfig, RetentionConfig,
    },
    log,
};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Quote a string as a TOML value.
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// Generate json2rss.toml content with comments, filled with defaults.
pub fn generate_config_template() -> String {
    let feed = RetentionConfig::default();
    let channel = ChannelConfig::default();
    let input = InputConfig::default();
    let output = OutputConfig::default();
    let labels = LabelsConfig::default();

    let mut out = String::new();

    out.push_str(&format!(
        "# json2rss configuration file (v{})\n\n",
        env!("CARGO_PKG_VERSION")
    ));

    out.push_str("[feed]\n");
    out.push_str(&format!(
        "max_items = {}       # items kept in the feed\n",
        feed.max_items
    ));
    out.push_str(&format!(
        "max_age_days = {}    # older incoming records are ignored\n\n",
        feed.max_age_days
    ));

    out.push_str("# Used only when the feed file does not exist yet.\n");
    out.push_str("[channel]\n");
    for (key, value) in [
        ("title", &channel.title),
        ("link", &channel.link),
        ("description", &channel.description),
        ("language", &channel.language),
        ("self_link", &channel.self_link),
        ("guid_base", &channel.guid_base),
    ] {
        out.push_str(&format!("{key} = {}\n", quoted(value)));
    }
    out.push('\n');

    out.push_str("[input]\n");
    out.push_str(&format!(
        "dir = {}\n",
        quoted(&input.dir.to_string_lossy())
    ));
    out.push_str(&format!("suffix = {}\n", quoted(&input.suffix)));
    out.push_str(&format!(
        "skip_invalid = {}   # skip records with a malformed processed_at\n\n",
        input.skip_invalid
    ));

    out.push_str("[output]\n");
    out.push_str(&format!(
        "path = {}\n\n",
        quoted(&output.path.to_string_lossy().replace('\\', "/"))
    ));

    out.push_str("[labels]\n");
    for (key, value) in [
        ("no_title", &labels.no_title),
        ("no_content", &labels.no_content),
        ("sources", &labels.sources),
        ("attribution", &labels.attribution),
        ("unknown", &labels.unknown),
    ] {
        out.push_str(&format!("{key} = {}\n", quoted(value)));
    }

    out
}

/// Write a default config into `dir`, or print it when `dry_run` is set.
///
/// Refuses to overwrite an existing file.
pub fn new_config(dir: &Path, config_name: &Path, dry_run: bool) -> Result<()> {
    let content = generate_config_template();
    if dry_run {
        print!("{content}");
        return Ok(());
    }

    let path = dir.join(config_name);
    if path.exists() {
        bail!("'{}' already exists", path.display());
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
