use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

/// Flags that can be given on the command line or saved in a config file.
///
/// Config files hold the same `--flag value` tokens as the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub pinned: bool,
    pub perf: bool,
    pub data_dir: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub cell_width: Option<u16>,
    pub cell_height: Option<u16>,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches combine, values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            pinned: self.pinned || other.pinned,
            perf: self.perf || other.perf,
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            cell_width: other.cell_width.or(self.cell_width),
            cell_height: other.cell_height.or(self.cell_height),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }
}

fn app_dir(base: impl Into<PathBuf>) -> PathBuf {
    base.into().join("stickies")
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return app_dir(appdata).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return app_dir(PathBuf::from(home).join("Library").join("Application Support"))
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return app_dir(xdg).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return app_dir(PathBuf::from(home).join(".config")).join("config");
        }
    }

    PathBuf::from(".stickiesrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".stickiesrc")
}

/// Directory the board is stored in when `--data-dir` is not given.
pub fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("LOCALAPPDATA").or_else(|| std::env::var_os("APPDATA")) {
            return app_dir(appdata);
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return app_dir(PathBuf::from(home).join("Library").join("Application Support"));
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return app_dir(xdg);
        }
        if let Some(home) = std::env::var_os("HOME") {
            return app_dir(PathBuf::from(home).join(".local").join("share"));
        }
    }

    PathBuf::from(".stickies")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Flags whose value is a path; it runs to the end of the line.
const PATH_FLAGS: [&str; 2] = ["--data-dir", "--debug-log"];

fn line_tokens(line: &str) -> Vec<String> {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));
    let name = head.split_once('=').map_or(head, |(name, _)| name);
    if PATH_FLAGS.contains(&name) {
        if head.contains('=') {
            return vec![line.to_string()];
        }
        if !rest.is_empty() {
            return vec![head.to_string(), rest.to_string()];
        }
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# stickies defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.pinned {
        lines.push("--pinned".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(dir) = &flags.data_dir {
        lines.push(format!("--data-dir={}", dir.display()));
    }
    if let Some(ms) = flags.debounce_ms {
        lines.push(format!("--debounce-ms {ms}"));
    }
    if let Some(px) = flags.cell_width {
        lines.push(format!("--cell-width {px}"));
    }
    if let Some(px) = flags.cell_height {
        lines.push(format!("--cell-height {px}"));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log={}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pull the known flags out of `tokens`, ignoring anything else.
///
/// Values are accepted both as `--flag value` and `--flag=value`; values
/// that do not parse are dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--watch" | "-w" => flags.watch = true,
            "--pinned" => flags.pinned = true,
            "--perf" => flags.perf = true,
            "--data-dir" | "--debounce-ms" | "--cell-width" | "--cell-height"
            | "--debug-log" => {
                let value = match inline_value {
                    Some(value) => Some(value),
                    None => {
                        let next = tokens.get(i + 1).map(String::as_str);
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_value(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--data-dir" => flags.data_dir = Some(PathBuf::from(value)),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        "--debounce-ms" => flags.debounce_ms = parse_number(value),
        "--cell-width" => flags.cell_width = parse_number(value).filter(|px| *px > 0),
        "--cell-height" => flags.cell_height = parse_number(value).filter(|px| *px > 0),
        _ => {}
    }
}

fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}
