//! Persisted defaults for command-line flags.
//!
//! Config files hold the same tokens as the command line, one or more per
//! line, with `#` comments. The global file is read first, then the local
//! `.mdpreviewrc`, then the actual command line; later sources win.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "mdpreview";
const LOCAL_FILE: &str = ".mdpreviewrc";

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub theme: Option<ThemeMode>,
    /// Layout units per terminal column when the terminal hides its pixel size.
    pub cell_width: Option<u32>,
    pub escape_html: bool,
    pub no_mouse: bool,
    pub perf: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` on top of `self`: switches accumulate, values from
    /// `other` replace values from `self`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            theme: other.theme.or(self.theme),
            cell_width: other.cell_width.or(self.cell_width),
            escape_html: self.escape_html || other.escape_html,
            no_mouse: self.no_mouse || other.no_mouse,
            perf: self.perf || other.perf,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Flags as command-line tokens, in the form written by `--save`.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(theme) = self.theme {
            lines.push(format!("--theme {}", theme.as_str()));
        }
        if let Some(width) = self.cell_width {
            lines.push(format!("--cell-width {width}"));
        }
        if self.escape_html {
            lines.push("--escape-html".to_string());
        }
        if self.no_mouse {
            lines.push("--no-mouse".to_string());
        }
        if self.perf {
            lines.push("--perf".to_string());
        }
        if let Some(path) = &self.log_file {
            lines.push(format!("--log-file {}", path.display()));
        }
        lines
    }
}

/// Platform config location, falling back to the local file.
pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library/Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read flags from `path`. A missing file yields the defaults.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect();
    let flags = parse_flag_tokens(&tokens);
    tracing::debug!(path = %path.display(), ?flags, "loaded config");
    Ok(flags)
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut body = String::from("# mdpreview defaults (saved with --save)\n");
    for line in flags.to_lines() {
        body.push_str(&line);
        body.push('\n');
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, body).with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick out the persistable flags from raw tokens. Unknown tokens and
/// malformed values are ignored.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token.as_str(), None),
        };
        let takes_value = matches!(name, "--theme" | "--cell-width" | "--log-file");
        let value = if takes_value {
            inline.or_else(|| iter.next().map(String::as_str))
        } else {
            None
        };
        match name {
            "--escape-html" => flags.escape_html = true,
            "--no-mouse" => flags.no_mouse = true,
            "--perf" => flags.perf = true,
            "--theme" => flags.theme = value.and_then(ThemeMode::parse),
            "--cell-width" => {
                flags.cell_width = value.and_then(|v| v.parse().ok()).filter(|w| *w > 0);
            }
            "--log-file" => flags.log_file = value.map(PathBuf::from),
            _ => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let flags = parse_flag_tokens(&tokens(&[
            "mdpreview",
            "--escape-html",
            "--theme",
            "dark",
            "--cell-width=10",
            "--log-file",
            "preview.log",
            "--no-mouse",
            "--print-html",
        ]));
        assert!(flags.escape_html);
        assert!(flags.no_mouse);
        assert!(!flags.perf);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));
        assert_eq!(flags.cell_width, Some(10));
        assert_eq!(flags.log_file, Some(PathBuf::from("preview.log")));
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_values() {
        let flags = parse_flag_tokens(&tokens(&["--theme=purple", "--cell-width", "0"]));
        assert_eq!(flags.theme, None);
        assert_eq!(flags.cell_width, None);
    }

    #[test]
    fn test_value_flag_at_end_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["--perf", "--log-file"]));
        assert!(flags.perf);
        assert_eq!(flags.log_file, None);
    }

    #[test]
    fn test_union_prefers_later_values() {
        let file = ConfigFlags {
            perf: true,
            theme: Some(ThemeMode::Light),
            cell_width: Some(9),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_mouse: true,
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.perf);
        assert!(merged.no_mouse);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(merged.cell_width, Some(9));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".mdpreviewrc");
        let flags = ConfigFlags {
            theme: Some(ThemeMode::Light),
            cell_width: Some(7),
            escape_html: true,
            no_mouse: true,
            perf: true,
            log_file: Some(PathBuf::from("preview.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
