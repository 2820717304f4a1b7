//! mdpreview - A live markdown previewer for the terminal.
//!
//! # Usage
//!
//! ```bash
//! mdpreview
//! mdpreview --theme light --cell-width 9
//! mdpreview --print-html
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use mdpreview::app::App;
use mdpreview::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use mdpreview::document::Converter;
use mdpreview::highlight::{HighlightBackground, set_background_mode};
use mdpreview::perf;
use mdpreview::preview::SAMPLE_DOCUMENT;
use mdpreview::preview::layout::DEFAULT_CELL_WIDTH_PX;
use mdpreview::terminal::detect_background;

/// Edit markdown on one side, see it rendered on the other
#[derive(Parser, Debug)]
#[command(name = "mdpreview", version, about, long_about = None)]
struct Cli {
    /// Syntax highlight theme background [default: auto]
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Layout units per column when the terminal does not report its pixel size
    #[arg(long, value_name = "UNITS", value_parser = clap::value_parser!(u32).range(1..))]
    cell_width: Option<u32>,

    /// Escape raw HTML in the markdown instead of passing it through
    #[arg(long)]
    escape_html: bool,

    /// Leave the mouse to the terminal (disables click and drag)
    #[arg(long)]
    no_mouse: bool,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,

    /// Print the HTML of the sample document and exit
    #[arg(long)]
    print_html: bool,
}

impl Cli {
    /// The persistable subset of the command line.
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            theme: self.theme,
            cell_width: self.cell_width,
            escape_html: self.escape_html,
            no_mouse: self.no_mouse,
            perf: self.perf,
            log_file: self.log_file.clone(),
        }
    }
}

/// The TUI owns the screen, so logs go to a file or nowhere.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::sink),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn effective_flags(cli: &Cli, global_path: &Path) -> Result<ConfigFlags> {
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(global_path)?;
    }
    if cli.save {
        save_config_flags(global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(global_path)?;
        let local_flags = load_config_flags(&local_override_path())?;
        global_flags.union(&local_flags)
    };
    Ok(file_flags.union(&cli_flags))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();

    let effective = effective_flags(&cli, &global_path)?;
    init_logging(effective.log_file.as_deref())?;
    perf::set_enabled(effective.perf);
    tracing::debug!(flags = ?effective.to_lines(), "effective flags");

    let app = App::new()
        .with_escape_html(effective.escape_html)
        .with_cell_width(effective.cell_width.unwrap_or(DEFAULT_CELL_WIDTH_PX))
        .with_mouse(!effective.no_mouse)
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    if cli.print_html {
        print!("{}", app.converter().render(SAMPLE_DOCUMENT));
        return Ok(());
    }

    let background = match effective.theme.unwrap_or(ThemeMode::Auto) {
        ThemeMode::Auto => detect_background(),
        ThemeMode::Light => Some(HighlightBackground::Light),
        ThemeMode::Dark => Some(HighlightBackground::Dark),
    };
    set_background_mode(background);

    app.run().context("Application error")
}
