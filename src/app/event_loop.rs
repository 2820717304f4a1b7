use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::preview::layout::viewport_units;
use crate::preview::{EditorState, PreviewController};

/// Poll interval while idle. Nothing animates, so this only bounds how
/// quickly a quit request is noticed.
const IDLE_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or an I/O
    /// error occurs while reading events or drawing.
    pub fn run(&self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; mdpreview requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        if self.mouse_enabled {
            execute!(stdout(), EnableMouseCapture)?;
        }
        execute!(stdout(), EnableBracketedPaste)?;

        let pixel_width = crate::terminal::reported_pixel_width();
        let model = self.initial_model(size.width, size.height, pixel_width);
        tracing::info!(
            columns = size.width,
            rows = size.height,
            width_units = model.controller.viewport_width(),
            mode = model.layout_mode().label(),
            "starting"
        );

        let result = self.event_loop(&mut terminal, model);

        let _ = execute!(stdout(), DisableBracketedPaste);
        if self.mouse_enabled {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        ratatui::restore();

        result
    }

    /// Model seeded with the sample document for a terminal of the given size.
    pub fn initial_model(&self, columns: u16, rows: u16, pixel_width: u16) -> Model {
        let units = viewport_units(columns, pixel_width, self.cell_width_px);
        let controller =
            PreviewController::with_converter(EditorState::new(units), self.converter());
        let mut model = Model::new(controller, (columns, rows)).with_cell_width(self.cell_width_px);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        model
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if needs_render {
                frame_idx += 1;
                let draw_scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| Self::view(&model, frame))?;
                drop(draw_scope);
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            if !event::poll(IDLE_POLL)? {
                continue;
            }

            // Apply the whole burst (key repeat, paste, resize storms)
            // before drawing once.
            let mut handled = 0_u32;
            loop {
                let event = event::read()?;
                let msg = self.handle_event(event, &model, crate::terminal::reported_pixel_width);
                if let Some(msg) = msg {
                    handled += 1;
                    model = Self::dispatch(model, msg, frame_idx);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
            if handled > 0 {
                needs_render = true;
            }
            if handled > 1 {
                crate::perf::log_event(
                    "event.drain",
                    format!("frame={frame_idx} handled={handled}"),
                );
            }
        }
        Ok(())
    }

    fn dispatch(model: Model, msg: Message, frame_idx: u64) -> Model {
        if let Message::Resize {
            columns,
            rows,
            pixel_width,
        } = msg
        {
            tracing::debug!(columns, rows, pixel_width, "resize");
        }
        crate::perf::log_event("event.message", format!("frame={frame_idx} msg={msg:?}"));
        update(model, msg)
    }
}
