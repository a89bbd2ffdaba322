use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::card::{EditDebouncer, PointerCapture, release_motion_tracking};
use crate::store::{self, STORAGE_KEY};
use crate::watcher::FileWatcher;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let load_scope = crate::perf::scope("app.load_notes");
        let stored = store::load_stored(self.storage.as_ref());
        drop(load_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - stickies requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = Model::new(stored.notes, (size.width, size.height));
        if let Some(raw) = stored.raw.as_deref() {
            model.remember_store_content(raw);
        }
        model.scale = self.scale;
        model.filter.pinned_only = self.pinned_only;
        model.watch_enabled = self.watch_enabled;
        model.store_path = self.storage.location(STORAGE_KEY);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        crate::perf::log_event(
            "init.board",
            format!(
                "terminal={}x{} notes={} store={:?}",
                size.width,
                size.height,
                model.board.len(),
                model.store_path
            ),
        );

        let result = self.event_loop(&mut terminal, &mut model);

        // Restore terminal
        let _ = execute!(stdout(), DisableFocusChange, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn dispatch(&mut self, model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, self.storage.as_mut(), &side_msg);
    }

    /// Arm or cancel edit commits after `msg` was applied.
    pub(super) fn update_edit_debouncer(
        model: &mut Model,
        msg: &Message,
        now_ms: u64,
        debouncer: &mut EditDebouncer,
    ) {
        if let Some(id) = model.take_last_edit() {
            debouncer.queue(id, now_ms);
        }
        if let Message::DeleteNote(id) = msg {
            debouncer.cancel(*id);
        }
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut edit_debouncer = EditDebouncer::new(self.debounce_ms);
        let mut file_watcher = if model.watch_enabled {
            Self::start_watcher(model)
        } else {
            None
        };
        let mut pointer_capture: Option<PointerCapture<Stdout>> = None;
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
        // Idle boards only need button events; motion is granted per gesture.
        release_motion_tracking(&mut stdout())?;

        loop {
            // Hold the pointer for exactly as long as a gesture is active.
            match (model.interaction.is_active(), pointer_capture.is_some()) {
                (true, false) => pointer_capture = Some(PointerCapture::acquire(stdout())?),
                (false, true) => pointer_capture = None,
                _ => {}
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            for id in edit_debouncer.take_ready(now_ms) {
                crate::perf::log_event("edit.commit", format!("frame={frame_idx} note={id}"));
                self.dispatch(model, Message::CommitDraft(id));
                needs_render = true;
            }

            if model.watch_enabled
                && file_watcher
                    .as_mut()
                    .is_some_and(FileWatcher::take_change_ready)
            {
                self.dispatch(model, Message::StoreChanged);
                needs_render = true;
            }

            // Handle events
            let poll_ms = if needs_render {
                0
            } else {
                edit_debouncer.next_due_in(now_ms).unwrap_or(250).min(250)
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Drain bursts (drag motion, key repeat) before rendering.
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        let side_msg = msg.clone();
                        self.dispatch(model, msg);
                        Self::update_edit_debouncer(
                            model,
                            &side_msg,
                            event_ms,
                            &mut edit_debouncer,
                        );
                        if matches!(side_msg, Message::Redraw) {
                            terminal.clear()?;
                        }
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if model.should_quit {
                // Commit edits still waiting on their debounce.
                for id in edit_debouncer.flush() {
                    self.dispatch(model, Message::CommitDraft(id));
                }
                break;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0
                    ),
                );
                needs_render = false;
            }
        }
        drop(pointer_capture);
        Ok(())
    }

    fn start_watcher(model: &mut Model) -> Option<FileWatcher> {
        let path = model.store_path.clone()?;
        match Self::make_file_watcher(&path) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                crate::perf::log_event(
                    "watcher.error",
                    format!("failed path={} err={err}", path.display()),
                );
                None
            }
        }
    }
}
