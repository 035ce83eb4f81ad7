//! Menu event loop: one input event, one dispatch, at most one redraw.

use anyhow::{Context, Result};
use core_actions::{Action, DispatchResult, dispatch, translate_key};
use core_events::{Event, InputEvent};
use core_render::{MenuShape, RenderEngine, Viewport};
use core_state::{MenuState, Output};
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Accept(Output),
    Cancel,
}

pub struct MenuRuntime<W: Write> {
    state: MenuState,
    engine: RenderEngine,
    /// Requested shape; each refit clamps it to the loaded candidates.
    shape: MenuShape,
    size: (u16, u16),
    viewport: Viewport,
    item_width: u32,
    item_count: usize,
    rx: mpsc::Receiver<Event>,
    out: W,
}

impl<W: Write> MenuRuntime<W> {
    pub fn new(
        mut state: MenuState,
        engine: RenderEngine,
        shape: MenuShape,
        size: (u16, u16),
        rx: mpsc::Receiver<Event>,
        out: W,
    ) -> Self {
        let item_count = state.items().len();
        let viewport = engine.viewport(size, shape.fit_candidates(item_count), &state);
        state.set_layout(viewport.layout);
        let item_width = state.max_item_width();
        Self {
            state,
            engine,
            shape,
            size,
            viewport,
            item_width,
            item_count,
            rx,
            out,
        }
    }

    pub fn into_state(self) -> MenuState {
        self.state
    }

    pub async fn run(&mut self) -> Result<Exit> {
        let span = tracing::debug_span!(target: "runtime", "event_loop");
        self.event_loop().instrument(span).await
    }

    async fn event_loop(&mut self) -> Result<Exit> {
        self.redraw()?;
        while let Some(event) = self.rx.recv().await {
            let input = match event {
                Event::Input(input) => input,
                Event::Shutdown => {
                    info!(target: "runtime", "shutdown_event");
                    return Ok(Exit::Cancel);
                }
            };
            if let Some(exit) = self.handle_input(input)? {
                return Ok(exit);
            }
        }
        info!(target: "runtime", "input_channel_closed");
        Ok(Exit::Cancel)
    }

    fn handle_input(&mut self, input: InputEvent) -> Result<Option<Exit>> {
        let action = match input {
            InputEvent::Key(key) => match translate_key(&key) {
                Some(action) => action,
                None => {
                    debug!(target: "runtime", key = %key, "key_unbound");
                    return Ok(None);
                }
            },
            InputEvent::Paste(text) => Action::Paste(text),
            InputEvent::Resize(w, h) => {
                self.size = (w, h);
                self.refit();
                self.redraw()?;
                return Ok(None);
            }
        };
        match dispatch(action, &mut self.state) {
            DispatchResult::Continue { dirty } => {
                if dirty {
                    // A JSON descent swaps the item store; geometry follows it.
                    if self.state.max_item_width() != self.item_width
                        || self.state.items().len() != self.item_count
                    {
                        self.refit();
                    }
                    self.redraw()?;
                }
                Ok(None)
            }
            DispatchResult::Accept(output) => Ok(Some(Exit::Accept(output))),
            DispatchResult::Cancel => Ok(Some(Exit::Cancel)),
        }
    }

    fn refit(&mut self) {
        self.item_width = self.state.max_item_width();
        self.item_count = self.state.items().len();
        let shape = self.shape.fit_candidates(self.item_count);
        self.viewport = self.engine.viewport(self.size, shape, &self.state);
        self.state.set_layout(self.viewport.layout);
        debug!(
            target: "runtime",
            width = self.size.0,
            height = self.size.1,
            grid = self.viewport.is_grid(),
            rows = self.viewport.layout.rows(),
            "viewport_recomputed"
        );
    }

    fn redraw(&mut self) -> Result<()> {
        self.engine
            .render(&mut self.out, &self.state, &self.viewport)
            .context("failed to draw menu")
    }
}
