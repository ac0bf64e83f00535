//! TerminalScreen: the terminal as both render sink and UI sink.

use anyhow::Result;

use crate::core::{EngineEvent, GameSnapshot, RenderSink, UiSink};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::hud::Hud;
use crate::i18n::Language;
use crate::renderer::TerminalRenderer;

pub struct TerminalScreen {
    renderer: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    hud: Hud,
    viewport: Viewport,
}

impl TerminalScreen {
    pub fn new(language: Language, viewport: Viewport) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(viewport.width, viewport.height),
            hud: Hud::new(language),
            viewport,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.renderer.enter()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    /// Adopt a new terminal size and force a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.renderer.invalidate();
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn hud_mut(&mut self) -> &mut Hud {
        &mut self.hud
    }
}

impl RenderSink for TerminalScreen {
    type Error = anyhow::Error;

    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.view
            .render_into(snapshot, &self.hud, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }
}

impl UiSink for TerminalScreen {
    fn on_event(&mut self, event: &EngineEvent) {
        self.hud.on_event(event);
    }
}
