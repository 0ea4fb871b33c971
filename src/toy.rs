//! Application state and menu command dispatch
//!
//! One explicit state struct owns the scene, the gesture interpreter, the
//! scheme library and a working copy of the settings. Menu clicks funnel
//! through [`ColorToy::handle`] as plain commands, so everything here is
//! testable without a single widget.

use glam::Vec2;

use crate::consts::{DRAG_RADIUS_RATIO, SPREAD_RADIUS_RATIO};
use crate::gesture::{ContactId, GestureInterpreter, GestureMode};
use crate::scene::{Frame, Scene};
use crate::scheme::{ColorScheme, SchemeLibrary};
use crate::settings::Settings;

/// Interaction presets: blend-on-spread or plain drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Two-finger spread, small discs, blended overlap lens
    Spread,
    /// Single-finger drag, large discs, no lens
    #[default]
    Drag,
}

impl Profile {
    pub fn radius_ratio(self) -> f32 {
        match self {
            Profile::Spread => SPREAD_RADIUS_RATIO,
            Profile::Drag => DRAG_RADIUS_RATIO,
        }
    }

    pub fn gesture_mode(self) -> GestureMode {
        match self {
            Profile::Spread => GestureMode::Spread,
            Profile::Drag => GestureMode::Drag,
        }
    }

    pub fn blend_lens(self) -> bool {
        matches!(self, Profile::Spread)
    }
}

/// The popup currently shown over the canvas (at most one)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    Menu,
    Colors,
    Info,
    About,
}

/// Menu commands, dispatched through [`ColorToy::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    OpenMenu,
    OpenColors,
    OpenInfo,
    OpenAbout,
    /// Close the current popup (sub-popups return to the menu first)
    Back,
    SelectScheme(String),
    Exit,
}

/// What the platform shell must do after an action was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Write the settings store
    SaveSettings,
    /// Write the settings store, then terminate
    SaveSettingsAndExit,
}

/// The whole application state
pub struct ColorToy {
    scene: Scene,
    gesture: GestureInterpreter,
    schemes: SchemeLibrary,
    settings: Settings,
    popup: Option<Popup>,
}

impl ColorToy {
    pub fn new(profile: Profile, schemes: SchemeLibrary, mut settings: Settings) -> Self {
        // An unknown persisted id resolves to the first scheme up front,
        // so the resolved id (not the bogus one) is what gets saved later
        settings.color.scheme = schemes.resolve(&settings.color.scheme).id.clone();

        let scene = Scene::new(profile.radius_ratio(), profile.blend_lens())
            .with_offset(settings.offset());

        Self {
            scene,
            gesture: GestureInterpreter::new(profile.gesture_mode()),
            schemes,
            settings,
            popup: None,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.scene.resize(width, height);
    }

    /// Feed a contact-down; returns true when the gesture claimed it
    pub fn contact_down(&mut self, id: ContactId, pos: Vec2) -> bool {
        let current = self.scene.resolved_offset();
        self.gesture.contact_down(id, pos, current)
    }

    /// Feed a contact-move; returns true when the offset changed
    pub fn contact_move(&mut self, id: ContactId, pos: Vec2) -> bool {
        match self.gesture.contact_move(id, pos) {
            Some(offset) => {
                self.scene.propose_offset(offset);
                true
            }
            None => false,
        }
    }

    pub fn contact_up(&mut self, id: ContactId) {
        self.gesture.contact_up(id);
    }

    /// Recompute the frame with the current scheme's colors
    pub fn frame(&mut self) -> Frame {
        let scheme = self.schemes.resolve(&self.settings.color.scheme);
        let (top, bottom) = (scheme.top_color(), scheme.bottom_color());
        self.scene.layout(top, bottom)
    }

    pub fn current_scheme(&self) -> &ColorScheme {
        self.schemes.resolve(&self.settings.color.scheme)
    }

    pub fn schemes(&self) -> &SchemeLibrary {
        &self.schemes
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn popup(&self) -> Option<Popup> {
        self.popup
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Dispatch a menu command
    pub fn handle(&mut self, action: MenuAction) -> Effect {
        match action {
            MenuAction::OpenMenu => {
                self.popup = Some(Popup::Menu);
                Effect::None
            }
            MenuAction::OpenColors => {
                self.popup = Some(Popup::Colors);
                Effect::None
            }
            MenuAction::OpenInfo => {
                self.popup = Some(Popup::Info);
                Effect::None
            }
            MenuAction::OpenAbout => {
                self.popup = Some(Popup::About);
                Effect::None
            }
            MenuAction::Back => {
                self.popup = match self.popup {
                    Some(Popup::Menu) | None => None,
                    Some(_) => Some(Popup::Menu),
                };
                Effect::None
            }
            MenuAction::SelectScheme(id) => {
                self.settings.color.scheme = self.schemes.resolve(&id).id.clone();
                self.sync_offset();
                Effect::SaveSettings
            }
            MenuAction::Exit => {
                self.sync_offset();
                Effect::SaveSettingsAndExit
            }
        }
    }

    /// Copy the live offset into the settings ahead of a save point
    fn sync_offset(&mut self) {
        if let Some(offset) = self.scene.offset() {
            self.settings.set_offset(offset);
        }
    }
}
