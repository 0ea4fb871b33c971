//! Impossible Colors entry point
//!
//! Handles platform-specific initialization and runs the event loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use impossible_colors::Settings;
    use impossible_colors::renderer::{RenderState, frame_vertices};
    use impossible_colors::resources::{fetch_schemes, fetch_text};
    use impossible_colors::toy::{ColorToy, Effect, MenuAction, Popup, Profile};

    /// Contact id used for mouse events (touch ids come from the browser)
    const MOUSE_CONTACT: u64 = u64::MAX;

    /// App instance holding all state
    struct Shell {
        toy: ColorToy,
        render_state: Option<RenderState>,
        /// Canvas client size (scene units)
        view_size: (f32, f32),
        /// Set on Exit; stops the frame loop
        exiting: bool,
    }

    impl Shell {
        /// Browser y grows downward, the scene's grows upward
        fn scene_pos(&self, x: f32, y: f32) -> Vec2 {
            Vec2::new(x, self.view_size.1 - y)
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Impossible Colors starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height, view_w, view_h) = size_canvas(&canvas);

        // `?classic` selects the two-finger spread build
        let profile = match window.location().search() {
            Ok(query) if query.contains("classic") => Profile::Spread,
            _ => Profile::Drag,
        };
        log::info!("Interaction profile: {:?}", profile);

        let settings = Settings::load();
        let schemes = fetch_schemes("assets/schemes.json").await;

        let mut toy = ColorToy::new(profile, schemes, settings);
        toy.resize(view_w, view_h);
        // Read once, rewritten immediately: missing keys get their
        // defaults and unknown scheme ids their fallback, on disk
        toy.settings().save();

        let shell = Rc::new(RefCell::new(Shell {
            toy,
            render_state: None,
            view_size: (view_w, view_h),
            exiting: false,
        }));

        // Static popup text
        if let Some(el) = document.get_element_by_id("info-text") {
            el.set_text_content(Some(&fetch_text("assets/info.txt").await));
        }
        if let Some(el) = document.get_element_by_id("about-text") {
            el.set_text_content(Some(&fetch_text("assets/about.txt").await));
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, (view_w, view_h)).await;
        shell.borrow_mut().render_state = Some(render_state);

        build_scheme_list(&document, &shell);
        setup_input_handlers(&canvas, shell.clone());
        setup_menu_buttons(&document, &shell);
        setup_resize(&canvas, shell.clone());
        sync_ui(&document, &shell.borrow().toy);

        // Start frame loop
        request_animation_frame(shell);

        log::info!("Impossible Colors running!");
    }

    /// Match the canvas backing store to its client size and DPR
    fn size_canvas(canvas: &HtmlCanvasElement) -> (u32, u32, f32, f32) {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height, client_w as f32, client_h as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        // Mouse down
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut s = shell.borrow_mut();
                let pos = s.scene_pos(event.offset_x() as f32, event.offset_y() as f32);
                s.toy.contact_down(MOUSE_CONTACT, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut s = shell.borrow_mut();
                let pos = s.scene_pos(event.offset_x() as f32, event.offset_y() as f32);
                s.toy.contact_move(MOUSE_CONTACT, pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up goes on the window so a release outside the canvas
        // still ends the drag
        {
            let shell = shell.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                shell.borrow_mut().toy.contact_up(MOUSE_CONTACT);
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let shell = shell.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let mut s = shell.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let y = touch.client_y() as f32 - rect.top() as f32;
                        let pos = s.scene_pos(x, y);
                        s.toy.contact_down(touch.identifier() as u64, pos);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let shell = shell.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let mut s = shell.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let y = touch.client_y() as f32 - rect.top() as f32;
                        let pos = s.scene_pos(x, y);
                        s.toy.contact_move(touch.identifier() as u64, pos);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end / cancel
        for event_name in ["touchend", "touchcancel"] {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut s = shell.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        s.toy.contact_up(touch.identifier() as u64);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height, view_w, view_h) = size_canvas(&canvas);
            let mut s = shell.borrow_mut();
            s.view_size = (view_w, view_h);
            s.toy.resize(view_w, view_h);
            if let Some(render_state) = s.render_state.as_mut() {
                render_state.resize(width, height, (view_w, view_h));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(document: &Document, shell: &Rc<RefCell<Shell>>) {
        let bindings = [
            ("menu-btn", MenuAction::OpenMenu),
            ("exit-btn", MenuAction::Exit),
            ("colors-btn", MenuAction::OpenColors),
            ("info-btn", MenuAction::OpenInfo),
            ("about-btn", MenuAction::OpenAbout),
            ("menu-back-btn", MenuAction::Back),
            ("colors-back-btn", MenuAction::Back),
            ("info-back-btn", MenuAction::Back),
            ("about-back-btn", MenuAction::Back),
        ];
        for (id, action) in bindings {
            wire_button(document, id, shell.clone(), action);
        }
    }

    /// Bind a click on `id` to a menu action dispatch
    fn wire_button(document: &Document, id: &str, shell: Rc<RefCell<Shell>>, action: MenuAction) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("missing button #{id}");
            return;
        };
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let effect = shell.borrow_mut().toy.handle(action.clone());
            apply_effect(&shell, effect);
            sync_ui(&document, &shell.borrow().toy);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Populate the colors popup with one button per known scheme
    fn build_scheme_list(document: &Document, shell: &Rc<RefCell<Shell>>) {
        let Some(list) = document.get_element_by_id("scheme-list") else {
            log::warn!("missing #scheme-list");
            return;
        };
        list.set_inner_html("");

        let entries: Vec<(String, String)> = shell
            .borrow()
            .toy
            .schemes()
            .iter()
            .map(|s| (s.id.clone(), s.title.clone()))
            .collect();

        for (id, title) in entries {
            let Ok(btn) = document.create_element("button") else {
                continue;
            };
            let _ = btn.set_attribute("id", &format!("scheme-btn-{id}"));
            let _ = btn.set_attribute("class", "scheme-btn");
            btn.set_text_content(Some(&title));
            let _ = list.append_child(&btn);
            wire_button(
                document,
                &format!("scheme-btn-{id}"),
                shell.clone(),
                MenuAction::SelectScheme(id),
            );
        }
    }

    fn apply_effect(shell: &Rc<RefCell<Shell>>, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::SaveSettings => shell.borrow().toy.settings().save(),
            Effect::SaveSettingsAndExit => {
                {
                    let mut s = shell.borrow_mut();
                    s.toy.settings().save();
                    s.exiting = true;
                }
                // Browsers only honor close() for script-opened pages;
                // the frame loop stops either way
                if let Some(window) = web_sys::window() {
                    let _ = window.close();
                }
            }
        }
    }

    /// Sync popup visibility and scheme highlighting from the toy state
    fn sync_ui(document: &Document, toy: &ColorToy) {
        let popup = toy.popup();
        set_popup(document, "menu-popup", popup == Some(Popup::Menu));
        set_popup(document, "colors-popup", popup == Some(Popup::Colors));
        set_popup(document, "info-popup", popup == Some(Popup::Info));
        set_popup(document, "about-popup", popup == Some(Popup::About));

        let current = &toy.current_scheme().id;
        for scheme in toy.schemes().iter() {
            if let Some(btn) = document.get_element_by_id(&format!("scheme-btn-{}", scheme.id)) {
                let class = if &scheme.id == current {
                    "scheme-btn active"
                } else {
                    "scheme-btn"
                };
                let _ = btn.set_attribute("class", class);
            }
        }
    }

    fn set_popup(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "popup" } else { "popup hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            frame_loop(shell);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(shell: Rc<RefCell<Shell>>) {
        {
            let mut s = shell.borrow_mut();
            if s.exiting {
                log::info!("Frame loop stopped");
                return;
            }

            let frame = s.toy.frame();
            let vertices = frame_vertices(&frame);
            if let Some(render_state) = s.render_state.as_mut() {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_state.size;
                        let view = render_state.view;
                        render_state.resize(width, height, view);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Impossible Colors (native) starting...");
    log::info!("Native mode requires winit integration - run with `trunk serve` for web version");

    // Run checks
    println!("\nRunning layout smoke check...");
    smoke_check_layout();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check_layout() {
    use impossible_colors::scene::{Viewport, disc_pair, resolve_offset};

    let viewport = Viewport::new(800.0, 600.0);
    let offset = resolve_offset(None, &viewport);
    assert!((offset - 150.0).abs() < 1e-4, "default offset should be H/4");

    let discs = disc_pair(&viewport, offset, 0.25);
    assert!((discs.top.center.y - 450.0).abs() < 1e-4);
    assert!((discs.bottom.center.y - 150.0).abs() < 1e-4);
    println!("✓ Layout smoke check passed!");
}
