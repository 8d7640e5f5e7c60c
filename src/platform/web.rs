//! Browser host: canvas, images, audio, DOM input and the frame loop
//!
//! All game state lives in one `App` behind `Rc<RefCell<..>>`, shared by the
//! animation frame callback, the DOM listeners and the `WebSession` handle.
//! Listeners only write the input map; the frame callback runs the session.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, CustomEvent, CustomEventInit, Document, EventTarget,
    HtmlAudioElement, HtmlCanvasElement, HtmlImageElement, HtmlMediaElement, KeyboardEvent, Window,
};

use super::{ACTIVATE_EVENT, HIT_SRC, MUSIC_SRC, SECTIONS_ELEMENT_ID};
use crate::consts::REFERENCE_DT;
use crate::content::{self, BlockSpec, MISSING_CONTENT};
use crate::renderer::{AssetCatalog, DrawCommand, SpriteId};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::input::JOYSTICK_DEAD_ZONE;
use crate::sim::{Action, Activation, GameEvent, Viewport};

const LABEL_FONT: &str = "Arial";

/// Images keyed by sprite, loaded asynchronously by the browser
struct ImageCatalog {
    images: HashMap<SpriteId, HtmlImageElement>,
}

impl ImageCatalog {
    fn load() -> Result<Self, JsValue> {
        let mut images = HashMap::new();
        for sprite in SpriteId::all() {
            let image = HtmlImageElement::new()?;
            let src = sprite.asset_name();
            let on_error = Closure::once_into_js(move || {
                log::warn!("Failed to load image {}", src);
            });
            image.set_onerror(Some(on_error.unchecked_ref()));
            image.set_src(&sprite.asset_name());
            images.insert(sprite, image);
        }
        Ok(Self { images })
    }

    /// Image if it finished loading; broken images are never ready
    fn ready(&self, sprite: SpriteId) -> Option<&HtmlImageElement> {
        self.images
            .get(&sprite)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }
}

impl AssetCatalog for ImageCatalog {
    fn size_of(&self, sprite: SpriteId) -> Option<Vec2> {
        self.ready(sprite)
            .map(|image| Vec2::new(image.natural_width() as f32, image.natural_height() as f32))
    }
}

/// Background music and the block hit cue
struct AudioCues {
    music: Option<HtmlAudioElement>,
    sfx_volume: f64,
}

impl AudioCues {
    fn new(settings: &Settings) -> Self {
        let music = match HtmlAudioElement::new_with_src(MUSIC_SRC) {
            Ok(music) => {
                music.set_loop(true);
                Some(music)
            }
            Err(e) => {
                log::warn!("Background music unavailable: {:?}", e);
                None
            }
        };
        let mut cues = Self {
            music,
            sfx_volume: 0.0,
        };
        cues.apply(settings);
        cues
    }

    fn apply(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume() as f64;
        if let Some(music) = &self.music {
            music.set_volume(settings.effective_music_volume() as f64);
            if settings.muted {
                music.pause().ok();
            }
        }
    }

    /// Start the music if it is not playing; browsers may refuse until the
    /// page receives a user gesture
    fn resume_music(&self, settings: &Settings) {
        if settings.muted {
            return;
        }
        if let Some(music) = &self.music {
            if music.paused() {
                play(music);
            }
        }
    }

    fn pause_music(&self) {
        if let Some(music) = &self.music {
            music.pause().ok();
        }
    }

    fn hit(&self) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        if let Ok(sound) = HtmlAudioElement::new_with_src(HIT_SRC) {
            sound.set_volume(self.sfx_volume);
            play(&sound);
        }
    }
}

/// Start playback, ignoring autoplay rejections
fn play(media: &HtmlMediaElement) {
    match media.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("Audio playback blocked: {:?}", e);
            }
        }),
        Err(e) => log::debug!("Audio playback failed: {:?}", e),
    }
}

/// A DOM listener kept alive until dispose
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

struct App {
    session: Session,
    settings: Settings,
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: ImageCatalog,
    audio: AudioCues,
    last_time: Option<f64>,
    raf_id: Option<i32>,
    listeners: Vec<Listener>,
}

impl App {
    fn viewport(window: &Window) -> Result<Viewport, JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(800.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(600.0) as f32;
        Ok(Viewport::new(width, height))
    }

    fn fit_canvas(&self, viewport: Viewport) {
        self.canvas.set_width(viewport.width as u32);
        self.canvas.set_height(viewport.height as u32);
    }

    /// Advance and draw one frame, returning activations to publish
    fn frame(&mut self, time: f64) -> Vec<Activation> {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => REFERENCE_DT,
        };
        self.last_time = Some(time);

        let frame = self.session.frame(dt, &self.images);
        execute(&self.ctx, &self.images, &frame.commands);

        let mut activations = Vec::new();
        for event in frame.events {
            match event {
                GameEvent::BlockHit { .. } => self.audio.hit(),
                GameEvent::Activate(activation) => activations.push(activation),
            }
        }
        activations
    }

    fn dispose(&mut self) {
        if self.session.is_disposed() {
            return;
        }
        if let Some(id) = self.raf_id.take() {
            self.window.cancel_animation_frame(id).ok();
        }
        for listener in self.listeners.drain(..) {
            listener
                .target
                .remove_event_listener_with_callback(
                    listener.kind,
                    listener.closure.as_ref().unchecked_ref(),
                )
                .ok();
        }
        self.audio.pause_music();
        self.session.dispose();
    }
}

/// Run a draw list against a 2D context
fn execute(ctx: &CanvasRenderingContext2d, images: &ImageCatalog, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::Sprite {
                sprite,
                x,
                y,
                width,
                height,
                flip_x,
                alpha,
            } => {
                // Missing images are skipped
                let Some(image) = images.ready(*sprite) else {
                    continue;
                };
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                let (w, h) = (*width as f64, *height as f64);
                let drawn = if *flip_x {
                    ctx.translate(*x as f64 + w, *y as f64)
                        .and_then(|_| ctx.scale(-1.0, 1.0))
                        .and_then(|_| {
                            ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w, h)
                        })
                } else {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        image, *x as f64, *y as f64, w, h,
                    )
                };
                if let Err(e) = drawn {
                    log::debug!("drawImage failed for {:?}: {:?}", sprite, e);
                }
                ctx.restore();
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                align,
                fill,
                stroke,
                alpha,
            } => {
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_font(&format!("{}px {}", size, LABEL_FONT));
                ctx.set_text_align(align.as_str());
                if let Some(stroke) = stroke {
                    ctx.set_stroke_style_str(&stroke.color.to_css());
                    ctx.set_line_width(stroke.width as f64);
                    ctx.stroke_text(text, *x as f64, *y as f64).ok();
                }
                ctx.set_fill_style_str(&fill.to_css());
                ctx.fill_text(text, *x as f64, *y as f64).ok();
                ctx.restore();
            }
        }
    }
}

/// Raise `portfolio:activate` on the window with the activation as `detail`
fn publish_activation(window: &Window, mut activation: Activation) -> Result<(), JsValue> {
    if activation.content.trim().is_empty() {
        activation.content = MISSING_CONTENT.to_string();
    }
    let json = serde_json::to_string(&activation).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let detail = js_sys::JSON::parse(&json)?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(ACTIVATE_EVENT, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

/// Sections from the page's JSON element, or the built-in sample
fn page_sections(document: &Document) -> Vec<BlockSpec> {
    let json = document
        .get_element_by_id(SECTIONS_ELEMENT_ID)
        .and_then(|el| el.text_content());
    match json {
        Some(json) => match content::load_sections(&json) {
            Ok(sections) => sections,
            Err(e) => {
                log::warn!("Invalid section list, using sample sections: {}", e);
                content::sample_sections()
            }
        },
        None => content::sample_sections(),
    }
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let window = app.borrow().window.clone();
    let callback = {
        let app = app.clone();
        Closure::once_into_js(move |time: f64| game_loop(app, time))
    };
    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => app.borrow_mut().raf_id = Some(id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

fn game_loop(app: Rc<RefCell<App>>, time: f64) {
    let (window, activations) = {
        let mut a = app.borrow_mut();
        a.raf_id = None;
        if a.session.is_disposed() {
            return;
        }
        (a.window.clone(), a.frame(time))
    };

    // Handlers may call back into the session, so publish after the borrow ends
    for activation in activations {
        if let Err(e) = publish_activation(&window, activation) {
            log::error!("Failed to publish activation: {:?}", e);
        }
    }

    if !app.borrow().session.is_disposed() {
        request_animation_frame(app);
    }
}

fn listen(
    app: &Rc<RefCell<App>>,
    target: EventTarget,
    kind: &'static str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    app.borrow_mut().listeners.push(Listener {
        target,
        kind,
        closure,
    });
    Ok(())
}

fn setup_input_handlers(app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window: EventTarget = app.borrow().window.clone().into();

    // Keyboard
    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let handle = app.clone();
        listen(app, window.clone(), kind, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut a = handle.borrow_mut();
            if a.session.input_mut().apply_key(&event.code(), pressed) {
                event.prevent_default();
                if pressed {
                    let App { audio, settings, .. } = &*a;
                    audio.resume_music(settings);
                }
            }
        })?;
    }

    // Focus loss releases every held key
    {
        let handle = app.clone();
        listen(app, window.clone(), "blur", move |_event| {
            let mut a = handle.borrow_mut();
            a.session.input_mut().release_all();
            if a.settings.mute_on_blur {
                a.audio.pause_music();
            }
            log::debug!("Window blur: input released");
        })?;
    }

    // Resize
    {
        let handle = app.clone();
        listen(app, window, "resize", move |_event| {
            let mut a = handle.borrow_mut();
            match App::viewport(&a.window) {
                Ok(viewport) => {
                    a.fit_canvas(viewport);
                    a.session.resize(viewport);
                }
                Err(e) => log::warn!("Could not read window size: {:?}", e),
            }
        })?;
    }

    Ok(())
}

/// Handle to a running game, exported to JavaScript
#[wasm_bindgen]
pub struct WebSession {
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl WebSession {
    /// Stop the frame loop, remove listeners and pause audio
    pub fn dispose(&self) {
        self.app.borrow_mut().dispose();
        log::info!("Web session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.app.borrow().session.is_disposed()
    }

    pub fn set_muted(&self, muted: bool) {
        let mut a = self.app.borrow_mut();
        a.settings.muted = muted;
        a.settings.save();
        let App { audio, settings, .. } = &mut *a;
        audio.apply(settings);
        audio.resume_music(settings);
    }

    /// Horizontal deflection of the on-screen joystick in pixels
    pub fn joystick(&self, dx: f32) {
        self.app
            .borrow_mut()
            .session
            .input_mut()
            .apply_joystick(dx, JOYSTICK_DEAD_ZONE);
    }

    pub fn joystick_release(&self) {
        let mut a = self.app.borrow_mut();
        let input = a.session.input_mut();
        input.release(Action::MoveLeft);
        input.release(Action::MoveRight);
    }

    /// On-screen jump button
    pub fn jump(&self, pressed: bool) {
        let mut a = self.app.borrow_mut();
        a.session.input_mut().set(Action::Jump, pressed);
        if pressed {
            let App { audio, settings, .. } = &*a;
            audio.resume_music(settings);
        }
    }

    /// Whether the page should show the on-screen controls
    pub fn show_touch_controls(&self) -> bool {
        self.app.borrow().settings.show_touch_controls
    }
}

/// Start the game on the canvas with the given element id
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<WebSession, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let settings = Settings::load();
    let viewport = App::viewport(&window)?;
    let seed = js_sys::Date::now() as u64;
    let session = Session::new(settings.tuning(), viewport, &page_sections(&document), seed);
    log::info!("Game initialized with seed: {}", seed);

    let audio = AudioCues::new(&settings);
    audio.resume_music(&settings);

    let app = Rc::new(RefCell::new(App {
        session,
        settings,
        window,
        canvas,
        ctx,
        images: ImageCatalog::load()?,
        audio,
        last_time: None,
        raf_id: None,
        listeners: Vec::new(),
    }));
    app.borrow().fit_canvas(viewport);

    setup_input_handlers(&app)?;
    request_animation_frame(app.clone());

    Ok(WebSession { app })
}

/// Page entry: start on `#canvas` and expose the handle as `window.portfolioGame`
pub async fn run() -> Result<(), JsValue> {
    let handle = start("canvas")?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    if let Some(loading) = window
        .document()
        .and_then(|d| d.get_element_by_id("loading"))
    {
        loading.set_attribute("class", "hidden")?;
    }

    js_sys::Reflect::set(&window, &JsValue::from_str("portfolioGame"), &JsValue::from(handle))?;
    log::info!("Portfolio platformer running!");
    Ok(())
}
