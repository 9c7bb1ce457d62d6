use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::compat;
use crate::config::Config;
use crate::controller::access::SystemClock;
use crate::controller::input::{Input, Key, KeyPress};
use crate::controller::session::Session;
use crate::controller::view::{AuthView, Screen};
use crate::controller::{Effect, Presenter};
use crate::parser::{self, Presentation};
use crate::render::{self, Hits};
use crate::render::image_cache::ImageCache;
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const DRAG_THRESHOLD: f32 = 5.0;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LOCKOUT_POLL: Duration = Duration::from_secs(1);

struct SlideApp {
    file: PathBuf,
    presenter: Presenter,
    /// Mode and lockout; outlives every reload.
    session: Session,
    config_theme: Option<String>,
    theme: Theme,
    image_cache: ImageCache,
    watcher: Option<DeckWatcher>,
    /// Regions painted last frame, used to resolve this frame's clicks.
    last_hits: Hits,
    drag_origin: Option<egui::Pos2>,
}

impl SlideApp {
    fn new(
        file: PathBuf,
        presentation: Presentation,
        config: &Config,
        start_slide: usize,
        ctx: egui::Context,
    ) -> Self {
        let base_path = deck_dir(&file).to_path_buf();
        let config_theme = config.theme().map(str::to_string);
        let theme = pick_theme(&presentation, config_theme.as_deref());

        let watcher = match DeckWatcher::new(&file, move || ctx.request_repaint()) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "live reload disabled");
                None
            }
        };

        let session = Session::new();
        let warnings = compat::check(&presentation, &base_path);
        let presenter = Presenter::new(
            &presentation,
            &session,
            Box::new(SystemClock),
            start_slide,
            warnings,
            Instant::now(),
        );

        Self {
            file,
            presenter,
            session,
            config_theme,
            theme,
            image_cache: ImageCache::new(base_path),
            watcher,
            last_hits: Hits::default(),
            drag_origin: None,
        }
    }

    /// Re-read the deck, keeping the session and the current slide.
    fn reload(&mut self, now: Instant) {
        let presentation = match parser::load(&self.file) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "reload failed");
                self.presenter.notify(format!("Reload failed: {e}"), now);
                return;
            }
        };

        let warnings = compat::check(&presentation, deck_dir(&self.file));
        self.image_cache.clear();
        self.theme = pick_theme(&presentation, self.config_theme.as_deref());
        self.presenter = Presenter::new(
            &presentation,
            &self.session,
            Box::new(SystemClock),
            self.presenter.current_slide(),
            warnings,
            now,
        );
        tracing::info!(file = %self.file.display(), "deck reloaded");
    }

    /// Translate this frame's raw egui input into presenter inputs.
    fn collect_input(&mut self, ctx: &egui::Context) -> Vec<Input> {
        let mut inputs = Vec::new();
        let mut origin = self.drag_origin;
        let hits = &self.last_hits;

        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        modifiers,
                        ..
                    } => {
                        if let Some(key) = map_key(*key) {
                            inputs.push(Input::Key(KeyPress {
                                key,
                                ctrl: modifiers.command || modifiers.ctrl,
                                shift: modifiers.shift,
                            }));
                        }
                    }
                    egui::Event::Text(text) => inputs.push(Input::Text(text.clone())),
                    _ => {}
                }
            }

            if i.pointer.primary_pressed() {
                origin = i.pointer.interact_pos();
            }
            if i.pointer.primary_released() {
                if let (Some(start), Some(end)) = (origin.take(), i.pointer.interact_pos()) {
                    let dx = end.x - start.x;
                    if dx.abs() > DRAG_THRESHOLD {
                        inputs.push(Input::Swipe { dx });
                    } else if let Some(target) = hits.target_at(end) {
                        inputs.push(Input::Click(target));
                    }
                }
            }
        });

        self.drag_origin = origin;
        inputs
    }
}

impl eframe::App for SlideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let mut effects = Vec::new();

        if self.watcher.as_ref().is_some_and(DeckWatcher::changed) {
            effects.push(Effect::Reload);
        }

        for input in self.collect_input(ctx) {
            effects.extend(self.presenter.handle(input, &mut self.session, now));
        }
        let actual_fullscreen = ctx.input(|i| i.viewport().fullscreen);
        effects.extend(self.presenter.tick(actual_fullscreen, now));

        // Viewport commands are sent outside ctx.input to avoid a lock deadlock.
        let mut reload = false;
        for effect in effects {
            match effect {
                Effect::SetFullscreen(on) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on))
                }
                Effect::SetMaximized(on) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Maximized(on))
                }
                Effect::SetDecorations(on) => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(on))
                }
                Effect::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                Effect::Reload => reload = true,
            }
        }
        if reload {
            self.reload(now);
        }

        let view = self.presenter.view(&self.session, now);
        let theme = if view.high_contrast {
            Theme::high_contrast()
        } else {
            self.theme.clone()
        };
        let locked_out = matches!(
            view.screen,
            Screen::Auth(AuthView {
                locked_out: true,
                ..
            })
        );
        let bg = theme.background;
        let image_cache = &self.image_cache;
        self.last_hits = egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                render::draw(ui, &view, &theme, image_cache, rect)
            })
            .inner;

        if self.presenter.is_animating(now) {
            ctx.request_repaint_after(FRAME_INTERVAL);
        } else if locked_out {
            ctx.request_repaint_after(LOCKOUT_POLL);
        }
    }
}

fn deck_dir(file: &Path) -> &Path {
    file.parent().unwrap_or(Path::new("."))
}

/// Front matter wins over the config file; light is the fallback.
fn pick_theme(presentation: &Presentation, config_theme: Option<&str>) -> Theme {
    let name = presentation
        .meta
        .theme
        .as_deref()
        .or(config_theme)
        .unwrap_or("light");
    Theme::from_name(name)
}

fn map_key(key: egui::Key) -> Option<Key> {
    use egui::Key as K;
    let key = match key {
        K::ArrowLeft => Key::ArrowLeft,
        K::ArrowRight => Key::ArrowRight,
        K::ArrowUp => Key::ArrowUp,
        K::ArrowDown => Key::ArrowDown,
        K::Space => Key::Space,
        K::Enter => Key::Enter,
        K::Escape => Key::Escape,
        K::Tab => Key::Tab,
        K::Backspace => Key::Backspace,
        K::Home => Key::Home,
        K::End => Key::End,
        K::Num1 => Key::Num(1),
        K::Num2 => Key::Num(2),
        K::Num3 => Key::Num(3),
        K::Num4 => Key::Num(4),
        K::Num5 => Key::Num(5),
        K::Num6 => Key::Num(6),
        K::Num7 => Key::Num(7),
        K::Num8 => Key::Num(8),
        K::Num9 => Key::Num(9),
        K::A => Key::A,
        K::F => Key::F,
        K::H => Key::H,
        K::P => Key::P,
        K::Q => Key::Q,
        K::R => Key::R,
        K::V => Key::V,
        _ => return None,
    };
    Some(key)
}

pub fn run(file: PathBuf, windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let presentation = parser::load(&file)?;

    let title = presentation.meta.title.clone().unwrap_or_else(|| {
        format!(
            "slidegate: {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    // CLI flags override config
    let config = Config::load_or_default();
    let total = presentation.slides.len();
    let start_slide = start_slide
        .unwrap_or_else(|| config.start_slide().resolve(total))
        .clamp(1, total);
    let windowed = windowed || config.windowed();
    tracing::debug!(slides = total, start_slide, windowed, "launching viewer");

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let app = SlideApp::new(
                file,
                presentation,
                &config,
                start_slide,
                cc.egui_ctx.clone(),
            );
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_map_to_slides() {
        assert_eq!(map_key(egui::Key::Num1), Some(Key::Num(1)));
        assert_eq!(map_key(egui::Key::Num9), Some(Key::Num(9)));
        assert_eq!(map_key(egui::Key::Num0), None);
        assert_eq!(map_key(egui::Key::G), None);
    }

    #[test]
    fn test_front_matter_theme_beats_config() {
        let pres = parser::parse("---\ntheme: dark\n---\n# One").unwrap();
        let dark = Theme::dark().background;
        let light = Theme::light().background;
        assert_eq!(pick_theme(&pres, Some("light")).background, dark);

        let plain = parser::parse("# One").unwrap();
        assert_eq!(pick_theme(&plain, Some("dark")).background, dark);
        assert_eq!(pick_theme(&plain, None).background, light);
    }
}
