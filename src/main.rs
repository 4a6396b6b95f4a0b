//! Headless demo: replays a short editing session and exports it.
//!
//! Usage: `annotext-demo [OUTPUT_DIR]`. Print output goes to `OUTPUT_DIR`
//! (default: a temp directory) and the anchored layout is printed as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let config = annotext::AppConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(config.preferences.log_level.to_level_filter())
        .init();

    if let Err(e) = demo::run(config) {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::error::Error;
    use std::path::PathBuf;

    use annotext::export::AnchoredLayout;
    use annotext::geometry::{Point, Size};
    use annotext::headless::{AlwaysConfirm, PngFilePrinter, SceneRasterizer};
    use annotext::interaction::{BoxPart, HitTarget, InputEvent, ResizeDirection};
    use annotext::model::BoxId;
    use annotext::{AppConfig, Canvas, ExportCoordinator};

    pub fn run(config: AppConfig) -> Result<(), Box<dyn Error>> {
        let out_dir = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("annotext-demo"));

        let mut canvas = Canvas::with_config(&config.interaction, Size::new(800.0, 600.0));
        canvas.set_image_size(Size::new(1600.0, 800.0));
        let mut confirm = AlwaysConfirm;

        let first = add_note(&mut canvas, Point::new(120.0, 180.0), "Crack in housing");
        let second = add_note(&mut canvas, Point::new(500.0, 300.0), "Serial plate");

        // Drag the first note down and to the right
        let grab = Point::new(130.0, 190.0);
        let target = canvas.hit_test(grab);
        canvas.handle_event(InputEvent::mouse_down(grab, target), &mut confirm);
        canvas.handle_event(InputEvent::mouse_move(Point::new(330.0, 290.0)), &mut confirm);
        canvas.handle_event(InputEvent::mouse_up(Point::new(330.0, 290.0)), &mut confirm);

        // Widen the second note from its east grip
        let second_rect = second.and_then(|id| canvas.store().get(id).map(|b| (id, b.rect())));
        if let Some((second, rect)) = second_rect {
            let grip = Point::new(rect.right(), rect.y + 5.0);
            let target = HitTarget::Box {
                id: second,
                part: BoxPart::Resize(ResizeDirection::East),
            };
            canvas.handle_event(InputEvent::touch_start(grip, target), &mut confirm);
            canvas.handle_event(
                InputEvent::touch_move(Point::new(grip.x + 80.0, grip.y)),
                &mut confirm,
            );
            canvas.handle_event(InputEvent::touch_end(grip), &mut confirm);
        }

        for b in canvas.store().list() {
            log::info!(
                "Box {} at ({:.1}, {:.1}) {:.1}x{:.1} {:?}",
                b.id(),
                b.position().x,
                b.position().y,
                b.width(),
                b.height(),
                b.text()
            );
        }
        log::debug!("Notes created: {:?} {:?}", first, second);

        let mut coordinator = ExportCoordinator::new(
            Some(Box::new(SceneRasterizer::new())),
            Box::new(PngFilePrinter::new(&out_dir)),
            config.export.clone(),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let outcome = runtime.block_on(coordinator.export(&mut canvas, &mut confirm));
        match outcome.error() {
            None => log::info!("Export finished: {:?}", outcome),
            Some(e) => log::warn!("Export finished with error: {}", e),
        }

        let layout = AnchoredLayout::capture(canvas.store(), &canvas.image_bounds()?);
        println!("{}", layout.to_json()?);
        Ok(())
    }

    /// Click on empty canvas, type, and click away.
    fn add_note(canvas: &mut Canvas, at: Point, text: &str) -> Option<BoxId> {
        let mut confirm = AlwaysConfirm;
        let target = canvas.hit_test(at);
        canvas.handle_event(InputEvent::click(at, target), &mut confirm);
        let id = canvas.store().editing()?;
        canvas.handle_event(
            InputEvent::TextChanged {
                id,
                text: text.to_string(),
            },
            &mut confirm,
        );
        canvas.handle_event(InputEvent::FocusLost { id }, &mut confirm);
        Some(id)
    }
}

// Nothing to run in the browser build
#[cfg(target_arch = "wasm32")]
fn main() {}
