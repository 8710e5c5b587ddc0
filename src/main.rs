use std::env;

use overlay_nav::base::Dumpable;
use overlay_nav::{
    DisplaySize, KeyEvent, Orientation, Overlay, OverlayContext, OverlayManager, Point,
    StaticDisplay,
};

/// Overlay logging its lifecycle, standing in for a real floating window.
struct DemoOverlay {
    name: &'static str,
}

impl DemoOverlay {
    fn boxed(name: &'static str) -> Box<dyn Overlay> {
        Box::new(Self { name })
    }
}

impl Overlay for DemoOverlay {
    fn name(&self) -> &str {
        self.name
    }

    fn on_create(&mut self, ctx: &OverlayContext) {
        log::info!(
            "[{}] created on a {}x{} {:?} display",
            self.name,
            ctx.display_size.width,
            ctx.display_size.height,
            ctx.orientation
        );
    }

    fn on_start(&mut self) {
        log::info!("[{}] started", self.name);
    }

    fn on_resume(&mut self) {
        log::info!("[{}] resumed", self.name);
    }

    fn on_pause(&mut self) {
        log::info!("[{}] paused", self.name);
    }

    fn on_stop(&mut self) {
        log::info!("[{}] stopped", self.name);
    }

    fn on_destroy(&mut self) {
        log::info!("[{}] destroy requested", self.name);
    }

    fn on_key_event(&mut self, event: &KeyEvent) -> bool {
        log::info!("[{}] key event {event:?}", self.name);
        false
    }

    fn on_orientation_changed(&mut self, orientation: Orientation) {
        log::info!("[{}] rotated to {orientation:?}", self.name);
    }
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    for arg in args.iter().skip(1) {
        if arg == "--help" || arg == "-h" {
            print_help();
            return;
        } else if arg == "--version" || arg == "-v" {
            println!("Overlay Nav v{}", env!("APP_VERSION_DISPLAY"));
            return;
        } else if arg != "--demo" {
            println!("❌ Unknown argument: {}", arg);
            print_help();
            return;
        }
    }

    run_demo();
}

/// Drive a scripted navigation session against an in-memory display, acting
/// as both the application and the host window system (which is why every
/// navigate_up is followed by a dismissal confirmation here).
fn run_demo() {
    println!("🚀 Overlay navigation demo (set RUST_LOG=debug for the full trace)");

    let display = StaticDisplay::new(DisplaySize::new(1080, 2280), Orientation::Portrait);
    let mut manager = OverlayManager::new(Box::new(display));

    manager.navigate_to(DemoOverlay::boxed("main-menu"), false);
    manager.lock_menu_position(Point::new(24, 180));

    manager.navigate_to(DemoOverlay::boxed("scenario-config"), false);
    manager.navigate_to(DemoOverlay::boxed("action-editor"), true);
    manager.set_top_overlay(DemoOverlay::boxed("tutorial-hint"));

    manager.notify_orientation_changed(Orientation::Landscape);
    manager.propagate_key_event(&KeyEvent::down(4));
    manager.remove_top_overlay();

    manager.hide_all();
    manager.restore_visibility();

    println!("--- coordinator state before unwinding ---");
    dump_to_stdout(&manager);

    // Unwind to the root, confirming each teardown like a window system would.
    manager.navigate_up_to_root(|| println!("✅ Back on the root overlay"));
    while let Some(id) = manager.back_stack_top_id() {
        if !manager.is_navigating() {
            break;
        }
        manager.confirm_dismissed(id);
    }

    manager.unlock_menu_position();
    manager.close_all();
    while let Some(id) = manager.back_stack_top_id() {
        manager.confirm_dismissed(id);
    }

    println!("--- coordinator state after close_all ---");
    dump_to_stdout(&manager);
}

fn dump_to_stdout(manager: &OverlayManager) {
    let mut out = Vec::new();
    if manager.dump(&mut out, "").is_ok() {
        print!("{}", String::from_utf8_lossy(&out));
    }
}

fn print_help() {
    println!("🧭 Overlay Navigation Demo");
    println!();
    println!("USAGE:");
    println!("    overlay-nav [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)     Run the scripted navigation demo");
    println!("    --demo         Run the scripted navigation demo");
    println!("    --help, -h     Show this help message");
    println!("    --version, -v  Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    overlay-nav --demo");
    println!("    RUST_LOG=debug overlay-nav --demo");
}
