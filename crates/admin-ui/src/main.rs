use hotelier_admin_ui::App;
use hotelier_admin_ui::models::ConsoleConfig;

fn main() {
    let level = ConsoleConfig::embedded().log_level();
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("logger already initialised: {err}");
    }
    tracing::info!(%level, "starting hotelier admin console");
    dioxus::launch(App);
}
