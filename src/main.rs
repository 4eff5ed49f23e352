use sunny::config;

fn main() {
    config::load_env();
    tracing_subscriber::fmt::init();
    dioxus::launch(sunny::ui::App);
}
