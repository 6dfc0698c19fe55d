pub mod banner;
pub mod editor;
pub mod input;
pub mod present;
pub mod tui;

/// Prints the welcome banner and applies the orange theme for all subsequent
/// inquire prompts. Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
