use glyph_clock::util::log::{init_tracing, set_log_dir};
use glyph_clock::{App, ClockConfig};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = ClockConfig::load()?;

    set_log_dir(&config.log_dir);
    if let Err(e) = init_tracing(&config.log_dir) {
        eprintln!("Tracing disabled: {}", e);
    }

    let app = App::new(config)?;
    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    result
}
