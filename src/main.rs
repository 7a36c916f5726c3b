mod app;
mod audio;
mod catalog;
mod config;
mod playback;
mod runtime;
mod source;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
