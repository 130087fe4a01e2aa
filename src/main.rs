mod app;
mod config;
mod error;
mod logging;
mod mpris;
mod playlist;
mod runtime;
mod session;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
