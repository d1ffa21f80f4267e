use heartcheck::{
    core::tasks::TaskManager,
    gui::HeartCheckApp,
    Config,
    PredictionClient,
};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::resolve()?;
    let client = PredictionClient::new(&config)?;
    let task_manager = TaskManager::new(client)?;

    info!(endpoint = %config.endpoint, "Starting heartcheck");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Heart Disease Prediction",
        options,
        Box::new(move |cc| Ok(Box::new(HeartCheckApp::new(cc, config, task_manager)))),
    )?;

    info!("heartcheck shutdown complete");
    Ok(())
}
