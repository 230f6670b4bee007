use cz_app::ContextProvider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use types::{RenderedView, WidgetInstance};
use widget_updater::{
    BatchReport, DEFAULT_SNAPSHOT_KEY, FileSnapshotStore, InMemoryWidgetHost,
    UpdateCoordinator,
};

#[derive(Debug, Deserialize)]
struct UpdateEvent {
    instances: Vec<WidgetInstance>,
}

#[derive(Debug, Serialize)]
struct Response {
    report: BatchReport,
    views: Vec<RenderedView>,
}

#[derive(Debug, Clone, Deserialize)]
struct Config {
    snapshot_file: PathBuf,
    #[serde(default = "default_snapshot_key")]
    snapshot_key: String,
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

#[derive(Debug, Clone)]
struct AppContext {
    store: FileSnapshotStore,
    config: Config,
}

impl ContextProvider<Config> for AppContext {
    fn new(config: Config) -> Self {
        Self {
            store: FileSnapshotStore::new(&config.snapshot_file),
            config,
        }
    }
}

fn function_handler(context: &AppContext, event: UpdateEvent) -> Response {
    info!(
        "Updating {} widgets from {}",
        event.instances.len(),
        context.store.path().display()
    );

    // every instance in the event is placed, the host bookkeeping stays local
    let mut host = InMemoryWidgetHost::new();
    for instance in &event.instances {
        host.place(instance.id, instance.variant);
    }

    let report = UpdateCoordinator::new(&context.store, &mut host)
        .with_snapshot_key(&context.config.snapshot_key)
        .update(&event.instances);

    Response {
        report,
        views: host.views().cloned().collect(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let context = cz_app::create_app_context::<AppContext, Config>()?;

    let event: UpdateEvent = serde_json::from_reader(std::io::stdin().lock())?;
    let response = function_handler(&context, event);

    serde_json::to_writer_pretty(std::io::stdout().lock(), &response)?;
    println!();

    Ok(())
}
