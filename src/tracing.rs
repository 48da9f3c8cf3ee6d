use crate::{logging::EditorLogsLayer, Status};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

pub struct Tracing;

impl Tracing {
    pub fn setup(_name: &str) -> Result<(), Status> {
        match tracing_subscriber::registry()
            .with(EditorLogsLayer::default().with_filter(LevelFilter::DEBUG))
            .with(
                // Log also to stdout.
                tracing_subscriber::fmt::Layer::new()
                    .with_writer(std::io::stdout.with_max_level(Level::INFO)),
            )
            .try_init()
        {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{e}");
                Err(Status::new("Failed to setup tracing", e))
            }
        }
    }

    pub fn setup_prod(_name: &str, log_type: &'static str) -> Result<(), Status> {
        match tracing_subscriber::registry()
            .with(
                EditorLogsLayer {
                    prod: true,
                    log_type,
                }
                .with_filter(LevelFilter::DEBUG),
            )
            .with(
                tracing_stackdriver::layer()
                    .with_writer(std::io::stdout.with_max_level(Level::INFO)),
            )
            .try_init()
        {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{e}");
                Err(Status::new("Failed to setup tracing", e))
            }
        }
    }
}
