use std::time::SystemTime;

use crate::logging::{EventSpan, LogEvent};
use tracing::{info, warn, Level};
use tracing_subscriber::Layer;
use valuable::Valuable;

/// Collects `LogEvent`s emitted under INFO-or-higher spans into an
/// `EventSpan` tree and logs the whole tree once the root span closes.
#[derive(Default)]
pub struct EditorLogsLayer {
    pub prod: bool,
    pub log_type: &'static str,
}

impl<S> Layer<S> for EditorLogsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        _attrs: &tracing::span::Attributes<'_>,
        id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if *span.metadata().level() > Level::INFO {
            return;
        }

        let mut extensions = span.extensions_mut();
        extensions.insert(EventSpan::new(span.name()));
        extensions.insert(StartTime(SystemTime::now()));
    }

    fn on_close(&self, id: tracing::span::Id, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };

        let mut extensions = span.extensions_mut();
        let Some(mut event_span) = extensions.remove::<EventSpan>() else {
            return;
        };
        event_span.latency = match extensions.remove::<StartTime>() {
            Some(start) => SystemTime::now()
                .duration_since(start.0)
                .map(|elapsed| elapsed.as_millis() as u64)
                .unwrap_or_default(),
            None => 0,
        };
        drop(extensions);

        // Attach to the closest ancestor that collects events.
        let parent = span
            .scope()
            .skip(1)
            .find(|ancestor| ancestor.extensions().get::<EventSpan>().is_some());
        match parent {
            Some(parent) => {
                if let Some(parent_event_span) = parent.extensions_mut().get_mut::<EventSpan>() {
                    parent_event_span.children.push(event_span);
                }
            }
            None if event_span.is_empty() => {}
            None => {
                if self.prod {
                    info!(
                        labels.log_type = &self.log_type,
                        labels.handler = span.name(),
                        entry = event_span.as_value(),
                        "'{}' log entry",
                        span.name()
                    );
                } else {
                    match serde_json::to_string_pretty(&event_span) {
                        Ok(json) => info!("'{}' log entry ==> {json}", span.name()),
                        Err(e) => warn!("Failed to encode '{}' log entry: {e}", span.name()),
                    }
                }
            }
        }
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let Some(scope) = ctx.event_scope(event) else {
            return;
        };

        let mut collector = EventField(None);
        event.record(&mut collector);
        let Some(encoded) = collector.0 else {
            return;
        };
        let Ok(log) = serde_json::from_str::<LogEvent>(&encoded) else {
            return;
        };

        for span in scope {
            if let Some(event_span) = span.extensions_mut().get_mut::<EventSpan>() {
                event_span.events.push(log);
                return;
            }
        }
    }
}

struct StartTime(SystemTime);

/// Picks the encoded `event` field written by `log_event!`.
struct EventField(Option<String>);

impl tracing::field::Visit for EventField {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "event" {
            self.0 = Some(value.to_owned());
        }
    }

    fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
}
