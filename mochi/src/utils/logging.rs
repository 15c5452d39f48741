use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::IsTerminal;
use tracing::{
    field::{Field, Visit},
    Event, Level, Subscriber,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::{format::Writer, FormatEvent, FormatFields};
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::FactCheckError;

const DEFAULT_LOG_DIRECTIVE: &str = "mochi=info";
const CATEGORY_FIELD: &str = "category";

/// Fields recorded on a span, kept in the span's extensions for the formatters.
#[derive(Debug, Clone, Default)]
pub struct SpanFields {
    pub raw_fields: HashMap<String, String>,
}

impl Visit for SpanFields {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let formatted_value = format!("{:?}", value).trim_matches('"').to_string();
        self.raw_fields.insert(field.name().to_string(), formatted_value);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.raw_fields.insert(field.name().to_string(), value.to_string());
    }
}

pub struct FieldCollectorLayer;

impl<S> Layer<S> for FieldCollectorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &tracing::span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut fields = SpanFields::default();
        attrs.record(&mut fields);
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &tracing::span::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else { return };
        let mut extensions = span.extensions_mut();
        let mut fields = extensions.remove::<SpanFields>().unwrap_or_default();
        values.record(&mut fields);
        extensions.insert(fields);
    }
}

/// Category of the event: its own `category` field, else the closest span's.
fn category<S, N>(ctx: &FmtContext<'_, S, N>, event_category: Option<&str>) -> String
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    if let Some(category) = event_category {
        return category.to_string();
    }
    ctx.lookup_current()
        .into_iter()
        .flat_map(|span| span.scope())
        .find_map(|span| span.extensions().get::<SpanFields>().and_then(|f| f.raw_fields.get(CATEGORY_FIELD).cloned()))
        .unwrap_or_else(|| "-".to_string())
}

// Console formatter: one aligned row per event
pub struct PrettyFormatter {
    ansi: bool,
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let now = Utc::now().format("%y-%m-%d %H:%M:%S").to_string();

        let paint = |code: &'static str| if self.ansi { code } else { "" };
        let ts_color = paint("\x1b[96m");
        let level_color = paint(match *meta.level() {
            Level::TRACE => "\x1b[90m",
            Level::DEBUG => "\x1b[34m",
            Level::INFO => "\x1b[32m",
            Level::WARN => "\x1b[33m",
            Level::ERROR => "\x1b[31m",
        });
        let msg_color = paint("\x1b[97m");
        let column_color = paint("\x1b[92m");
        let field_color = paint("\x1b[90m");
        let reset = paint("\x1b[0m");

        let mut visitor = FieldExtractor::default();
        event.record(&mut visitor);
        let category = category(ctx, visitor.category.as_deref());

        // Timestamp | Level (5) | Category (16) | Service (10) | Message and fields
        write!(writer, "{ts_color}{now}{reset} {field_color}|{reset} ")?;
        write!(writer, "{level_color}{:<5}{reset} {field_color}|{reset} ", *meta.level())?;
        write!(writer, "{column_color}{:<16}{reset} {field_color}|{reset} ", category)?;
        write!(writer, "{column_color}{:<10}{reset} {field_color}|{reset} ", extract_service_name(meta.target()))?;
        write!(writer, "{msg_color}{}{reset}", visitor.message)?;

        if !visitor.fields.is_empty() {
            let fields: Vec<String> =
                visitor.fields.iter().map(|(name, value)| format!("{field_color}{name}={value}{reset}")).collect();
            write!(writer, " ({})", fields.join(", "))?;
        }

        writeln!(writer)
    }
}

#[derive(Default)]
struct FieldExtractor {
    message: String,
    category: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for FieldExtractor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "message" => self.message = value,
            CATEGORY_FIELD => self.category = Some(value),
            name => self.fields.push((name.to_string(), value)),
        }
    }
}

// One JSON object per line, for log shippers
pub struct JsonEventFormatter;

#[derive(Default)]
struct JsonFieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl Visit for JsonFieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let v = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "message" {
            self.message = Some(v);
        } else {
            self.fields.insert(field.name().to_string(), Value::String(v));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), Value::String(value.to_string()));
        }
    }
}

impl<S, N> FormatEvent<S, N> for JsonEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> std::fmt::Result {
        let meta = event.metadata();
        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);

        let mut root = Map::new();
        root.insert("timestamp".to_string(), Value::String(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)));
        root.insert("level".to_string(), Value::String(meta.level().to_string()));
        root.insert("target".to_string(), Value::String(meta.target().to_string()));
        root.insert("service".to_string(), Value::String(extract_service_name(meta.target()).to_string()));
        if let Some(message) = visitor.message.take() {
            root.insert("message".to_string(), Value::String(message));
        }

        let mut all_fields = visitor.fields;
        if let Some(span) = ctx.lookup_current() {
            all_fields.insert("span_name".to_string(), Value::String(span.metadata().name().to_string()));
            for span in span.scope() {
                if let Some(span_fields) = span.extensions().get::<SpanFields>() {
                    for (key, value) in &span_fields.raw_fields {
                        // Inner spans and the event itself take precedence
                        all_fields.entry(key.clone()).or_insert_with(|| Value::String(value.clone()));
                    }
                }
            }
        }
        if !all_fields.is_empty() {
            root.insert("fields".to_string(), Value::Object(all_fields));
        }

        let line = serde_json::to_string(&Value::Object(root)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// Initialize the tracing subscriber, writing to stderr so stdout only carries results:
/// - PrettyFormatter for console readability (when LOG_FORMAT != "json")
/// - JsonEventFormatter for json logging (when LOG_FORMAT = "json")
///
/// This also installs color_eyre to report panics.
pub fn init_logging() -> Result<(), FactCheckError> {
    color_eyre::install().map_err(|e| FactCheckError::Config(format!("Unable to install color_eyre: {e}")))?;

    // `RUST_LOG` when set and valid, mochi at info otherwise
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(Level::WARN.into())
            .parse(DEFAULT_LOG_DIRECTIVE)
            .map_err(|e| FactCheckError::Config(format!("Invalid log filter directive: {e}")))?,
    };

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let fmt_layer = if log_format == "json" {
        fmt::layer().with_writer(std::io::stderr).event_format(JsonEventFormatter).boxed()
    } else {
        let ansi = std::io::stderr().is_terminal();
        fmt::layer().with_writer(std::io::stderr).with_ansi(ansi).event_format(PrettyFormatter { ansi }).boxed()
    };

    let subscriber =
        Registry::default().with(env_filter).with(FieldCollectorLayer).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| FactCheckError::Config(format!("Failed to set global default subscriber: {e}")))
}

/// Short display name of the crate an event comes from
fn extract_service_name(target: &str) -> &'static str {
    if target.starts_with("mochi_genlayer_client") {
        "GENLAYER"
    } else if target.starts_with("mochi_chain_client_interface") {
        "CHAIN"
    } else if target.starts_with("mochi_wallet_provider") {
        "WALLET"
    } else if target.starts_with("mochi_utils") {
        "UTILS"
    } else if target.starts_with("mochi") {
        "-"
    } else {
        "EXTERNAL"
    }
}
