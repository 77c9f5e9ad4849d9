//! Compact console formatter: `[HH:MM:SS] LEVEL message key=value ...`

use chrono::Local;
use console::style;
use std::fmt::{self as std_fmt, Debug};
use tracing::Level;
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};

/// Noise emitted by dependencies that adds nothing to the service log.
const NOISE_PATTERNS: &[&str] = &["connection closed before message completed"];

pub struct CleanFormatter {
    show_timestamps: bool,
    use_color: bool,
}

impl CleanFormatter {
    pub fn new(show_timestamps: bool, use_color: bool) -> Self {
        Self {
            show_timestamps,
            use_color,
        }
    }

    fn format_level(&self, level: &Level) -> String {
        let label = match *level {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN ",
            Level::INFO => "INFO ",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        };

        if !self.use_color {
            return label.to_string();
        }

        match *level {
            Level::ERROR => style(label).red().bold().to_string(),
            Level::WARN => style(label).yellow().to_string(),
            Level::INFO => style(label).green().to_string(),
            Level::DEBUG => style(label).blue().to_string(),
            Level::TRACE => style(label).magenta().to_string(),
        }
    }

    fn format_line(&self, level: &Level, visitor: &FieldVisitor) -> String {
        let mut output = String::new();

        if self.show_timestamps {
            let now = Local::now().format("%H:%M:%S").to_string();
            let timestamp = if self.use_color {
                style(now).dim().to_string()
            } else {
                now
            };
            output.push_str(&format!("[{}] ", timestamp));
        }

        output.push_str(&self.format_level(level));
        output.push(' ');
        output.push_str(&visitor.message);

        for (key, value) in &visitor.fields {
            let pair = format!("{}={}", key, value);
            output.push(' ');
            if self.use_color {
                output.push_str(&style(pair).dim().to_string());
            } else {
                output.push_str(&pair);
            }
        }

        output
    }
}

impl<S, N> FormatEvent<S, N> for CleanFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std_fmt::Result {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        if !should_show_message(&visitor.message) {
            return Ok(());
        }

        writeln!(
            writer,
            "{}",
            self.format_line(event.metadata().level(), &visitor)
        )
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }
}

fn should_show_message(message: &str) -> bool {
    !NOISE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}
