use crate::{
    snapshot::Snapshot,
    types::{MetricDefinition, Sample},
};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders a snapshot in the Prometheus text exposition format.
///
/// Every catalog definition gets its HELP and TYPE lines, even when the
/// scrape produced no samples for it.
pub fn render_prometheus(snapshot: &Snapshot) -> String {
    let mut output = String::new();

    for (definition, samples) in snapshot.families() {
        let name = definition.exposition_name();

        output.push_str("# HELP ");
        output.push_str(&name);
        output.push(' ');
        output.push_str(&escape_help(&definition.help));
        output.push('\n');

        output.push_str("# TYPE ");
        output.push_str(&name);
        output.push(' ');
        output.push_str(definition.kind.as_prometheus_type());
        output.push('\n');

        for sample in samples {
            render_sample_line(&mut output, &name, definition, sample);
        }
    }

    output
}

fn render_sample_line(
    output: &mut String,
    name: &str,
    definition: &MetricDefinition,
    sample: &Sample,
) {
    output.push_str(name);

    if !definition.label_names.is_empty() {
        output.push('{');
        for (index, (key, value)) in definition
            .label_names
            .iter()
            .zip(sample.label_values.iter())
            .enumerate()
        {
            if index > 0 {
                output.push(',');
            }
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape_label_value(value));
            output.push('"');
        }
        output.push('}');
    }

    output.push(' ');
    output.push_str(&format_metric_value(sample.value));
    output.push('\n');
}

fn format_metric_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn escape_help(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('"', "\\\"")
}
