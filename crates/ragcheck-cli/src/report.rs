// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Terminal rendering

use console::style;
use ragcheck::{Metric, MetricGroup, Registry};
use ragcheck_eval::EvaluationResult;
use std::fmt::Write;

const REPORTED: [MetricGroup; 3] = [
    MetricGroup::Overall,
    MetricGroup::Retriever,
    MetricGroup::Generator,
];

fn width() -> usize {
    Metric::ALL
        .iter()
        .map(|m| m.as_str().len())
        .max()
        .unwrap_or(0)
}

/// Summary table grouped by taxonomy, scores as percentages.
pub fn render_summary(result: &EvaluationResult) -> String {
    let width = width();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        style("Evaluated").bold().green(),
        style(format!("{} records", result.total)).dim()
    );

    for group in REPORTED {
        let means = result.summary.group(group);
        if means.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n{}", style(group.as_str()).bold().cyan());
        for (metric, mean) in means {
            let _ = writeln!(
                out,
                "  {:<width$}  {:>6.1}",
                metric.as_str(),
                mean * 100.0,
                width = width
            );
        }
    }
    out.trim_end().to_string()
}

/// Groups and their metrics.
pub fn render_groups(only: Option<MetricGroup>) -> String {
    let mut out = String::new();
    for group in MetricGroup::ALL {
        if only.is_some_and(|g| g != group) {
            continue;
        }
        let names: Vec<&str> = group.metrics().iter().map(|m| m.as_str()).collect();
        let _ = writeln!(
            out,
            "{:<10} {}",
            style(group.as_str()).bold(),
            names.join(", ")
        );
    }
    out.trim_end().to_string()
}

/// Required judgment fields per metric, then their union.
pub fn render_requirements(registry: &Registry, metrics: &[Metric]) -> String {
    let width = width();
    let mut out = String::new();
    for &metric in metrics {
        let fields: Vec<&str> = registry
            .requirements(metric)
            .iter()
            .map(|f| f.as_str())
            .collect();
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            metric.as_str(),
            fields.join(", "),
            width = width
        );
    }
    let union: Vec<&str> = registry
        .required_fields(metrics)
        .iter()
        .map(|f| f.as_str())
        .collect();
    let _ = writeln!(out, "\n{} {}", style("needs").bold(), union.join(", "));
    out.trim_end().to_string()
}
