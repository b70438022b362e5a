use std::fmt::Write;

use crate::core::describe::{Describe, Distribution};

const BAR_WIDTH: u64 = 40;

// Line labels for the summary block. A None label suppresses its line, it is
// never an error.
#[derive(Debug, Clone)]
pub struct Labels {
    pub minimum: Option<String>,
    pub maximum: Option<String>,
    pub average: Option<String>,
    pub variance: Option<String>,
    pub sum: Option<String>,
    pub items: Option<String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            minimum: Some("minimum".into()),
            maximum: Some("maximum".into()),
            average: Some("average".into()),
            variance: Some("variance".into()),
            sum: Some("sum".into()),
            items: Some("items".into()),
        }
    }
}

fn fmtnum(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

pub fn draw_histogram(distribution: &Distribution) -> String {
    let peak = distribution.counts.iter().max().copied().unwrap_or(0).max(1);

    let mut text = String::new();
    for (ind, &count) in distribution.counts.iter().enumerate() {
        let bar = ((count * BAR_WIDTH) as f64 / peak as f64).round() as usize;
        writeln!(
            text,
            "[{}, {}) ({}): {}",
            fmtnum(distribution.limits[ind]),
            fmtnum(distribution.limits[ind + 1]),
            count,
            "*".repeat(bar)
        )
        .unwrap();
    }
    text
}

// Labelled summary lines followed by a histogram; an empty table renders to
// an empty string.
pub fn render(stat: &dyn Describe, labels: &Labels) -> String {
    if stat.count() == 0 {
        return String::new();
    }

    let mut text = String::new();
    let mut line = |label: &Option<String>, value: f64| {
        if let Some(label) = label {
            writeln!(text, "{}: {}", label, fmtnum(value)).unwrap();
        }
    };
    line(&labels.minimum, stat.min().unwrap());
    line(&labels.maximum, stat.max().unwrap());
    line(&labels.average, stat.average().unwrap());
    line(&labels.variance, stat.variance().unwrap());
    line(&labels.sum, stat.sum());
    line(&labels.items, stat.count() as f64);

    text.push('\n');
    text += &draw_histogram(&stat.distribution(None, None, None).unwrap());
    text
}
