use crate::consumer::{LoadedCategory, LoadedResults};
use crate::model::ResultCategory;
use owo_colors::OwoColorize;

const BAR_WIDTH: usize = 30;

pub fn render_pretty(results: &LoadedResults) -> String {
    let mut out = String::new();

    out.push_str("Log Analysis Report\n");
    out.push_str("===================\n\n");

    for category in ResultCategory::ALL {
        match results.get(category) {
            Some(loaded) => render_category(&mut out, loaded),
            None => {
                let reason = results
                    .unavailable
                    .get(&category)
                    .map(String::as_str)
                    .unwrap_or("not loaded");
                out.push_str(&format!(
                    "{} {}\n  {}\n\n",
                    category.title().bold(),
                    "(unavailable)".yellow(),
                    reason
                ));
            }
        }
    }

    if results.is_partial() {
        let missing: Vec<_> = results.missing().iter().map(|c| c.as_str()).collect();
        out.push_str(&format!(
            "{} showing partial results, missing: {}\n",
            "warning:".yellow().bold(),
            missing.join(", ")
        ));
    }

    out
}

fn render_category(out: &mut String, loaded: &LoadedCategory) {
    out.push_str(&format!("{}\n", loaded.category.title().bold()));

    if loaded.rows.is_empty() {
        out.push_str("  <no rows>\n\n");
        return;
    }

    let max = loaded.rows.iter().map(|r| r.count).max().unwrap_or(0).max(1);
    let width = loaded
        .rows
        .iter()
        .map(|r| r.dimension.chars().count())
        .max()
        .unwrap_or(0)
        .min(48);

    for row in &loaded.rows {
        let bars = match row.count {
            0 => 0,
            n => (((n as f64 / max as f64) * BAR_WIDTH as f64).round() as usize).max(1),
        };
        out.push_str(&format!(
            "  {:<width$} {:<bar_width$} {:>8}\n",
            row.dimension,
            "█".repeat(bars),
            row.count,
            width = width,
            bar_width = BAR_WIDTH,
        ));
    }

    if loaded.malformed_lines > 0 {
        out.push_str(&format!(
            "  ({} malformed lines skipped)\n",
            loaded.malformed_lines
        ));
    }

    out.push('\n');
}

pub fn render_json(results: &LoadedResults) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

pub fn render_yaml(results: &LoadedResults) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(results)
}
