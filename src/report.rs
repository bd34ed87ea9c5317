use crate::stats::{saved_percent, totals};
use crate::types::SizeRow;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, Table};

fn kib(bytes: u64) -> String {
    format!("{:6.2}KiB", bytes as f64 / 1024.0)
}

/// Plain fixed-width table, header first. Empty when there is nothing to report.
#[must_use]
pub fn render_plain(rows: &[SizeRow]) -> Vec<String> {
    let Some(width) = rows.iter().map(|r| r.name.chars().count()).max() else {
        return Vec::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:>width$}: {:>9} {:>9} {:>9}",
        "filename", "origin", "minify", "brotli"
    ));
    for row in rows {
        lines.push(format!(
            "{:>width$}: {} {} {}",
            row.name,
            kib(row.origin),
            kib(row.minified),
            kib(row.brotli)
        ));
    }
    lines
}

pub fn print_plain(rows: &[SizeRow]) {
    for line in render_plain(rows) {
        println!("{line}");
    }
}

fn saved_cell(origin: u64, minified: u64) -> Cell {
    let pct = saved_percent(origin, minified);
    Cell::new(format!("{pct:.1}%")).fg(if pct >= 30.0 {
        Color::Green
    } else if pct > 0.0 {
        Color::Yellow
    } else {
        Color::White
    })
}

#[must_use]
pub fn render_pretty(rows: &[SizeRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Filename", "Origin", "Minify", "Brotli", "Saved"]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(human_bytes::human_bytes(row.origin as f64)),
            Cell::new(human_bytes::human_bytes(row.minified as f64)),
            Cell::new(human_bytes::human_bytes(row.brotli as f64)),
            saved_cell(row.origin, row.minified),
        ]);
    }

    let sum = totals(rows);
    table.add_row(vec![
        Cell::new("TOTALS").add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(sum.origin as f64)).add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(sum.minified as f64)).add_attribute(Attribute::Bold),
        Cell::new(human_bytes::human_bytes(sum.brotli as f64)).add_attribute(Attribute::Bold),
        saved_cell(sum.origin, sum.minified).add_attribute(Attribute::Bold),
    ]);

    table
}

pub fn print_pretty(rows: &[SizeRow]) {
    if rows.is_empty() {
        return;
    }
    println!("{}", "=== Minify Report ===".cyan());
    println!("{}", render_pretty(rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, origin: u64, minified: u64, brotli: u64) -> SizeRow {
        SizeRow {
            name: name.to_string(),
            origin,
            minified,
            brotli,
        }
    }

    #[test]
    fn test_render_plain_layout() {
        let rows = vec![row("a.html", 2048, 1024, 512), row("b.css", 100, 50, 40)];
        let lines = render_plain(&rows);

        assert_eq!(
            lines,
            vec![
                "filename:    origin    minify    brotli",
                "a.html:   2.00KiB   1.00KiB   0.50KiB",
                " b.css:   0.10KiB   0.05KiB   0.04KiB",
            ]
        );
    }

    #[test]
    fn test_render_plain_pads_to_longest_name() {
        let rows = vec![
            row("index.html", 0, 0, 1),
            row("app-5f3c2a.js", 1_048_576, 262_144, 65_536),
        ];
        let lines = render_plain(&rows);

        assert_eq!(lines[0], "     filename:    origin    minify    brotli");
        assert_eq!(lines[1], "   index.html:   0.00KiB   0.00KiB   0.00KiB");
        assert_eq!(lines[2], "app-5f3c2a.js: 1024.00KiB 256.00KiB  64.00KiB");
    }

    #[test]
    fn test_render_plain_empty_batch() {
        assert!(render_plain(&[]).is_empty());
    }

    #[test]
    fn test_render_pretty_has_totals() {
        let rows = vec![row("a.html", 2048, 1024, 512), row("b.css", 100, 50, 40)];
        let rendered = render_pretty(&rows).to_string();

        assert!(rendered.contains("Filename"));
        assert!(rendered.contains("a.html"));
        assert!(rendered.contains("b.css"));
        assert!(rendered.contains("TOTALS"));
        assert!(rendered.contains("50.0%"));
    }
}
