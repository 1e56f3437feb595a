use std::io::IsTerminal;

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::catalog::ScoredMolecule;
use crate::scoring::{MarketProjection, Phase};
use crate::timeline::{market_entry_dates, FilingGroup, RegulatoryOption, Timeline};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format a 0-100 score with one decimal ("72.4", "100.0")
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Format USD millions in compact notation ($850M, $1.2B, $0)
pub fn format_currency(millions: f64) -> String {
    if !millions.is_finite() || millions.abs() < 0.5 {
        return "$0".to_string();
    }
    let formatted = if millions >= 1_000.0 {
        format!("${:.1}B", millions / 1_000.0)
    } else {
        format!("${:.0}M", millions)
    };
    // Trim trailing .0 (e.g., "$1.0B" -> "$1B")
    formatted.replace(".0B", "B")
}

/// Format a month count as years and months ("2y 9m", "1y", "5m")
pub fn format_months(months: u32) -> String {
    let (years, rest) = (months / 12, months % 12);
    match (years, rest) {
        (0, m) => format!("{}m", m),
        (y, 0) => format!("{}y", y),
        (y, m) => format!("{}y {}m", y, m),
    }
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn phase_label(molecule: &ScoredMolecule) -> String {
    let attrs = molecule.record.attributes();
    if attrs.is_failed() {
        Phase::Failed.to_string()
    } else {
        attrs.phase.to_string()
    }
}

/// Format scored molecules as a table with columns: Index, Score, Phase, Name, Id
/// No headers (minimal format)
/// Score column is right-aligned, 5 chars wide (fits "100.0")
pub fn format_scored_table(molecules: &[ScoredMolecule], use_colors: bool) -> String {
    if molecules.is_empty() {
        return "No molecules found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 4;
    let score_width = 5;
    let phase_width = 11;
    let separator = "  ";

    molecules
        .iter()
        .enumerate()
        .map(|(idx, molecule)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>3}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(molecule.overall_score), width = score_width);
            let phase_padded = format!("{:<width$}", phase_label(molecule), width = phase_width);

            let id = molecule.id();
            let fixed_width = index_width + 1 + score_width + phase_width + separator.len() * 3 + id.len();

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_name(&molecule.record.name, width - fixed_width),
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&molecule.record.name, 20),
                // No terminal (pipe), don't truncate
                None => molecule.record.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    phase_padded.cyan(),
                    separator,
                    name,
                    separator,
                    id.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, phase_padded, separator, name, separator, id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored molecules as tab-separated values for scripting
/// Columns: score, id, name, phase, therapeutic area, projected revenue (no headers, no colors)
pub fn format_tsv(molecules: &[ScoredMolecule]) -> String {
    if molecules.is_empty() {
        return String::new();
    }

    molecules
        .iter()
        .map(|m| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{:.1}",
                format_score(m.overall_score),
                m.record.id,
                m.record.name,
                phase_label(m),
                m.record.attributes().therapeutic_area,
                m.projected_revenue()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one molecule with its scores, the factors that produced them and
/// its regional market projection.
pub fn format_molecule_detail(molecule: &ScoredMolecule, use_colors: bool) -> String {
    let record = &molecule.record;
    let attrs = record.attributes();
    let scores = &molecule.scores;
    let mut lines = Vec::new();

    let title = format!("{} ({})", record.name, record.id);
    lines.push(if use_colors { title.bold().to_string() } else { title });

    let company = if record.company.is_empty() { "-" } else { &record.company };
    lines.push(format!("  Company: {} (track record: {})", company, attrs.track_record));
    lines.push(format!("  Phase: {}", phase_label(molecule)));
    lines.push(format!("  Indication: {}", record.indication));
    lines.push(format!("  Therapeutic area: {}", attrs.therapeutic_area));
    if let Some(ref mechanism) = record.mechanism {
        lines.push(format!("  Mechanism: {}", mechanism));
    }
    if !record.competitors.is_empty() {
        lines.push(format!("  Competitors: {}", record.competitors.join(", ")));
    }
    if let Some(expiry) = record.patent_expiry {
        lines.push(format!("  Patent expiry: {}", expiry));
    }

    lines.push(String::new());
    let overall = format!("Overall score: {}", format_score(scores.overall));
    lines.push(if use_colors { overall.bold().to_string() } else { overall });
    lines.push(format!(
        "  Clinical {}  Economic {}  Access {}  Political {}",
        format_score(scores.clinical),
        format_score(scores.economic),
        format_score(scores.access),
        format_score(scores.political)
    ));
    lines.push(format!(
        "  Meeting endpoints {}  Approval {}  Next phase {}  Dropout ranking {}",
        format_score(scores.meeting_endpoints),
        format_score(scores.approval),
        format_score(scores.next_phase),
        format_score(scores.dropout_ranking)
    ));
    lines.push(format!(
        "  Breakthrough {}  Orphan {}",
        format_score(scores.regulatory_pathway.breakthrough),
        format_score(scores.regulatory_pathway.orphan)
    ));

    if !scores.breakdown.factors.is_empty() {
        lines.push(String::new());
        lines.push("Factors:".to_string());
        for factor in &scores.breakdown.factors {
            let line = format!(
                "  {}: {} ({} {:.1} -> {:.1})",
                factor.label, factor.description, factor.target, factor.before, factor.after
            );
            lines.push(if use_colors { line.dimmed().to_string() } else { line });
        }
    }

    lines.push(String::new());
    lines.push("Market projection:".to_string());
    lines.push(format_market_table(&molecule.market_data));

    lines.join("\n")
}

/// Format regional projections: region, launch offset, peak, five revenue years, HTA
pub fn format_market_table(markets: &[MarketProjection]) -> String {
    if markets.is_empty() {
        return "  No market data.".to_string();
    }

    let mut lines = vec![format!(
        "  {:<6} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>5}",
        "Region", "Launch", "Peak", "Y1", "Y2", "Y3", "Y4", "Y5", "HTA"
    )];
    for m in markets {
        let years = m.revenue_projection.as_array().map(format_currency);
        lines.push(format!(
            "  {:<6} {:>6} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8} {:>5.2}",
            m.region,
            format!("+{}y", m.launch_year),
            format_currency(m.peak_sales),
            years[0],
            years[1],
            years[2],
            years[3],
            years[4],
            m.market_access_strategy.hta
        ));
    }
    lines.join("\n")
}

/// Render the filing schedule as a Gantt chart, one row per jurisdiction.
///
/// Independent filings draw as solid bars, reference-dependent ones as
/// shaded bars. With `start` set, each row also shows the calendar
/// approval date.
pub fn format_timeline(
    timeline: &Timeline,
    table: &[RegulatoryOption],
    start: Option<NaiveDate>,
    use_colors: bool,
) -> String {
    if timeline.breakdown.is_empty() {
        return "No jurisdictions selected.".to_string();
    }

    let dates = start.map(|s| market_entry_dates(timeline, s));
    let label_width = timeline
        .breakdown
        .iter()
        .map(|e| agency_label(table, &e.code).chars().count())
        .max()
        .unwrap_or(0);

    // code + label + review + span + optional date
    let date_width = if dates.is_some() { 12 } else { 0 };
    let fixed_width = 4 + label_width + 2 + 12 + 10 + date_width;
    let bar_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => (width - fixed_width).min(60),
        Some(_) => 10,
        None => 40,
    };

    let mut lines: Vec<String> = timeline
        .breakdown
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let bar = gantt_bar(entry.start_month, entry.end_month, timeline.total, bar_width);
            let bar = match (use_colors, entry.group) {
                (true, FilingGroup::Independent) => bar.green().to_string(),
                (true, FilingGroup::Dependent) => bar.yellow().to_string(),
                (false, _) => bar,
            };
            let span = format!("m{}-m{}", entry.start_month, entry.end_month);
            let date = match dates {
                Some(ref dates) => format!("  {}", dates[i].approval_date),
                None => String::new(),
            };
            let code = format!("{:<4}", entry.code);
            format!(
                "{}{:<label$}  {:<12}{:<10}{}{}",
                if use_colors { code.bold().to_string() } else { code },
                agency_label(table, &entry.code),
                entry.review_type.to_string(),
                span,
                bar,
                date,
                label = label_width
            )
        })
        .collect();

    let total = format!(
        "Total: {} months ({})",
        timeline.total,
        format_months(timeline.total)
    );
    lines.push(String::new());
    lines.push(if use_colors { total.bold().to_string() } else { total });

    lines.join("\n")
}

/// Format the schedule as tab-separated values for scripting
/// Columns: code, review type, start month, end month, group (no headers, no colors)
pub fn format_timeline_tsv(timeline: &Timeline) -> String {
    timeline
        .breakdown
        .iter()
        .map(|e| {
            let group = match e.group {
                FilingGroup::Independent => "independent",
                FilingGroup::Dependent => "dependent",
            };
            format!("{}\t{}\t{}\t{}\t{}", e.code, e.review_type, e.start_month, e.end_month, group)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn agency_label(table: &[RegulatoryOption], code: &str) -> String {
    crate::timeline::find_jurisdiction(table, code)
        .map(|o| o.agency.clone())
        .unwrap_or_default()
}

/// Draw `[start, end)` scaled onto `width` columns. A non-empty interval
/// always gets at least one column.
fn gantt_bar(start: u32, end: u32, total: u32, width: usize) -> String {
    if total == 0 || width == 0 {
        return String::new();
    }
    let scale = |month: u32| (month as usize * width) / total as usize;
    let from = scale(start).min(width);
    let mut to = scale(end).min(width);
    if end > start && to <= from {
        to = (from + 1).min(width);
    }
    let from = from.min(to);
    format!(
        "{}{}{}",
        " ".repeat(from),
        "\u{2588}".repeat(to - from),
        " ".repeat(width - to)
    )
}

/// Format the jurisdiction table: code, agency, review clocks and filing constraints
pub fn format_jurisdictions(table: &[RegulatoryOption], use_colors: bool) -> String {
    if table.is_empty() {
        return "No jurisdictions configured.".to_string();
    }

    let mut lines = vec![format!(
        "{:<4} {:<14} {:<18} {:>4} {:>4} {:>4}  {}",
        "Code", "Agency", "Name", "Std", "Pri", "Acc", "Filing"
    )];
    for option in table {
        let filing = match (option.parallel_filing, option.reference_required) {
            (true, false) => "parallel",
            (true, true) => "after reference approval",
            (false, false) => "sequential",
            (false, true) => "sequential, after reference approval",
        };
        let code = format!("{:<4}", option.code);
        lines.push(format!(
            "{} {:<14} {:<18} {:>4} {:>4} {:>4}  {}",
            if use_colors { code.bold().to_string() } else { code },
            truncate_name(&option.agency, 14),
            truncate_name(&option.name, 18),
            option.standard_review,
            option.priority_review,
            option.accelerated_review,
            filing
        ));
    }
    lines.join("\n")
}
