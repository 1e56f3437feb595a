pub mod formatter;

pub use formatter::{
    format_currency, format_jurisdictions, format_market_table, format_molecule_detail, format_months,
    format_score, format_scored_table, format_timeline, format_timeline_tsv, format_tsv, should_use_colors,
};
