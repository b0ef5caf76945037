//! Top-N statistics handler.

use tabled::Tabled;

use shortly_core::{FetchOutcome, Shortly, StatsRecord, StatsSummary};

use crate::cli::{GlobalOpts, OutputFormat, StatsArgs, StatsCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "ID")]
    short_id: String,
    #[tabled(rename = "Original URL")]
    orig_url: String,
    #[tabled(rename = "Hour")]
    hour: u64,
    #[tabled(rename = "Day")]
    day: u64,
    #[tabled(rename = "All")]
    all: u64,
}

impl StatsRow {
    fn new(r: &StatsRecord) -> Self {
        Self {
            short_id: r.short_id.clone(),
            orig_url: output::truncate(&r.orig_url, 48),
            hour: r.last_hour_clicks,
            day: r.last_day_clicks,
            all: r.all_clicks,
        }
    }
}

fn totals_footer(summary: StatsSummary) -> String {
    format!(
        "Totals: {} last hour, {} last day, {} all time",
        summary.hour, summary.day, summary.all
    )
}

pub async fn handle(app: &Shortly, args: StatsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        StatsCommand::Top { top, sort_by } => {
            let stats = app.top_stats()?;
            if stats.set_window(top, sort_by).await? == FetchOutcome::Unchanged {
                stats.refresh().await?;
            }
            let state = stats.state();

            let mut out = output::render_list(
                global.output_format(),
                &state.items,
                StatsRow::new,
                |r| r.short_id.clone(),
            )?;
            if matches!(global.output_format(), OutputFormat::Table) {
                out.push('\n');
                out.push_str(&totals_footer(state.summary));
            }
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
