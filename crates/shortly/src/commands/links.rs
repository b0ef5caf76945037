//! Link command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use shortly_core::{Link, LinkFilter, LinkListState, Shortly, StatsRecord};

use crate::cli::{GlobalOpts, LinksArgs, LinksCommand, LinksListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "ID")]
    short_id: String,
    #[tabled(rename = "Short URL")]
    short_url: String,
    #[tabled(rename = "Original URL")]
    orig_url: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl LinkRow {
    fn new(link: &Link, color: bool) -> Self {
        Self {
            short_id: link.short_id.clone(),
            short_url: link.short_url.clone(),
            orig_url: output::truncate(&link.orig_url, 48),
            status: output::status_label(link.status(), color),
            expires: output::format_time(link.expire_at),
            created: output::format_time(link.created_at),
        }
    }
}

fn link_detail(link: &Link) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:        {}", link.short_id);
    let _ = writeln!(out, "Short URL: {}", link.short_url);
    let _ = writeln!(out, "Original:  {}", link.orig_url);
    let _ = writeln!(out, "Status:    {}", link.status());
    let _ = writeln!(out, "Created:   {}", output::format_time(link.created_at));
    let _ = write!(out, "Expires:   {}", output::format_time(link.expire_at));
    out
}

fn stats_detail(record: &StatsRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", record.short_id);
    let _ = writeln!(out, "Original:   {}", record.orig_url);
    let _ = writeln!(out, "Last hour:  {}", record.last_hour_clicks);
    let _ = writeln!(out, "Last day:   {}", record.last_day_clicks);
    let _ = write!(out, "All time:   {}", record.all_clicks);
    out
}

fn page_footer(state: &LinkListState) -> String {
    format!(
        "Page {} of {} ({} links)",
        state.page, state.total_pages, state.total_items
    )
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(app: &Shortly, args: LinksArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        LinksCommand::List(list) => list_links(app, &list, global).await,

        LinksCommand::Create { url, expires, ttl } => {
            let links = app.links()?;
            let seconds = ttl.unwrap_or_else(|| expires.seconds());
            let link = links.create(&url, Some(seconds)).await?;
            let out = output::render_single(global.output_format(), &link, link_detail, |l| {
                l.short_url.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LinksCommand::Deactivate { short_id } => {
            if !util::confirm(
                &format!("Deactivate link '{short_id}'? This cannot be undone."),
                "links deactivate",
                global.yes,
            )? {
                return Ok(());
            }
            let links = app.links()?;
            let link = links.deactivate(&short_id).await?;
            let out = output::render_single(global.output_format(), &link, link_detail, |l| {
                l.short_id.clone()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        LinksCommand::Stats { short_id } => {
            let detail = app.link_detail()?;
            detail.open(&short_id).await?;
            let Some(record) = detail.state().stats else {
                return Err(CliError::Internal("stats response was not applied".into()));
            };
            let out = output::render_single(global.output_format(), &record, stats_detail, |r| {
                r.all_clicks.to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn list_links(
    app: &Shortly,
    args: &LinksListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let filter = LinkFilter {
        is_active: args.active,
        is_valid: args.valid,
    };
    let links = app.links_with_view(filter, args.page)?;
    links.refresh().await?;
    let state = links.state();

    let color = output::should_color(global.color_mode());
    let mut out = output::render_list(
        global.output_format(),
        &state.items,
        |l| LinkRow::new(l, color),
        |l| l.short_url.clone(),
    )?;
    if matches!(global.output_format(), OutputFormat::Table) {
        out.push('\n');
        out.push_str(&page_footer(&state));
    }
    output::print_output(&out, global.quiet);
    Ok(())
}
