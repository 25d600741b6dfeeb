use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc, time::Duration};

use anyhow::bail;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::civil::Date;
use multicity_core::{
    controller::{
        form_params::FormParams, route_form_controller::RouteFormController,
        route_form_ops::RouteFormOps, sightseeing_extension::SightseeingExtension,
    },
    itinerary::{sightseeing::SightseeingError, trip_totals::TripTotals},
    json::types::JsonRouteForm,
    presentation::{
        notification::NotificationFacade,
        render::{PanelView, SummaryView},
    },
};
use multicity_places::{
    cache::MemoryCache,
    places_client::{PlacesClient, PlacesLookup},
    places_provider::PlacesProvider,
};
use tracing::{debug, info, warn};

use crate::{console_notifications::ConsoleNotifications, parsers};

#[derive(Args)]
pub struct ValidateArgs {
    /// Route form document to validate
    #[arg(short, long)]
    input: PathBuf,

    /// Day past dates are measured against, defaults to the current day
    #[arg(long, env = "MULTICITY_TODAY", value_parser = parsers::parse_date)]
    today: Option<Date>,

    #[arg(long, env = "MULTICITY_MAX_ROWS", default_value_t = 10)]
    max_rows: usize,

    /// Each leg must start where the previous one ended
    #[arg(long, env = "MULTICITY_CONTINUITY")]
    continuity: bool,

    /// Applies the sightseeing selections of the document. Turns on the continuity check.
    #[arg(long, env = "MULTICITY_SIGHTSEEING")]
    sightseeing: bool,

    #[arg(
        long,
        env = "MULTICITY_VALIDATION_DELAY",
        value_parser = parsers::parse_duration,
        default_value = "1500ms"
    )]
    validation_delay: jiff::SignedDuration,

    #[arg(
        long,
        env = "MULTICITY_PLACES_LATENCY",
        value_parser = parsers::parse_duration,
        default_value = "500ms"
    )]
    places_latency: jiff::SignedDuration,
}

pub async fn run(args: ValidateArgs) -> Result<(), anyhow::Error> {
    info!("Validating route form {:?}", args.input);

    let reader = BufReader::new(File::open(&args.input)?);
    let document: JsonRouteForm = serde_json::from_reader(reader)?;

    let params = FormParams {
        max_rows: args.max_rows,
        continuity_check: args.continuity,
        validation_delay: args.validation_delay,
        today: args.today,
        ..FormParams::default()
    };
    let form = document.build_form(params.max_rows)?;
    let notifications: Arc<dyn NotificationFacade> = Arc::new(ConsoleNotifications);
    let controller = RouteFormController::with_form(form, params, notifications);

    if !args.sightseeing {
        let mut controller = controller;
        return validate_and_print(&mut controller).await;
    }

    let client = PlacesClient::new(
        PlacesProvider::Mock {
            latency: args.places_latency,
        },
        MemoryCache::default(),
    );
    let mut extension = SightseeingExtension::new(controller, Arc::new(client));
    apply_sightseeing(&mut extension, &document).await?;

    validate_and_print(&mut extension).await
}

/// Turns on sightseeing and selects the document's places. Legs without a destination are
/// skipped so that validation reports them.
async fn apply_sightseeing<C: RouteFormOps, L: PlacesLookup>(
    extension: &mut SightseeingExtension<C, L>,
    document: &JsonRouteForm,
) -> Result<(), anyhow::Error> {
    for (index, places) in document.sightseeing() {
        let Some(leg) = extension.form().legs().get(index).map(|leg| leg.id()) else {
            continue;
        };

        match extension.toggle_sightseeing(leg, true).await {
            Err(SightseeingError::NoDestination(_)) => {
                warn!("Day {} has no destination, skipping its sightseeing", index + 1);
                continue;
            }
            result => {
                result?;
            }
        }

        for place in places {
            extension.select_place(leg, *place, true)?;
        }
        debug!("Selected {} places for day {}", places.len(), index + 1);
    }

    Ok(())
}

async fn validate_and_print(form: &mut impl RouteFormOps) -> Result<(), anyhow::Error> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message("Validating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = form.validate_all().await;

    spinner.finish_and_clear();

    print_rows(&*form);

    if !outcome.is_valid() {
        bail!("Route validation failed with {} errors", outcome.error_count());
    }

    if let Some(summary) = form.summary() {
        print_summary(&summary);
    }
    print_totals(&form.trip_totals());

    Ok(())
}

fn print_rows(form: &impl RouteFormOps) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["DAY", "DATE", "FROM", "TO", "DISTANCE", "SIGHTSEEING", "ERRORS"]);

    for row in form.rows() {
        let sightseeing = row
            .extras
            .iter()
            .filter_map(panel_cell)
            .collect::<Vec<_>>()
            .join(", ");
        let errors = row
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("\n");
        let optional = |value: Option<String>| value.unwrap_or_else(|| String::from("-"));

        table.add_row(vec![
            Cell::new(row.day),
            Cell::new(optional(row.date.map(|date| date.to_string()))),
            Cell::new(optional(row.origin)),
            Cell::new(optional(row.destination)),
            Cell::new(optional(row.distance.map(|distance| distance.to_string()))),
            Cell::new(sightseeing),
            Cell::new(errors).fg(Color::Red),
        ]);
    }

    println!("{table}");
}

/// The badge of an enabled panel, or its status while places are not shown.
fn panel_cell(panel: &PanelView) -> Option<String> {
    if !panel.toggle.checked {
        return None;
    }

    match panel.status.message() {
        Some(message) => Some(message.to_owned()),
        None => panel.badge.clone(),
    }
}

fn print_summary(summary: &SummaryView) {
    println!("{}", summary.heading);
    println!("Route Summary:");
    for item in &summary.items {
        println!("  {item}");
    }
    for section in &summary.sections {
        println!("{}:", section.title);
        for line in &section.lines {
            println!("  {line}");
        }
    }
    println!("{}", summary.message);
}

fn print_totals(totals: &TripTotals) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let days = totals
        .total_days
        .map(|days| days.to_string())
        .unwrap_or_else(|| String::from("-"));
    let visited = totals
        .visited_locations
        .iter()
        .map(|location| location.name())
        .collect::<Vec<_>>()
        .join(", ");

    table.add_row(vec![Cell::new("Legs"), Cell::new(totals.total_legs)]);
    table.add_row(vec![Cell::new("Days"), Cell::new(days)]);
    table.add_row(vec![Cell::new("Leg distance"), Cell::new(totals.leg_distance)]);
    table.add_row(vec![
        Cell::new("Sightseeing distance"),
        Cell::new(totals.extra_distance),
    ]);
    table.add_row(vec![
        Cell::new("Total distance"),
        Cell::new(totals.total_distance),
    ]);
    table.add_row(vec![
        Cell::new("Round trip"),
        Cell::new(if totals.is_circular { "yes" } else { "no" }),
    ]);
    table.add_row(vec![Cell::new("Visited"), Cell::new(visited)]);

    println!("{table}");
}
