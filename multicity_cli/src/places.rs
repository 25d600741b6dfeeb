use clap::Args;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use multicity_places::{
    cache::NoCache,
    place::PlacesQuery,
    places_client::{PlacesClient, PlacesLookup},
    places_provider::PlacesProvider,
};

use crate::parsers;

#[derive(Args)]
pub struct PlacesArgs {
    /// Display name of the city
    city: String,

    /// Form value of the city, defaults to the name
    #[arg(long)]
    city_id: Option<String>,

    #[arg(long, value_parser = parsers::parse_duration, default_value = "0s")]
    latency: jiff::SignedDuration,

    #[arg(long)]
    json: bool,
}

pub async fn run(args: PlacesArgs) -> Result<(), anyhow::Error> {
    let client = PlacesClient::new(
        PlacesProvider::Mock {
            latency: args.latency,
        },
        NoCache,
    );
    let query = PlacesQuery::new(
        args.city_id.unwrap_or_else(|| args.city.clone()),
        args.city.as_str(),
    );

    let places = client.fetch_places(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("ID"), Cell::new("PLACE"), Cell::new("DISTANCE")]);

    for place in &places {
        table.add_row(vec![
            Cell::new(place.id),
            Cell::new(&place.name),
            Cell::new(place.distance),
        ]);
    }

    println!("{table}");

    Ok(())
}
