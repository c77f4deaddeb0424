//! One-shot bearing and distance between two coordinates, with an optional
//! device heading to get the indicator rotation angle.

use clap::Parser;
use serde::Serialize;

use arcompass::config::LatLon;
use arcompass::geodesy;

#[derive(Parser, Debug)]
#[command(name = "point_bearing")]
#[command(about = "Compute great-circle bearing and distance between two points", long_about = None)]
struct Args {
    /// Origin as "lat,lon"
    from: LatLon,

    /// Destination as "lat,lon"
    to: LatLon,

    /// Device heading in degrees; adds the relative rotation angle
    #[arg(long)]
    heading: Option<f64>,

    /// Emit JSON instead of text
    #[arg(short = 'j', long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PointSummary {
    from: String,
    to: String,
    bearing_degrees: f64,
    distance_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_angle_degrees: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let from = args.from.point();
    let to = args.to.point();

    let bearing = geodesy::initial_bearing(from, to);
    let distance = geodesy::haversine_distance_m(from, to);
    let relative = args
        .heading
        .map(|h| geodesy::normalize_degrees(bearing - h));

    let summary = PointSummary {
        from: from.to_string(),
        to: to.to_string(),
        bearing_degrees: bearing,
        distance_m: distance,
        heading_degrees: args.heading,
        relative_angle_degrees: relative,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("From:     {}", summary.from);
        println!("To:       {}", summary.to);
        println!("Bearing:  {:.2}°", summary.bearing_degrees);
        println!("Distance: {:.0} m", summary.distance_m);
        if let (Some(heading), Some(relative)) =
            (summary.heading_degrees, summary.relative_angle_degrees)
        {
            println!("Heading:  {:.2}°", heading);
            println!("Rotate:   {:.2}°", relative);
        }
    }

    Ok(())
}
