//! Decoding of the recorded DVS, DAS and RIT push messages into typed views.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, TimeDelta, Timelike};
use pretty_assertions::assert_eq;

use infoplus_model::views::{actual, planned, Track};
use infoplus_model::{parse_das, parse_dvs, parse_rit};

/// Load fixture file content.
fn load_fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn track(number: i64, phase: Option<&str>) -> Track {
    Track {
        number,
        phase: phase.map(str::to_string),
    }
}

#[test]
fn test_departure_board() {
    let board = parse_dvs(&load_fixture("test-dvs-message.xml")).expect("Failed to parse DVS");

    assert_eq!(board.header.version, "6.2");
    assert_eq!(board.header.message_id, "5355006789623005");
    assert_eq!(board.header.subscription_id, 54);
    assert_eq!(board.header.timestamp.timestamp_subsec_millis(), 512);

    assert_eq!(board.ride_id, 6789);
    assert_eq!(board.ride_date, NaiveDate::from_ymd_opt(2025, 12, 21).unwrap());
    assert_eq!(board.station.code, "UTLN");
    assert_eq!(board.station.long_name.as_deref(), Some("Utrecht Lunetten"));
    assert_eq!(board.station.uic_code.as_deref(), Some("8400623"));

    let train = &board.train;
    assert_eq!(train.number, 6789);
    assert_eq!(train.train_type.code, "SPR");
    assert_eq!(train.train_type.name, "Sprinter");
    assert_eq!(train.carrier, "NS");
    assert_eq!(train.reservation_required, Some(false));
    assert_eq!(train.supplement_required, Some(false));
    assert_eq!(train.do_not_board, Some(false));
    assert_eq!(train.rear_part_remains, Some(false));
    assert_eq!(train.shunting, Some(false));
    assert_eq!(train.special_ticket, Some(false));

    assert_eq!(train.destinations.len(), 2);
    let destination = planned(&train.destinations).unwrap();
    assert_eq!(destination.code, "TL");
    assert_eq!(destination.long_name.as_deref(), Some("Tiel"));
    assert_eq!(destination.uic_code.as_deref(), Some("8400596"));

    assert_eq!(train.departure_times.len(), 2);
    assert_eq!(
        planned(&train.departure_times),
        Some(&DateTime::parse_from_rfc3339("2025-12-21T10:20:00+01:00").unwrap())
    );
    assert_eq!(
        actual(&train.departure_times),
        Some(&DateTime::parse_from_rfc3339("2025-12-21T10:21:00+01:00").unwrap())
    );
    assert_eq!(train.exact_delay, Some(TimeDelta::minutes(1)));
    assert_eq!(train.damped_delay, Some(TimeDelta::minutes(1)));

    assert_eq!(train.tracks.len(), 2);
    assert_eq!(planned(&train.tracks), Some(&track(2, None)));
    assert_eq!(train.direction.as_deref(), Some("B"));

    assert_eq!(train.shortened_route.len(), 2);
    let route = planned(&train.shortened_route).unwrap();
    assert_eq!(route.len(), 4);
    assert_eq!(route[0].code, "HTN");
    assert_eq!(route[0].long_name.as_deref(), Some("Houten"));
    assert!(train.route_presentation.is_some());

    assert_eq!(train.wings.len(), 1);
    let wing = &train.wings[0];
    assert_eq!(wing.tracks.len(), 2);
    assert_eq!(planned(&wing.tracks).map(ToString::to_string).as_deref(), Some("2"));
    assert_eq!(wing.destinations.len(), 2);
    assert_eq!(planned(&wing.destinations).unwrap().code, "TL");

    assert_eq!(wing.stops.len(), 2);
    let stops = planned(&wing.stops).unwrap();
    assert_eq!(stops.len(), 6);
    assert_eq!(stops[5].code, "TL");
    assert_eq!(stops[5].long_name.as_deref(), Some("Tiel"));

    assert_eq!(wing.rolling_stock.len(), 1);
    let stock = &wing.rolling_stock[0];
    assert_eq!(stock.kind, "SLT");
    assert_eq!(stock.designation.as_deref(), Some("6"));
    assert_eq!(stock.length, Some(10000));
    assert_eq!(stock.departure_order, Some(1));
    assert_eq!(stock.number.as_deref(), Some("000000-02628-0"));
    assert_eq!(stock.destinations.len(), 2);
    assert_eq!(planned(&stock.destinations).unwrap().long_name.as_deref(), Some("Tiel"));

    assert!(train.changes.is_empty());
}

#[test]
fn test_arrival_board() {
    let board = parse_das(&load_fixture("test-das-message.xml")).expect("Failed to parse DAS");

    assert_eq!(board.header.version, "6.1");
    assert_eq!(board.header.message_id, "8357002889258013");
    assert_eq!(board.header.subscription_id, 55);

    assert_eq!(board.ride_id, 2889);
    assert_eq!(board.ride_date, NaiveDate::from_ymd_opt(2025, 12, 23).unwrap());
    assert_eq!(board.station.code, "GD");
    assert_eq!(board.station.long_name.as_deref(), Some("Gouda"));
    assert_eq!(board.station.uic_code.as_deref(), Some("8400258"));

    let train = &board.train;
    assert_eq!(train.number, 2889);
    assert_eq!(train.train_type.code, "IC");
    assert_eq!(train.train_type.name, "Intercity");
    assert_eq!(train.carrier, "NS");

    assert_eq!(train.origins.len(), 2);
    let origin = planned(&train.origins).unwrap();
    assert_eq!(origin.code, "RTD");
    assert_eq!(origin.long_name.as_deref(), Some("Rotterdam Centraal"));
    assert_eq!(origin.uic_code.as_deref(), Some("8400530"));
    assert_eq!(actual(&train.origins), Some(origin));

    let presentation = train.origin_presentation.as_ref().unwrap();
    assert_eq!(presentation.groups.len(), 2);
    assert_eq!(presentation.first_text(), Some("Rotterdam C."));

    assert_eq!(train.arrival_times.len(), 2);
    assert_eq!(train.exact_delay, Some(TimeDelta::seconds(64)));
    assert_eq!(train.damped_delay, Some(TimeDelta::zero()));
    assert_eq!(
        train.delay_presentation.as_ref().and_then(|p| p.first_text()),
        Some("+1 min.")
    );

    assert_eq!(train.tracks.len(), 2);
    assert_eq!(planned(&train.tracks), Some(&track(3, None)));
    assert_eq!(
        train.track_presentation.as_ref().and_then(|p| p.first_text()),
        Some("3")
    );

    assert_eq!(train.shortened_route.len(), 2);
    let route = planned(&train.shortened_route).unwrap();
    assert_eq!(route.len(), 1);
    assert_eq!(route[0].code, "RTA");
    assert_eq!(route[0].long_name.as_deref(), Some("Rotterdam Alexander"));
    assert_eq!(
        train.route_presentation.as_ref().and_then(|p| p.first_text()),
        Some("Alexander")
    );

    assert_eq!(train.changes.len(), 1);
    assert_eq!(train.changes[0].change_type, "11");
    assert_eq!(train.changes[0].cause_short.as_deref(), Some("vertraging"));
    assert_eq!(train.changes[0].station, None);
}

#[test]
fn test_ride_info() {
    let ride = parse_rit(&load_fixture("test-rit-message.xml")).expect("Failed to parse RIT");

    assert_eq!(ride.header.version, "9.2");
    assert_eq!(ride.header.message_id, "53590029920001");
    assert_eq!(ride.header.subscription_id, 57);
    assert_eq!(ride.header.information_time, None);
    assert_eq!(ride.header.timestamp.nanosecond(), 123_456_700);
    assert_eq!(ride.application_version.as_deref(), Some("1.2.148"));

    assert_eq!(ride.train_number, 2992);
    assert_eq!(ride.train_date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
    assert_eq!(ride.train_type.code, "IC");
    assert_eq!(ride.train_type.name, "Intercity");
    assert_eq!(ride.carrier, "NS");
    assert_eq!(ride.reservation_required, Some(false));
    assert_eq!(ride.supplement_required, Some(false));
    assert_eq!(ride.special_ticket, Some(false));
    assert_eq!(ride.journey_planner, Some(true));

    assert_eq!(ride.logical_rides.len(), 1);
    assert_eq!(ride.logical_rides[0].number, "2992");
    assert_eq!(ride.logical_rides[0].parts.len(), 1);
    assert_eq!(ride.logical_rides[0].parts[0].number, 2992);

    let stops: Vec<_> = ride.stops().collect();
    assert_eq!(stops.len(), 4);

    let first = stops[0];
    assert_eq!(first.station.code, "MT");
    assert_eq!(first.station.short_name.as_deref(), Some("Maastricht"));
    assert_eq!(first.station.uic_code.as_deref(), Some("8400424"));
    assert_eq!(first.accessible, Some(false));
    assert_eq!(first.travel_assistance, Some(true));
    assert!(first.arrival_times.is_empty());
    assert_eq!(first.departure_tracks.len(), 2);
    assert_eq!(planned(&first.departure_tracks), Some(&track(3, None)));
    assert_eq!(planned(&first.stops), Some(&true));
    let destination = planned(&first.destinations).unwrap();
    assert_eq!(destination.code, "EHV");
    assert_eq!(destination.long_name.as_deref(), Some("Eindhoven Centraal"));

    assert_eq!(first.rolling_stock.len(), 1);
    let stock = &first.rolling_stock[0];
    assert_eq!(stock.id, "AD47");
    assert_eq!(stock.kind.as_deref(), Some("VIRM"));
    assert_eq!(stock.designation.as_deref(), Some("4"));
    assert_eq!(stock.length, Some(10900));

    let sittard = stops[1];
    assert_eq!(sittard.station.long_name.as_deref(), Some("Sittard"));
    assert_eq!(planned(&sittard.stops), Some(&true));
    assert_eq!(
        planned(&sittard.departure_tracks).map(ToString::to_string).as_deref(),
        Some("2b")
    );
    assert!(planned(&sittard.departure_times) >= planned(&sittard.arrival_times));

    let last = stops[3];
    assert_eq!(last.station.code, "EHV");
    assert_eq!(last.station.long_name.as_deref(), Some("Eindhoven Centraal"));
    assert_eq!(last.station.uic_code.as_deref(), Some("8400206"));
    assert_eq!(last.arrival_tracks.len(), 2);
    assert_eq!(planned(&last.arrival_tracks), Some(&track(5, None)));
    assert!(last.departure_times.is_empty());
    assert!(last.destinations.is_empty());
}

#[test]
fn test_views_reject_other_kinds() {
    let err = parse_dvs(&load_fixture("test-das-message.xml")).unwrap_err();
    assert_eq!(err.path(), Some("/PutReisInformatieBoodschapIn"));

    assert!(parse_rit(&load_fixture("test-dvs-message.xml")).is_err());
    assert!(parse_das(&load_fixture("test-rit-message.xml")).is_err());
}
