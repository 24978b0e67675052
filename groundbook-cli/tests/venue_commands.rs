//! Integration tests for the venue management commands.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_add_venue_prints_id() {
    let env = TestEnv::new();
    let id = env.add_venue("City Arena");

    env.command()
        .arg("show-venue")
        .arg(&id)
        .assert()
        .success()
        .stdout(predicate::str::contains("name:        City Arena"))
        .stdout(predicate::str::contains("hours:       09:00-22:00"))
        .stdout(predicate::str::contains("price/hour:  2000.00"));
}

#[test]
fn test_add_venue_with_all_fields() {
    let env = TestEnv::new();
    let id = env.add_venue_with(&[
        "--name",
        "Padel Point",
        "--owner",
        "Hina",
        "--type",
        "padel",
        "--description",
        "Two glass courts",
        "--open",
        "16",
        "--close",
        "23",
        "--price",
        "3500",
    ]);

    let output = env.stdout_of(&["show-venue", &id, "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["name"], "Padel Point");
    assert_eq!(json["type"], "padel");
    assert_eq!(json["description"], "Two glass courts");
    assert_eq!(json["operatingHours"]["start"], 16);
    assert_eq!(json["operatingHours"]["end"], 23);
    assert_eq!(json["pricePerHour"], 3500.0);
}

#[test]
fn test_add_venue_rejects_bad_hours() {
    let env = TestEnv::new();
    env.command()
        .args(["add-venue", "--name", "Arena", "--owner", "Ali"])
        .args(["--open", "22", "--close", "9"])
        .assert()
        .code(4);
}

#[test]
fn test_add_venue_rejects_unknown_type() {
    let env = TestEnv::new();
    env.command()
        .args(["add-venue", "--name", "Arena", "--owner", "Ali", "--type", "curling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown venue type"));
}

#[test]
fn test_update_venue_changes_only_given_fields() {
    let env = TestEnv::new();
    let id = env.add_venue("City Arena");

    env.command()
        .args(["update-venue", &id, "--price", "2500"])
        .assert()
        .success();

    env.command()
        .args(["show-venue", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("name:        City Arena"))
        .stdout(predicate::str::contains("price/hour:  2500.00"));
}

#[test]
fn test_update_venue_requires_a_field() {
    let env = TestEnv::new();
    let id = env.add_venue("City Arena");

    env.command()
        .args(["update-venue", &id])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_update_unknown_venue_is_not_found() {
    let env = TestEnv::new();
    env.command()
        .args(["update-venue", "missing", "--name", "Other"])
        .assert()
        .code(3);
}

#[test]
fn test_remove_venue_keeps_bookings() {
    let env = TestEnv::new();
    let id = env.add_venue("City Arena");
    let booking = env.book(&id, 10, 12);

    env.command()
        .args(["remove-venue", &id])
        .assert()
        .success()
        .stderr(predicate::str::contains("1 confirmed booking(s)"));

    env.command().args(["show-venue", &id]).assert().code(3);

    env.command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(booking.as_str()))
        .stdout(predicate::str::contains("Unknown venue"));
}

#[test]
fn test_list_venues_formats() {
    let env = TestEnv::new();
    env.add_venue("City Arena");
    env.add_venue("Model Town Ground");

    let table = env.stdout_of(&["list-venues"]);
    assert!(table.starts_with("ID\tNAME\tOWNER"));
    assert_eq!(table.lines().count(), 3);

    let csv = env.stdout_of(&["list-venues", "--format", "csv"]);
    assert!(csv.starts_with("id,name,owner,type,hours,price_per_hour"));
    assert!(csv.contains("Model Town Ground"));

    let json = env.stdout_of(&["list-venues", "--format", "json"]);
    let venues: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(venues.len(), 2);
}

#[test]
fn test_configured_output_format_applies() {
    let env = TestEnv::new();
    env.write_config("output_format: tsv\n");
    env.add_venue("City Arena");

    let tsv = env.stdout_of(&["list-venues"]);
    assert!(tsv.starts_with("id\tname\towner"));
}
