use std::fs;
use std::path::Path;

use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const CHICAGO_HEADER: &str =
    "Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";
const WASHINGTON_HEADER: &str =
    "Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

fn write_csv(dir: &Path, file: &str, header: &str, rows: &[&str]) {
    let mut csv = String::from(header);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    fs::write(dir.join(file), csv).unwrap();
}

// 2017-01-02 is a Monday, 2017-01-08 a Sunday.
fn chicago_rows() -> Vec<&'static str> {
    vec![
        "2017-01-02 08:10:00,2017-01-02 08:20:00,600,A,X,Subscriber,Male,1985",
        "2017-01-02 08:30:00,2017-01-02 08:40:00,600,A,X,Subscriber,Female,1992",
        "2017-01-08 09:00:00,2017-01-08 09:05:00,300,B,Y,Customer,Female,1990",
    ]
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("bikeshare"));
}

#[test]
fn scripted_session_prints_all_four_reports() {
    let dir = tempdir().unwrap();
    write_csv(dir.path(), "chicago.csv", CHICAGO_HEADER, &chicago_rows());

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.write_stdin("chicago\nall\nall\nno\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Most common month: January"))
        .stdout(predicate::str::contains("Most common day of week: Monday"))
        .stdout(predicate::str::contains("Most common start hour: 8"))
        .stdout(predicate::str::contains(
            "Most commonly used start station: A",
        ))
        .stdout(predicate::str::contains("Total travel time: 1,500 seconds"))
        .stdout(predicate::str::contains("Mean travel time: 500.00 seconds"))
        .stdout(predicate::str::contains("Counts of user types:"))
        .stdout(predicate::str::contains("Counts of gender:"))
        .stdout(predicate::str::contains("Earliest year of birth: 1985"));
}

#[test]
fn invalid_and_empty_answers_reprompt() {
    let dir = tempdir().unwrap();
    write_csv(dir.path(), "chicago.csv", CHICAGO_HEADER, &chicago_rows());

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    // A blank line, a city outside the enumeration, and a wrongly cased one
    // must all re-prompt before "chicago" is accepted.
    cmd.write_stdin("\ndenver\nChicago\nchicago\nall\nall\nno\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sorry, I did not catch that"))
        .stdout(predicate::str::contains("Most common month: January"));
}

#[test]
fn washington_session_skips_demographics() {
    let dir = tempdir().unwrap();
    write_csv(
        dir.path(),
        "washington.csv",
        WASHINGTON_HEADER,
        &["2017-01-02 08:10:00,2017-01-02 08:20:00,600,A,X,Subscriber"],
    );

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.write_stdin("washington\nall\nall\nno\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Counts of user types:"))
        .stdout(predicate::str::contains("Counts of gender:").not())
        .stdout(predicate::str::contains("year of birth").not());
}

#[test]
fn empty_filter_result_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    // Only Monday trips, so a Sunday filter matches nothing.
    write_csv(
        dir.path(),
        "chicago.csv",
        CHICAGO_HEADER,
        &["2017-01-02 08:10:00,2017-01-02 08:20:00,600,A,X,Subscriber,Male,1985"],
    );

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.write_stdin("chicago\njanuary\nsunday\nno\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No trips match the selected filters"));
}

#[test]
fn missing_dataset_is_fatal() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.write_stdin("chicago\nall\nall\n");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("chicago.csv"));
}

#[test]
fn restart_runs_a_second_session() {
    let dir = tempdir().unwrap();
    write_csv(dir.path(), "chicago.csv", CHICAGO_HEADER, &chicago_rows());

    let mut cmd = Command::cargo_bin("bikeshare").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd.write_stdin("chicago\nall\nall\nyes\nchicago\njanuary\nmonday\nno\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Most common month: January").count(2));
}
