use bikeshare_explorer::stats::{user_summary, user_summary_reduced};
use bikeshare_explorer::{Error, Trip};
use chrono::{Datelike, NaiveDateTime, Timelike};

fn trip(user_type: &str, gender: Option<&str>, birth_year: Option<i32>) -> Trip {
    let ts = NaiveDateTime::parse_from_str("2017-01-02 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    Trip {
        start_time: ts,
        start_station: "A".into(),
        end_station: "X".into(),
        duration_secs: 60,
        user_type: user_type.into(),
        gender: gender.map(str::to_string),
        birth_year,
        month: ts.month(),
        weekday: ts.weekday(),
        hour: ts.hour(),
    }
}

#[test]
fn full_variant_counts_descend_and_exclude_nulls() {
    let rows = vec![
        trip("Subscriber", Some("Male"), Some(1985)),
        trip("Customer", Some("Female"), Some(1992)),
        trip("Subscriber", None, None),
        trip("Subscriber", Some("Female"), Some(1985)),
    ];
    let got = user_summary(&rows).unwrap();

    assert_eq!(
        got.user_type_counts,
        vec![("Subscriber".to_string(), 3), ("Customer".to_string(), 1)]
    );
    // The null gender row is excluded, leaving Female 2 / Male 1.
    assert_eq!(
        got.gender_counts,
        Some(vec![("Female".to_string(), 2), ("Male".to_string(), 1)])
    );

    let years = got.birth_year.unwrap();
    assert_eq!(years.earliest, 1985);
    assert_eq!(years.latest, 1992);
    assert_eq!(years.most_common, 1985);
}

#[test]
fn gender_count_ties_keep_first_occurrence_order() {
    let rows = vec![
        trip("Subscriber", Some("Male"), None),
        trip("Subscriber", Some("Female"), None),
    ];
    let got = user_summary(&rows).unwrap();
    assert_eq!(
        got.gender_counts,
        Some(vec![("Male".to_string(), 1), ("Female".to_string(), 1)])
    );
}

#[test]
fn full_variant_with_no_birth_years_reports_none() {
    let rows = vec![trip("Subscriber", Some("Male"), None)];
    let got = user_summary(&rows).unwrap();
    assert_eq!(got.birth_year, None);
}

#[test]
fn reduced_variant_reports_user_types_only() {
    let rows = vec![
        trip("Subscriber", None, None),
        trip("Customer", None, None),
        trip("Subscriber", None, None),
    ];
    let got = user_summary_reduced(&rows).unwrap();
    assert_eq!(
        got.user_type_counts,
        vec![("Subscriber".to_string(), 2), ("Customer".to_string(), 1)]
    );
    assert_eq!(got.gender_counts, None);
    assert_eq!(got.birth_year, None);
}

#[test]
fn empty_table_is_an_explicit_error_for_both_variants() {
    let rows: Vec<Trip> = Vec::new();
    assert!(matches!(user_summary(&rows), Err(Error::EmptyTable)));
    assert!(matches!(
        user_summary_reduced(&rows),
        Err(Error::EmptyTable)
    ));
}
