use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use num_format::{Locale, ToFormattedString};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use bikeshare_explorer::models::{self, FILTER_DAYS, FILTER_MONTHS};
use bikeshare_explorer::{loader, stats, City, DayFilter, Error, Filters, MonthFilter};

#[derive(Parser, Debug)]
#[command(
    name = "bikeshare",
    version,
    about = "Explore US bikeshare trip data interactively"
)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv, and washington.csv.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

const RULE: &str = "----------------------------------------";

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Hello! Let's explore some US bikeshare data!");
    let mut rl = DefaultEditor::new()?;

    loop {
        let filters = match collect_filters(&mut rl)? {
            Some(f) => f,
            // Session closed at a prompt (EOF or interrupt).
            None => break,
        };
        println!("{RULE}");

        if let Err(err) = run_reports(&cli.data_dir, &filters) {
            match err.downcast_ref::<Error>() {
                Some(Error::EmptyTable) => {
                    println!("\nNo trips match the selected filters.");
                    println!("{RULE}");
                }
                _ => return Err(err),
            }
        }

        println!("\nWould you like to restart? Enter yes or no.");
        match read_line(&mut rl)? {
            Some(answer) if answer.eq_ignore_ascii_case("yes") => continue,
            _ => break,
        }
    }

    Ok(())
}

/// Prompt for the (city, month, day) triple, re-prompting until each answer
/// matches its fixed enumeration. Returns `None` when the user closes the
/// session instead of answering.
fn collect_filters(rl: &mut DefaultEditor) -> Result<Option<Filters>> {
    let cities = City::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("Which city? ({cities})");
    let city = loop {
        let Some(input) = read_line(rl)? else {
            return Ok(None);
        };
        match City::from_input(&input) {
            Some(city) => break city,
            None => println!("Sorry, I did not catch that. Please enter: {cities}"),
        }
    };

    println!("Which month? (january through june, or all)");
    let month = loop {
        let Some(input) = read_line(rl)? else {
            return Ok(None);
        };
        match MonthFilter::from_input(&input) {
            Some(month) => break month,
            None => println!(
                "Sorry, I did not catch that. Please enter: {}, or all",
                FILTER_MONTHS.join(", ")
            ),
        }
    };

    println!("Which day? (monday through sunday, or all)");
    let day = loop {
        let Some(input) = read_line(rl)? else {
            return Ok(None);
        };
        match DayFilter::from_input(&input) {
            Some(day) => break day,
            None => println!(
                "Sorry, I did not catch that. Please enter: {}, or all",
                FILTER_DAYS.join(", ")
            ),
        }
    };

    Ok(Some(Filters { city, month, day }))
}

/// Read one trimmed line. Empty input re-prompts rather than passing an
/// empty answer through validation. `None` means EOF or ctrl-C.
fn read_line(rl: &mut DefaultEditor) -> Result<Option<String>> {
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                return Ok(Some(input.to_string()));
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Load the filtered table and print the four statistics reports.
fn run_reports(data_dir: &Path, filters: &Filters) -> Result<()> {
    let trips = loader::load_trips(data_dir, filters)?;

    println!("\nCalculating the most frequent times of travel...\n");
    let started = Instant::now();
    let times = stats::time_summary(&trips)?;
    println!("Most common month: {}", models::month_name(times.month));
    println!(
        "Most common day of week: {}",
        models::weekday_name(times.weekday)
    );
    println!("Most common start hour: {}", times.hour);
    report_elapsed(started);

    println!("\nCalculating the most popular stations and trip...\n");
    let started = Instant::now();
    let stations = stats::station_summary(&trips)?;
    println!("Most commonly used start station: {}", stations.popular_start);
    println!("Most commonly used end station: {}", stations.popular_end);
    println!(
        "Most frequent combination of start and end station: {}",
        stations.popular_route
    );
    report_elapsed(started);

    println!("\nCalculating trip duration...\n");
    let started = Instant::now();
    let durations = stats::duration_summary(&trips)?;
    println!(
        "Total travel time: {} seconds",
        durations.total_secs.to_formatted_string(&Locale::en)
    );
    println!("Mean travel time: {:.2} seconds", durations.mean_secs);
    report_elapsed(started);

    println!("\nCalculating user stats...\n");
    let started = Instant::now();
    let users = if filters.city.has_demographics() {
        stats::user_summary(&trips)?
    } else {
        stats::user_summary_reduced(&trips)?
    };
    println!("Counts of user types:");
    print_counts(&users.user_type_counts);
    if let Some(genders) = &users.gender_counts {
        println!("Counts of gender:");
        print_counts(genders);
    }
    if let Some(years) = &users.birth_year {
        println!("Earliest year of birth: {}", years.earliest);
        println!("Most recent year of birth: {}", years.latest);
        println!("Most common year of birth: {}", years.most_common);
    }
    report_elapsed(started);

    Ok(())
}

fn print_counts(counts: &[(String, usize)]) {
    for (value, count) in counts {
        println!("  {:<12} {}", value, count.to_formatted_string(&Locale::en));
    }
}

fn report_elapsed(started: Instant) {
    println!("\nThis took {:.4} seconds.", started.elapsed().as_secs_f64());
    println!("{RULE}");
}
