/* 3rd party libraries */
use clap::Arg;
use crossbeam_channel as cbc;
use log::{error, info};
use std::io::BufRead;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use building::Building;
use shared::Request;

/* Modules */
mod building;
mod config;
mod elevator;
mod shared;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, PartialEq, Eq)]
enum DriverCommand {
    Step,
    Request(u8, u8),
    Start,
    Stop,
    Quit,
}

const USAGE: &[&str] = &[
    "[s] run one step",
    "[r <start> <end>] make a request",
    "[start] start the building system",
    "[stop] stop the building system",
    "[q] quit",
];

/* Main */
fn main() {
    env_logger::init();

    let matches = clap::Command::new("elevator-sim")
        .about("Discrete-time simulation of a multi-elevator building")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the configuration file"),
        )
        .arg(
            Arg::new("floors")
                .long("floors")
                .takes_value(true)
                .help("Override the number of floors"),
        )
        .arg(
            Arg::new("elevators")
                .long("elevators")
                .takes_value(true)
                .help("Override the number of elevators"),
        )
        .arg(
            Arg::new("capacity")
                .long("capacity")
                .takes_value(true)
                .help("Override the elevator capacity"),
        )
        .arg(
            Arg::new("auto")
                .long("auto")
                .takes_value(true)
                .help("Run a step automatically every <MS> milliseconds"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .takes_value(false)
                .help("Print snapshots as JSON instead of text"),
        )
        .get_matches();

    // Load the configuration, falling back to defaults when the file is absent
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut building_config = if std::path::Path::new(config_path).exists() {
        unwrap_or_exit!(config::load_config(config_path)).building
    } else {
        info!("{} not found, using default configuration", config_path);
        config::Config::default().building
    };

    if let Some(floors) = matches.value_of("floors") {
        building_config.n_floors = unwrap_or_exit!(floors.parse::<u8>());
    }
    if let Some(elevators) = matches.value_of("elevators") {
        building_config.n_elevators = unwrap_or_exit!(elevators.parse::<u8>());
    }
    if let Some(capacity) = matches.value_of("capacity") {
        building_config.capacity = unwrap_or_exit!(capacity.parse::<u8>());
    }

    let json = matches.is_present("json");
    let mut building = unwrap_or_exit!(Building::from_config(&building_config));

    println!("Welcome to the Elevator System!");
    println!(
        "Simulating {} floors, {} elevators, capacity {}.",
        building.n_floors(),
        building.n_elevators(),
        building.capacity()
    );
    for line in USAGE {
        println!("{}", line);
    }
    print_report(&building, json);

    // Console thread: feed stdin lines to the main loop
    let (line_tx, line_rx) = cbc::unbounded::<String>();
    let console_thread = Builder::new().name("console".into());
    console_thread
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        })
        .expect("failed to spawn the console thread");

    // Optional auto-stepping
    let ticker = match matches.value_of("auto") {
        Some(ms) => cbc::tick(Duration::from_millis(unwrap_or_exit!(ms.parse::<u64>()))),
        None => cbc::never(),
    };

    // Main loop
    loop {
        cbc::select! {
            recv(line_rx) -> line => {
                match line {
                    Ok(line) => {
                        if !handle_line(&mut building, &line, json) {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            recv(ticker) -> _ => {
                building.step();
                print_report(&building, json);
            }
        }
    }
}

// Returns false when the driver should quit.
fn handle_line(building: &mut Building, line: &str, json: bool) -> bool {
    let command = match parse_command(line) {
        Some(command) => command,
        None => {
            if !line.trim().is_empty() {
                println!("Invalid command.");
            }
            for usage_line in USAGE {
                println!("{}", usage_line);
            }
            return true;
        }
    };

    match command {
        DriverCommand::Step => {
            building.step();
            print_report(building, json);
        }
        DriverCommand::Request(from, to) => {
            match Request::new(from, to).and_then(|request| building.add_request(request)) {
                Ok(()) => print_report(building, json),
                Err(e) => println!("{}", e),
            }
        }
        DriverCommand::Start => match building.start() {
            Ok(()) => print_report(building, json),
            Err(e) => println!("{}", e),
        },
        DriverCommand::Stop => {
            building.stop();
            print_report(building, json);
        }
        DriverCommand::Quit => return false,
    }
    true
}

fn parse_command(line: &str) -> Option<DriverCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["s"] => Some(DriverCommand::Step),
        ["r", from, to] => {
            let from = from.parse::<u8>().ok()?;
            let to = to.parse::<u8>().ok()?;
            Some(DriverCommand::Request(from, to))
        }
        ["start"] => Some(DriverCommand::Start),
        ["stop"] => Some(DriverCommand::Stop),
        ["q"] => Some(DriverCommand::Quit),
        _ => None,
    }
}

fn print_report(building: &Building, json: bool) {
    let report = building.report();
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => error!("failed to serialize the building report: {}", e),
        }
    } else {
        println!("------------Building Report------------");
        print!("{}", report);
        println!("---------------End Report--------------");
        println!();
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
