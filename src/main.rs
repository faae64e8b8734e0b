use clap::{crate_authors, crate_description, crate_version, Arg, ArgMatches, Command};
use localmeet_prep::events::{self, EventsConfig};
use localmeet_prep::io::code_literal::OutputLanguage;
use localmeet_prep::postcodes::{self, PostcodesConfig};
use log::{error, info};
use std::path::PathBuf;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = cli().get_matches();

    let result = match matches.subcommand() {
        Some(("events", args)) => run_events(args),
        Some(("postcodes", args)) => run_postcodes(args),
        _ => Err(exitcode::USAGE),
    };
    if let Err(code) = result {
        std::process::exit(code);
    }
}

fn cli() -> Command {
    Command::new("localmeet-prep")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("events")
                .about("Convert the event listing CSV file into one JSON file per event")
                .arg(base_arg())
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("FILE")
                        .help("Event listing CSV file. Defaults to <BASE>/python/events.csv"),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_name("DIR")
                        .help("Directory to create the data/events/ tree in. Defaults to <BASE>"),
                ),
        )
        .subcommand(
            Command::new("postcodes")
                .about("Filter the Open Postcode Geo dataset to a few postcode areas")
                .arg(base_arg())
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("FILE")
                        .help("Open Postcode Geo CSV file. Defaults to <BASE>/.data/open_postcode_geo.csv"),
                )
                .arg(
                    Arg::new("language")
                        .long("language")
                        .value_name("LANG")
                        .value_parser(["php", "js"])
                        .default_value("php")
                        .help("Language of the generated postcode literal file"),
                )
                .arg(
                    Arg::new("areas")
                        .long("areas")
                        .value_name("LIST")
                        .help("Comma separated list of postcode areas to keep. Defaults to the Ware/Hertford/Harlow areas"),
                )
                .arg(
                    Arg::new("literal-output")
                        .long("literal-output")
                        .value_name("FILE")
                        .help("Path of the generated literal file. Defaults to <BASE>/data/location/postcodes.php or postCodes.js"),
                )
                .arg(
                    Arg::new("csv-output")
                        .long("csv-output")
                        .value_name("FILE")
                        .help("Path of the sorted subset CSV file. Defaults to <BASE>/.data/postcodes_subset.csv"),
                ),
        )
}

fn base_arg() -> Arg {
    Arg::new("base")
        .long("base")
        .value_name("DIR")
        .default_value(".")
        .help("Root directory of the LocalMeet project")
}

fn path_arg(args: &ArgMatches, id: &str) -> Option<PathBuf> {
    args.get_one::<String>(id).map(PathBuf::from)
}

fn base_dir(args: &ArgMatches) -> PathBuf {
    path_arg(args, "base").unwrap_or_default()
}

fn run_events(args: &ArgMatches) -> Result<(), exitcode::ExitCode> {
    let mut config = EventsConfig::from_base(&base_dir(args));
    if let Some(input) = path_arg(args, "input") {
        config.input = input;
    }
    if let Some(output) = path_arg(args, "output") {
        config.output_base = output;
    }

    let written = events::convert_events(&config, || chrono::Local::now().naive_local())
        .map_err(|e| {
            error!("{}", e);
            e.exit_code()
        })?;
    println!("Saved {} events", written);
    Ok(())
}

fn run_postcodes(args: &ArgMatches) -> Result<(), exitcode::ExitCode> {
    let language: OutputLanguage = args
        .get_one::<String>("language")
        .map(|l| l.as_str())
        .unwrap_or("php")
        .parse()
        .map_err(|e: String| {
            error!("{}", e);
            exitcode::USAGE
        })?;

    let mut config = PostcodesConfig::from_base(&base_dir(args), language);
    if let Some(input) = path_arg(args, "input") {
        config.input = input;
    }
    if let Some(areas) = args.get_one::<String>("areas") {
        config.areas = areas
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_owned)
            .collect();
        if config.areas.is_empty() {
            error!("The list of postcode areas must not be empty");
            return Err(exitcode::USAGE);
        }
    }
    if let Some(path) = path_arg(args, "literal-output") {
        config.literal_output = path;
    }
    if let Some(path) = path_arg(args, "csv-output") {
        config.csv_output = path;
    }
    info!("Filtering {}", config.input.display());

    let summary = postcodes::convert_postcodes(&config).map_err(|e| {
        error!("{}", e);
        e.exit_code()
    })?;
    println!(
        "Filtered postcodes saved to {}",
        summary.literal_path.display()
    );
    println!("Total postcodes kept: {}", summary.kept);
    Ok(())
}
