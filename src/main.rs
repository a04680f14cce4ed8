use clap::{crate_version, App, Arg, ArgMatches};
use quire::build::build_site;
use quire::config::Config;
use std::error::Error;
use std::path::Path;
use url::Url;

fn main() {
    env_logger::init();

    let matches = App::new("quire")
        .version(crate_version!())
        .about("Builds HTML pages, an index and an RSS feed from plain-text posts")
        .arg(
            Arg::with_name("root")
                .value_name("ROOT")
                .help("Project directory containing posts/ and templates/")
                .default_value(".")
                .index(1),
        )
        .arg(
            Arg::with_name("base-url")
                .long("base-url")
                .value_name("URL")
                .takes_value(true)
                .help("Public URL of the site, substituted for {base_url} in rss.xml"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let root = matches.value_of("root").unwrap_or(".");
    let mut config = Config::from_directory(Path::new(root));
    if let Some(base_url) = matches.value_of("base-url") {
        config = config.with_base_url(Url::parse(base_url)?);
    }
    build_site(&config)?;
    Ok(())
}
