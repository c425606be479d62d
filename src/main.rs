use anyhow::Result;
use clap::{crate_version, App as Cli, Arg};
use contacts_tui::app::App;
use contacts_tui::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new("contacts-tui")
        .version(crate_version!())
        .about("Edit the contacts of a storage service from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Directory holding config.yml")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("server")
                .short("s")
                .long("server")
                .value_name("URL")
                .help("Base URL of the contact storage service")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-live")
                .long("no-live")
                .help("Do not listen for changes made by other sessions"),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    // Flags override the file for this run only
    if let Some(server) = matches.value_of("server") {
        config.server_url = server.to_string();
    }
    if matches.is_present("no-live") {
        config.live_updates = false;
    }

    App::start(config).await
}
