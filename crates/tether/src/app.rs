use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("tether")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect client-side tunnel and connection state")
        .long_about("Tether mirrors the state of a tunneling daemon on the client: the server directory, connected services, live tunnels and credential prompts. The CLI replays recorded push-event logs through the same store a desktop client uses.")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only log errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("replay")
                .about("Replay a JSON-lines push-event log and print the resulting state")
                .arg(
                    Arg::new("file")
                        .help("Event log, one {\"Directory\": ...} or {\"Remote\": ...} object per line")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration as TOML")
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "tether");
    }

    #[test]
    fn test_replay_requires_file() {
        let app = build_cli();
        let result = app.try_get_matches_from(vec!["tether", "replay"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_json_flag() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["tether", "replay", "events.jsonl", "--json"])
            .unwrap();
        let sub = matches.subcommand_matches("replay").unwrap();
        assert_eq!(sub.get_one::<String>("file").unwrap(), "events.jsonl");
        assert!(sub.get_flag("json"));
    }

    #[test]
    fn test_quiet_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["tether", "config", "-q"])
            .unwrap();
        assert!(matches.get_flag("quiet"));
    }

    #[test]
    fn test_subcommand_required() {
        let app = build_cli();
        assert!(app.try_get_matches_from(vec!["tether"]).is_err());
    }
}
