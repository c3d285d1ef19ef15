// SPDX-License-Identifier: MPL-2.0
use handy_lens::app::{self, Flags};

const HELP: &str = "\
Usage: handy_lens [--config-dir DIR] [--data-dir DIR] [PATH]

Options:
  --config-dir DIR  Directory holding settings.toml
  --data-dir DIR    Directory holding the recent history
  -h, --help        Print this help
";

fn main() -> iced::Result {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        log::warn!("ignoring --config-dir: {err}");
        None
    });
    let data_dir = args.opt_value_from_str("--data-dir").unwrap_or_else(|err| {
        log::warn!("ignoring --data-dir: {err}");
        None
    });
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    app::run(Flags {
        file_path,
        data_dir,
        config_dir,
    })
}
