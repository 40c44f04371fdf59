//! `upbt config` command

use anyhow::Result;

use crate::cli::{ConfigArgs, ConfigCommands};
use upbt::util::settings::KEY_BUILD_PATH_FORMAT;
use upbt::{GlobalContext, SettingsStore};

pub fn execute(args: ConfigArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let mut store = SettingsStore::open(ctx.settings_path());

    match args.command {
        ConfigCommands::Show => {
            println!("settings file: {}", store.path().display());
            match store.get_str(KEY_BUILD_PATH_FORMAT) {
                Some(format) => println!("path format:   {}", format),
                None => println!("path format:   {} (default)", ctx.default_path_format()),
            }
            Ok(())
        }

        ConfigCommands::SetFormat(set) => {
            store.set_str(KEY_BUILD_PATH_FORMAT, &set.template)?;
            println!("path format:   {}", set.template);
            Ok(())
        }
    }
}
