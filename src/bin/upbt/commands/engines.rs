//! `upbt engines` command

use anyhow::Result;

use crate::cli::{EnginesArgs, EnginesCommands, OutputFlags};
use upbt::util::shell::{Shell, Status};
use upbt::{GlobalContext, InstallRegistry, SettingsStore};

pub fn execute(args: EnginesArgs, flags: OutputFlags) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let store = SettingsStore::open(ctx.settings_path());
    let mut registry = InstallRegistry::discover(&ctx, store);
    let shell = Shell::from_flags(flags.quiet, flags.verbose, flags.color, false);

    match args.command {
        EnginesCommands::List => {
            let installs = registry.installs();
            if installs.is_empty() {
                shell.note("no engine installs found; add one with `upbt engines add <NAME> <PATH>`");
                return Ok(());
            }
            for install in installs {
                println!("{:<16} {}", install.name, install.path.display());
            }
            Ok(())
        }

        EnginesCommands::Add(add) => {
            let install = registry.add_custom(&add.name, &add.path)?;
            shell.status(Status::Added, install.to_string());
            Ok(())
        }

        EnginesCommands::Remove(remove) => {
            let removed = registry.remove_by_name(&remove.name)?;
            if removed == 0 {
                shell.warn(format!("no custom install named `{}`", remove.name));
            } else {
                shell.status(
                    Status::Removed,
                    format!("{} install(s) named `{}`", removed, remove.name),
                );
            }
            Ok(())
        }
    }
}
