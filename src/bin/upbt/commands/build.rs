//! `upbt build` command

use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{BuildArgs, MessageFormat, OutputFlags};
use upbt::builder::{BuildOrchestrator, FnNotifier};
use upbt::util::shell::{Shell, Status};
use upbt::{GlobalContext, InstallRegistry, SettingsStore};

pub fn execute(args: BuildArgs, flags: OutputFlags) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let store = SettingsStore::open(ctx.settings_path());
    let registry = InstallRegistry::discover(&ctx, store.clone());

    let install = match &args.engine {
        Some(name) => registry
            .by_name(name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no engine install named `{}`\nhint: run `upbt engines list`", name))?,
        None => match registry.installs().first() {
            Some(install) => (*install).clone(),
            None => bail!(
                "no engine installs found\n\
                 hint: register one with `upbt engines add <NAME> <PATH>`"
            ),
        },
    };

    let json = args.message_format == MessageFormat::Json;
    let shell = Shell::from_flags(flags.quiet, flags.verbose, flags.color, json);
    shell.status(
        Status::Building,
        format!("{} with {}", args.plugin.display(), install.name),
    );

    let mut orchestrator = BuildOrchestrator::new(ctx, store);
    let mut notifier = FnNotifier(|event| shell.json_event(&event));

    let started = orchestrator.start_build(&args.plugin, &install, &mut notifier)?;

    if shell.is_verbose() {
        shell.note(format!(
            "target directory {}",
            started.target_path.display()
        ));
    }

    if args.no_wait {
        shell.note(format!(
            "build launched; output will land in {}",
            started.target_path.display()
        ));
        return Ok(());
    }

    // The automation tool gives no granular progress, so show a spinner
    // while we wait on it.
    let spinner = if !json && !shell.is_quiet() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("building {}", install.name));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let outcome = orchestrator
        .wait_completion(&mut notifier)
        .expect("a build was started");

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    if outcome.success {
        shell.status(
            Status::Finished,
            format!("packaged to {}", outcome.target_path.display()),
        );
        Ok(())
    } else {
        if !json && !outcome.output.is_empty() {
            eprintln!("{}", outcome.output);
        }
        match outcome.exit_code {
            Some(code) => bail!("build tool exited with code {}", code),
            None => bail!("build tool terminated abnormally"),
        }
    }
}
