#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

use anyhow::{Context, Result};
use clap::Parser;
use mapty::{
    cli, dlog,
    session::{Session, SortKey},
    store::SnapshotStore,
    utils,
};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let store = SnapshotStore::open(&cli.store)?;

    // Reset never reads the snapshot, so it also clears one that cannot be loaded.
    if matches!(cli.cmd, Some(cli::Cmd::Reset)) {
        return store.reset();
    }

    let mut session = Session::restore(&store)?;
    dlog!(
        "store={} restored={}",
        cli.store.display(),
        session.len()
    );

    match cli.cmd {
        Some(cli::Cmd::Add { workout }) => {
            let input = workout.to_input();
            let added = session.add(&input).context("Invalid workout")?;
            println!("{}\t{}", added.id(), utils::summary_line(added));
            session.persist(&store)?;
        }
        Some(cli::Cmd::Edit { id, workout }) => {
            let input = workout.to_input();
            let replaced = session
                .replace(&id, &input)
                .context("Invalid workout")?
                .with_context(|| format!("No workout with id {id}"))?;
            println!("{}\t{}", replaced.id(), utils::summary_line(replaced));
            session.persist(&store)?;
        }
        Some(cli::Cmd::Remove { id }) => {
            if session.remove(&id).is_none() {
                anyhow::bail!("No workout with id {id}");
            }
            session.persist(&store)?;
            tracing::info!(id = %id, "workout removed");
        }
        Some(cli::Cmd::Reset) => session.reset(&store)?,
        Some(cli::Cmd::List { sort, details }) => print_list(&session, sort.into(), details),
        None => print_list(&session, SortKey::Date, false),
    }

    Ok(())
}

fn print_list(session: &Session, sort: SortKey, details: bool) {
    if session.is_empty() {
        tracing::info!("no workouts yet; add one with `mapty add`");
        return;
    }

    for (i, w) in session.sorted(sort).into_iter().enumerate() {
        let line = utils::summary_line(w);
        if details {
            let c = w.coordinates();
            let created = w.created_at().to_rfc3339();
            println!(
                "{}\t{}\t{created}\t{:.5},{:.5}\t{line}",
                i + 1,
                w.id(),
                c.lat,
                c.lng
            );
        } else {
            println!("{line}");
        }
    }
}
