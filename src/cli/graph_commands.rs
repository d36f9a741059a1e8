use std::collections::HashSet;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::context::{print_error, CliContext};
use crate::cli::Cli;
use crate::error::ChatGraphResult;
use crate::export;
use crate::ops::{GraphBuilder, InclusionPolicy};
use crate::queries::co_membership;

pub fn graph(cli: &Cli, saved_only: bool, out_dir: &Path) -> ExitCode {
    let policy = if saved_only {
        InclusionPolicy::SavedOnly
    } else {
        InclusionPolicy::All
    };
    report_outcome(build_graph(cli, policy, out_dir))
}

fn build_graph(cli: &Cli, policy: InclusionPolicy, out_dir: &Path) -> ChatGraphResult<()> {
    let ctx = CliContext::connect(cli)?;
    let resolver = ctx.seeded_resolver()?;
    let chats = ctx.chats()?;
    let account = ctx.account();

    println!("Mode: {}", match policy {
        InclusionPolicy::All => "all contacts (full graph)",
        InclusionPolicy::SavedOnly => "saved contacts only",
    });
    println!("Processing {} chats...", chats.len());

    let mut builder = GraphBuilder::new();
    builder.ingest(&account.id, &account.label(), &chats, policy, &resolver);
    let graph = builder.finish();

    let (nodes_path, edges_path) = export::write_graph_csv(&graph, out_dir, policy.prefix())?;
    println!("Wrote {} and {}", nodes_path.display(), edges_path.display());
    println!("{} nodes, {} edges.", graph.nodes.len(), graph.edges.len());
    Ok(())
}

pub fn co_membership_graph(cli: &Cli, out: &Path) -> ExitCode {
    report_outcome(build_co_membership(cli, out))
}

fn build_co_membership(cli: &Cli, out: &Path) -> ChatGraphResult<()> {
    let ctx = CliContext::connect(cli)?;
    let resolver = ctx.seeded_resolver()?;
    let groups = ctx.groups()?;

    let saved: HashSet<_> = resolver.saved_ids().cloned().collect();
    let pairs = co_membership(&groups, &saved);
    export::write_co_membership_csv(&pairs, out)?;

    println!("Contacts: {}", saved.len());
    println!("Pairs sharing a group: {}", pairs.len());
    println!("Wrote {}", out.display());
    Ok(())
}

pub(crate) fn report_outcome(result: ChatGraphResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(1)
        }
    }
}
