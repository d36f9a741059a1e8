use std::path::Path;
use std::process::ExitCode;

use crate::cli::context::{bridge_config, ensure_parent_dir, CliContext};
use crate::cli::graph_commands::report_outcome;
use crate::cli::Cli;
use crate::error::{ChatGraphError, ChatGraphResult};
use crate::export;
use crate::migrate::{self, ImportStats};
use crate::source::HttpSource;

pub fn import(cli: &Cli, json_path: &Path) -> ExitCode {
    report_outcome(run_import(cli, json_path))
}

fn run_import(cli: &Cli, json_path: &Path) -> ChatGraphResult<()> {
    println!("Importing from {}...", json_path.display());
    ensure_parent_dir(&cli.db)?;
    let stats = migrate::import_snapshot(json_path, &cli.db)?;
    print_stats(&stats);
    Ok(())
}

pub fn capture(cli: &Cli) -> ExitCode {
    report_outcome(run_capture(cli))
}

fn run_capture(cli: &Cli) -> ChatGraphResult<()> {
    let url = cli.bridge.as_deref().ok_or_else(|| {
        ChatGraphError::Other("capture needs --bridge (or CHATGRAPH_BRIDGE_URL)".into())
    })?;
    let handle = HttpSource::connect(bridge_config(cli, url))?;
    ensure_parent_dir(&cli.db)?;
    let stats = migrate::capture_snapshot(&handle, &cli.db)?;
    println!("Captured snapshot of {} into {}", handle.account().id, cli.db.display());
    print_stats(&stats);
    Ok(())
}

pub fn export_contacts(cli: &Cli, out_dir: &Path, pictures: bool) -> ExitCode {
    report_outcome(run_export_contacts(cli, out_dir, pictures))
}

fn run_export_contacts(cli: &Cli, out_dir: &Path, pictures: bool) -> ChatGraphResult<()> {
    let ctx = CliContext::connect(cli)?;
    let directory = export::contact_directory(&ctx.handle, pictures)?;
    let (contacts_path, groups_path) = export::write_contact_directory(&directory, out_dir)?;
    println!("Export complete");
    println!(" - {}", contacts_path.display());
    println!(" - {}", groups_path.display());
    Ok(())
}

pub fn download_pictures(export_dir: &Path, images_dir: &Path, renew: bool) -> ExitCode {
    report_outcome(run_download_pictures(export_dir, images_dir, renew))
}

fn run_download_pictures(export_dir: &Path, images_dir: &Path, renew: bool) -> ChatGraphResult<()> {
    let contacts = export::read_contacts(&export_dir.join("contacts.json"))?;
    let stats = export::download_pictures(&contacts, images_dir, renew)?;
    println!("Downloaded {} pictures into {}", stats.downloaded, images_dir.display());
    println!("  Already present: {}", stats.skipped);
    println!("  Without picture: {}", stats.without_picture);
    println!("  Failed: {}", stats.failed);
    Ok(())
}

fn print_stats(stats: &ImportStats) {
    println!("Import complete!");
    println!("  Contacts: {}", stats.contacts);
    println!("  Chats: {}", stats.chats);
    println!("  Participants: {}", stats.participants);
    if !stats.latest {
        println!("Note: a newer snapshot is already stored; commands keep using that one.");
    }
}
