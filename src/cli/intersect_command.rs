use std::process::ExitCode;

use crate::cli::context::{print_error, CliContext};
use crate::cli::Cli;
use crate::error::ChatGraphError;
use crate::model::{GroupRecord, IntersectionReport, GROUP_SUFFIX};
use crate::queries::{analyze, distinct_members, find_all_groups, find_group};
use crate::validation;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

pub fn run(cli: &Cli, group: Option<&str>, exact: bool, json: bool) -> ExitCode {
    ExitCode::from(execute(cli, group, exact, json))
}

/// Runs the intersection report and returns the process status:
/// 0 on success (including nothing to report), 1 on any failure.
pub fn execute(cli: &Cli, group: Option<&str>, exact: bool, json: bool) -> u8 {
    let selector = match validation::non_blank(group.unwrap_or(""), "--group") {
        Ok(s) => s,
        Err(e) => {
            print_error(&e);
            eprintln!("Example: chatgraph intersect --group \"My Group\"");
            return 1;
        }
    };

    let ctx = match CliContext::connect(cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };

    let groups = match ctx.groups() {
        Ok(g) => g,
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };
    if groups.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("No group chats found.");
        }
        return 0;
    }

    let target = match find_group(&groups, &selector, exact) {
        Ok(target) => target,
        Err(ChatGraphError::GroupNotFound { candidates, .. }) => {
            eprintln!("Target group not found.");
            eprintln!(
                "Tip: pass the exact group id (ends with {}) or use --exact for an exact name match.",
                GROUP_SUFFIX
            );
            eprintln!("Your groups are:");
            for c in &candidates {
                eprintln!("- {}   ({})", c.display_name.as_deref().unwrap_or(""), c.id);
            }
            return 1;
        }
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };
    warn_if_ambiguous(&groups, &selector, exact, target);

    let mut resolver = match ctx.seeded_resolver() {
        Ok(r) => r,
        Err(e) => {
            print_error(&e);
            return 1;
        }
    };

    let self_id = ctx.account().id.clone();
    let reports = analyze(target, &groups, &self_id, &mut resolver);

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                print_error(&ChatGraphError::from(e));
                return 1;
            }
        }
        return 0;
    }

    println!();
    println!("Target group: {} ({})", target.name(), target.id);
    println!("Members in target: {}", distinct_members(target, &self_id).len());
    println!();

    if reports.is_empty() {
        println!("No non-empty intersections found with other groups.");
    }
    for report in &reports {
        print_report(report);
    }

    0
}

fn warn_if_ambiguous(groups: &[GroupRecord], selector: &str, exact: bool, chosen: &GroupRecord) {
    let matches = find_all_groups(groups, selector, exact);
    if matches.len() > 1 {
        let names: Vec<&str> = matches.iter().map(|g| g.name()).collect();
        tracing::warn!(
            selector,
            chosen = %chosen.id,
            matches = ?names,
            "selector matches several groups, using the first"
        );
    }
}

fn print_report(report: &IntersectionReport) {
    println!("{}", RULE);
    println!("Intersection with: {} ({})", report.other_group_name, report.other_group_id);
    println!("Count: {}", report.overlap_count);
    println!("{}", THIN_RULE);

    for row in &report.rows {
        let number = row
            .info
            .phone_number
            .as_deref()
            .map(|n| format!("+{}", n))
            .unwrap_or_else(|| "(no number)".into());
        let name = row.info.address_book_name.as_deref().unwrap_or("(no address-book name)");
        let nick = row.info.profile_nickname.as_deref().unwrap_or("(no pushname)");
        println!("{} | name: {} | nickname: {} | id: {}", number, name, nick, row.id);
    }
    println!();
}
