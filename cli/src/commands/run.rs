use std::time::Instant;

use anyhow::Context;
use colored::*;
use tracing::{error, warn};

use crate::commands::{blocks, countries};
use crate::mprint;
use crate::terminal::{colors, print, prompt, screen, spinner};
use geoscan_common::config::Config;
use geoscan_common::success;
use geoscan_core::catalog::Catalog;
use geoscan_core::job::{ScanJob, ScanOutcome};
use geoscan_core::layout::ResultLayout;
use geoscan_core::scanner::{NmapScanner, ScanTechnique};
use geoscan_core::selection::{ScanPlan, SelectionFlow, Step};
use geoscan_core::viewer::{ReportViewer, SystemViewer};

const ASK_COUNTRY: &str = "Type an entry number:";
const ASK_BLOCK: &str = "Type an entry number to start the scan:";
const ASK_PORTS: &str = "Enter the ports to scan (comma-separated ex: 80,443,21...):";

/// Interactive loop: country, block, ports, scan, then back to the countries.
pub fn run(cfg: &Config) -> anyhow::Result<()> {
    let catalog = Catalog::load(&cfg.data_dir).context("failed to load the country list")?;
    let layout = ResultLayout::from_config(cfg);
    let scanner = NmapScanner::new(&cfg.nmap, pick_technique());
    let mut flow = SelectionFlow::new(&catalog);

    screen::clear(cfg);
    countries::show(&catalog, cfg);

    loop {
        let question = match flow.step() {
            Step::SelectCountry => ASK_COUNTRY,
            Step::SelectBlock { .. } => ASK_BLOCK,
            Step::SelectPorts { .. } | Step::Done(_) => ASK_PORTS,
        };

        let Some(input) = prompt::ask(question)? else {
            break;
        };

        if let Err(e) = flow.submit(&input) {
            print::print_status(e.to_string().color(colors::ACCENT).to_string());
            continue;
        }

        match flow.step() {
            Step::SelectCountry => {}
            Step::SelectBlock { country, blocks: table } => {
                screen::clear(cfg);
                blocks::show(country, table, cfg);
            }
            Step::SelectPorts { .. } => {
                screen::clear(cfg);
            }
            Step::Done(plan) => {
                let plan = plan.clone();
                flow.reset();

                screen::clear(cfg);
                if let Err(e) = scan(&plan, &layout, &scanner, cfg) {
                    error!("Scan failed: {e:#}");
                }
                countries::show(&catalog, cfg);
            }
        }
    }

    print::end_of_program();
    Ok(())
}

fn scan(
    plan: &ScanPlan,
    layout: &ResultLayout,
    scanner: &NmapScanner,
    cfg: &Config,
) -> anyhow::Result<()> {
    print::header("starting scanner", cfg.quiet);
    print_plan(plan);

    let start_time = Instant::now();
    let outcome: ScanOutcome = {
        let span = spinner::scan_span(&plan.block.from, &plan.block.to);
        let _guard = span.enter();
        ScanJob::new(layout, scanner)
            .keep_intermediate(cfg.keep_intermediate)
            .run(plan)?
    };

    print_outcome(&outcome, start_time.elapsed().as_secs_f64(), cfg);

    if !cfg.no_open && outcome.summary.hosts_open > 0 {
        if let Err(e) = SystemViewer.open(&outcome.result_path) {
            warn!("{e:#}");
        }
    }
    Ok(())
}

fn print_plan(plan: &ScanPlan) {
    print::key_values(&[
        ("Country", print::plain(plan.country.name.as_str())),
        (
            "Block",
            format!("{} - {}", plan.block.from, plan.block.to).color(colors::IPV4_ADDR),
        ),
        ("Owner", plan.block.owner.as_str().color(colors::OWNER)),
        ("Ports", plan.ports.to_string().color(colors::PORT_OPEN)),
    ]);
    mprint!();
}

fn print_outcome(outcome: &ScanOutcome, secs: f64, cfg: &Config) {
    let summary = outcome.summary;

    if summary.hosts_open == 0 {
        print::header("zero open ports", cfg.quiet);
        print::no_results();
    } else if cfg.quiet < 2 {
        print::header("scan summary", cfg.quiet);
        print::summary_tree(&[
            ("Targets", outcome.addresses.to_string().normal()),
            ("Up", summary.hosts_seen.to_string().normal()),
            ("Open", summary.hosts_open.to_string().green().bold()),
            ("Skipped", summary.malformed_tokens.to_string().normal()),
        ]);
    }

    let hosts: ColoredString = format!("{} hosts", summary.hosts_open).bold().green();
    let total_time: ColoredString = format!("{secs:.2}s").bold().yellow();
    let output: String = format!("Scan Complete: {hosts} with open ports in {total_time}");

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => {
            mprint!();
        }
    }

    success!(
        "Scan successful. All results with open ports saved to '{}'",
        outcome.result_path.display()
    );
    mprint!();
}

/// SYN scans need raw sockets; without root nmap would refuse `-sS`.
fn pick_technique() -> ScanTechnique {
    if is_root::is_root() {
        ScanTechnique::Syn
    } else {
        warn!("Not running as root, falling back to a TCP connect scan (-sT)");
        ScanTechnique::Connect
    }
}
