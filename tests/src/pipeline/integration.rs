use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use geoscan_common::network::ports::PortSpec;
use geoscan_common::network::range::Ipv4Range;
use geoscan_core::catalog::Catalog;
use geoscan_core::job::{self, ScanJob};
use geoscan_core::layout::ResultLayout;
use geoscan_core::scanner::{PortScanner, ScanError};
use geoscan_core::selection::{ScanPlan, SelectionFlow, Step};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("geoscan-it-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        Self(root)
    }

    fn layout(&self) -> ResultLayout {
        ResultLayout::new(self.0.join("work"), self.0.join("results"))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Answers like a real scanner would: hosts with an even last octet have
/// 443 open, the rest are up with everything closed.
#[derive(Default)]
struct FakeScanner {
    calls: RefCell<Vec<(usize, String)>>,
}

impl PortScanner for FakeScanner {
    fn scan(&self, target_list: &Path, ports: &PortSpec, report: &Path) -> Result<PathBuf, ScanError> {
        let targets = fs::read_to_string(target_list).unwrap();
        let mut out = format!("# Nmap 7.94 scan initiated as: nmap -p {ports}\n");
        let mut count = 0;

        for ip in targets.lines() {
            count += 1;
            let last: u8 = ip.rsplit('.').next().unwrap().parse().unwrap();
            let state = if last % 2 == 0 { "open" } else { "closed" };
            out.push_str(&format!("Host: {ip} ()\tStatus: Up\n"));
            out.push_str(&format!(
                "Host: {ip} ()\tPorts: 80/closed/tcp//http///, 443/{state}/tcp//https///\n"
            ));
        }
        out.push_str("# Nmap done\n");

        fs::write(report, out).unwrap();
        self.calls.borrow_mut().push((count, ports.to_string()));
        Ok(report.to_path_buf())
    }
}

fn select(catalog: &Catalog, answers: &[&str]) -> ScanPlan {
    let mut flow = SelectionFlow::new(catalog);
    for answer in answers {
        flow.submit(answer).unwrap();
    }
    match flow.step() {
        Step::Done(plan) => plan.clone(),
        other => panic!("selection did not finish: {other:?}"),
    }
}

#[test]
fn scan_block_end_to_end() {
    let scratch = Scratch::new("end_to_end");
    let catalog = Catalog::load(&fixtures().join("data")).unwrap();
    let plan = select(&catalog, &["0", "0", "443, 80"]);
    let layout = scratch.layout();
    let scanner = FakeScanner::default();

    let outcome = ScanJob::new(&layout, &scanner).run(&plan).unwrap();

    assert_eq!(outcome.addresses, 8);
    assert_eq!(outcome.summary.hosts_seen, 8);
    assert_eq!(outcome.summary.hosts_open, 4);
    assert_eq!(
        outcome.result_path,
        scratch.0.join("results/li/li_0_Telecom_Liechtenstein_AG.txt")
    );
    assert_eq!(
        fs::read_to_string(&outcome.result_path).unwrap(),
        "192.0.2.0 () 443/open\n\
         192.0.2.2 () 443/open\n\
         192.0.2.4 () 443/open\n\
         192.0.2.6 () 443/open\n"
    );
    assert_eq!(*scanner.calls.borrow(), vec![(8, "443,80".to_string())]);

    let paths = layout.paths(&plan);
    assert!(!paths.target_list.exists());
    assert!(!paths.raw_report.exists());
}

#[test]
fn block_crossing_octet_boundary() {
    let scratch = Scratch::new("boundary");
    let catalog = Catalog::load(&fixtures().join("data")).unwrap();
    let plan = select(&catalog, &["0", "1", "443"]);
    let layout = scratch.layout();
    let scanner = FakeScanner::default();

    let outcome = ScanJob::new(&layout, &scanner)
        .keep_intermediate(true)
        .run(&plan)
        .unwrap();

    let paths = layout.paths(&plan);
    let targets = fs::read_to_string(&paths.target_list).unwrap();
    let targets: Vec<&str> = targets.lines().collect();
    assert_eq!(targets.len(), 12);
    assert_eq!(targets[0], "198.51.100.250");
    assert_eq!(targets[5], "198.51.100.255");
    assert_eq!(targets[6], "198.51.101.0");
    assert_eq!(targets[11], "198.51.101.5");
    assert!(paths.raw_report.exists());

    assert_eq!(outcome.summary.hosts_open, 6);
    assert_eq!(
        outcome.result_path.file_name().unwrap(),
        "li_1_Kabel_Net_&_Co..txt"
    );
}

#[test]
fn repeated_scans_of_one_country_share_a_directory() {
    let scratch = Scratch::new("repeat");
    let catalog = Catalog::load(&fixtures().join("data")).unwrap();
    let layout = scratch.layout();
    let scanner = FakeScanner::default();

    for block in ["0", "1"] {
        let plan = select(&catalog, &["0", block, "443"]);
        ScanJob::new(&layout, &scanner).run(&plan).unwrap();
    }

    let mut results: Vec<String> = fs::read_dir(scratch.0.join("results/li"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    results.sort();
    assert_eq!(
        results,
        vec!["li_0_Telecom_Liechtenstein_AG.txt", "li_1_Kabel_Net_&_Co..txt"]
    );
}

#[test]
fn quoted_country_names_survive_loading() {
    let catalog = Catalog::load(&fixtures().join("data")).unwrap();
    let korea = catalog.country(1).unwrap();

    assert_eq!(korea.name, "Korea, Republic Of");
    assert_eq!(korea.code, "kr");
    assert_eq!(catalog.blocks(korea).unwrap().len(), 1);
}

#[test]
fn filter_recorded_report() {
    let scratch = Scratch::new("filter");
    fs::create_dir_all(&scratch.0).unwrap();
    let result = scratch.0.join("filtered.txt");

    let summary = job::filter_to_file(&fixtures().join("sample.gnmap"), &result).unwrap();

    assert_eq!(summary.hosts_seen, 4);
    assert_eq!(summary.hosts_open, 3);
    assert_eq!(summary.malformed_tokens, 1);
    assert_eq!(
        fs::read_to_string(&result).unwrap(),
        "192.0.2.1 (gw.example.li) 22/open, 443/open\n\
         192.0.2.5 () 443/open\n\
         192.0.2.6 () 80/open\n"
    );
}

#[test]
fn expansion_matches_block_total() {
    let catalog = Catalog::load(&fixtures().join("data")).unwrap();
    let country = catalog.country(0).unwrap();

    for block in catalog.blocks(country).unwrap() {
        let range = Ipv4Range::parse(&block.from, &block.to).unwrap();
        let total: u64 = block.total.parse().unwrap();
        assert_eq!(range.len(), total);
        assert_eq!(range.iter().count() as u64, total);
    }
}

#[test]
fn shipped_catalogue_has_unique_codes() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
    let catalog = Catalog::load(&data).unwrap();
    let countries = catalog.countries();

    assert_eq!(countries.len(), 213);
    assert_eq!(countries[0].name, "Afghanistan");
    assert_eq!(countries[212].name, "Yemen");

    let mut seen = HashSet::new();
    for country in countries {
        assert_eq!(country.code.len(), 2, "{}", country.name);
        assert!(seen.insert(country.code.as_str()), "duplicate code {}", country.code);
    }

    let chad = countries.iter().find(|c| c.name == "Chad").unwrap();
    assert_eq!(chad.code, "td");
    let andorra = countries.iter().find(|c| c.code == "ad").unwrap();
    assert!(!catalog.blocks(andorra).unwrap().is_empty());
}
