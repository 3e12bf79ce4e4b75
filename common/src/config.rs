use std::path::PathBuf;

pub const DEFAULT_WORK_DIR: &str = "/opt/ips";
pub const DEFAULT_DATA_DIR: &str = "data";

pub struct Config {
    /// Directory holding `countries.csv` and the `countries/<code>.csv` tables.
    pub data_dir: PathBuf,

    /// Directory receiving the target list and the raw scanner report.
    pub work_dir: PathBuf,

    /// Directory receiving the filtered results, one subdirectory per country.
    ///
    /// Defaults to `<work_dir>/results`.
    pub results_dir: PathBuf,

    /// Scanner executable, looked up in `PATH` when not absolute.
    pub nmap: PathBuf,

    /// Keeps the target list and raw report instead of removing them after a scan.
    pub keep_intermediate: bool,

    /// Skips opening the result file once a scan is finished.
    pub no_open: bool,

    pub no_banner: bool,

    /// Leaves the screen untouched between interactive steps.
    pub no_clear: bool,

    /// 0 prints everything, 1 drops decorations, 2 prints results only.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        let work_dir = PathBuf::from(DEFAULT_WORK_DIR);
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            results_dir: work_dir.join("results"),
            work_dir,
            nmap: PathBuf::from("nmap"),
            keep_intermediate: false,
            no_open: false,
            no_banner: false,
            no_clear: false,
            quiet: 0,
        }
    }
}
