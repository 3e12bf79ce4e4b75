use std::fs;
use std::path::{Path, PathBuf};

pub const COUNTRIES: &str = "name,code\n\
Andorra,ad\n\
\"Congo, The Democratic Republic Of The\",cd\n\
Iceland,is\n";

pub const ANDORRA: &str = "From IP,To IP,Total IPs,Assign Date,Owner\n\
10.1.0.0,10.1.0.15,16,12/04/2011,Servei de Telecomunicacions\n\
10.2.0.0,10.2.0.3,4,01/09/2015,Andorra Telecom SAU\n";

pub const ICELAND: &str = "From IP,To IP,Total IPs,Assign Date,Owner\n\
10.9.0.9,10.9.0.1,0,22/02/2019,Broken Registry ehf\n";

/// Scratch directory under the system temp dir, removed on drop.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn empty(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!("geoscan-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    /// Three countries; Congo has no allocation table.
    pub fn sample(name: &str) -> Self {
        let dir = Self::empty(name);
        dir.write("countries.csv", COUNTRIES);
        dir.write("countries/ad.csv", ANDORRA);
        dir.write("countries/is.csv", ICELAND);
        dir
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

impl Drop for DataDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
