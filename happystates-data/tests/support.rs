//! Shared helpers for data integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub const STATES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<states>
  <state name="Colorado">
    <point lat="41.0" lng="-109.05"/>
    <point lat="41.0" lng="-102.04"/>
    <point lat="36.99" lng="-102.04"/>
    <point lat="36.99" lng="-109.05"/>
  </state>
  <state name="New York">
    <point lat="45.0" lng="-79.76"/>
    <point lat="45.0" lng="-71.85"/>
    <point lat="40.5" lng="-71.85"/>
    <point lat="40.5" lng="-79.76"/>
  </state>
</states>
"#;

pub const CITIES_TSV: &str = "5128581\tNew York City\tNew York City\tNYC\t40.71427\t-74.00597\tP\tPPL\tUS\t\tNY\t\t\t\t8175133\t10\t57\tAmerica/New_York\t2012-09-04\n\
5419384\tDenver\tDenver\t\t39.73915\t-104.9847\tP\tPPLA\tUS\t\tCO\t031\t\t\t600158\t1609\t1636\tAmerica/Denver\t2012-09-04\n";

pub const STOPWORDS: &str = "the\na\nUSER\nURL\n";

pub const LEXICON: &str = "good\t3\nbad\t-3\nhappy\t3\n";

/// Temporary directory holding a complete set of input tables.
pub struct InputDir {
    pub dir: TempDir,
}

impl InputDir {
    pub fn complete() -> Self {
        let input = Self {
            dir: TempDir::new().expect("create temp dir"),
        };
        input.write("states.xml", STATES_XML);
        input.write("US_cities.txt", CITIES_TSV);
        input.write("stopwords.txt", STOPWORDS);
        input.write("AFINN-111.txt", LEXICON);
        input
    }

    pub fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temp dir {path:?} is not UTF-8"))
    }

    pub fn path(&self, name: &str) -> Utf8PathBuf {
        self.root().join(name)
    }

    pub fn write(&self, name: &str, contents: &str) {
        let target = self.path(name);
        fs::write(&target, contents)
            .unwrap_or_else(|err| panic!("failed to write fixture {target}: {err}"));
    }

    pub fn remove(&self, name: &str) {
        let target = self.path(name);
        fs::remove_file(&target)
            .unwrap_or_else(|err| panic!("failed to remove fixture {target}: {err}"));
    }
}

pub fn file_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or_default()
}
