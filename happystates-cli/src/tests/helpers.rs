//! Test helpers that lay out input tables and post streams on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const STATES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
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

pub(super) const CITIES_TSV: &str = "5128581\tNew York City\tNew York City\tNYC\t40.71427\t-74.00597\tP\tPPL\tUS\t\tNY\t\t\t\t8175133\t10\t57\tAmerica/New_York\t2012-09-04\n";

pub(super) const STOPWORDS: &str = "the\na\nUSER\nURL\n";

pub(super) const LEXICON: &str = "good\t3\nbad\t-3\n";

/// Posts covering every drop reason plus two scored posts.
///
/// Post 1 is located by coordinates in Colorado and post 2 through the
/// "New York, NY" profile location. Post 3 is French, the delete notice is
/// skipped, and post 5 sits outside every region.
pub(super) const POSTS_JSONL: &str = concat!(
    r#"{"id":1,"text":"Good day in Denver","lang":"en","coordinates":{"coordinates":[-104.98,39.74]}}"#,
    "\n",
    r#"{"id":2,"text":"bad day @someone","user":{"lang":"en","location":"New York, NY"}}"#,
    "\n",
    r#"{"id":3,"text":"bonne journée","lang":"fr","coordinates":{"coordinates":[-104.98,39.74]}}"#,
    "\n",
    r#"{"delete":{"status":{"id":4}}}"#,
    "\n",
    r#"{"id":5,"text":"good","lang":"en","coordinates":{"coordinates":[0.0,0.0]}}"#,
    "\n",
);

/// Expected CSV when cities are resolved.
///
/// `day` is unknown in both scored posts: residual `1.0` from post 1 and
/// `-3.0` from post 2 average to `-1.0`.
pub(super) const EXPECTED_CSV: &str = "id,state,lat,lon,words,text,score\n\
    1,Colorado,39.74,-104.98,good day in denver,Good day in Denver,4.0\n\
    2,New York,40.71427,-74.00597,bad day,bad day @someone,-4.0\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write fixture");
}

/// Temporary workspace with a complete input directory and a post stream.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let workspace = Self { _dir: dir, root };
        write_utf8(&workspace.input("states.xml"), STATES_XML.as_bytes());
        write_utf8(&workspace.input("US_cities.txt"), CITIES_TSV.as_bytes());
        write_utf8(&workspace.input("stopwords.txt"), STOPWORDS.as_bytes());
        write_utf8(&workspace.input("AFINN-111.txt"), LEXICON.as_bytes());
        write_utf8(&workspace.posts(), POSTS_JSONL.as_bytes());
        workspace
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn inputs_dir(&self) -> Utf8PathBuf {
        self.root.join("input_files")
    }

    pub(super) fn input(&self, name: &str) -> Utf8PathBuf {
        self.inputs_dir().join(name)
    }

    pub(super) fn posts(&self) -> Utf8PathBuf {
        self.root.join("posts.jsonl")
    }

    pub(super) fn output(&self) -> Utf8PathBuf {
        self.root.join("out").join("scores.csv")
    }

    pub(super) fn remove_input(&self, name: &str) {
        fs::remove_file(self.input(name)).expect("remove input table");
    }
}
