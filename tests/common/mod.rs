//! Shared test harness: in-memory fakes for the boundary traits

#![allow(dead_code)]

use rowcond::{
    AttributeLoader, AttributeTree, ConnectionFactory, ConnectionTarget, PathTagExpander,
    RelationalConnection, Result, TabularResult,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Records every call the core makes against the relational boundary.
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// A canned-responses database: statements map to fixed results.
pub struct FakeDb {
    results: HashMap<String, TabularResult>,
    pub log: CallLog,
}

impl FakeDb {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_result(mut self, sql: &str, result: TabularResult) -> Self {
        self.results.insert(sql.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl ConnectionFactory for FakeDb {
    fn connect(&self, target: &ConnectionTarget) -> Result<Box<dyn RelationalConnection>> {
        self.log.borrow_mut().push(format!("connect:{target:?}"));
        Ok(Box::new(FakeConnection {
            results: self.results.clone(),
            log: self.log.clone(),
        }))
    }
}

struct FakeConnection {
    results: HashMap<String, TabularResult>,
    log: CallLog,
}

impl RelationalConnection for FakeConnection {
    fn begin(&mut self) -> Result<()> {
        self.log.borrow_mut().push("begin".to_string());
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> Result<TabularResult> {
        self.log.borrow_mut().push(format!("execute:{sql}"));
        self.results
            .get(sql)
            .cloned()
            .ok_or_else(|| rowcond::Error::Execution(format!("unknown statement: {sql}")))
    }

    fn rollback(&mut self) -> Result<()> {
        self.log.borrow_mut().push("rollback".to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("close".to_string());
    }
}

/// A factory whose connections never open
pub struct NoServer;

impl ConnectionFactory for NoServer {
    fn connect(&self, _: &ConnectionTarget) -> Result<Box<dyn RelationalConnection>> {
        Err(rowcond::Error::Execution("connection refused".to_string()))
    }
}

/// In-memory attribute files keyed by path
pub struct MemoryAttributes {
    docs: HashMap<PathBuf, AttributeTree>,
}

impl MemoryAttributes {
    pub fn empty() -> Self {
        Self {
            docs: HashMap::new(),
        }
    }

    pub fn with_doc(mut self, path: &str, doc: AttributeTree) -> Self {
        self.docs.insert(PathBuf::from(path), doc);
        self
    }
}

impl AttributeLoader for MemoryAttributes {
    fn load(&self, path: &Path) -> Result<Option<AttributeTree>> {
        Ok(self.docs.get(path).cloned())
    }
}

/// Literal tag substitution, standing in for the host's tag library
pub struct TagMap {
    tags: Vec<(String, String)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn with_tag(mut self, tag: &str, value: &str) -> Self {
        self.tags.push((tag.to_string(), value.to_string()));
        self
    }
}

impl PathTagExpander for TagMap {
    fn expand(&self, text: &str) -> Result<String> {
        let mut out = text.to_string();
        for (tag, value) in &self.tags {
            out = out.replace(tag, value);
        }
        Ok(out)
    }
}
