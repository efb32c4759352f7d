use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Name of the binding that holds the previous line's result.
pub const LAST_RESULT: &str = "$";

/// Variable table of one session.
///
/// `$` is inserted on construction and never removed, so looking it up
/// always succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    vars: FxHashMap<Rc<str>, f64>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let mut vars = FxHashMap::default();
        vars.insert(LAST_RESULT.into(), 0.0);
        Environment { vars }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.vars.get(id).copied()
    }

    pub fn set(&mut self, id: Rc<str>, val: f64) {
        self.vars.insert(id, val);
    }

    pub fn last_result(&self) -> f64 {
        self.get(LAST_RESULT).unwrap_or_default()
    }

    pub fn set_last_result(&mut self, val: f64) {
        self.set(LAST_RESULT.into(), val);
    }
}
