use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned by operations that only report success.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct OpResult {
    pub result: bool,
}

impl OpResult {
    pub fn ok() -> Self {
        Self { result: true }
    }
}
