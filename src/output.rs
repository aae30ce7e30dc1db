use serde::Serialize;

use crate::verify::Verification;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Machine-readable form of a [`Verification`], printed by `--json`.
#[derive(Serialize, Debug)]
pub struct Report {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub processed: usize,
    pub total: usize,
}

impl From<&Verification> for Report {
    fn from(v: &Verification) -> Self {
        let (processed, total) = v.counts();
        match v {
            Verification::Success { .. } => Self {
                status: Status::Success,
                reason: None,
                processed,
                total,
            },
            Verification::Failure(failure) => Self {
                status: Status::Fail,
                reason: Some(failure.to_string()),
                processed,
                total,
            },
        }
    }
}

/// Print the one-line outcome, as text or as compact JSON.
pub fn print_verification(v: &Verification, json: bool) {
    if json {
        print_json(&Report::from(v));
    } else {
        println!("{}", v.summary_line());
    }
}

/// Print a Serialize value as single-line JSON, logging errors to stderr.
pub fn print_json(value: &(impl Serialize + ?Sized)) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[imgcheck] JSON serialization error: {e}"),
    }
}
