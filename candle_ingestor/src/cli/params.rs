use std::error::Error;
use std::io::Read;
use std::{fs, io};

use serde_json::Value;

use crate::models::request::CollectionJob;

/// Reads a batch job list from stdin as JSON.
pub fn parse_jobs_from_stdin() -> Result<Vec<CollectionJob>, Box<dyn Error>> {
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    let json_value: Value = serde_json::from_slice(&buffer)
        .map_err(|err| format!("Failed to parse stdin data: {err}"))?;
    parse_jobs_from_json_value(json_value)
}

/// Parses a batch job list from an inline JSON string.
pub fn parse_jobs_from_json_string(json_str: &str) -> Result<Vec<CollectionJob>, Box<dyn Error>> {
    let json_value: Value = serde_json::from_str(json_str)?;
    parse_jobs_from_json_value(json_value)
}

/// Reads a batch job list from a JSON file.
pub fn parse_jobs_from_file(file_path: &str) -> Result<Vec<CollectionJob>, Box<dyn Error>> {
    let content = fs::read_to_string(file_path)?;
    let json_value = serde_json::from_str(&content)?;
    parse_jobs_from_json_value(json_value)
}

fn parse_jobs_from_json_value(json_value: Value) -> Result<Vec<CollectionJob>, Box<dyn Error>> {
    let jobs: Vec<CollectionJob> = serde_json::from_value(json_value)?;
    Ok(jobs)
}
