//! Per-line conversion of dump records
//!
//! Each output line is a self-contained graph: the backlinks a node carries
//! in `@reverse` are turned into forward links on the nodes they point from.

use serde_json::{json, Map, Value};
use wd2rdbl_domain::namespace::{keyword, term};
use wd2rdbl_mapper::{Mapper, NormalizedNode};

use crate::error::LineError;

/// Result of converting one input line
#[derive(Debug)]
pub enum LineOutcome {
    /// Not a record (array brackets, blank lines)
    Skipped,
    /// One compact JSON line, without trailing newline
    Converted(String),
    /// The record was dropped
    Failed {
        /// The offending line without its line ending
        line: String,
        /// Why it was dropped
        error: LineError,
    },
}

/// Convert one raw dump line
///
/// Lines that are not valid UTF-8 fail on their own; the rest of the
/// stream is unaffected.
pub fn convert_bytes(mapper: &Mapper, raw: &[u8]) -> LineOutcome {
    match std::str::from_utf8(raw) {
        Ok(line) => convert_line(mapper, line),
        Err(error) => {
            let line = String::from_utf8_lossy(raw);
            if !line.trim_start().starts_with('{') {
                return LineOutcome::Skipped;
            }
            LineOutcome::Failed {
                line: without_line_ending(&line).to_string(),
                error: error.into(),
            }
        }
    }
}

/// Convert one dump line
///
/// Lines not starting with `{` are skipped. A trailing `,` (dump array
/// separator) is removed before parsing.
pub fn convert_line(mapper: &Mapper, raw: &str) -> LineOutcome {
    let line = raw.trim();
    if !line.starts_with('{') {
        return LineOutcome::Skipped;
    }

    match convert_record(mapper, line.strip_suffix(',').unwrap_or(line)) {
        Ok(converted) => LineOutcome::Converted(converted),
        Err(error) => LineOutcome::Failed {
            line: without_line_ending(raw).to_string(),
            error,
        },
    }
}

fn without_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn convert_record(mapper: &Mapper, record: &str) -> Result<String, LineError> {
    let data: Value = serde_json::from_str(record)?;
    let document = mapper.to_graph(&data)?;

    let graph: Vec<Value> = document.graph.iter().flat_map(uninvert).collect();

    let mut output = Map::new();
    output.insert(keyword::GRAPH.to_string(), Value::Array(graph));
    Ok(serde_json::to_string(&output)?)
}

/// Rewrite a node's backlinks as forward links
///
/// Returns the dataset descriptor (pointing at the node via
/// `sdo:mainEntity`), the node itself without `@reverse`, and for media
/// entities the file node (pointing at the node via
/// `sdo:encodesCreativeWork`), in that order.
pub fn uninvert(node: &NormalizedNode) -> Vec<Value> {
    let node_ref = json!({ keyword::ID: node.id });

    let mut descriptor = node.reverse.main_entity.to_json();
    descriptor.insert(term::MAIN_ENTITY.to_string(), node_ref.clone());

    let mut graph = vec![Value::Object(descriptor), Value::Object(node.to_forward_json())];

    if let Some(file) = &node.reverse.encodes_creative_work {
        graph.push(json!({
            keyword::ID: file,
            term::ENCODES_CREATIVE_WORK: node_ref,
        }));
    }

    graph
}
