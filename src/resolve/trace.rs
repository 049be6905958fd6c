use std::fmt;

use crate::selector::FailureReason;
use crate::types::Quality;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceOutcome {
    Matched {
        quality: Quality,
        segment_increment: usize,
    },
    /// Optional parameter retried without consuming its segment.
    MatchedAsMissing,
    Failed(FailureReason),
    /// Selector needs a segment but the path is exhausted.
    NoSegment,
    /// Cumulative quality cannot beat the current best candidate.
    Pruned {
        quality: Quality,
    },
    Candidate {
        quality: Quality,
    },
}

impl fmt::Display for TraceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceOutcome::Matched {
                quality,
                segment_increment,
            } => write!(f, "matched q={quality} +{segment_increment}"),
            TraceOutcome::MatchedAsMissing => f.write_str("retried as missing"),
            TraceOutcome::Failed(reason) => write!(f, "failed ({reason:?})"),
            TraceOutcome::NoSegment => f.write_str("skipped, no segment left"),
            TraceOutcome::Pruned { quality } => write!(f, "pruned q={quality}"),
            TraceOutcome::Candidate { quality } => write!(f, "candidate q={quality}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    pub depth: usize,
    pub route: String,
    pub segment_index: usize,
    pub outcome: TraceOutcome,
}

/// Step-by-step record of one resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveTrace {
    entries: Vec<TraceEntry>,
}

impl ResolveTrace {
    pub(crate) fn push(&mut self, entry: TraceEntry) {
        tracing::event!(
            tracing::Level::DEBUG,
            depth = entry.depth as u64,
            route = %entry.route,
            segment_index = entry.segment_index as u64,
            outcome = %entry.outcome
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ResolveTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{:indent$}{} @{}: {}",
                "",
                entry.route,
                entry.segment_index,
                entry.outcome,
                indent = entry.depth * 2
            )?;
        }
        Ok(())
    }
}
