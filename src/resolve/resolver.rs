use super::{ResolveResult, ResolveTrace, ResolverResult, RoutingResolveContext, TraceEntry, TraceOutcome};
use crate::params::Parameters;
use crate::selector::{FailureReason, RouteSelectorEvaluation};
use crate::tree::{NodeFlags, NodeId, RouteTree};
use crate::types::Quality;

/// Finds the best route for the request held by `ctx`.
///
/// Every successful branch is explored; the terminal node reached with all
/// segments consumed and the highest product of qualities wins. Equal
/// qualities keep the first candidate in registration order.
#[tracing::instrument(level = "trace", skip(tree, ctx), fields(segments=ctx.segment_count() as u64))]
pub fn resolve(tree: &RouteTree, ctx: &RoutingResolveContext<'_>) -> ResolverResult<ResolveResult> {
    let (result, _) = Search::new(tree, ctx, ctx.tracing_enabled()).run()?;
    Ok(result)
}

/// Same as [`resolve`] but always records a [`ResolveTrace`].
pub fn resolve_traced(
    tree: &RouteTree,
    ctx: &RoutingResolveContext<'_>,
) -> ResolverResult<(ResolveResult, ResolveTrace)> {
    let (result, trace) = Search::new(tree, ctx, true).run()?;
    Ok((result, trace.unwrap_or_default()))
}

struct Candidate {
    node: NodeId,
    quality: Quality,
    parameters: Parameters,
}

struct Search<'a, 'r> {
    tree: &'a RouteTree,
    ctx: &'a RoutingResolveContext<'r>,
    // captured along the current branch, truncated on the way back up
    params: Parameters,
    best: Option<Candidate>,
    failure: Option<(usize, FailureReason)>,
    trace: Option<ResolveTrace>,
}

impl<'a, 'r> Search<'a, 'r> {
    fn new(tree: &'a RouteTree, ctx: &'a RoutingResolveContext<'r>, trace: bool) -> Self {
        Self {
            tree,
            ctx,
            params: Parameters::new(),
            best: None,
            failure: None,
            trace: trace.then(ResolveTrace::default),
        }
    }

    fn run(mut self) -> ResolverResult<(ResolveResult, Option<ResolveTrace>)> {
        let root = self.tree.root_id();
        let evaluation = self.tree.root().selector().evaluate(self.ctx, 0)?;
        if evaluation.succeeded {
            self.record(0, root, 0, matched(&evaluation));
            self.params.extend_from(&evaluation.parameters);
            self.visit(root, evaluation.segment_increment, evaluation.quality, 0)?;
        } else {
            let reason = evaluation.failure.unwrap_or(FailureReason::Path);
            self.record(0, root, 0, TraceOutcome::Failed(reason));
            self.note_failure(0, reason);
        }

        let result = match self.best {
            Some(best) => ResolveResult {
                route: Some(best.node),
                quality: best.quality,
                parameters: best.parameters,
                failure: None,
            },
            None => ResolveResult::not_found(self.failure.map(|(_, reason)| reason)),
        };
        Ok((result, self.trace))
    }

    fn visit(
        &mut self,
        node_id: NodeId,
        segment_index: usize,
        quality: Quality,
        depth: usize,
    ) -> ResolverResult<()> {
        let tree = self.tree;
        let node = tree.node_at(node_id);
        let total = self.ctx.segment_count();

        if node.is_terminal() && segment_index == total && self.can_improve(quality) {
            self.record(depth, node_id, segment_index, TraceOutcome::Candidate { quality });
            self.best = Some(Candidate {
                node: node_id,
                quality,
                parameters: self.params.clone(),
            });
        }

        for &child_id in node.children() {
            let child = tree.node_at(child_id);

            if child.flags().contains(NodeFlags::REQUIRES_SEGMENT) && segment_index >= total {
                self.record(depth + 1, child_id, segment_index, TraceOutcome::NoSegment);
                self.note_failure(segment_index, FailureReason::Path);
                continue;
            }

            let evaluation = child.selector().evaluate(self.ctx, segment_index)?;
            if !evaluation.succeeded {
                let reason = evaluation.failure.unwrap_or(FailureReason::Path);
                self.record(depth + 1, child_id, segment_index, TraceOutcome::Failed(reason));
                self.note_failure(segment_index, reason);
                continue;
            }

            self.record(depth + 1, child_id, segment_index, matched(&evaluation));
            let retry_as_missing =
                child.selector().is_optional_parameter() && evaluation.segment_increment > 0;
            self.descend(child_id, segment_index, quality, depth + 1, evaluation)?;

            if retry_as_missing {
                self.record(depth + 1, child_id, segment_index, TraceOutcome::MatchedAsMissing);
                self.descend(
                    child_id,
                    segment_index,
                    quality,
                    depth + 1,
                    RouteSelectorEvaluation::missing(),
                )?;
            }
        }
        Ok(())
    }

    fn descend(
        &mut self,
        child_id: NodeId,
        segment_index: usize,
        quality: Quality,
        depth: usize,
        evaluation: RouteSelectorEvaluation,
    ) -> ResolverResult<()> {
        let next_quality = quality * evaluation.quality;
        // qualities never exceed 1, so nothing below can do better
        if !self.can_improve(next_quality) {
            self.record(
                depth,
                child_id,
                segment_index,
                TraceOutcome::Pruned {
                    quality: next_quality,
                },
            );
            return Ok(());
        }

        let checkpoint = self.params.len();
        self.params.extend_from(&evaluation.parameters);
        let outcome = self.visit(
            child_id,
            segment_index + evaluation.segment_increment,
            next_quality,
            depth,
        );
        self.params.truncate(checkpoint);
        outcome
    }

    fn can_improve(&self, quality: Quality) -> bool {
        self.best.as_ref().is_none_or(|best| quality > best.quality)
    }

    /// Keeps the rejection seen deepest into the path. A method mismatch
    /// only counts once the whole path has been consumed.
    fn note_failure(&mut self, segment_index: usize, reason: FailureReason) {
        let reason = if reason == FailureReason::Method && segment_index < self.ctx.segment_count() {
            FailureReason::Path
        } else {
            reason
        };

        let replace = match self.failure {
            None => true,
            Some((depth, current)) => {
                segment_index > depth
                    || (segment_index == depth && reason.priority() > current.priority())
            }
        };
        if replace {
            self.failure = Some((segment_index, reason));
        }
    }

    fn record(&mut self, depth: usize, node: NodeId, segment_index: usize, outcome: TraceOutcome) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEntry {
                depth,
                route: self.tree.render_path(node),
                segment_index,
                outcome,
            });
        }
    }
}

fn matched(evaluation: &RouteSelectorEvaluation) -> TraceOutcome {
    TraceOutcome::Matched {
        quality: evaluation.quality,
        segment_increment: evaluation.segment_increment,
    }
}
