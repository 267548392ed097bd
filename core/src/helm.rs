//! Helm - The Navigation Engine
//!
//! `Helm` owns an immutable rule graph of segues and the mutable path of
//! transitions fired so far. Every `present`/`dismiss`/`forward` request
//! resolves to at most one segue via graph queries against the rules,
//! filtered by what the path currently presents.
//!
//! Failures are values: the public mutators never return errors, they
//! append them to an ordered log the embedding layer inspects after each
//! call. A failed operation is an atomic no-op on the path.

use crate::error::HelmError;
use crate::path::NavPath;
use crate::segue::{Segue, Tag};
use helm_graph::{DirectedGraph, Edge, GraphError, Node};
use tracing::{debug, info, warn};

type NavResult<N, T> = Result<(), HelmError<N, T>>;

#[derive(Debug)]
pub struct Helm<N: Node, T: Tag = &'static str> {
    nav: DirectedGraph<Segue<N, T>>,
    path: NavPath<N>,
    errors: Vec<HelmError<N, T>>,
    revision: u64,
}

impl<N: Node, T: Tag> Helm<N, T> {
    /// Build an engine over `nav` with an empty path.
    pub fn new(nav: DirectedGraph<Segue<N, T>>) -> Result<Self, HelmError<N, T>> {
        Self::with_path(nav, NavPath::new())
    }

    /// Build an engine over `nav`, resuming from an already-walked path.
    ///
    /// Validates the rule graph before anything escapes: it must be
    /// non-empty, it must have at least one inlet to ever start from, and
    /// its auto sub-graph must be acyclic.
    pub fn with_path(
        nav: DirectedGraph<Segue<N, T>>,
        path: NavPath<N>,
    ) -> Result<Self, HelmError<N, T>> {
        if nav.is_empty() {
            return Err(HelmError::EmptyNav);
        }
        if nav.inlets().is_empty() {
            return Err(HelmError::NoNavInlets);
        }
        let auto: DirectedGraph<Segue<N, T>> =
            nav.iter().filter(|s| s.is_auto()).cloned().collect();
        if let Some(cycle) = auto.first_cycle() {
            return Err(HelmError::AutoCycleDetected(cycle));
        }
        Ok(Self {
            nav,
            path,
            errors: Vec::new(),
            revision: 0,
        })
    }

    // --- Mutators -----------------------------------------------------------

    /// Present `section` by firing the single segue the rules select:
    /// from an empty path, the unique inlet targeting it; otherwise the
    /// first egress edge into it scanning presented sections newest-first.
    pub fn present(&mut self, section: N) {
        debug!(section = ?section, "present requested");
        let outcome = self.try_present(&section);
        self.settle("present", outcome);
    }

    /// Present via the tagged segue closest to the end of the
    /// newest-first egress scan of the presented sections.
    pub fn present_tag(&mut self, tag: T) {
        debug!(tag = ?tag, "present by tag requested");
        let outcome = self.try_present_tag(&tag);
        self.settle("present_tag", outcome);
    }

    /// Advance along the only possible segue: the unique inlet when the
    /// path is empty, else the unique egress edge of the newest section.
    pub fn forward(&mut self) {
        debug!("forward requested");
        let outcome = self.try_forward();
        self.settle("forward", outcome);
    }

    /// Dismiss `section` by reversing the dismissable segue that presented
    /// it, scanning the path tail-first.
    pub fn dismiss(&mut self, section: N) {
        debug!(section = ?section, "dismiss requested");
        let outcome = self.try_dismiss(&section);
        self.settle("dismiss", outcome);
    }

    /// Dismiss via the first rule-graph segue carrying `tag`.
    pub fn dismiss_tag(&mut self, tag: T) {
        debug!(tag = ?tag, "dismiss by tag requested");
        let outcome = self.try_dismiss_tag(&tag);
        self.settle("dismiss_tag", outcome);
    }

    /// Pop the last fired segue, whatever it was.
    pub fn dismiss_last(&mut self) {
        debug!("dismiss last requested");
        let outcome = self.try_dismiss_last();
        self.settle("dismiss_last", outcome);
    }

    /// Fire `segue` forward. Re-validates that the segue is a rule and that
    /// its origin is live before touching the path.
    pub fn present_segue(&mut self, segue: &Segue<N, T>) {
        debug!(segue = %segue, "present segue requested");
        let outcome = self.fire_present(segue);
        self.settle("present_segue", outcome);
    }

    /// Fire `segue` in reverse. Re-validates that the segue is a rule, is
    /// dismissable, and is live in the path before touching it.
    pub fn dismiss_segue(&mut self, segue: &Segue<N, T>) {
        debug!(segue = %segue, "dismiss segue requested");
        let outcome = self.fire_dismiss(segue);
        self.settle("dismiss_segue", outcome);
    }

    /// Two-way binding surface: `true` presents the section, `false`
    /// dismisses it.
    pub fn set_presented(&mut self, section: N, presented: bool) {
        if presented {
            self.present(section);
        } else {
            self.dismiss(section);
        }
    }

    // --- Queries ------------------------------------------------------------

    pub fn is_presented(&self, section: &N) -> bool {
        self.path.is_presented(section)
    }

    /// Presented sections, least recently presented first.
    pub fn presented_sections(&self) -> impl DoubleEndedIterator<Item = &N> {
        self.path.sections()
    }

    pub fn path(&self) -> &NavPath<N> {
        &self.path
    }

    /// The immutable rule graph.
    pub fn nav(&self) -> &DirectedGraph<Segue<N, T>> {
        &self.nav
    }

    /// The append-only failure log. Never cleared by the engine.
    pub fn errors(&self) -> &[HelmError<N, T>] {
        &self.errors
    }

    /// Hand the accumulated failures to the caller, emptying the log.
    pub fn drain_errors(&mut self) -> Vec<HelmError<N, T>> {
        std::mem::take(&mut self.errors)
    }

    /// Bumped once per successful mutation; reactive consumers poll this
    /// instead of observing fields.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Resolution ---------------------------------------------------------

    fn settle(&mut self, op: &'static str, outcome: NavResult<N, T>) {
        match outcome {
            Ok(()) => {
                self.revision += 1;
            }
            Err(error) => {
                warn!(op, %error, "navigation rejected");
                self.errors.push(error);
            }
        }
    }

    fn try_present(&mut self, section: &N) -> NavResult<N, T> {
        let segue = self.route_to(section)?;
        self.fire_present(&segue)
    }

    /// The segue `present(section)` would fire, without firing it.
    fn route_to(&self, section: &N) -> Result<Segue<N, T>, HelmError<N, T>> {
        if self.path.is_empty() {
            let mut candidates: Vec<Segue<N, T>> = self
                .nav
                .inlets()
                .into_iter()
                .filter(|s| s.target() == section)
                .collect();
            return match candidates.len() {
                0 => Err(GraphError::MissingEgressEdges {
                    from: section.clone(),
                }
                .into()),
                1 => Ok(candidates.remove(0)),
                _ => Err(GraphError::AmbiguousEgressEdges {
                    edges: candidates,
                    from: section.clone(),
                }
                .into()),
            };
        }
        self.nav
            .egress_edges_from_all(self.path.sections().rev())
            .into_iter()
            .find(|s| s.target() == section)
            .ok_or_else(|| {
                GraphError::MissingEgressEdges {
                    from: section.clone(),
                }
                .into()
            })
    }

    fn try_present_tag(&mut self, tag: &T) -> NavResult<N, T> {
        let segue = self
            .nav
            .egress_edges_from_all(self.path.sections().rev())
            .into_iter()
            .filter(|s| s.tag() == Some(tag))
            .last()
            .ok_or_else(|| HelmError::MissingTaggedSegue(tag.clone()))?;
        self.fire_present(&segue)
    }

    fn try_forward(&mut self) -> NavResult<N, T> {
        let segue = match self.path.last_section() {
            None => {
                let mut inlets = self.nav.inlets();
                if inlets.len() != 1 {
                    return Err(HelmError::AmbiguousForwardInlets(inlets));
                }
                inlets.remove(0)
            }
            Some(last) => {
                let last = last.clone();
                self.nav.unique_egress_edge(&last)?
            }
        };
        self.fire_present(&segue)
    }

    fn try_dismiss(&mut self, section: &N) -> NavResult<N, T> {
        let rules = self.nav.ingress_edges(section);
        if !rules.iter().any(Segue::is_dismissable) {
            return Err(HelmError::SectionMissingDismissableSegue(section.clone()));
        }
        if !self.path.is_presented(section) {
            return Err(HelmError::SectionNotPresented(section.clone()));
        }
        let mut live: Option<Segue<N, T>> = None;
        for edge in self.path.edges().iter().rev() {
            if edge.target() != section {
                continue;
            }
            if let Some(stored) = self.nav.get(&Segue::from_edge(edge.clone())) {
                if stored.is_dismissable() {
                    live = Some(stored.clone());
                    break;
                }
            }
        }
        let segue = live.ok_or(HelmError::NoDismissableSegue)?;
        self.fire_dismiss(&segue)
    }

    fn try_dismiss_tag(&mut self, tag: &T) -> NavResult<N, T> {
        let mut tagged: Vec<Segue<N, T>> = self
            .nav
            .iter()
            .filter(|s| s.tag() == Some(tag))
            .cloned()
            .collect();
        tagged.sort_by(|a, b| (a.source(), a.target()).cmp(&(b.source(), b.target())));
        let segue = tagged
            .into_iter()
            .next()
            .ok_or_else(|| HelmError::MissingTaggedSegue(tag.clone()))?;
        self.fire_dismiss(&segue)
    }

    fn try_dismiss_last(&mut self) -> NavResult<N, T> {
        match self.path.pop() {
            Some(edge) => {
                info!(%edge, "segue popped");
                Ok(())
            }
            None => Err(HelmError::CantDismissEmptyPath),
        }
    }

    // --- Firing primitives --------------------------------------------------

    /// Append the segue's edge to the path, then chase auto segues.
    fn fire_present(&mut self, segue: &Segue<N, T>) -> NavResult<N, T> {
        let stored = self
            .nav
            .get(segue)
            .cloned()
            .ok_or_else(|| HelmError::MissingSegue(segue.edge().clone()))?;
        let origin_live = match self.path.last_section() {
            // nothing is presented yet: only an inlet may fire
            None => self.nav.inlets().contains(&stored),
            Some(_) => self.path.is_presented(stored.source()),
        };
        if !origin_live {
            return Err(HelmError::SectionNotPresented(stored.source().clone()));
        }
        info!(segue = %stored, "segue fired");
        self.path.push(stored.edge().clone());
        self.follow_auto();
        Ok(())
    }

    /// Remove the segue's edge from the tail of the path.
    fn fire_dismiss(&mut self, segue: &Segue<N, T>) -> NavResult<N, T> {
        let stored = self
            .nav
            .get(segue)
            .cloned()
            .ok_or_else(|| HelmError::MissingSegue(segue.edge().clone()))?;
        if !stored.is_dismissable() {
            return Err(HelmError::NoDismissableSegue);
        }
        if !self.path.remove_last_occurrence(stored.edge()) {
            return Err(HelmError::SectionNotPresented(stored.target().clone()));
        }
        info!(segue = %stored, "segue dismissed");
        Ok(())
    }

    /// While an auto segue leaves the newest section, fire the first one in
    /// deterministic order. Construction-time acyclicity bounds the chain.
    fn follow_auto(&mut self) {
        loop {
            let Some(head) = self.path.last_section().cloned() else {
                return;
            };
            match self
                .nav
                .egress_edges(&head)
                .into_iter()
                .find(Segue::is_auto)
            {
                Some(segue) => {
                    info!(segue = %segue, "auto segue fired");
                    self.path.push(segue.edge().clone());
                }
                None => return,
            }
        }
    }
}
