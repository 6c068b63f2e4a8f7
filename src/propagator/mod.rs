/*!
The propagator shell: the single entry point a host binds its
four theory-propagator callbacks to. Owns the signature registry, the
literal map, every constraint built during `init`, and a literal → constraint
dispatch table built alongside them, so `propagate` only visits constraints
that actually registered a watch on a changed literal.
*/

use std::collections::HashMap;

use crate::config::Config;
use crate::constraint::{self, parse::parse_constraint, TheoryConstraint};
use crate::db::{LiteralMap, SignatureRegistry};
use crate::dispatch::library::stat::Counters;
use crate::host::{Init, PropagateControl, TheoryAtomTerm};
use crate::misc::log::targets;
use crate::structures::literal::SolverLiteral;
use crate::types::err::ErrorKind;

/// The propagator shell.
pub struct PropagatorShell {
    pub config: Config,
    pub counters: Counters,
    registry: SignatureRegistry,
    literal_map: LiteralMap,
    constraints: Vec<TheoryConstraint>,
    /// `lit.abs() -> indices into [Self::constraints]` watching `lit`.
    dispatch: HashMap<SolverLiteral, Vec<usize>>,
}

impl PropagatorShell {
    pub fn new(config: Config) -> Self {
        PropagatorShell {
            config,
            counters: Counters::new(),
            registry: SignatureRegistry::new(),
            literal_map: LiteralMap::new(),
            constraints: Vec::new(),
            dispatch: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    pub fn literal_map(&self) -> &LiteralMap {
        &self.literal_map
    }

    pub fn constraints(&self) -> &[TheoryConstraint] {
        &self.constraints
    }

    /// `init(init)`: registers every declared signature, populates the
    /// literal map from the grounded atoms matching them, then parses and
    /// builds every `&constraint{...}` atom.
    pub fn init(&mut self, init: &mut dyn Init) -> Result<(), ErrorKind> {
        let atoms = init.theory_atoms();

        for atom in &atoms {
            if let TheoryAtomTerm::Signature(decls) = atom {
                for decl in decls {
                    log::trace!(target: targets::SIGNATURE, "registering {}/{}", decl.functor, decl.arity);
                    let before = self.registry.size();
                    self.registry.register(&decl.functor, decl.arity);
                    if self.registry.size() > before {
                        self.counters.record_signature_registered();
                    }
                    for ground in init.by_signature(&decl.functor, decl.arity) {
                        let untimed = self
                            .registry
                            .lookup(&decl.functor, decl.arity, decl.sign)
                            .expect("just registered");
                        let internal = self.registry.to_internal(untimed, ground.time);
                        let solver = if decl.sign == 1 { ground.solver_literal } else { -ground.solver_literal };
                        log::trace!(target: targets::LITERAL_MAP, "{internal} <-> {solver}");
                        self.literal_map.insert(internal, solver);
                    }
                }
            }
        }

        for atom in &atoms {
            if let TheoryAtomTerm::Constraint(term) = atom {
                let parsed = parse_constraint(term, &self.registry)?;
                log::trace!(target: targets::PARSE, "parsed constraint over [{}, {}]", parsed.tmin, parsed.tmax);
                if let Some((built, watched)) = constraint::build(
                    parsed,
                    self.config.watch_strategy.value,
                    self.config.lock_policy.value,
                    self.config.ground_up_to.value,
                    self.config.ground_from.value,
                    init,
                    &self.registry,
                    &self.literal_map,
                    &mut self.counters,
                ) {
                    let index = self.constraints.len();
                    for lit in watched {
                        self.dispatch.entry(lit.abs()).or_default().push(index);
                    }
                    self.constraints.push(built);
                    self.counters.record_constraint_built();
                }
            }
        }

        Ok(())
    }

    /// `propagate(control, changes)`: visits only the constraints indexed
    /// under a changed literal.
    pub fn propagate(&mut self, control: &mut dyn PropagateControl, changes: &[SolverLiteral]) -> Result<(), ErrorKind> {
        for &lit in changes {
            let Some(indices) = self.dispatch.get(&lit.abs()) else { continue };
            for &idx in indices {
                log::trace!(target: targets::PROPAGATE, "constraint {idx} notified of {lit}");
                self.constraints[idx].propagate(lit, control, &self.registry, &self.literal_map)?;
            }
        }
        Ok(())
    }

    /// `check(control)`: re-examines every constraint against a total
    /// assignment.
    pub fn check(&mut self, control: &mut dyn PropagateControl) -> Result<(), ErrorKind> {
        for (idx, constraint) in self.constraints.iter_mut().enumerate() {
            log::trace!(target: targets::CHECK, "checking constraint {idx}");
            constraint.check(control, &self.registry, &self.literal_map)?;
        }
        Ok(())
    }

    /// `undo(lit)`: notifies every constraint indexed under `lit`.
    pub fn undo(&mut self, lit: SolverLiteral) {
        let Some(indices) = self.dispatch.get(&lit.abs()) else { return };
        for &idx in indices {
            log::trace!(target: targets::UNDO, "constraint {idx} undoing {lit}");
            self.constraints[idx].undo(lit, &self.registry, &self.literal_map);
        }
    }
}
