/*!
The theory handler: partitions constraints by their
theory-atom `id` when [Config::use_ids](crate::config::Config::use_ids) is
set, so a host can drive several logically distinct constraint sets (e.g.
one per named theory instance) while still sharing one signature registry
and literal map — both of those are write-once program-wide state, not
per-`id` state.

When `use_ids` is unset, every constraint lands in the single `None` group,
which is exactly [PropagatorShell](crate::propagator::PropagatorShell)'s
behaviour; `TheoryHandler` is a thin partitioning layer on top, not a
reimplementation.
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

struct ConstraintGroup {
    constraints: Vec<TheoryConstraint>,
    dispatch: HashMap<SolverLiteral, Vec<usize>>,
}

impl ConstraintGroup {
    fn new() -> Self {
        ConstraintGroup { constraints: Vec::new(), dispatch: HashMap::new() }
    }

    fn push(&mut self, constraint: TheoryConstraint, watched: Vec<SolverLiteral>) {
        let index = self.constraints.len();
        for lit in watched {
            self.dispatch.entry(lit.abs()).or_default().push(index);
        }
        self.constraints.push(constraint);
    }
}

/// Partitions constraints by theory-atom `id`, sharing one registry and
/// literal map across every partition.
pub struct TheoryHandler {
    config: Config,
    pub counters: Counters,
    registry: SignatureRegistry,
    literal_map: LiteralMap,
    groups: HashMap<Option<String>, ConstraintGroup>,
}

impl TheoryHandler {
    pub fn new(config: Config) -> Self {
        TheoryHandler {
            config,
            counters: Counters::new(),
            registry: SignatureRegistry::new(),
            literal_map: LiteralMap::new(),
            groups: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// The number of distinct groups built (1 if `use_ids` is unset and at
    /// least one constraint was built, since everything lands under `None`).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

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
                let group_key = if self.config.use_ids { parsed.id.clone() } else { None };
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
                    self.groups.entry(group_key).or_insert_with(ConstraintGroup::new).push(built, watched);
                    self.counters.record_constraint_built();
                }
            }
        }

        Ok(())
    }

    pub fn propagate(&mut self, control: &mut dyn PropagateControl, changes: &[SolverLiteral]) -> Result<(), ErrorKind> {
        for group in self.groups.values_mut() {
            for &lit in changes {
                let Some(indices) = group.dispatch.get(&lit.abs()) else { continue };
                for &idx in indices {
                    log::trace!(target: targets::PROPAGATE, "constraint {idx} notified of {lit}");
                    group.constraints[idx].propagate(lit, control, &self.registry, &self.literal_map)?;
                }
            }
        }
        Ok(())
    }

    pub fn check(&mut self, control: &mut dyn PropagateControl) -> Result<(), ErrorKind> {
        for group in self.groups.values_mut() {
            for (idx, constraint) in group.constraints.iter_mut().enumerate() {
                log::trace!(target: targets::CHECK, "checking constraint {idx}");
                constraint.check(control, &self.registry, &self.literal_map)?;
            }
        }
        Ok(())
    }

    pub fn undo(&mut self, lit: SolverLiteral) {
        for group in self.groups.values_mut() {
            let Some(indices) = group.dispatch.get(&lit.abs()) else { continue };
            for &idx in indices {
                log::trace!(target: targets::UNDO, "constraint {idx} undoing {lit}");
                group.constraints[idx].undo(lit, &self.registry, &self.literal_map);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::MockInit;
    use crate::host::{Prefix, SignatureDecl, TheoryConstraintTerm, TheoryElementTerm};

    fn signature_atom() -> TheoryAtomTerm {
        TheoryAtomTerm::Signature(vec![SignatureDecl { sign: 1, functor: "holds".to_string(), arity: 2 }])
    }

    fn constraint_atom(id: Option<&str>) -> TheoryAtomTerm {
        TheoryAtomTerm::Constraint(TheoryConstraintTerm {
            tmin: None,
            tmax: 0,
            id: id.map(str::to_string),
            elements: vec![
                TheoryElementTerm { prefix: Prefix::PlusDot, functor: "holds".to_string(), args: vec!["a".to_string()] },
                TheoryElementTerm { prefix: Prefix::PlusDot, functor: "holds".to_string(), args: vec!["b".to_string()] },
            ],
        })
    }

    #[test]
    fn without_use_ids_every_constraint_shares_one_group() {
        let mut handler = TheoryHandler::new(Config::default());
        let mut init = MockInit::new();
        init.add_theory_atom(signature_atom());
        init.add_ground_atom("holds", 2, crate::host::GroundAtom { functor: "holds".to_string(), args: vec!["a".to_string()], time: 0, solver_literal: 10 });
        init.add_ground_atom("holds", 2, crate::host::GroundAtom { functor: "holds".to_string(), args: vec!["b".to_string()], time: 0, solver_literal: 11 });
        init.add_theory_atom(constraint_atom(Some("x")));
        init.add_theory_atom(constraint_atom(Some("y")));

        handler.init(&mut init).unwrap();
        assert_eq!(handler.group_count(), 1);
    }

    #[test]
    fn with_use_ids_constraints_partition_by_id() {
        let mut config = Config::default();
        config.use_ids = true;
        let mut handler = TheoryHandler::new(config);
        let mut init = MockInit::new();
        init.add_theory_atom(signature_atom());
        init.add_ground_atom("holds", 2, crate::host::GroundAtom { functor: "holds".to_string(), args: vec!["a".to_string()], time: 0, solver_literal: 10 });
        init.add_ground_atom("holds", 2, crate::host::GroundAtom { functor: "holds".to_string(), args: vec!["b".to_string()], time: 0, solver_literal: 11 });
        init.add_theory_atom(constraint_atom(Some("x")));
        init.add_theory_atom(constraint_atom(Some("y")));

        handler.init(&mut init).unwrap();
        assert_eq!(handler.group_count(), 2);
    }
}
