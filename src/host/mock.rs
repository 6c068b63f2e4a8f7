/*!
A minimal in-memory host, sufficient to drive [Init](super::Init) and
[PropagateControl](super::PropagateControl) without a real ASP grounder.

This is deliberately simple: it does not perform BCP, decision-making, or
conflict analysis. Tests build a [MockControl], assign atoms directly, and
check which nogoods a constraint/propagator adds in response — the actual
CDCL search loop being out of scope for this crate.
*/

use std::collections::{HashMap, HashSet};

use super::{GroundAtom, Init, PropagateControl, TheoryAtomTerm};
use crate::structures::literal::SolverLiteral;

/// A minimal [Init] implementation backed by plain collections.
#[derive(Default)]
pub struct MockInit {
    atoms_by_signature: HashMap<(String, u32), Vec<GroundAtom>>,
    theory_atoms: Vec<TheoryAtomTerm>,
    pub watched: HashSet<SolverLiteral>,
    pub clauses: Vec<Vec<SolverLiteral>>,
}

impl MockInit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `atom` as discoverable via `by_signature(functor, arity)`,
    /// where `arity` is the arity of the full grounded atom (args + time).
    pub fn add_ground_atom(&mut self, functor: &str, arity: u32, atom: GroundAtom) {
        self.atoms_by_signature
            .entry((functor.to_string(), arity))
            .or_default()
            .push(atom);
    }

    pub fn add_theory_atom(&mut self, atom: TheoryAtomTerm) {
        self.theory_atoms.push(atom);
    }
}

impl Init for MockInit {
    fn theory_atoms(&self) -> Vec<TheoryAtomTerm> {
        self.theory_atoms.clone()
    }

    fn by_signature(&self, functor: &str, arity: u32) -> Vec<GroundAtom> {
        self.atoms_by_signature
            .get(&(functor.to_string(), arity))
            .cloned()
            .unwrap_or_default()
    }

    fn add_watch(&mut self, lit: SolverLiteral) {
        self.watched.insert(lit);
    }

    fn add_clause(&mut self, lits: &[SolverLiteral]) -> bool {
        self.clauses.push(lits.to_vec());
        true
    }
}

/// A minimal [PropagateControl] implementation backed by plain collections.
///
/// Valuation is tracked per-atom (the absolute value of a literal); a
/// literal is true iff its polarity matches the atom's assigned value.
#[derive(Default)]
pub struct MockControl {
    valuation: HashMap<SolverLiteral, bool>,
    watches: HashSet<SolverLiteral>,

    /// Every nogood passed to `add_nogood`, in order, with its lock flag.
    pub added_nogoods: Vec<(Vec<SolverLiteral>, bool)>,

    /// If `false`, `add_nogood` always reports rejection (simulates the host
    /// refusing a nogood, e.g. because the search must backtrack first).
    pub accept_nogoods: bool,

    /// The value `propagate()` returns.
    pub propagate_ok: bool,
}

impl MockControl {
    pub fn new() -> Self {
        MockControl {
            valuation: HashMap::new(),
            watches: HashSet::new(),
            added_nogoods: Vec::new(),
            accept_nogoods: true,
            propagate_ok: true,
        }
    }

    /// Assigns `atom` (a positive solver literal) the given value, or clears
    /// its assignment with `None`.
    pub fn set(&mut self, atom: SolverLiteral, value: Option<bool>) {
        debug_assert!(atom > 0, "atoms are identified by their positive literal");
        match value {
            Some(v) => {
                self.valuation.insert(atom, v);
            }
            None => {
                self.valuation.remove(&atom);
            }
        }
    }

    pub fn last_nogood(&self) -> Option<&[SolverLiteral]> {
        self.added_nogoods.last().map(|(ng, _)| ng.as_slice())
    }
}

impl PropagateControl for MockControl {
    fn is_true(&self, lit: SolverLiteral) -> bool {
        self.value(lit) == Some(true)
    }

    fn is_false(&self, lit: SolverLiteral) -> bool {
        self.value(lit) == Some(false)
    }

    fn value(&self, lit: SolverLiteral) -> Option<bool> {
        if lit == crate::structures::literal::SOLVER_TRUE {
            return Some(true);
        }
        if lit == crate::structures::literal::SOLVER_FALSE {
            return Some(false);
        }
        let atom = lit.abs();
        let polarity = lit > 0;
        self.valuation.get(&atom).map(|assigned| *assigned == polarity)
    }

    fn add_nogood(&mut self, lits: &[SolverLiteral], lock: bool) -> bool {
        self.added_nogoods.push((lits.to_vec(), lock));
        self.accept_nogoods
    }

    fn propagate(&mut self) -> bool {
        self.propagate_ok
    }

    fn add_watch(&mut self, lit: SolverLiteral) {
        self.watches.insert(lit);
    }

    fn remove_watch(&mut self, lit: SolverLiteral) {
        self.watches.remove(&lit);
    }

    fn has_watch(&self, lit: SolverLiteral) -> bool {
        self.watches.contains(&lit)
    }
}
