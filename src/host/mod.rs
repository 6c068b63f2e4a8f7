/*!
The trait vocabulary this crate expects of a host CDCL solver.

The grounder, the ASP solver proper, the theory-term text parser, and the
CDCL search engine are all external collaborators: this crate
never constructs them. What it does need is a small, stable interface onto
them, given here as the [Init] and [PropagateControl] traits, plus the plain
data shapes ([GroundAtom], [TheoryAtomTerm]) a real grounder binding would
hand over.

A binding to a concrete host (e.g. a `clingo` FFI wrapper) implements these
two traits over its own types; this crate is otherwise agnostic to the host.

[mock] provides a minimal in-memory implementation, used by this crate's own
tests and suitable as a starting point for exercising the propagator without
a real grounder attached.
*/

pub mod mock;

use crate::structures::literal::{SolverLiteral, Time};

/// A grounded term argument, represented by its canonical printed form. This
/// is sufficient to match arguments against a registered template without committing this crate to any particular term AST.
pub type GroundTerm = String;

/// A grounded atom matching some declared `(functor, arity)` signature, as
/// yielded by [Init::by_signature]. The trailing time argument has already
/// been extracted by the host binding, and the solver literal has already
/// been resolved via `init.solver_literal(program_literal)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroundAtom {
    /// The atom's functor.
    pub functor: String,

    /// The atom's arguments, excluding the trailing time argument.
    pub args: Vec<GroundTerm>,

    /// The trailing time argument.
    pub time: Time,

    /// The positive solver literal underlying this ground atom.
    pub solver_literal: SolverLiteral,
}

/// The 2-character prefix on a constraint element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `+.`: positive, current time step.
    PlusDot,
    /// `+~`: positive, previous time step.
    PlusTilde,
    /// `-.`: negative, current time step.
    MinusDot,
    /// `-~`: negative, previous time step.
    MinusTilde,
}

impl Prefix {
    /// `+1` for `+.`/`+~`, `-1` for `-.`/`-~`.
    pub fn sign(&self) -> i64 {
        match self {
            Prefix::PlusDot | Prefix::PlusTilde => 1,
            Prefix::MinusDot | Prefix::MinusTilde => -1,
        }
    }

    /// `+1` for the `~` ("previous time step") prefixes, `0` otherwise.
    pub fn time_mod(&self) -> i64 {
        match self {
            Prefix::PlusTilde | Prefix::MinusTilde => 1,
            Prefix::PlusDot | Prefix::MinusDot => 0,
        }
    }
}

impl std::str::FromStr for Prefix {
    type Err = crate::types::err::ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+." => Ok(Prefix::PlusDot),
            "+~" => Ok(Prefix::PlusTilde),
            "-." => Ok(Prefix::MinusDot),
            "-~" => Ok(Prefix::MinusTilde),
            _ => Err(crate::types::err::ConstructionError::InvalidPrefix),
        }
    }
}

/// One element `pfx · p(args)` of a grounded `&constraint(...){...}` term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TheoryElementTerm {
    /// The element's prefix.
    pub prefix: Prefix,

    /// The predicate's functor.
    pub functor: String,

    /// The predicate's arguments, excluding the (implicit) time argument.
    pub args: Vec<GroundTerm>,
}

/// A grounded `&signature{...}` element, declaring one `(functor, arity)`
/// pair (with sign) as part of the theory's domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureDecl {
    /// `+1` or `-1`.
    pub sign: i64,

    /// The functor being declared.
    pub functor: String,

    /// The arity of the *full* grounded atom, including the trailing time
    /// argument.
    pub arity: u32,
}

/// A grounded `&constraint(tmin?, tmax, id?){...}` term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TheoryConstraintTerm {
    /// `tmin`, defaulting to 0 when a single numeric argument is given.
    pub tmin: Option<Time>,

    /// `tmax`, required.
    pub tmax: Time,

    /// The optional trailing `id` term.
    pub id: Option<String>,

    /// The constraint's elements.
    pub elements: Vec<TheoryElementTerm>,
}

/// One user theory atom, as yielded by [Init::theory_atoms].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TheoryAtomTerm {
    /// A `&constraint(...){...}` atom.
    Constraint(TheoryConstraintTerm),

    /// A `&signature{...}` atom.
    Signature(Vec<SignatureDecl>),
}

/// The subset of `init.*` the host solver must provide.
pub trait Init {
    /// `init.theory_atoms`: every user theory atom in the grounded program.
    fn theory_atoms(&self) -> Vec<TheoryAtomTerm>;

    /// `init.symbolic_atoms.by_signature(functor, arity)`, with the time
    /// argument already extracted and `init.solver_literal` already applied.
    fn by_signature(&self, functor: &str, arity: u32) -> Vec<GroundAtom>;

    /// `init.add_watch(lit)`.
    fn add_watch(&mut self, lit: SolverLiteral);

    /// `init.add_clause(lits)`. Returns `false` if the host detects the
    /// addition makes the formula immediately unsatisfiable.
    fn add_clause(&mut self, lits: &[SolverLiteral]) -> bool;
}

/// The subset of `control.*` the host solver must provide during search
///.
pub trait PropagateControl {
    /// `control.assignment.is_true(lit)`.
    fn is_true(&self, lit: SolverLiteral) -> bool;

    /// `control.assignment.is_false(lit)`.
    fn is_false(&self, lit: SolverLiteral) -> bool;

    /// `control.assignment.value(lit)`: `None` if unassigned.
    fn value(&self, lit: SolverLiteral) -> Option<bool>;

    /// `control.add_nogood(lits, lock)`.
    fn add_nogood(&mut self, lits: &[SolverLiteral], lock: bool) -> bool;

    /// `control.propagate()`.
    fn propagate(&mut self) -> bool;

    /// `control.add_watch(lit)`.
    fn add_watch(&mut self, lit: SolverLiteral);

    /// `control.remove_watch(lit)`.
    fn remove_watch(&mut self, lit: SolverLiteral);

    /// `control.has_watch(lit)`.
    fn has_watch(&self, lit: SolverLiteral) -> bool;
}
