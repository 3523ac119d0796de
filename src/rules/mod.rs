//! Predicate combinators over cards.
//!
//! - `PredicateNode<L>`: leaf or flattened AND/OR node
//! - `Application`: does one card (and its opposing card) match
//! - `Requirement`: how many of a set of cards match a style
//!
//! Both predicates are thin wrappers around a `PredicateNode`, so they
//! share combination, short-circuit evaluation and filtering.

pub mod predicate;
pub mod application;
pub mod requirement;

pub use predicate::{Op, PredicateNode};
pub use application::{Alignment, Application, ApplicationLeaf, Side};
pub use requirement::{CountOp, Requirement, RequirementLeaf};
