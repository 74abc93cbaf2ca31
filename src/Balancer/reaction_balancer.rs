//! # Reaction balancer
//!
//! ## Aim
//! This module computes the stoichiometric coefficients of a chemical reaction
//! from element conservation. The caller supplies the two sides of the
//! equation as ordered lists of compounds and gets back one coefficient per
//! compound, packaged in a `Reaction`.
//!
//! ## Main Data Structures and Logic
//! - `ReactionBalancer`: holds the two compound lists and the normalization
//!   convention, builds the augmented linear system and solves it with a dense
//!   LU decomposition (nalgebra)
//! - `Reaction`: the balanced result - compound lists plus coefficient lists,
//!   coefficients are derived once and never mutated afterward
//! - `Normalization`: which unknown coefficient is fixed to 1 to pin the scale
//!   of the solution; the last one by default
//! - `BalanceError`: `ElementMismatch` when the element sets of the two sides
//!   differ, `UnsolvableSystem` for every rank or shape defect of the system
//!
//! ## Key Methods
//! - `ReactionBalancer::balance()`: checks element consistency, builds the
//!   conservation rows and the normalization row, solves, splits the solution
//!   vector back into per-side coefficient lists
//! - `Reaction::new()`: one-shot balancing under the default normalization
//! - `Reaction::pretty_print()`: formatted table of the balanced equation
//!
//! ## Usage
//! ```rust, ignore
//! let reaction = ReactionBalancer::new(lhs, rhs)
//!     .with_normalization(Normalization::Index(0))
//!     .balance()?;
//! println!("{}", reaction);
//! ```
//!
//! ## Interesting Features
//! - the conservation equations alone admit any positive scalar multiple of a
//!   balanced solution; the normalization row removes that scale ambiguity, so
//!   no post-hoc rescaling to smallest integer ratio is performed
//! - squareness of the augmented system is checked explicitly before the
//!   solver is invoked, so a wrong compound count for the element count is
//!   reported as `UnsolvableSystem` and not as a generic numeric error
//! - a degenerate normalization (the true solution has the fixed coefficient
//!   equal to zero) makes the matrix singular; rebalancing with a different
//!   `Normalization` index is the caller's decision, never a silent fallback

use crate::Composition::compound::{ChemEntity, Compound};
use crate::Composition::periodic_table::Element;
use log::{debug, error, warn};
use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Determinant magnitudes below this are treated as singular.
const SINGULARITY_TOL: f64 = 1e-12;

/// Which unknown coefficient the normalization row fixes to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Fix the last coefficient (the last right-side compound). The usual
    /// balancing convention.
    #[default]
    Last,
    /// Fix the coefficient at the given index into the concatenated
    /// (lhs then rhs) coefficient vector.
    Index(usize),
}

/// Diagnostic payload of [`BalanceError::UnsolvableSystem`]: why the augmented
/// system has no unique solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsolvableCause {
    /// Number of compounds does not match the element count plus one.
    NotSquare { equations: usize, unknowns: usize },
    /// The matrix is singular - no unique balancing ratio under the chosen
    /// normalization.
    Singular,
    /// `Normalization::Index` points past the end of the coefficient vector.
    FixedCoefficientOutOfRange { index: usize, unknowns: usize },
}

impl fmt::Display for UnsolvableCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsolvableCause::NotSquare { equations, unknowns } => write!(
                f,
                "system is not square: {} equations for {} unknown coefficients",
                equations, unknowns
            ),
            UnsolvableCause::Singular => write!(
                f,
                "matrix is singular: no unique balancing ratio under the chosen normalization"
            ),
            UnsolvableCause::FixedCoefficientOutOfRange { index, unknowns } => write!(
                f,
                "normalized coefficient index {} is out of range for {} unknowns",
                index, unknowns
            ),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BalanceError {
    /// The two sides contain different element sets, so the reaction cannot
    /// possibly conserve the elements present on one side only.
    #[error("element sets of the two sides differ: left side only {left_only:?}, right side only {right_only:?}")]
    ElementMismatch {
        left_only: BTreeSet<Element>,
        right_only: BTreeSet<Element>,
    },
    /// The augmented system is not square or is singular.
    #[error("stoichiometric system is unsolvable: {0}")]
    UnsolvableSystem(UnsolvableCause),
}

/// Builds and solves the stoichiometric linear system for one reaction.
/// Balancing is a pure computation: the balancer holds no state besides its
/// inputs, and repeated `balance` calls give identical results.
#[derive(Debug, Clone)]
pub struct ReactionBalancer {
    lhs: Vec<Compound>,
    rhs: Vec<Compound>,
    normalization: Normalization,
}

impl ReactionBalancer {
    pub fn new(lhs: Vec<Compound>, rhs: Vec<Compound>) -> Self {
        ReactionBalancer {
            lhs,
            rhs,
            normalization: Normalization::default(),
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Balances the reaction: one conservation row per shared element, one
    /// normalization row, dense LU solve, solution vector split back into
    /// per-side coefficient lists in input order.
    pub fn balance(&self) -> Result<Reaction, BalanceError> {
        let elements = self.shared_elements()?;
        let n = self.lhs.len();
        let m = self.rhs.len();
        let unknowns = n + m;
        let equations = elements.len() + 1;
        debug!(
            "balancing {} lhs + {} rhs compounds over {} elements",
            n,
            m,
            elements.len()
        );
        if equations != unknowns {
            warn!(
                "augmented system is not square: {} equations, {} unknowns",
                equations, unknowns
            );
            return Err(BalanceError::UnsolvableSystem(UnsolvableCause::NotSquare {
                equations,
                unknowns,
            }));
        }
        let fixed = self.fixed_index(unknowns)?;

        // one row per element: lhs atom counts positive, rhs negated, so a
        // balanced reaction satisfies row * coefficients = 0
        let mut a = DMatrix::zeros(equations, unknowns);
        for (row, elm) in elements.iter().enumerate() {
            for (i, compound) in self.lhs.iter().enumerate() {
                a[(row, i)] = compound.atom_count(*elm) as f64;
            }
            for (j, compound) in self.rhs.iter().enumerate() {
                a[(row, n + j)] = -(compound.atom_count(*elm) as f64);
            }
        }
        // normalization row: fixed coefficient = 1
        a[(equations - 1, fixed)] = 1.0;
        let mut b = DVector::zeros(equations);
        b[equations - 1] = 1.0;
        debug!("augmented matrix {}", a);

        let lu = a.lu();
        if lu.determinant().abs() < SINGULARITY_TOL {
            error!("conservation matrix is singular");
            return Err(BalanceError::UnsolvableSystem(UnsolvableCause::Singular));
        }
        let x = lu
            .solve(&b)
            .ok_or(BalanceError::UnsolvableSystem(UnsolvableCause::Singular))?;
        debug!("solved coefficient vector {}", x);

        let lhs_coeff = x.as_slice()[..n].to_vec();
        let rhs_coeff = x.as_slice()[n..].to_vec();
        Ok(Reaction {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            lhs_coeff,
            rhs_coeff,
        })
    }

    /// The element set shared by both sides; differing sets are a hard
    /// precondition failure, checked before any numeric work.
    fn shared_elements(&self) -> Result<BTreeSet<Element>, BalanceError> {
        let left: BTreeSet<Element> = self.lhs.iter().flat_map(|c| c.elements()).collect();
        let right: BTreeSet<Element> = self.rhs.iter().flat_map(|c| c.elements()).collect();
        if left != right {
            let left_only: BTreeSet<Element> = left.difference(&right).copied().collect();
            let right_only: BTreeSet<Element> = right.difference(&left).copied().collect();
            warn!(
                "element mismatch, left side only: {:?}, right side only: {:?}",
                left_only, right_only
            );
            return Err(BalanceError::ElementMismatch {
                left_only,
                right_only,
            });
        }
        Ok(left)
    }

    fn fixed_index(&self, unknowns: usize) -> Result<usize, BalanceError> {
        match self.normalization {
            Normalization::Last => Ok(unknowns - 1),
            Normalization::Index(index) if index < unknowns => Ok(index),
            Normalization::Index(index) => {
                warn!(
                    "normalized coefficient index {} out of range for {} unknowns",
                    index, unknowns
                );
                Err(BalanceError::UnsolvableSystem(
                    UnsolvableCause::FixedCoefficientOutOfRange { index, unknowns },
                ))
            }
        }
    }
}

/// A balanced chemical reaction: the two compound lists and their
/// stoichiometric coefficients, positionally matched to the input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    lhs: Vec<Compound>,
    rhs: Vec<Compound>,
    lhs_coeff: Vec<f64>,
    rhs_coeff: Vec<f64>,
}

impl Reaction {
    /// Balances `lhs -> rhs` under the default normalization (last
    /// coefficient fixed to 1).
    pub fn new(lhs: Vec<Compound>, rhs: Vec<Compound>) -> Result<Self, BalanceError> {
        ReactionBalancer::new(lhs, rhs).balance()
    }

    pub fn lhs(&self) -> &[Compound] {
        &self.lhs
    }

    pub fn rhs(&self) -> &[Compound] {
        &self.rhs
    }

    pub fn lhs_coefficients(&self) -> &[f64] {
        &self.lhs_coeff
    }

    pub fn rhs_coefficients(&self) -> &[f64] {
        &self.rhs_coeff
    }

    /// Prints the balanced equation as a table, one row per compound.
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("side"),
            Cell::new("formula"),
            Cell::new("coefficient"),
        ]));
        for (compound, coeff) in self.lhs.iter().zip(&self.lhs_coeff) {
            table.add_row(Row::new(vec![
                Cell::new("lhs"),
                Cell::new(&compound.to_string()),
                Cell::new(&coeff.to_string()),
            ]));
        }
        for (compound, coeff) in self.rhs.iter().zip(&self.rhs_coeff) {
            table.add_row(Row::new(vec![
                Cell::new("rhs"),
                Cell::new(&compound.to_string()),
                Cell::new(&coeff.to_string()),
            ]));
        }
        table.printstd();
    }
}

/// Renders the balanced equation, e.g. `1 H2 + 1 O -> 1 H2O`.
impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |compounds: &[Compound], coeffs: &[f64]| {
            compounds
                .iter()
                .zip(coeffs)
                .map(|(compound, coeff)| format!("{} {}", coeff, compound))
                .collect::<Vec<_>>()
                .join(" + ")
        };
        write!(
            f,
            "{} -> {}",
            side(&self.lhs, &self.lhs_coeff),
            side(&self.rhs, &self.rhs_coeff)
        )
    }
}
