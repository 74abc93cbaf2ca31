//! # Chemical species data model
//!
//! ## Aim
//! This module holds the composition data model the reaction balancer works on:
//! `MoleculeComponent` - an (element, positive atom count) pair, and `Compound` -
//! an aggregated composition storing the total atom count per element.
//!
//! ## Main Data Structures and Logic
//! - `ChemEntity` trait: the two pure queries every chemical species answers -
//!   `atom_count` per element and the set of distinct `elements`
//! - `MoleculeComponent`: smallest composition unit, count is at least 1
//! - `Compound`: ordered map from `Element` to total atom count; a repeated
//!   element in the input component list is rejected, never silently merged or
//!   dropped - callers aggregate counts through `CompoundBuilder` instead
//! - `CompoundBuilder`: explicit aggregation, `add` sums counts per element
//!
//! ## Key Methods
//! - `Compound::from_components()`: construction from a pre-aggregated list
//! - `Compound::from_symbols()`: the same from (symbol, count) pairs
//! - `Compound::molar_mass()`: mass from the standard atomic masses
//! - `Display` renders the composition as a Hill-order formula string

use crate::Composition::periodic_table::Element;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("atom count of element {0} must be at least 1")]
    ZeroAtomCount(Element),
    #[error("element {0} listed more than once; aggregate counts per element before constructing a compound")]
    DuplicateElement(Element),
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),
}

/// Common capability of every chemical species: counting atoms of a given
/// element and enumerating the distinct elements present.
pub trait ChemEntity {
    /// Total number of atoms of the element, 0 if the element is absent.
    fn atom_count(&self, elm: Element) -> usize;
    /// The set of distinct elements, in periodic-table order.
    fn elements(&self) -> BTreeSet<Element>;
}

/// An (element, count) pair - the smallest unit of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoleculeComponent {
    count: usize,
    element: Element,
}

impl MoleculeComponent {
    pub fn new(count: usize, element: Element) -> Result<Self, CompositionError> {
        if count == 0 {
            return Err(CompositionError::ZeroAtomCount(element));
        }
        Ok(MoleculeComponent { count, element })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn element(&self) -> Element {
        self.element
    }
}

impl ChemEntity for MoleculeComponent {
    fn atom_count(&self, elm: Element) -> usize {
        if elm == self.element { self.count } else { 0 }
    }

    fn elements(&self) -> BTreeSet<Element> {
        BTreeSet::from([self.element])
    }
}

/// One reactant or product species, stored as an ordered map from element to
/// its total atom count. An empty compound is permitted - it simply contains
/// no elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    composition: BTreeMap<Element, usize>,
}

impl Compound {
    /// Constructs a compound from a list of molecule components with counts
    /// already aggregated per element. A repeated element is an error - counts
    /// are NOT summed here, use [`CompoundBuilder`] for that.
    pub fn from_components(components: &[MoleculeComponent]) -> Result<Self, CompositionError> {
        let mut composition = BTreeMap::new();
        for mc in components {
            if composition.insert(mc.element(), mc.count()).is_some() {
                return Err(CompositionError::DuplicateElement(mc.element()));
            }
        }
        Ok(Compound { composition })
    }

    /// Constructs a compound from (symbol, count) pairs. Counts of a repeated
    /// symbol are aggregated; a zero count or an unknown symbol is an error.
    pub fn from_symbols(pairs: &[(&str, usize)]) -> Result<Self, CompositionError> {
        let mut builder = CompoundBuilder::new();
        for (symbol, count) in pairs {
            let element = Element::from_symbol(symbol)?;
            if *count == 0 {
                return Err(CompositionError::ZeroAtomCount(element));
            }
            builder = builder.add(element, *count);
        }
        Ok(builder.build())
    }

    pub fn builder() -> CompoundBuilder {
        CompoundBuilder::new()
    }

    /// The composition map itself, element to total atom count.
    pub fn composition(&self) -> &BTreeMap<Element, usize> {
        &self.composition
    }

    /// Molar mass of the compound, g/mol.
    pub fn molar_mass(&self) -> f64 {
        self.composition
            .iter()
            .map(|(elm, count)| elm.atomic_mass() * (*count as f64))
            .sum()
    }
}

impl ChemEntity for Compound {
    fn atom_count(&self, elm: Element) -> usize {
        self.composition.get(&elm).copied().unwrap_or(0)
    }

    fn elements(&self) -> BTreeSet<Element> {
        self.composition.keys().copied().collect()
    }
}

/// Hill-order formula: carbon first, then hydrogen, then the remaining
/// elements alphabetically; plain alphabetical order when there is no carbon.
impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(&'static str, usize)> = self
            .composition
            .iter()
            .map(|(elm, count)| (elm.symbol(), *count))
            .collect();
        entries.sort_by_key(|(symbol, _)| *symbol);
        let has_carbon = self.composition.contains_key(&Element::C);
        if has_carbon {
            entries.sort_by_key(|(symbol, _)| match *symbol {
                "C" => 0,
                "H" => 1,
                _ => 2,
            });
        }
        for (symbol, count) in entries {
            if count == 1 {
                write!(f, "{}", symbol)?;
            } else {
                write!(f, "{}{}", symbol, count)?;
            }
        }
        Ok(())
    }
}

/// Explicit aggregation step for building a compound: `add` sums counts per
/// element, so two water entries with different hydration counts end up as one
/// total instead of being silently deduplicated.
#[derive(Debug, Clone, Default)]
pub struct CompoundBuilder {
    counts: BTreeMap<Element, usize>,
}

impl CompoundBuilder {
    pub fn new() -> Self {
        CompoundBuilder::default()
    }

    /// Adds `count` atoms of the element to the running totals. A zero count
    /// leaves the composition unchanged.
    pub fn add(mut self, element: Element, count: usize) -> Self {
        if count > 0 {
            *self.counts.entry(element).or_insert(0) += count;
        }
        self
    }

    pub fn add_component(self, component: MoleculeComponent) -> Self {
        self.add(component.element(), component.count())
    }

    pub fn build(self) -> Compound {
        Compound {
            composition: self.counts,
        }
    }
}
