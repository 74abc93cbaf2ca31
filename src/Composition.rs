/// Table of chemical elements and their standard atomic masses. Elements are
/// identity tokens (symbol only), comparable and hashable, so they can key
/// ordered maps and sets.
/// # Examples
/// ```
/// use StoiChe::Composition::periodic_table::Element;
/// let elm = Element::from_symbol("Fe").unwrap();
/// assert_eq!(elm, Element::Fe);
/// println!("{} has atomic mass {} g/mol", elm, elm.atomic_mass());
/// ```
pub mod periodic_table;
/// Data model of chemical species: a molecule component is an (element, count)
/// pair, a compound is an aggregated composition mapping each element to its
/// total atom count. Both answer the two queries the reaction balancer needs -
/// atom count per element and the set of distinct elements.
/// # Examples
/// ```
/// use StoiChe::Composition::compound::{ChemEntity, Compound};
/// use StoiChe::Composition::periodic_table::Element;
/// let water = Compound::builder()
///     .add(Element::H, 2)
///     .add(Element::O, 1)
///     .build();
/// assert_eq!(water.atom_count(Element::H), 2);
/// assert_eq!(water.to_string(), "H2O");
/// println!("molar mass of {}: {} g/mol", water, water.molar_mass());
/// ```
pub mod compound;
mod compound_tests;
