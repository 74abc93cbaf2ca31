/// The module takes as input the left hand side and the right hand side of a
/// chemical reaction, each given as an ordered list of compounds, and produces
/// the following data:
/// 1) a vector of stoichiometric coefficients of the reactants, one per left-side compound
/// 2) a vector of stoichiometric coefficients of the products, one per right-side compound
///
/// The coefficients are found from element conservation: one linear equation
/// per element plus one normalization equation fixing a chosen coefficient to 1.
/// # Examples
/// ```
/// use StoiChe::Balancer::reaction_balancer::Reaction;
/// use StoiChe::Composition::compound::Compound;
/// use StoiChe::Composition::periodic_table::Element;
/// let h2 = Compound::builder().add(Element::H, 2).build();
/// let o = Compound::builder().add(Element::O, 1).build();
/// let water = Compound::builder().add(Element::H, 2).add(Element::O, 1).build();
/// let reaction = Reaction::new(vec![h2, o], vec![water]).unwrap();
/// println!("{}", reaction);
/// assert_eq!(reaction.lhs_coefficients(), &[1.0, 1.0]);
/// assert_eq!(reaction.rhs_coefficients(), &[1.0]);
/// ```
pub mod reaction_balancer;
